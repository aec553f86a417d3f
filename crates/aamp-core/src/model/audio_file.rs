// ── Audio files and playback sessions ──

use serde::Serialize;
use std::fmt;

pub use aamp_api::official::types::Priority;

/// An audio clip uploaded to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioFile {
    pub id: String,
    /// Display name; `"Unknown"` when the server has none.
    pub name: String,
}

/// Identifier of a one-shot playback session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options for a one-shot playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    /// How many times the files are played.
    pub repeat: u32,
    pub priority: Priority,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            repeat: 1,
            priority: Priority::default(),
        }
    }
}
