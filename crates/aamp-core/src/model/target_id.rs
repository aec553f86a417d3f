// ── Target identity ──
//
// AAMP target ids look like `zon_12`, `sit_3`, `dev_41`. The documented API
// uses the whole string; the web API addresses zones, sites and sinks by the
// number after the first underscore.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an audio target in the documented API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub const ZONE_PREFIX: &'static str = "zon";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the physical zone with web API number `number`.
    pub fn zone(number: u64) -> Self {
        Self(format!("{}_{number}", Self::ZONE_PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part after the first `_`, if there is one.
    pub fn number(&self) -> Option<u64> {
        let (_, number) = self.0.split_once('_')?;
        number.parse().ok()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TargetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for TargetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_is_suffix_after_first_underscore() {
        assert_eq!(TargetId::from("zon_12").number(), Some(12));
        assert_eq!(TargetId::from("dev_7").number(), Some(7));
        assert_eq!(TargetId::from("physical").number(), None);
        assert_eq!(TargetId::from("dev_abc").number(), None);
    }

    #[test]
    fn zone_id_round_trips() {
        let id = TargetId::zone(6);
        assert_eq!(id.as_str(), "zon_6");
        assert_eq!(id.number(), Some(6));
    }
}
