// Documented API request/response types.
//
// Field names follow the server's camelCase JSON. Everything the client
// does not model explicitly lands in `extra` so newer server versions
// round-trip without loss.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── Targets ──────────────────────────────────────────────────────────

/// An audio target from `GET /api/v1.1/targets`.
///
/// Targets are physical zones, sites, devices, or (on newer servers)
/// other groupings. `type` is absent on some internal entries; callers
/// listing targets skip those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResponse {
    pub id: String,
    #[serde(default, rename = "type")]
    pub target_type: Option<String>,
    #[serde(default)]
    pub nice_name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub valid: bool,
    /// Child target identifiers (zones under a site, devices under a zone).
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TargetResponse {
    pub fn is_physical_zone(&self) -> bool {
        self.target_type.as_deref() == Some("physicalZone")
    }
}

// ── Audio files ──────────────────────────────────────────────────────

/// An uploaded audio clip from `GET /api/v1.1/audioFiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFileResponse {
    pub id: String,
    #[serde(default)]
    pub nice_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Audio sessions ───────────────────────────────────────────────────

/// Playback priority for one-shot sessions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    High,
    Medium,
    Low,
}

/// Body of `POST /api/v1.1/audioSessions/oneshotPlayAudioFiles`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OneshotPlayRequest<'a> {
    pub file_ids: &'a [String],
    pub prio: Priority,
    pub repeat: u32,
    pub targets: &'a [String],
}

/// Response of a one-shot session request. `id` identifies the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSessionResponse {
    pub id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn priority_parses_exact_wire_names() {
        assert_eq!("MEDIUM".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("medium".parse::<Priority>().is_err());
        assert_eq!(Priority::Low.to_string(), "LOW");
        assert!("URGENT".parse::<Priority>().is_err());
    }

    #[test]
    fn oneshot_body_uses_server_field_names() {
        let files = vec!["aud_1".to_owned()];
        let targets = vec!["zon_3".to_owned(), "dev_7".to_owned()];
        let body = OneshotPlayRequest {
            file_ids: &files,
            prio: Priority::High,
            repeat: 2,
            targets: &targets,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "fileIds": ["aud_1"],
                "prio": "HIGH",
                "repeat": 2,
                "targets": ["zon_3", "dev_7"]
            })
        );
    }

    #[test]
    fn target_keeps_unknown_fields() {
        let target: TargetResponse = serde_json::from_value(json!({
            "id": "zon_4",
            "type": "physicalZone",
            "niceName": "Lobby",
            "enabled": true,
            "status": "ok",
            "valid": true,
            "children": ["dev_9"],
            "color": "#ff0000"
        }))
        .unwrap();
        assert!(target.is_physical_zone());
        assert_eq!(target.children, vec!["dev_9"]);
        assert_eq!(target.extra["color"], "#ff0000");
    }
}
