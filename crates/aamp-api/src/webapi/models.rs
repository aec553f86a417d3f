// Web API response types
//
// Models for the AAMP web interface's JSON API. Fields use `#[serde(default)]`
// liberally because the endpoints are undocumented and field presence varies
// across server releases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ── OAuth ────────────────────────────────────────────────────────────

/// Response of `POST /oauth/token`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ── Response Envelope ────────────────────────────────────────────────

/// `{ "data": ... }` wrapper used by most web endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Hardware device entry from `GET /webapi/v1/devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareDevice {
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    /// Hardware model identifier (e.g. `C1410`).
    #[serde(default, rename = "type")]
    pub model_id: Option<String>,
    #[serde(default)]
    pub fw_version: Option<String>,
    /// Audio outputs of the device. The sink id matches the numeric part of
    /// the device's target id in the documented API.
    #[serde(default)]
    pub sinks: Vec<Sink>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HardwareDevice {
    /// Whether one of this device's sinks has the given id.
    pub fn has_sink(&self, sink_id: u64) -> bool {
        self.sinks.iter().any(|s| s.id == sink_id)
    }
}

/// An audio output and the zones it is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sink {
    pub id: u64,
    #[serde(default)]
    pub zones: Vec<ZoneRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reference to a zone by its numeric web API id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRef {
    pub id: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The device listing comes back either bare or wrapped in `data`,
/// depending on server release.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DeviceListing {
    Bare(Vec<HardwareDevice>),
    Wrapped { data: Vec<HardwareDevice> },
}

impl DeviceListing {
    pub fn into_devices(self) -> Vec<HardwareDevice> {
        match self {
            Self::Bare(devices) | Self::Wrapped { data: devices } => devices,
        }
    }
}

// ── Sink assignment ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SinkAssignmentResponse {
    #[serde(default)]
    pub successful_ids: Vec<u64>,
}

// ── Volume calibration ───────────────────────────────────────────────

/// Whether a calibration call addresses a zone or a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CalibrationScope {
    #[strum(serialize = "zones")]
    Zones,
    #[strum(serialize = "sites")]
    Sites,
}

/// Volume category a calibration level applies to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum VolumeCategory {
    Music,
    Announcement,
    Paging,
}

impl VolumeCategory {
    /// Order used when one level is applied to every category.
    pub const ALL: [Self; 3] = [Self::Paging, Self::Announcement, Self::Music];
}

/// Calibration entry for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSetting {
    #[serde(default)]
    pub default_gain_offset: Option<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Calibration levels keyed by category name as the server reports them.
pub type VolumeCalibration = BTreeMap<String, VolumeSetting>;

#[derive(Debug, Deserialize)]
pub(crate) struct VolumesPayload {
    pub volumes: VolumeCalibration,
}
