// ── Audio target domain types ──

use serde::{Serialize, Serializer};
use std::fmt;

use super::target_id::TargetId;

/// Kind of audio target, normalized from the API's `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetKind {
    PhysicalZone,
    Site,
    Device,
    /// Any type this library has no specific handling for.
    Other(String),
}

impl TargetKind {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "physicalZone" => Self::PhysicalZone,
            "site" => Self::Site,
            "device" => Self::Device,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::PhysicalZone => "physicalZone",
            Self::Site => "site",
            Self::Device => "device",
            Self::Other(raw) => raw,
        }
    }

    /// Zones and sites carry volume calibration.
    pub fn is_calibratable(&self) -> bool {
        matches!(self, Self::PhysicalZone | Self::Site)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for TargetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

/// Fields every audio target carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetInfo {
    pub id: TargetId,
    pub kind: TargetKind,
    /// Display name; `"Unknown"` when the server has none.
    pub name: String,
    /// Whether the target currently plays audio.
    pub enabled: bool,
    pub status: String,
    pub valid: bool,
    pub children: Vec<TargetId>,
}

impl TargetInfo {
    pub const UNKNOWN_NAME: &'static str = "Unknown";
    pub const UNKNOWN_STATUS: &'static str = "unknown";
}

/// A physical zone: a group of devices that play together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PhysicalZone {
    pub info: TargetInfo,
}

impl PhysicalZone {
    pub fn id(&self) -> &TargetId {
        &self.info.id
    }

    /// Ids of the devices assigned to this zone.
    pub fn members(&self) -> &[TargetId] {
        &self.info.children
    }
}

/// A site: a group of zones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Site {
    pub info: TargetInfo,
}

impl Site {
    pub fn id(&self) -> &TargetId {
        &self.info.id
    }

    pub fn zones(&self) -> &[TargetId] {
        &self.info.children
    }
}

/// A single speaker or other audio device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AudioDevice {
    pub info: TargetInfo,
}

impl AudioDevice {
    pub fn id(&self) -> &TargetId {
        &self.info.id
    }

    /// Web API sink id of this device (the numeric part of its target id).
    pub fn sink_id(&self) -> Option<u64> {
        self.info.id.number()
    }

    /// Whether the device can be addressed for a test tone ("ding").
    pub fn supports_test_tone(&self) -> bool {
        self.sink_id().is_some()
    }
}

/// An audio target cast to its specific kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AudioTarget {
    Zone(PhysicalZone),
    Site(Site),
    Device(AudioDevice),
    Other(TargetInfo),
}

impl AudioTarget {
    /// Cast generic target info by its kind.
    pub fn from_info(info: TargetInfo) -> Self {
        match info.kind {
            TargetKind::PhysicalZone => Self::Zone(PhysicalZone { info }),
            TargetKind::Site => Self::Site(Site { info }),
            TargetKind::Device => Self::Device(AudioDevice { info }),
            TargetKind::Other(_) => Self::Other(info),
        }
    }

    pub fn info(&self) -> &TargetInfo {
        match self {
            Self::Zone(z) => &z.info,
            Self::Site(s) => &s.info,
            Self::Device(d) => &d.info,
            Self::Other(info) => info,
        }
    }

    pub fn id(&self) -> &TargetId {
        &self.info().id
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn kind(&self) -> &TargetKind {
        &self.info().kind
    }

    pub fn children(&self) -> &[TargetId] {
        &self.info().children
    }

    pub fn as_zone(&self) -> Option<&PhysicalZone> {
        match self {
            Self::Zone(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_device(&self) -> Option<&AudioDevice> {
        match self {
            Self::Device(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_zone(self) -> Option<PhysicalZone> {
        match self {
            Self::Zone(z) => Some(z),
            _ => None,
        }
    }

    pub fn into_site(self) -> Option<Site> {
        match self {
            Self::Site(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_device(self) -> Option<AudioDevice> {
        match self {
            Self::Device(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for AudioTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.name(), self.kind(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, kind: &str) -> TargetInfo {
        TargetInfo {
            id: TargetId::from(id),
            kind: TargetKind::from_wire(kind),
            name: TargetInfo::UNKNOWN_NAME.into(),
            enabled: false,
            status: TargetInfo::UNKNOWN_STATUS.into(),
            valid: false,
            children: Vec::new(),
        }
    }

    #[test]
    fn casts_by_kind() {
        assert!(matches!(
            AudioTarget::from_info(info("zon_1", "physicalZone")),
            AudioTarget::Zone(_)
        ));
        assert!(matches!(
            AudioTarget::from_info(info("sit_1", "site")),
            AudioTarget::Site(_)
        ));
        assert!(matches!(
            AudioTarget::from_info(info("dev_1", "device")),
            AudioTarget::Device(_)
        ));
        assert!(matches!(
            AudioTarget::from_info(info("grp_1", "virtualZone")),
            AudioTarget::Other(_)
        ));
    }

    #[test]
    fn unknown_kind_keeps_wire_name() {
        let kind = TargetKind::from_wire("virtualZone");
        assert_eq!(kind.as_wire(), "virtualZone");
        assert!(!kind.is_calibratable());
        assert!(TargetKind::Site.is_calibratable());
    }

    #[test]
    fn device_sink_comes_from_id() {
        let device = AudioDevice {
            info: info("dev_41", "device"),
        };
        assert_eq!(device.sink_id(), Some(41));
        assert!(device.supports_test_tone());
    }
}
