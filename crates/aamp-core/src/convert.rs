// ── API-to-domain type conversions ──
//
// Bridges raw `aamp_api` response types into canonical `model` types.
// Unparseable optional values (e.g. a malformed IP) are dropped, not errors.

use std::net::IpAddr;

use aamp_api::official::types::{AudioFileResponse, AudioSessionResponse, TargetResponse};
use aamp_api::webapi::models::HardwareDevice;

use crate::model::{
    AudioFile, AudioTarget, DeviceHardware, SessionId, SinkInfo, TargetId, TargetInfo, TargetKind,
};

fn parse_ip(raw: Option<&String>) -> Option<IpAddr> {
    raw.and_then(|s| s.parse().ok())
}

// ── Targets ──────────────────────────────────────────────────────────

impl TargetInfo {
    /// Build from a listing entry. `None` when the entry has no `type`.
    pub fn from_response(target: TargetResponse) -> Option<Self> {
        let kind = TargetKind::from_wire(target.target_type.as_deref()?);
        Some(Self {
            id: TargetId::from(target.id),
            kind,
            name: target
                .nice_name
                .unwrap_or_else(|| Self::UNKNOWN_NAME.to_owned()),
            enabled: target.enabled,
            status: target
                .status
                .unwrap_or_else(|| Self::UNKNOWN_STATUS.to_owned()),
            valid: target.valid,
            children: target.children.into_iter().map(TargetId::from).collect(),
        })
    }
}

impl AudioTarget {
    pub fn from_response(target: TargetResponse) -> Option<Self> {
        TargetInfo::from_response(target).map(Self::from_info)
    }
}

// ── Audio files ──────────────────────────────────────────────────────

impl From<AudioFileResponse> for AudioFile {
    fn from(f: AudioFileResponse) -> Self {
        Self {
            id: f.id,
            name: f
                .nice_name
                .unwrap_or_else(|| TargetInfo::UNKNOWN_NAME.to_owned()),
        }
    }
}

impl From<AudioSessionResponse> for SessionId {
    fn from(s: AudioSessionResponse) -> Self {
        Self(s.id)
    }
}

// ── Hardware ─────────────────────────────────────────────────────────

impl From<HardwareDevice> for DeviceHardware {
    fn from(d: HardwareDevice) -> Self {
        Self {
            mac: d.mac,
            ip: parse_ip(d.ip_address.as_ref()),
            model_name: d.product_name,
            model_id: d.model_id,
            firmware_version: d.fw_version,
            sinks: d
                .sinks
                .into_iter()
                .map(|sink| SinkInfo {
                    id: sink.id,
                    zone_ids: sink.zones.into_iter().map(|z| z.id).collect(),
                })
                .collect(),
        }
    }
}
