// ── Hardware details from the web API ──

use std::net::IpAddr;

use serde::Serialize;

/// Physical details of a device, as listed by the web interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceHardware {
    pub mac: Option<String>,
    pub ip: Option<IpAddr>,
    pub model_name: Option<String>,
    pub model_id: Option<String>,
    pub firmware_version: Option<String>,
    pub sinks: Vec<SinkInfo>,
}

impl DeviceHardware {
    /// Whether one of the sinks has the given web API id.
    pub fn has_sink(&self, sink_id: u64) -> bool {
        self.sinks.iter().any(|s| s.id == sink_id)
    }

    /// Zone of the first sink's first assignment.
    pub fn primary_zone(&self) -> Option<u64> {
        self.sinks.first()?.zone_ids.first().copied()
    }
}

/// An audio output and the numeric ids of the zones it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkInfo {
    pub id: u64,
    pub zone_ids: Vec<u64>,
}
