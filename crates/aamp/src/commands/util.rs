//! Shared helpers for command handlers.

use tabled::Tabled;

use aamp_core::{AudioDevice, AudioManager, AudioTarget, TargetId, TargetInfo, ZoneSelector};

use crate::error::CliError;

const DEVICE_PREFIX: &str = "dev";

/// Accept either a full device ID (`dev_12`) or the bare sink number (`12`).
pub fn device_id(raw: &str) -> TargetId {
    if raw.parse::<u64>().is_ok() {
        TargetId::new(format!("{DEVICE_PREFIX}_{raw}"))
    } else {
        TargetId::new(raw)
    }
}

/// Accept either a zone ID (`zon_3`) or a zone number (`3`).
pub fn zone_selector(raw: &str) -> ZoneSelector {
    match raw.parse::<u64>() {
        Ok(number) => ZoneSelector::Number(number),
        Err(_) => ZoneSelector::Id(TargetId::new(raw)),
    }
}

/// Look up a target by exact ID.
pub async fn resolve_target(manager: &AudioManager, raw: &str) -> Result<AudioTarget, CliError> {
    manager
        .audio_target(&TargetId::new(raw))
        .await?
        .ok_or_else(|| CliError::not_found("target", raw, "targets list"))
}

/// Look up a device by ID or sink number, rejecting non-device targets.
pub async fn resolve_device(manager: &AudioManager, raw: &str) -> Result<AudioDevice, CliError> {
    let id = device_id(raw);
    let target = manager
        .audio_target(&id)
        .await?
        .ok_or_else(|| CliError::not_found("device", id.as_str(), "devices list"))?;
    let kind = target.kind().as_wire().to_owned();
    target.into_device().ok_or_else(|| CliError::Validation {
        field: "device".into(),
        reason: format!("{id} is a {kind}, not a device"),
    })
}

// ── Shared target rendering ──────────────────────────────────────────

#[derive(Tabled)]
pub struct TargetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Children")]
    children: usize,
}

impl From<&TargetInfo> for TargetRow {
    fn from(t: &TargetInfo) -> Self {
        Self {
            id: t.id.to_string(),
            kind: t.kind.as_wire().to_owned(),
            name: t.name.clone(),
            enabled: yes_no(t.enabled).into(),
            status: t.status.clone(),
            children: t.children.len(),
        }
    }
}

pub fn target_detail(t: &TargetInfo) -> String {
    let children = if t.children.is_empty() {
        "-".to_owned()
    } else {
        t.children
            .iter()
            .map(TargetId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    [
        format!("ID:       {}", t.id),
        format!("Type:     {}", t.kind.as_wire()),
        format!("Name:     {}", t.name),
        format!("Enabled:  {}", yes_no(t.enabled)),
        format!("Valid:    {}", yes_no(t.valid)),
        format!("Status:   {}", t.status),
        format!("Children: {children}"),
    ]
    .join("\n")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_becomes_device_id() {
        assert_eq!(device_id("12").as_str(), "dev_12");
        assert_eq!(device_id("dev_12").as_str(), "dev_12");
    }

    #[test]
    fn zone_selector_accepts_both_forms() {
        assert!(matches!(zone_selector("3"), ZoneSelector::Number(3)));
        assert!(matches!(
            zone_selector("zon_3"),
            ZoneSelector::Id(ref id) if id.as_str() == "zon_3"
        ));
    }
}
