//! Device command handlers.

use tabled::Tabled;

use aamp_core::{AudioDevice, AudioManager, DeviceHardware};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sink")]
    sink: String,
}

impl From<&AudioDevice> for DeviceRow {
    fn from(d: &AudioDevice) -> Self {
        Self {
            id: d.id().to_string(),
            name: d.info.name.clone(),
            enabled: util::yes_no(d.info.enabled).into(),
            status: d.info.status.clone(),
            sink: d.sink_id().map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct HardwareRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
    #[tabled(rename = "Sinks")]
    sinks: String,
}

impl From<&DeviceHardware> for HardwareRow {
    fn from(h: &DeviceHardware) -> Self {
        Self {
            mac: h.mac.clone().unwrap_or_default(),
            ip: h.ip.map(|ip| ip.to_string()).unwrap_or_default(),
            model: h.model_name.clone().unwrap_or_default(),
            firmware: h.firmware_version.clone().unwrap_or_default(),
            sinks: sink_list(h),
        }
    }
}

fn sink_list(h: &DeviceHardware) -> String {
    h.sinks
        .iter()
        .map(|s| s.id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn hardware_detail(h: &DeviceHardware) -> String {
    let mut lines = vec![
        format!("MAC:      {}", h.mac.as_deref().unwrap_or("-")),
        format!(
            "IP:       {}",
            h.ip.map_or_else(|| "-".into(), |ip| ip.to_string())
        ),
        format!("Model:    {}", h.model_name.as_deref().unwrap_or("-")),
        format!("Model ID: {}", h.model_id.as_deref().unwrap_or("-")),
        format!("Firmware: {}", h.firmware_version.as_deref().unwrap_or("-")),
    ];
    for sink in &h.sinks {
        let zones = sink
            .zone_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Sink {}:   zones {zones}", sink.id));
    }
    lines.join("\n")
}

fn detail(d: &AudioDevice) -> String {
    let mut out = util::target_detail(&d.info);
    out.push_str(&format!(
        "\nSink:     {}",
        d.sink_id().map_or_else(|| "-".into(), |s| s.to_string())
    ));
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    manager: &AudioManager,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices = manager.audio_devices().await?;
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::from(d),
                |d| d.id().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let device = util::resolve_device(manager, &device).await?;
            let out = output::render_single(&global.output, &device, detail, |d| {
                d.id().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Hardware { device: None } => {
            if !manager.unofficial_features_enabled() {
                return Err(CliError::Unsupported {
                    operation: "devices hardware".into(),
                    required: "web API credentials".into(),
                });
            }
            let hardware = manager.hardware_devices().await?;
            let out = output::render_list(
                &global.output,
                &hardware,
                |h| HardwareRow::from(h),
                |h| h.mac.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Hardware {
            device: Some(device),
        } => {
            let device = util::resolve_device(manager, &device).await?;
            let hardware = manager
                .device_hardware(&device)
                .await?
                .ok_or_else(|| {
                    CliError::not_found("device hardware", device.id().as_str(), "devices hardware")
                })?;
            let out = output::render_single(&global.output, &hardware, hardware_detail, |h| {
                h.mac.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Ding { device, length } => {
            let device = util::resolve_device(manager, &device).await?;
            manager.ding(&device, length).await?;
            if !global.quiet {
                eprintln!("Test tone started on {} for {length}s", device.id());
            }
            Ok(())
        }

        DevicesCommand::Assign { device, zone } => {
            let device = util::resolve_device(manager, &device).await?;
            let assigned = manager
                .assign_to_zone(&device, util::zone_selector(&zone))
                .await?;
            if !assigned {
                return Err(CliError::ApiError {
                    message: format!("server did not confirm moving {} to {zone}", device.id()),
                    status: None,
                });
            }
            if !global.quiet {
                eprintln!("{} assigned to zone {zone}", device.id());
            }
            Ok(())
        }

        DevicesCommand::ParentZone { device } => {
            let device = util::resolve_device(manager, &device).await?;
            let zone = manager.parent_zone(&device).await?;
            let out = output::render_single(
                &global.output,
                &zone,
                |z| util::target_detail(&z.info),
                |z| z.id().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
