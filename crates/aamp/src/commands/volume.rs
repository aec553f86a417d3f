//! Volume calibration command handlers.

use serde::Serialize;
use tabled::Tabled;

use aamp_core::{AudioManager, VolumeCalibration, VolumeCategory, VolumeSelection};

use crate::cli::{GlobalOpts, VolumeArgs, VolumeCategoryArg, VolumeCommand};
use crate::error::CliError;
use crate::output;

use super::util;

impl From<VolumeCategoryArg> for VolumeSelection {
    fn from(c: VolumeCategoryArg) -> Self {
        match c {
            VolumeCategoryArg::All => Self::All,
            VolumeCategoryArg::Music => Self::Category(VolumeCategory::Music),
            VolumeCategoryArg::Announcement => Self::Category(VolumeCategory::Announcement),
            VolumeCategoryArg::Paging => Self::Category(VolumeCategory::Paging),
        }
    }
}

#[derive(Serialize)]
struct VolumeEntry {
    category: String,
    default_gain_offset: Option<i32>,
}

#[derive(Tabled)]
struct VolumeRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Gain offset")]
    offset: String,
}

impl From<&VolumeEntry> for VolumeRow {
    fn from(e: &VolumeEntry) -> Self {
        Self {
            category: e.category.clone(),
            offset: e
                .default_gain_offset
                .map_or_else(|| "-".into(), |v| v.to_string()),
        }
    }
}

fn entries(levels: VolumeCalibration) -> Vec<VolumeEntry> {
    levels
        .into_iter()
        .map(|(category, setting)| VolumeEntry {
            category,
            default_gain_offset: setting.default_gain_offset,
        })
        .collect()
}

pub async fn handle(
    manager: &AudioManager,
    args: VolumeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VolumeCommand::Get { target, category } => {
            let target = util::resolve_target(manager, &target).await?;
            let levels = manager
                .volume_calibration(&target, category.into())
                .await?;
            let entries = entries(levels);
            let out = output::render_list(
                &global.output,
                &entries,
                |e| VolumeRow::from(e),
                |e| {
                    let offset = e.default_gain_offset.map(|v| v.to_string());
                    format!("{}={}", e.category, offset.unwrap_or_default())
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VolumeCommand::Set {
            target,
            level,
            category,
        } => {
            let target = util::resolve_target(manager, &target).await?;
            let selection = VolumeSelection::from(category);
            manager
                .set_volume_calibration(&target, level, selection)
                .await?;
            if !global.quiet {
                eprintln!("{selection} calibration of {} set to {level}", target.id());
            }
            Ok(())
        }
    }
}
