//! Zone command handlers.

use aamp_core::AudioManager;

use crate::cli::{GlobalOpts, ZonesArgs, ZonesCommand};
use crate::error::CliError;
use crate::output;

use super::util::TargetRow;

pub async fn handle(
    manager: &AudioManager,
    args: ZonesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ZonesCommand::List => {
            let zones = manager.audio_zones().await?;
            let out = output::render_list(
                &global.output,
                &zones,
                |z| TargetRow::from(&z.info),
                |z| z.id().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
