//! Site command handlers.

use aamp_core::AudioManager;

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::error::CliError;
use crate::output;

use super::util::TargetRow;

pub async fn handle(
    manager: &AudioManager,
    args: SitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let sites = manager.audio_sites().await?;
            let out = output::render_list(
                &global.output,
                &sites,
                |s| TargetRow::from(&s.info),
                |s| s.id().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
