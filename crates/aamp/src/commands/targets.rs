//! Target command handlers.

use aamp_core::{AudioManager, AudioTarget};

use crate::cli::{GlobalOpts, TargetsArgs, TargetsCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, TargetRow};

fn render_targets(global: &GlobalOpts, targets: &[AudioTarget]) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        targets,
        |t| TargetRow::from(t.info()),
        |t| t.id().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    manager: &AudioManager,
    args: TargetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TargetsCommand::List => {
            let targets = manager.audio_targets().await?;
            render_targets(global, &targets)
        }

        TargetsCommand::Get { target } => {
            let target = util::resolve_target(manager, &target).await?;
            let out = output::render_single(
                &global.output,
                &target,
                |t| util::target_detail(t.info()),
                |t| t.id().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TargetsCommand::Children { target } => {
            let target = util::resolve_target(manager, &target).await?;
            let children = manager.children(&target).await?;
            render_targets(global, &children)
        }
    }
}
