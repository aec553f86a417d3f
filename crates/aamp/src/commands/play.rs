//! Playback command handler.

use aamp_core::{AudioManager, PlayOptions, Priority, TargetId};

use crate::cli::{GlobalOpts, PlayArgs, PriorityArg};
use crate::error::CliError;
use crate::output;

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
        }
    }
}

pub async fn handle(
    manager: &AudioManager,
    args: PlayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let targets: Vec<TargetId> = args.targets.iter().map(TargetId::new).collect();
    let options = PlayOptions {
        repeat: args.repeat,
        priority: args.priority.into(),
    };

    let Some(session) = manager
        .play_audio_files(&targets, &args.files, options)
        .await?
    else {
        if !global.quiet {
            eprintln!("Nothing to play");
        }
        return Ok(());
    };

    let out = output::render_single(
        &global.output,
        &session,
        |s| format!("Session: {s}"),
        ToString::to_string,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
