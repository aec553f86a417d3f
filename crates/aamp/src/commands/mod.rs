//! Command dispatch: bridges CLI args -> `AudioManager` calls -> output.

pub mod config_cmd;
pub mod devices;
pub mod files;
pub mod play;
pub mod sites;
pub mod targets;
pub mod util;
pub mod volume;
pub mod zones;

use aamp_core::AudioManager;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    manager: &AudioManager,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Targets(args) => targets::handle(manager, args, global).await,
        Command::Zones(args) => zones::handle(manager, args, global).await,
        Command::Sites(args) => sites::handle(manager, args, global).await,
        Command::Devices(args) => devices::handle(manager, args, global).await,
        Command::Files(args) => files::handle(manager, args, global).await,
        Command::Play(args) => play::handle(manager, args, global).await,
        Command::Volume(args) => volume::handle(manager, args, global).await,
        // Handled in main before a manager exists
        Command::Config(_) | Command::Completions(_) => Err(CliError::Config {
            message: "command does not need a server connection".into(),
        }),
    }
}
