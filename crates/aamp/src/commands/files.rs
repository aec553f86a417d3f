//! Audio file command handlers.

use tabled::Tabled;

use aamp_core::{AudioFile, AudioManager};

use crate::cli::{FilesArgs, FilesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&AudioFile> for FileRow {
    fn from(f: &AudioFile) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
        }
    }
}

pub async fn handle(
    manager: &AudioManager,
    args: FilesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FilesCommand::List => {
            let files = manager.audio_files().await?;
            let out = output::render_list(
                &global.output,
                &files,
                |f| FileRow::from(f),
                |f| f.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
