//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each command handler validates its arguments, calls into [`crate::git`],
//! and formats output. Handlers never mutate repository state; there is
//! nothing here to mutate with.

mod completion;
mod show;

use anyhow::Result;

use crate::cli::args::Command;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Show {
            path,
            json,
            strict,
            metadata_dir,
        } => show::show(path, json, strict, metadata_dir),
        Command::Completion { shell } => completion::completion(shell),
    }
}
