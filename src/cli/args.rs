//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging on stderr

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// revinfo - Resolve branch, commit, and tag metadata without invoking git
#[derive(Parser, Debug)]
#[command(name = "revinfo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show repository metadata for a working directory
    #[command(
        name = "show",
        long_about = "Show repository metadata for a working directory.\n\n\
            Resolves the checked-out branch (or detached commit), the commit's \
            author, committer, message and parents, any tag naming the commit, \
            and the nearest tagged ancestor with its distance in commits. \
            Everything is read directly from the repository's metadata \
            directory; git itself is never invoked.\n\n\
            By default unresolvable details are left empty and the command \
            still succeeds, so it is safe to embed in build scripts.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Metadata for the current directory, human-readable
    revinfo show

    # Machine-readable, for a build pipeline
    revinfo show --json

    # A specific checkout, failing loudly on anything unreadable
    revinfo show --strict path/to/checkout"
    )]
    Show {
        /// Directory to resolve from (defaults to the current directory)
        path: Option<PathBuf>,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Fail on the first unresolvable detail instead of leaving fields empty
        #[arg(long)]
        strict: bool,

        /// Metadata directory name to search for
        #[arg(long, value_name = "NAME", default_value = ".git")]
        metadata_dir: String,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for revinfo \
            commands."
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
