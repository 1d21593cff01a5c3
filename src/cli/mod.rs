//! cli
//!
//! Command-line interface layer for revinfo.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize diagnostics
//! - Delegate to command handlers
//!
//! The CLI layer is thin: it parses arguments via clap and dispatches to
//! handlers that call into [`crate::git`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_diagnostics(cli.debug);
    commands::dispatch(cli.command)
}

/// Initialize tracing on stderr.
///
/// `--debug` forces debug-level output; otherwise the `RUST_LOG`
/// environment variable controls filtering and defaults to silence.
fn init_diagnostics(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
