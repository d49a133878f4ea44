//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the handlers in [`commands`]; each handler checks its own
//! preconditions before issuing any mutating backend call.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::Verbosity;

/// Per-invocation execution context derived from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Minimal output
    pub quiet: bool,
    /// Debug logging
    pub debug: bool,
    /// Backend executable
    pub git_exe: PathBuf,
}

impl Context {
    /// Output verbosity for this invocation.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        quiet: cli.quiet,
        debug: cli.debug,
        git_exe: cli.git_exe.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}
