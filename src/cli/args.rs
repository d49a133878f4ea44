//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--quiet` / `-q`: Minimal output
//! - `--debug`: Enable debug logging
//! - `--git-exe <path>`: Use this git executable

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scenevault - per-document version history for scene files
#[derive(Parser, Debug)]
#[command(name = "sv")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to the git executable
    #[arg(long, global = true, value_name = "PATH", default_value = "git")]
    pub git_exe: PathBuf,

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
    /// List available commands
    #[command(name = "help")]
    Help {
        /// Glob-style pattern to filter command names (`*`, `?`)
        pattern: Option<String>,
    },

    /// Create the version vault for a document
    #[command(
        name = "init",
        long_about = "Create the version vault for a document.\n\n\
            The vault is a git repository stored next to the document \
            (<document>.vault). Its existence is what marks a document as \
            versioned; every other command requires it. The document \
            itself is not touched."
    )]
    Init {
        /// Free-text description stored inside the vault
        #[arg(long, value_name = "TEXT")]
        description: Option<String>,

        /// The document to version
        document: PathBuf,
    },

    /// List commits, one per line
    #[command(name = "list")]
    List {
        /// The versioned document
        document: PathBuf,
    },

    /// Show raw backend history
    #[command(name = "log")]
    Log {
        /// Pretty format passed through to the backend
        #[arg(long, value_name = "FMT")]
        format: Option<String>,

        /// Show the raw diff format
        #[arg(long)]
        raw: bool,

        /// The versioned document
        document: PathBuf,
    },

    /// Snapshot a document and its dependencies
    #[command(
        name = "commit",
        long_about = "Snapshot a document and its dependencies.\n\n\
            The dependency scanner reports every external file the \
            document references; document-relative references that stay \
            inside the document's directory are captured alongside the \
            document itself. Absolute references and references above the \
            document's directory are shared resources and are not \
            captured.\n\n\
            The commit timestamp is the document's modification time in \
            UTC, so committing the same content always produces the same \
            history regardless of machine or timezone."
    )]
    Commit {
        /// Commit message (must not be empty)
        #[arg(short, long, value_name = "MSG")]
        message: String,

        /// Document runtime executable, forwarded to the dependency scanner
        #[arg(long, value_name = "PATH")]
        runtime: Option<PathBuf>,

        /// The versioned document
        document: PathBuf,
    },

    /// Roll back the most recent commit
    #[command(
        name = "uncommit",
        long_about = "Roll back the most recent commit.\n\n\
            The history pointer moves back one step; the backend index is \
            left as it was and no working files change. The removed \
            commit's changes are displayed for confirmation."
    )]
    Uncommit {
        /// The versioned document
        document: PathBuf,
    },

    /// Restore a document tree from a commit
    #[command(name = "checkout")]
    Checkout {
        /// Commit reference to restore
        reference: String,

        /// The versioned document
        document: PathBuf,
    },
}
