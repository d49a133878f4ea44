//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the document context (extension check, path derivation)
//! 2. Checks its preconditions against vault existence
//! 3. Issues backend calls through [`crate::git`]
//!
//! Precondition failures are reported before any mutating backend call.

mod checkout;
mod commit;
mod help;
mod init;
mod list;
mod log_cmd;
mod uncommit;

// Re-export command functions for testing and direct invocation
pub use checkout::checkout;
pub use commit::commit;
pub use help::help;
pub use init::init;
pub use list::list;
pub use log_cmd::log;
pub use uncommit::uncommit;

use anyhow::{bail, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::document::DocumentContext;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Help { pattern } => help::help(pattern.as_deref()),
        Command::Init {
            description,
            document,
        } => init::init(ctx, &document, description.as_deref()),
        Command::List { document } => list::list(ctx, &document),
        Command::Log {
            format,
            raw,
            document,
        } => log_cmd::log(ctx, &document, format.as_deref(), raw),
        Command::Commit {
            message,
            runtime,
            document,
        } => commit::commit(ctx, &document, &message, runtime.as_deref()),
        Command::Uncommit { document } => uncommit::uncommit(ctx, &document),
        Command::Checkout {
            reference,
            document,
        } => checkout::checkout(ctx, &document, &reference),
    }
}

/// Resolve a document and require that its vault already exists.
fn require_versioned(document: &std::path::Path) -> Result<DocumentContext> {
    let doc = DocumentContext::resolve(document)?;
    if !doc.is_versioned() {
        bail!(
            "no version history for {} (run `sv init` first)",
            doc.document().display()
        );
    }
    Ok(doc)
}
