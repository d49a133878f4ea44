//! checkout command - Restore a document tree from a commit

use std::path::Path;

use anyhow::Result;

use crate::cli::commands::require_versioned;
use crate::cli::Context;
use crate::git::{Git, Mode};
use crate::ui::output;

/// Force-restore all tracked paths in the document's directory to their
/// state at the given commit reference.
///
/// The backend reports the error when the reference does not resolve.
pub fn checkout(ctx: &Context, document: &Path, reference: &str) -> Result<()> {
    let doc = require_versioned(document)?;
    let git = Git::new(&ctx.git_exe);

    git.run(
        Mode::Direct {
            work_dir: doc.dir(),
            git_dir: doc.vault(),
        },
        ["checkout", "-f", reference, "--", "."],
        None,
    )?;

    output::success(
        format!(
            "Restored {} to {}",
            doc.file_name().to_string_lossy(),
            reference
        ),
        ctx.verbosity(),
    );
    Ok(())
}
