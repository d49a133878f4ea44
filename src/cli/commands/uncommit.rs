//! uncommit command - Roll back the most recent commit

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::commands::require_versioned;
use crate::cli::Context;
use crate::git::{Git, Mode};
use crate::ui::output;

/// Roll back the most recent commit.
///
/// The history pointer moves back one step; the index is left as it was
/// and no working files change. The removed commit's changes are then
/// displayed for operator confirmation.
pub fn uncommit(ctx: &Context, document: &Path) -> Result<()> {
    let doc = require_versioned(document)?;
    let git = Git::new(&ctx.git_exe);
    let direct = Mode::Direct {
        work_dir: doc.dir(),
        git_dir: doc.vault(),
    };

    if !git.has_commits(direct)? {
        bail!(
            "no commits to roll back for {}",
            doc.document().display()
        );
    }

    let removed = git
        .run_captured(direct, ["rev-parse", "HEAD"], None)?
        .trim()
        .to_string();

    git.run_captured(direct, ["reset", "--soft", "HEAD~1"], None)?;

    output::success(
        format!("Rolled back commit {removed}"),
        ctx.verbosity(),
    );

    // Show what the rolled-back commit contained.
    git.run(direct, ["show", "--raw", &removed], None)?;
    Ok(())
}
