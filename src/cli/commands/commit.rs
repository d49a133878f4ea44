//! commit command - Snapshot a document and its dependencies

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::commands::require_versioned;
use crate::cli::Context;
use crate::core::deps::filter_dependencies;
use crate::core::staging::{stage_file, with_staging};
use crate::discover;
use crate::git::{BackendError, CommitEnv, Git, Mode};
use crate::ui::output;

/// Snapshot a document and its eligible dependencies into the vault.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `document` - The versioned document
/// * `message` - Commit message (must not be empty or whitespace)
/// * `runtime` - Optional runtime executable forwarded to the scanner
pub fn commit(ctx: &Context, document: &Path, message: &str, runtime: Option<&Path>) -> Result<()> {
    let doc = require_versioned(document)?;

    if message.trim().is_empty() {
        bail!("commit message must not be empty");
    }

    let raw = discover::discover(doc.document(), runtime)?;
    let deps = filter_dependencies(&raw);
    output::debug(
        format!(
            "{} reference(s) reported, {} eligible",
            raw.len(),
            deps.len()
        ),
        ctx.verbosity(),
    );

    // Timestamp comes from the document itself, not the wall clock.
    let mtime = fs::metadata(doc.document())
        .and_then(|m| m.modified())
        .with_context(|| format!("cannot read {}", doc.document().display()))?;
    let env = CommitEnv::from_mtime(mtime);

    let git = Git::new(&ctx.git_exe);

    with_staging(&doc, |staging| {
        let staged = Mode::Staged {
            staging_dir: staging,
        };

        stage_file(staging, doc.document(), Path::new(doc.file_name()))?;
        add_to_index(&git, staged, Path::new(doc.file_name()))?;

        for rel in &deps {
            stage_file(staging, &doc.dir().join(rel), rel)?;
            add_to_index(&git, staged, rel)?;
        }

        git.run(staged, ["commit", "-m", message], Some(&env))?;
        Ok(())
    })?;

    output::success(
        format!(
            "Committed {} (+{} dependencies)",
            doc.file_name().to_string_lossy(),
            deps.len()
        ),
        ctx.verbosity(),
    );
    Ok(())
}

/// Stage one path into the backend index.
fn add_to_index(git: &Git, staged: Mode<'_>, rel: &Path) -> Result<(), BackendError> {
    git.run_captured(
        staged,
        [OsStr::new("add"), OsStr::new("--"), rel.as_os_str()],
        None,
    )?;
    Ok(())
}
