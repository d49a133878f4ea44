//! init command - Create the version vault for a document

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::document::DocumentContext;
use crate::core::staging::with_staging;
use crate::git::{BackendError, Git, Mode};
use crate::ui::output;

/// Create the version vault for a document.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `document` - The document to version
/// * `description` - Optional free-text description stored in the vault
pub fn init(ctx: &Context, document: &Path, description: Option<&str>) -> Result<()> {
    let doc = DocumentContext::resolve(document)?;

    if doc.is_versioned() {
        bail!(
            "version history already exists for {}",
            doc.document().display()
        );
    }

    let git = Git::new(&ctx.git_exe);

    with_staging(&doc, |_staging| {
        let direct = Mode::Direct {
            work_dir: doc.dir(),
            git_dir: doc.vault(),
        };

        git.run(direct, ["init"], None)?;

        // Naming the vault explicitly during init can leave it flagged as
        // bare, which would later refuse working-tree commits. Unsetting
        // fails when the flag was never written; that is fine.
        match git.run_captured(direct, ["config", "--unset", "core.bare"], None) {
            Ok(_) | Err(BackendError::Failed { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        if let Some(text) = description {
            let path = doc.vault().join("description");
            fs::write(&path, format!("{}\n", text.trim_end()))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        Ok(())
    })?;

    output::success(
        format!(
            "Initialized version history for {}",
            doc.file_name().to_string_lossy()
        ),
        ctx.verbosity(),
    );
    Ok(())
}
