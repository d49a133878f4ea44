//! log command - Show raw backend history

use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;

use crate::cli::commands::require_versioned;
use crate::cli::Context;
use crate::git::{Git, Mode};

/// Stream the backend's own log output for a document.
///
/// Display flags are forwarded verbatim; the output is the backend's,
/// not reformatted.
pub fn log(ctx: &Context, document: &Path, format: Option<&str>, raw: bool) -> Result<()> {
    let doc = require_versioned(document)?;
    let git = Git::new(&ctx.git_exe);

    let mut args: Vec<OsString> = vec!["log".into()];
    if let Some(format) = format {
        args.push(format!("--format={format}").into());
    }
    if raw {
        args.push("--raw".into());
    }

    git.run(
        Mode::Direct {
            work_dir: doc.dir(),
            git_dir: doc.vault(),
        },
        args,
        None,
    )?;
    Ok(())
}
