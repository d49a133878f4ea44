//! list command - List commits, one per line

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{Local, TimeZone};

use crate::cli::commands::require_versioned;
use crate::cli::Context;
use crate::git::{Git, Mode};

/// One line per commit: abbreviated hash, compact local time, subject.
const LIST_FORMAT: &str = "--pretty=format:%h%x09%at%x09%s";

/// List commits for a document, one per line.
pub fn list(ctx: &Context, document: &Path) -> Result<()> {
    let doc = require_versioned(document)?;
    let git = Git::new(&ctx.git_exe);
    let direct = Mode::Direct {
        work_dir: doc.dir(),
        git_dir: doc.vault(),
    };

    if !git.has_commits(direct)? {
        println!("no commits");
        return Ok(());
    }

    let raw = git.run_captured(direct, ["log", LIST_FORMAT], None)?;
    for line in raw.lines() {
        println!("{}", format_record(line)?);
    }
    Ok(())
}

/// Reformat one `hash \t epoch \t subject` record for display.
///
/// Commit timestamps are stored in UTC; display converts to the
/// operator's local time.
fn format_record(line: &str) -> Result<String> {
    let mut fields = line.splitn(3, '\t');
    let (hash, epoch, subject) = (
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
    );

    let secs: i64 = epoch
        .parse()
        .with_context(|| format!("unexpected log record: {line}"))?;
    let when = Local
        .timestamp_opt(secs, 0)
        .single()
        .with_context(|| format!("timestamp out of range: {epoch}"))?;

    Ok(format!(
        "{}  {}  {}",
        hash,
        when.format("%Y-%m-%d %H:%M"),
        subject
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout() {
        let line = "a1b2c3d\t0\tfirst pass";
        let formatted = format_record(line).unwrap();
        assert!(formatted.starts_with("a1b2c3d  "));
        assert!(formatted.ends_with("  first pass"));
    }

    #[test]
    fn subject_may_contain_tabs() {
        let line = "a1b2c3d\t0\tsubject\twith\ttabs";
        let formatted = format_record(line).unwrap();
        assert!(formatted.ends_with("subject\twith\ttabs"));
    }

    #[test]
    fn malformed_epoch_is_an_error() {
        assert!(format_record("a1b2c3d\tnot-a-number\tmsg").is_err());
    }
}
