//! discover
//!
//! Subprocess invocation of the external dependency scanner.
//!
//! The scanner (`scenedeps`) inspects a document and prints a JSON object
//! on stdout whose values are arrays of records, keyed by reference
//! category. Each record carries at least a `filepath` field; extra
//! fields are ignored. The raw dependency list is the union of every
//! `filepath` across all categories, taken in deterministic (category,
//! in-category) order. Eligibility filtering happens later, in
//! [`crate::core::deps`].
//!
//! If the scanner is not on the search path, the lookup is retried once
//! against the directory containing the running executable before the
//! failure is reported.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use serde::Deserialize;
use thiserror::Error;

/// Executable name of the dependency scanner.
pub const DISCOVER_TOOL: &str = "scenedeps";

/// Errors from dependency discovery.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The scanner was found neither on the search path nor beside the
    /// running executable.
    #[error("dependency scanner `{tool}` not found on PATH or beside this executable")]
    ToolNotFound {
        /// The scanner executable name
        tool: String,
    },

    /// The scanner could not be launched for a reason other than lookup.
    #[error("failed to launch dependency scanner `{tool}`: {source}")]
    Launch {
        /// The scanner executable that was invoked
        tool: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The scanner exited with a non-zero status.
    #[error("dependency scanner failed ({status}): {stderr}")]
    Failed {
        /// The exit status
        status: ExitStatus,
        /// Captured stderr
        stderr: String,
    },

    /// The scanner's stdout was not the expected JSON shape.
    #[error("dependency scanner produced invalid output: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct DepRecord {
    filepath: String,
}

/// Run the scanner against a document and return the raw dependency list.
///
/// `runtime` is the optional backend-executable override forwarded to the
/// scanner verbatim (`--exe <path>`); the scanner needs it when document
/// inspection requires the document runtime.
pub fn discover(document: &Path, runtime: Option<&Path>) -> Result<Vec<String>, DiscoverError> {
    match invoke(Path::new(DISCOVER_TOOL), document, runtime) {
        Err(DiscoverError::Launch { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            let Some(beside) = beside_current_exe() else {
                return Err(DiscoverError::ToolNotFound {
                    tool: DISCOVER_TOOL.to_string(),
                });
            };
            match invoke(&beside, document, runtime) {
                Err(DiscoverError::Launch { source, .. })
                    if source.kind() == io::ErrorKind::NotFound =>
                {
                    Err(DiscoverError::ToolNotFound {
                        tool: DISCOVER_TOOL.to_string(),
                    })
                }
                other => other,
            }
        }
        other => other,
    }
}

fn beside_current_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DISCOVER_TOOL))
}

fn invoke(
    tool: &Path,
    document: &Path,
    runtime: Option<&Path>,
) -> Result<Vec<String>, DiscoverError> {
    let mut cmd = Command::new(tool);
    cmd.arg("--full");
    if let Some(runtime) = runtime {
        cmd.arg("--exe").arg(runtime);
    }
    cmd.arg(document);

    let output = cmd.output().map_err(|source| DiscoverError::Launch {
        tool: tool.display().to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(DiscoverError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_report(&output.stdout)
}

/// Parse the scanner's JSON report into the raw dependency list.
///
/// A `BTreeMap` keeps category iteration deterministic regardless of the
/// key order the scanner happened to emit.
fn parse_report(stdout: &[u8]) -> Result<Vec<String>, DiscoverError> {
    let categories: BTreeMap<String, Vec<DepRecord>> = serde_json::from_slice(stdout)?;
    Ok(categories
        .into_values()
        .flatten()
        .map(|record| record.filepath)
        .collect())
}
