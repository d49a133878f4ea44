//! git
//!
//! Subprocess doorway to the backing git command-line tool.
//!
//! This module is the **single doorway** to the backend: no other module
//! spawns git. Every call names one of two invocation modes, which differ
//! in how the repository and working tree are located:
//!
//! - [`Mode::Direct`] - the document's real directory is the working tree
//!   and the vault is named explicitly via `--git-dir`. Used for read and
//!   log-style operations, for history rollback, and for `init` (which
//!   must name the vault so the backend creates it).
//! - [`Mode::Staged`] - the staging directory is the working tree and no
//!   git-dir pointer is passed; the `.git` link inside the staging
//!   directory locates the vault implicitly. Committing **requires** this
//!   mode: naming the vault explicitly while committing makes the backend
//!   treat it as a bare repository and refuse working-tree commits.
//!
//! The two modes are distinct enum variants with different fields rather
//! than one call with an optional flag, so the write/read distinction is
//! checked by the compiler.
//!
//! Write calls take an optional [`CommitEnv`] of per-call environment
//! overrides (author/committer date, timezone). Overrides are applied to
//! the single child process only; the tool never mutates its own
//! environment.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Errors from backend invocations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend executable could not be launched.
    #[error("failed to launch {exe}: {source}")]
    Launch {
        /// The executable that could not be launched
        exe: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The backend exited with a non-zero status.
    ///
    /// The diagnostic the backend produced is carried verbatim; failures
    /// are never retried or suppressed.
    #[error("git {subcommand} failed ({status}){}", fmt_stderr(stderr))]
    Failed {
        /// First backend argument (the subcommand)
        subcommand: String,
        /// The exit status
        status: ExitStatus,
        /// Captured stderr, empty for streamed calls
        stderr: String,
    },

    /// Captured backend output was not valid UTF-8.
    #[error("git {subcommand} produced non-UTF-8 output")]
    InvalidUtf8 {
        /// First backend argument (the subcommand)
        subcommand: String,
    },
}

fn fmt_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// How the backend locates the repository and working tree for one call.
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Real document directory as working tree, vault named explicitly.
    Direct {
        /// Working tree (the document's parent directory)
        work_dir: &'a Path,
        /// Metadata store (the vault)
        git_dir: &'a Path,
    },

    /// Staging directory as working tree, metadata store implicit via the
    /// `.git` link.
    Staged {
        /// The staging directory
        staging_dir: &'a Path,
    },
}

/// Deterministic environment overrides for write-mode calls.
///
/// Commit timestamps come from the document's own modification time, in
/// UTC, so history is reproducible across machines and encodes neither
/// commit wall-clock time nor operator locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEnv {
    author_date: String,
    committer_date: String,
    timezone: String,
}

impl CommitEnv {
    /// Build overrides from a document modification time.
    pub fn from_mtime(mtime: SystemTime) -> Self {
        let secs = mtime
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let stamp = format!("@{secs} +0000");
        Self {
            author_date: stamp.clone(),
            committer_date: stamp,
            timezone: "UTC".to_string(),
        }
    }

    fn vars(&self) -> [(&'static str, &str); 3] {
        [
            ("GIT_AUTHOR_DATE", self.author_date.as_str()),
            ("GIT_COMMITTER_DATE", self.committer_date.as_str()),
            ("TZ", self.timezone.as_str()),
        ]
    }
}

/// The backend interface.
#[derive(Debug, Clone)]
pub struct Git {
    exe: PathBuf,
}

impl Git {
    /// Create a backend handle using the given executable.
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// Run a backend call, streaming its output to the operator.
    ///
    /// Used for calls whose output is meant for human consumption (`log`,
    /// `show`, `checkout`, `init`).
    pub fn run<I, S>(
        &self,
        mode: Mode<'_>,
        args: I,
        env: Option<&CommitEnv>,
    ) -> Result<(), BackendError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let subcommand = subcommand_name(&args);

        let status = self
            .command(mode, &args, env)
            .status()
            .map_err(|source| self.launch_error(source))?;

        if !status.success() {
            return Err(BackendError::Failed {
                subcommand,
                status,
                stderr: String::new(),
            });
        }
        Ok(())
    }

    /// Run a backend call, capturing stdout for parsing.
    pub fn run_captured<I, S>(
        &self,
        mode: Mode<'_>,
        args: I,
        env: Option<&CommitEnv>,
    ) -> Result<String, BackendError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let subcommand = subcommand_name(&args);

        let output = self
            .command(mode, &args, env)
            .output()
            .map_err(|source| self.launch_error(source))?;

        if !output.status.success() {
            return Err(BackendError::Failed {
                subcommand,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| BackendError::InvalidUtf8 { subcommand })
    }

    /// Whether the repository has at least one commit.
    pub fn has_commits(&self, mode: Mode<'_>) -> Result<bool, BackendError> {
        match self.run_captured(mode, ["rev-parse", "--quiet", "--verify", "HEAD"], None) {
            Ok(_) => Ok(true),
            Err(BackendError::Failed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn command(&self, mode: Mode<'_>, args: &[OsString], env: Option<&CommitEnv>) -> Command {
        let mut cmd = Command::new(&self.exe);

        match mode {
            Mode::Direct { work_dir, git_dir } => {
                cmd.current_dir(work_dir);
                cmd.arg("--git-dir").arg(git_dir);
            }
            Mode::Staged { staging_dir } => {
                cmd.current_dir(staging_dir);
            }
        }

        cmd.args(args);

        if let Some(env) = env {
            for (key, value) in env.vars() {
                cmd.env(key, value);
            }
        }

        cmd
    }

    fn launch_error(&self, source: io::Error) -> BackendError {
        BackendError::Launch {
            exe: self.exe.display().to_string(),
            source,
        }
    }
}

fn subcommand_name(args: &[OsString]) -> String {
    args.first()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod commit_env {
        use super::*;
        use std::time::Duration;

        #[test]
        fn formats_epoch_seconds_in_utc() {
            let mtime = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
            let env = CommitEnv::from_mtime(mtime);
            assert_eq!(
                env.vars(),
                [
                    ("GIT_AUTHOR_DATE", "@1700000000 +0000"),
                    ("GIT_COMMITTER_DATE", "@1700000000 +0000"),
                    ("TZ", "UTC"),
                ]
            );
        }

        #[test]
        fn author_and_committer_dates_match() {
            let env = CommitEnv::from_mtime(UNIX_EPOCH + Duration::from_secs(42));
            assert_eq!(env.author_date, env.committer_date);
        }

        #[test]
        fn pre_epoch_mtime_clamps_to_zero() {
            let env = CommitEnv::from_mtime(UNIX_EPOCH - Duration::from_secs(10));
            assert_eq!(env.author_date, "@0 +0000");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn launch_error_names_executable() {
            let git = Git::new("definitely-not-git");
            let err = git
                .run(
                    Mode::Staged {
                        staging_dir: Path::new("."),
                    },
                    ["version"],
                    None,
                )
                .unwrap_err();
            assert!(matches!(err, BackendError::Launch { .. }));
            assert!(err.to_string().contains("definitely-not-git"));
        }

        #[cfg(unix)]
        fn exit_status(code: i32) -> ExitStatus {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(code << 8)
        }

        #[test]
        #[cfg(unix)]
        fn failed_display_includes_stderr() {
            let err = BackendError::Failed {
                subcommand: "log".to_string(),
                status: exit_status(128),
                stderr: "fatal: bad revision\n".to_string(),
            };
            let text = err.to_string();
            assert!(text.contains("git log failed"));
            assert!(text.contains("fatal: bad revision"));
        }

        #[test]
        #[cfg(unix)]
        fn failed_display_omits_empty_stderr() {
            let err = BackendError::Failed {
                subcommand: "add".to_string(),
                status: exit_status(1),
                stderr: String::new(),
            };
            assert!(!err.to_string().ends_with(": "));
        }
    }
}
