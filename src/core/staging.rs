//! core::staging
//!
//! Scoped staging directory management.
//!
//! All history writes happen inside an ephemeral staging directory next
//! to the document, never against the document's real directory. The
//! staging directory holds:
//!
//! - a symbolic link named `.git` pointing at the vault, so backend calls
//!   issued from inside the staging directory write into the real
//!   repository (a symlink, not a hard link: the vault may not exist yet
//!   the first time staging is acquired)
//! - hard links to the document and each eligible dependency, preserving
//!   their relative directory structure
//!
//! Hard links are mandatory for staged content: the backend must commit
//! the actual file bytes, and a symbolic link would make it commit a link
//! marker instead. Removing the staging tree afterwards only drops the
//! extra link; the user's files keep their original reference.
//!
//! Teardown happens on every exit path (success, early return, failure)
//! via a drop guard. If the process is killed mid-scope, a stale staging
//! directory is left behind and must be removed manually before the next
//! write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::document::DocumentContext;

/// Name of the backend metadata link inside the staging directory.
pub const BACKEND_META_LINK: &str = ".git";

/// Errors from staging directory operations.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The staging directory could not be created.
    #[error("failed to create staging directory {}: {source}", path.display())]
    Create {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The `.git` link to the vault could not be created.
    #[error("failed to link staging to vault at {}: {source}", path.display())]
    VaultLink {
        /// The link path that could not be created
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// A file could not be hard-linked into the staging directory.
    #[error("failed to stage {}: {source}", path.display())]
    Link {
        /// The source file that could not be linked
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },
}

/// Run `body` with an acquired staging directory, tearing it down on
/// every exit path.
///
/// Acquisition creates the staging directory (an already-existing
/// directory is tolerated; any other creation failure is fatal) and the
/// `.git` link to the vault if it is not already present.
pub fn with_staging<T>(
    ctx: &DocumentContext,
    body: impl FnOnce(&Path) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let guard = StagingGuard::acquire(ctx)?;
    body(guard.path())
}

/// Hard-link `source` into the staging directory at `rel`, creating
/// intermediate directories as needed.
pub fn stage_file(staging: &Path, source: &Path, rel: &Path) -> Result<(), StagingError> {
    let dest = staging.join(rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| StagingError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::hard_link(source, &dest).map_err(|e| StagingError::Link {
        path: source.to_path_buf(),
        source: e,
    })
}

/// Drop guard owning one acquired staging directory.
struct StagingGuard {
    path: PathBuf,
}

impl StagingGuard {
    fn acquire(ctx: &DocumentContext) -> Result<Self, StagingError> {
        let path = ctx.staging().to_path_buf();

        match fs::create_dir(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(source) => {
                return Err(StagingError::Create {
                    path: path.clone(),
                    source,
                })
            }
        }

        let link = path.join(BACKEND_META_LINK);
        // symlink_metadata does not follow the link, so a dangling link
        // from a previous acquisition still counts as present.
        if link.symlink_metadata().is_err() {
            symlink_dir(ctx.vault(), &link).map_err(|source| StagingError::VaultLink {
                path: link.clone(),
                source,
            })?;
        }

        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        // Removing the tree unlinks the staged hard links and the vault
        // link; the vault itself and the user's files are untouched.
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context_in(dir: &Path) -> DocumentContext {
        DocumentContext::resolve(&dir.join("shot.scene")).unwrap()
    }

    #[test]
    fn creates_and_removes_staging() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path());

        let observed = with_staging(&ctx, |staging| {
            assert!(staging.is_dir());
            assert_eq!(staging, ctx.staging());
            Ok(staging.to_path_buf())
        })
        .unwrap();

        assert!(!observed.exists());
    }

    #[test]
    fn removes_staging_on_body_failure() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path());

        let result: anyhow::Result<()> =
            with_staging(&ctx, |_| anyhow::bail!("scripted failure"));

        assert!(result.is_err());
        assert!(!ctx.staging().exists());
    }

    #[test]
    fn links_meta_to_vault_even_before_vault_exists() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path());

        with_staging(&ctx, |staging| {
            let link = staging.join(BACKEND_META_LINK);
            let meta = link.symlink_metadata().unwrap();
            assert!(meta.file_type().is_symlink());
            assert_eq!(fs::read_link(&link).unwrap(), ctx.vault());
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn tolerates_pre_existing_staging_directory() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path());
        fs::create_dir(ctx.staging()).unwrap();

        with_staging(&ctx, |staging| {
            assert!(staging.join(BACKEND_META_LINK).symlink_metadata().is_ok());
            Ok(())
        })
        .unwrap();
        assert!(!ctx.staging().exists());
    }

    #[test]
    fn stage_file_hard_links_content() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path());
        let source = dir.path().join("tex").join("a.png");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"pixels").unwrap();

        with_staging(&ctx, |staging| {
            stage_file(staging, &source, Path::new("tex/a.png"))?;
            let staged = staging.join("tex/a.png");
            assert_eq!(fs::read(&staged).unwrap(), b"pixels");

            // Same inode: a hard link, not a copy.
            use std::os::unix::fs::MetadataExt;
            assert_eq!(
                fs::metadata(&staged).unwrap().ino(),
                fs::metadata(&source).unwrap().ino()
            );
            Ok(())
        })
        .unwrap();

        // Teardown dropped the extra link, not the file.
        assert_eq!(fs::read(&source).unwrap(), b"pixels");
    }

    #[test]
    fn stage_file_fails_when_source_is_missing() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(dir.path());

        let result = with_staging(&ctx, |staging| {
            stage_file(staging, &dir.path().join("gone.png"), Path::new("gone.png"))?;
            Ok(())
        });

        assert!(result.is_err());
        assert!(!ctx.staging().exists());
    }
}
