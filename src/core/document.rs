//! core::document
//!
//! Document identity and path resolution.
//!
//! A document is identified by an absolute path to a `.scene` file. From
//! that single path the two bookkeeping locations are derived as siblings:
//!
//! - the **vault** (`<document>.vault`) - the persistent backing-store
//!   directory; its existence on disk is the sole signal that version
//!   history has been initialized for the document
//! - the **staging directory** (`<document>.stage`) - the ephemeral
//!   working tree used only while writing history (see
//!   [`crate::core::staging`])
//!
//! Resolution is purely lexical: the extension check happens before any
//! filesystem access, and no symlinks are followed.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// File extension a document must carry to be versionable.
pub const DOC_EXTENSION: &str = "scene";

/// Suffix appended to the document path to name its vault.
pub const VAULT_SUFFIX: &str = ".vault";

/// Suffix appended to the document path to name its staging directory.
pub const STAGING_SUFFIX: &str = ".stage";

/// Errors from document path resolution.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The path does not carry the recognized document extension.
    #[error("not a .{DOC_EXTENSION} document: {}", path.display())]
    NotAScene {
        /// The rejected path
        path: PathBuf,
    },

    /// The current working directory could not be determined while
    /// absolutizing a relative document path.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Resolved paths for one document.
///
/// Construction validates the extension and absolutizes the path; all
/// accessors are cheap and side-effect free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContext {
    document: PathBuf,
    vault: PathBuf,
    staging: PathBuf,
}

impl DocumentContext {
    /// Resolve a document path into its context.
    ///
    /// Fails with [`DocumentError::NotAScene`] before touching the
    /// filesystem if the extension is not `.scene`.
    ///
    /// # Example
    ///
    /// ```
    /// use scenevault::core::document::DocumentContext;
    /// use std::path::Path;
    ///
    /// let ctx = DocumentContext::resolve(Path::new("/work/shot.scene")).unwrap();
    /// assert_eq!(ctx.vault(), Path::new("/work/shot.scene.vault"));
    /// assert_eq!(ctx.staging(), Path::new("/work/shot.scene.stage"));
    /// ```
    pub fn resolve(path: &Path) -> Result<Self, DocumentError> {
        if path.extension().and_then(|e| e.to_str()) != Some(DOC_EXTENSION) {
            return Err(DocumentError::NotAScene {
                path: path.to_path_buf(),
            });
        }

        let document = lexical_absolute(path)?;
        let vault = with_suffix(&document, VAULT_SUFFIX);
        let staging = with_suffix(&document, STAGING_SUFFIX);

        Ok(Self {
            document,
            vault,
            staging,
        })
    }

    /// Absolute path of the document itself.
    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Directory containing the document.
    ///
    /// Document-relative dependency paths resolve against this directory,
    /// and it serves as the working tree for read-mode backend calls.
    pub fn dir(&self) -> &Path {
        // The document is absolute and names a file, so a parent exists.
        self.document
            .parent()
            .expect("absolute document path has a parent")
    }

    /// File name component of the document.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.document
            .file_name()
            .expect("document path has a file name")
    }

    /// Path of the vault (persistent backing store).
    pub fn vault(&self) -> &Path {
        &self.vault
    }

    /// Path of the ephemeral staging directory.
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Whether version history has been initialized for this document.
    pub fn is_versioned(&self) -> bool {
        self.vault.exists()
    }
}

/// Append a suffix to the final path component.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Absolutize and lexically normalize a path without touching the
/// filesystem (beyond reading the current directory for relative input).
fn lexical_absolute(path: &Path) -> Result<PathBuf, DocumentError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(DocumentError::CurrentDir)?
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(p) => normalized.push(p.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(c) => normalized.push(c),
        }
    }

    Ok(normalized)
}
