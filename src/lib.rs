//! Scenevault - per-document version history for scene files
//!
//! Scenevault snapshots a single scene document together with the
//! external files it references into a git repository kept next to the
//! document, and supports listing, inspecting, reverting, and restoring
//! those snapshots.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`core`] - Document identity, dependency filtering, staging management
//! - [`git`] - Single doorway for all backend (git subprocess) calls
//! - [`discover`] - Subprocess interface to the dependency scanner
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. History writes happen only inside an ephemeral staging directory;
//!    the document's real directory is never used as a write-mode
//!    working tree
//! 2. Staged content is hard-linked, so the backend commits real file
//!    bytes, never link markers
//! 3. Commit timestamps derive from the document's own modification time
//!    in UTC; history never encodes commit wall-clock time or operator
//!    locale
//! 4. The staging directory is torn down on every exit path

pub mod cli;
pub mod core;
pub mod discover;
pub mod git;
pub mod ui;
