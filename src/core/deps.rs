//! core::deps
//!
//! Dependency eligibility filtering.
//!
//! The dependency scanner reports every external file a document
//! references, in whatever addressing form the document stored. Only
//! document-relative references (the `//` prefix) that stay inside the
//! document's own directory are eligible for versioning. Everything else
//! (absolute paths, references that climb above the document) is treated
//! as a shared resource the document's history does not own and is
//! dropped without error. A commit always succeeds even when some
//! discovered references cannot be captured.
//!
//! The result is deduplicated (one reference may be used by many objects
//! inside the document) and ordered by first appearance, so a given
//! scanner report always yields the same staged file set.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Marker prefix for document-relative dependency paths.
pub const RELATIVE_PREFIX: &str = "//";

/// Filter raw scanner entries down to the eligible, deduplicated,
/// stably-ordered set of document-relative paths.
///
/// # Example
///
/// ```
/// use scenevault::core::deps::filter_dependencies;
/// use std::path::PathBuf;
///
/// let raw = [
///     "//tex/a.png".to_string(),
///     "//tex/a.png".to_string(),
///     "/abs/b.png".to_string(),
///     "//../c.png".to_string(),
///     "//d.png".to_string(),
/// ];
/// assert_eq!(
///     filter_dependencies(&raw),
///     vec![PathBuf::from("tex/a.png"), PathBuf::from("d.png")]
/// );
/// ```
pub fn filter_dependencies(raw: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut eligible = Vec::new();

    for entry in raw {
        let Some(rest) = entry.strip_prefix(RELATIVE_PREFIX) else {
            continue;
        };
        let Some(rel) = normalize_relative(rest) else {
            continue;
        };
        if seen.insert(rel.clone()) {
            eligible.push(rel);
        }
    }

    eligible
}

/// Lexically normalize a relative dependency path.
///
/// Returns `None` for paths that escape above the document directory,
/// resolve to nothing, or are not actually relative.
fn normalize_relative(rel: &str) -> Option<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(rel).components() {
        match component {
            Component::Normal(c) => parts.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                // Climbing above the document directory is ineligible.
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn eligible_deduplicated_stable_order() {
        let raw = strings(&[
            "//tex/a.png",
            "//tex/a.png",
            "/abs/b.png",
            "//../c.png",
            "//d.png",
        ]);
        assert_eq!(
            filter_dependencies(&raw),
            vec![PathBuf::from("tex/a.png"), PathBuf::from("d.png")]
        );
    }

    #[test]
    fn drops_absolute_paths_silently() {
        let raw = strings(&["/abs/b.png", "/other/c.exr"]);
        assert!(filter_dependencies(&raw).is_empty());
    }

    #[test]
    fn drops_non_relative_addressing_forms() {
        let raw = strings(&["tex/a.png", "C:relative.png", ""]);
        assert!(filter_dependencies(&raw).is_empty());
    }

    #[test]
    fn drops_upward_escapes() {
        let raw = strings(&["//../c.png", "//tex/../../d.png", "//.."]);
        assert!(filter_dependencies(&raw).is_empty());
    }

    #[test]
    fn normalizes_internal_traversal() {
        let raw = strings(&["//tex/../caches/sim.vdb", "//./tex/a.png"]);
        assert_eq!(
            filter_dependencies(&raw),
            vec![PathBuf::from("caches/sim.vdb"), PathBuf::from("tex/a.png")]
        );
    }

    #[test]
    fn rejects_rooted_remainder() {
        // A third slash leaves an absolute remainder, which is not
        // document-relative.
        let raw = strings(&["///abs.png"]);
        assert!(filter_dependencies(&raw).is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let raw = strings(&["//b.png", "//a.png", "//b.png"]);
        assert_eq!(
            filter_dependencies(&raw),
            vec![PathBuf::from("b.png"), PathBuf::from("a.png")]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let raw = strings(&["//tex/a.png", "//../c.png", "//d.png", "//tex/a.png"]);
        let once = filter_dependencies(&raw);

        // Re-prefixing the filtered output and filtering again changes
        // nothing.
        let reprefixed: Vec<String> = once
            .iter()
            .map(|p| format!("{}{}", RELATIVE_PREFIX, p.display()))
            .collect();
        assert_eq!(filter_dependencies(&reprefixed), once);
    }
}
