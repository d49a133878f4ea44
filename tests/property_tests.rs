//! Property-based tests for dependency filtering.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated scanner reports.

use std::collections::HashSet;
use std::path::{Component, PathBuf};

use proptest::prelude::*;

use scenevault::core::deps::filter_dependencies;

/// Strategy for one path segment, biased toward collisions and traversal.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("tex".to_string()),
        Just("caches".to_string()),
        Just("a.png".to_string()),
        Just("b.exr".to_string()),
        Just("..".to_string()),
        Just(".".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Strategy for one raw scanner entry in any addressing form.
fn raw_entry() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just("//"),   // document-relative
            Just("/"),    // filesystem-absolute
            Just(""),     // relative to something else
        ],
        prop::collection::vec(segment(), 1..5),
    )
        .prop_map(|(prefix, segments)| format!("{}{}", prefix, segments.join("/")))
}

fn raw_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(raw_entry(), 0..24)
}

proptest! {
    /// No eligible path is absolute or escapes the document directory.
    #[test]
    fn eligible_paths_stay_inside_document_directory(raw in raw_list()) {
        for path in filter_dependencies(&raw) {
            prop_assert!(path.is_relative(), "{path:?}");
            prop_assert!(
                !path.components().any(|c| matches!(c, Component::ParentDir | Component::CurDir)),
                "{path:?}"
            );
        }
    }

    /// The result never contains duplicates.
    #[test]
    fn result_is_deduplicated(raw in raw_list()) {
        let result = filter_dependencies(&raw);
        let unique: HashSet<&PathBuf> = result.iter().collect();
        prop_assert_eq!(unique.len(), result.len());
    }

    /// Repeating the whole report changes nothing.
    #[test]
    fn duplicate_reports_collapse(raw in raw_list()) {
        let mut doubled = raw.clone();
        doubled.extend(raw.iter().cloned());
        prop_assert_eq!(filter_dependencies(&doubled), filter_dependencies(&raw));
    }

    /// Reordering the report never changes which paths are eligible.
    #[test]
    fn membership_is_order_independent(raw in raw_list().prop_flat_map(|v| {
        (Just(v.clone()), Just(v).prop_shuffle())
    })) {
        let (original, shuffled) = raw;
        let a: HashSet<PathBuf> = filter_dependencies(&original).into_iter().collect();
        let b: HashSet<PathBuf> = filter_dependencies(&shuffled).into_iter().collect();
        prop_assert_eq!(a, b);
    }

    /// Filtering already-filtered output is the identity.
    #[test]
    fn filtering_is_idempotent(raw in raw_list()) {
        let once = filter_dependencies(&raw);
        let reprefixed: Vec<String> = once
            .iter()
            .map(|p| format!("//{}", p.display()))
            .collect();
        prop_assert_eq!(filter_dependencies(&reprefixed), once);
    }
}
