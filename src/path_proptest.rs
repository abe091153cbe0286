//! Property-based tests for path handling and removal planning.
//!
//! These tests use proptest to generate random path sets and pattern lists and
//! verify that the planning invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::defaults::{is_generator_input, GENERATOR_INPUT_DIR};
    use crate::path::{depth, lexical_normalize, relative_within, to_slash};
    use crate::patterns::PatternSet;
    use crate::reconcile::plan_removals;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::path::Path;

    fn relative_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,6}(\\.rs|\\.txt)?", 1..5).prop_map(|parts| parts.join("/"))
    }

    fn path_set() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set(
            prop_oneof![
                4 => relative_path(),
                1 => relative_path().prop_map(|p| format!("{}/{}", GENERATOR_INPUT_DIR, p)),
            ],
            0..30,
        )
    }

    fn pattern_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop_oneof![
                Just(".*".to_string()),
                Just(r"\.rs$".to_string()),
                Just(r"\.txt$".to_string()),
                "[a-z]{1,3}",
                "[a-z]{1,2}".prop_map(|s| format!("^{}", s)),
            ],
            0..4,
        )
    }

    // ============================================================================
    // plan_removals property tests
    // ============================================================================

    proptest! {
        /// Property: no remove patterns means nothing is removed
        #[test]
        fn empty_remove_list_removes_nothing(paths in path_set(), preserve in pattern_list()) {
            let remove = PatternSet::default();
            let preserve = PatternSet::compile(&preserve).unwrap();
            prop_assert!(plan_removals(&paths, &remove, &preserve).is_empty());
        }

        /// Property: a path matching a preserve pattern is never removed
        #[test]
        fn preserve_always_wins(
            paths in path_set(),
            remove in pattern_list(),
            preserve in pattern_list(),
        ) {
            let remove = PatternSet::compile(&remove).unwrap();
            let preserve = PatternSet::compile(&preserve).unwrap();
            for path in plan_removals(&paths, &remove, &preserve) {
                prop_assert!(!preserve.is_match(&path), "preserved path '{}' was planned", path);
            }
        }

        /// Property: nothing under the generator-input directory is ever planned
        #[test]
        fn generator_input_is_never_removed(paths in path_set(), remove in pattern_list()) {
            let remove = PatternSet::compile(&remove).unwrap();
            for path in plan_removals(&paths, &remove, &PatternSet::default()) {
                prop_assert!(!is_generator_input(&path));
            }
        }

        /// Property: the plan is a subset of the candidates and every entry
        /// matches a remove pattern
        #[test]
        fn plan_is_subset_of_matching_candidates(
            paths in path_set(),
            remove in pattern_list(),
            preserve in pattern_list(),
        ) {
            let remove = PatternSet::compile(&remove).unwrap();
            let preserve = PatternSet::compile(&preserve).unwrap();
            for path in plan_removals(&paths, &remove, &preserve) {
                prop_assert!(paths.contains(&path));
                prop_assert!(remove.is_match(&path));
            }
        }

        /// Property: planning is deterministic
        #[test]
        fn plan_is_deterministic(paths in path_set(), remove in pattern_list()) {
            let remove = PatternSet::compile(&remove).unwrap();
            let preserve = PatternSet::default();
            prop_assert_eq!(
                plan_removals(&paths, &remove, &preserve),
                plan_removals(&paths, &remove, &preserve)
            );
        }
    }

    // ============================================================================
    // path helper property tests
    // ============================================================================

    proptest! {
        /// Property: any relative path without `..` stays within its root
        #[test]
        fn relative_paths_stay_within_root(rel in relative_path()) {
            let result = relative_within(Path::new("/repo"), Path::new(&rel));
            prop_assert!(result.is_ok());
            prop_assert_eq!(to_slash(&result.unwrap()).unwrap(), rel);
        }

        /// Property: escaping with `..` past the root is always rejected
        #[test]
        fn parent_escape_is_rejected(rel in relative_path()) {
            let escaping = format!("../{}", rel);
            prop_assert!(relative_within(Path::new("/work/repo-root"), Path::new(&escaping)).is_err());
        }

        /// Property: normalization is idempotent
        #[test]
        fn normalize_is_idempotent(rel in "[a-z./]{0,20}") {
            let once = lexical_normalize(Path::new(&rel));
            let twice = lexical_normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: depth counts slash-separated components
        #[test]
        fn depth_matches_component_count(rel in relative_path()) {
            prop_assert_eq!(depth(&rel), rel.split('/').count());
        }
    }
}
