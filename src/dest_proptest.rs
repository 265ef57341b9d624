//! Property-based tests for path normalization and destination resolution.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::destination::dest_for_patterns;
    use crate::entry::FileEntry;
    use crate::normalize::normalize_in;
    use crate::override_index::OverrideIndex;
    use crate::path::{key, normalize};
    use proptest::prelude::*;

    const ROOT: &str = "/proj";

    fn patterns(globs: &[&str]) -> Vec<crate::pattern::Pattern> {
        let entries: Vec<FileEntry> = globs.iter().map(|g| FileEntry::from(*g)).collect();
        normalize_in(&entries, ROOT).unwrap()
    }

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: normalizing twice gives the same result as once
        #[test]
        fn normalize_is_idempotent(input in "[a-z./]{0,30}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: normalized absolute paths never contain `.` or `..` segments
        #[test]
        fn normalize_absolute_has_no_dot_segments(input in "/[a-z./]{0,30}") {
            let result = normalize(&input);
            prop_assert!(result.starts_with('/'));
            for segment in result.split('/') {
                prop_assert!(segment != "." && segment != "..", "{} kept {}", input, segment);
            }
        }

        /// Property: normalized paths never contain an empty inner segment
        #[test]
        fn normalize_collapses_separators(input in "[a-z/]{0,30}") {
            prop_assert!(!normalize(&input).contains("//"));
        }
    }

    // ============================================================================
    // dest_for_patterns property tests
    // ============================================================================

    proptest! {
        /// Property: a recursive top-level glob mirrors the root layout
        #[test]
        fn recursive_glob_mirrors_layout(rel in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.txt") {
            let file = format!("{}/{}", ROOT, rel);
            let dest = dest_for_patterns(&file, &patterns(&["**/*"]), ROOT).unwrap();
            prop_assert_eq!(dest, Some(rel));
        }

        /// Property: a trailing negation of the same glob always excludes
        #[test]
        fn trailing_negation_excludes(rel in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.txt") {
            let file = format!("{}/{}", ROOT, rel);
            let dest = dest_for_patterns(&file, &patterns(&["**/*", "!**/*"]), ROOT).unwrap();
            prop_assert_eq!(dest, None);
        }

        /// Property: an earlier pattern never changes the result of a later
        /// pattern that matches everything
        #[test]
        fn last_match_wins(
            rel in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.txt",
            earlier in prop::sample::select(vec!["*.txt", "!**/*.txt", "a*/**/*", "!**/b*"]),
        ) {
            let file = format!("{}/{}", ROOT, rel);
            let alone = dest_for_patterns(&file, &patterns(&["**/*"]), ROOT).unwrap();
            let layered = dest_for_patterns(&file, &patterns(&[earlier, "**/*"]), ROOT).unwrap();
            prop_assert_eq!(alone, layered);
        }

        /// Property: evaluation is deterministic
        #[test]
        fn dest_is_deterministic(rel in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.[a-z]{1,3}") {
            let file = format!("{}/{}", ROOT, rel);
            let list = patterns(&["**/*.txt", "!a*/**/*", "b*/**/*"]);
            let first = dest_for_patterns(&file, &list, ROOT).unwrap();
            let second = dest_for_patterns(&file, &list, ROOT).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: one pattern is produced per glob, in order
        #[test]
        fn normalize_keeps_one_pattern_per_glob(globs in prop::collection::vec("!?[a-z]{1,6}/\\*\\*/\\*", 0..8)) {
            let list: Vec<&str> = globs.iter().map(String::as_str).collect();
            let result = patterns(&list);
            prop_assert_eq!(result.len(), globs.len());
            for (i, pattern) in result.iter().enumerate() {
                prop_assert_eq!(pattern.index, i);
                prop_assert_eq!(pattern.negated, globs[i].starts_with('!'));
            }
        }
    }

    // ============================================================================
    // OverrideIndex property tests
    // ============================================================================

    proptest! {
        /// Property: destination lookups ignore ASCII case
        #[test]
        fn dest_lookup_ignores_case(dest in "[a-zA-Z]{1,8}/[a-zA-Z]{1,8}\\.txt") {
            let mut index = OverrideIndex::new(vec![()]);
            index.set(0, "/proj/a.txt", &dest).unwrap();
            prop_assert!(index.has_by_dest(0, &dest.to_ascii_uppercase()));
            prop_assert!(index.has_by_dest(0, &key(&dest)));
        }

        /// Property: a later row always owns the destination
        #[test]
        fn later_row_owns_dest(dest in "[a-z]{1,8}\\.txt", rows in 2usize..5) {
            let mut index = OverrideIndex::new((0..rows).collect());
            for row in 0..rows {
                index.set(row, &format!("/layer{}/{}", row, dest), &dest).unwrap();
            }
            let live = index.live_entries();
            prop_assert_eq!(live.len(), 1);
            prop_assert_eq!(live[0].0, rows - 1);
        }
    }
}
