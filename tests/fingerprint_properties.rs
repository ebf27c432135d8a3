//! Property tests for folder fingerprinting.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use stylus::tree::fingerprint::folder_fingerprint;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The fingerprint depends only on the set of child names, not on the
    /// order they were created in or what the files contain.
    #[test]
    fn fingerprint_depends_only_on_name_set(
        names in prop::collection::btree_set("[a-z]{1,8}", 1..8)
    ) {
        let names: Vec<String> = names.into_iter().collect();

        let dir_a = TempDir::new().unwrap();
        for name in &names {
            fs::write(dir_a.path().join(name), "one").unwrap();
        }

        let dir_b = TempDir::new().unwrap();
        for name in names.iter().rev() {
            fs::write(dir_b.path().join(name), "a different payload").unwrap();
        }

        prop_assert_eq!(
            folder_fingerprint(dir_a.path()).unwrap(),
            folder_fingerprint(dir_b.path()).unwrap()
        );
    }

    /// Adding any entry not already present changes the fingerprint.
    #[test]
    fn added_entry_changes_fingerprint(
        names in prop::collection::btree_set("[a-z]{1,8}", 1..8),
        extra in "[a-z]{1,8}"
    ) {
        let names: BTreeSet<String> = names;
        prop_assume!(!names.contains(&extra));

        let dir = TempDir::new().unwrap();
        for name in &names {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let before = folder_fingerprint(dir.path()).unwrap();
        fs::write(dir.path().join(&extra), "x").unwrap();
        let after = folder_fingerprint(dir.path()).unwrap();

        prop_assert_ne!(before, after);
    }

    /// Two sibling name sets that differ in one element never collide.
    #[test]
    fn distinct_name_sets_fingerprint_differently(
        names in prop::collection::btree_set("[a-z]{1,8}", 2..8)
    ) {
        let names: Vec<String> = names.into_iter().collect();

        let dir_a = TempDir::new().unwrap();
        for name in &names {
            fs::write(dir_a.path().join(name), "x").unwrap();
        }

        // Same set minus its last element.
        let dir_b = TempDir::new().unwrap();
        for name in &names[..names.len() - 1] {
            fs::write(dir_b.path().join(name), "x").unwrap();
        }

        prop_assert_ne!(
            folder_fingerprint(dir_a.path()).unwrap(),
            folder_fingerprint(dir_b.path()).unwrap()
        );
    }
}
