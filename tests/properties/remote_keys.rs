//! Property tests for remote key computation.

use std::path::PathBuf;

use proptest::prelude::*;

use bucketship::domain::value_objects::{clean_key, remote_key};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_.-]{1,12}")
        .unwrap()
        .prop_filter("not a relative component", |s| s != "." && s != "..")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Cleaned keys never start with a separator.
    #[test]
    fn property_clean_key_has_no_leading_slash(key in "/{0,4}[a-z0-9/]{0,20}") {
        prop_assert!(!clean_key(&key).starts_with('/'));
    }

    /// PROPERTY: Remote keys never start with a separator and never contain `//`.
    #[test]
    fn property_remote_key_is_normalized(
        dirs in proptest::collection::vec(segment(), 0..=4),
        file in segment(),
        prefix in "/{0,2}[a-z0-9]{0,8}/{0,2}",
        flatten in any::<bool>(),
    ) {
        let root = PathBuf::from("site");
        let mut path = root.clone();
        for dir in &dirs {
            path.push(dir);
        }
        path.push(&file);

        let key = remote_key(&root, &path, &prefix, flatten);
        prop_assert!(!key.starts_with('/'));
        prop_assert!(!key.contains("//"));
        prop_assert!(key.ends_with(file.as_str()));
    }

    /// PROPERTY: Without flattening, the directory structure below the root is preserved.
    #[test]
    fn property_remote_key_keeps_structure(
        dirs in proptest::collection::vec(segment(), 1..=4),
        file in segment(),
    ) {
        let root = PathBuf::from("dist");
        let mut path = root.clone();
        for dir in &dirs {
            path.push(dir);
        }
        path.push(&file);

        let expected = format!("{}/{}", dirs.join("/"), file);
        prop_assert_eq!(remote_key(&root, &path, "", false), expected);
        prop_assert_eq!(remote_key(&root, &path, "", true), file);
    }
}
