//! Property tests for bucket name validation.

use proptest::prelude::*;

use bucketship::BucketName;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary input never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,80}") {
        let _ = BucketName::parse(&input);
    }

    /// PROPERTY: Names built from the allowed alphabet within length bounds are accepted and lower-cased.
    #[test]
    fn property_valid_names_are_accepted(input in "[A-Za-z0-9_-]{3,63}") {
        let name = BucketName::parse(&input).unwrap();
        prop_assert_eq!(name.as_str(), input.to_ascii_lowercase());
    }

    /// PROPERTY: Anything that parses is within bounds and uses only the allowed alphabet.
    #[test]
    fn property_parsed_names_are_well_formed(input in "[ a-zA-Z0-9_.\\-/]{0,70}") {
        if let Ok(name) = BucketName::parse(&input) {
            let len = name.as_str().chars().count();
            prop_assert!((BucketName::MIN_LEN..=BucketName::MAX_LEN).contains(&len));
            prop_assert!(name
                .as_str()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        }
    }

    /// PROPERTY: A derived name always belongs to its prefix.
    #[test]
    fn property_with_suffix_has_prefix(
        prefix in "[a-z0-9]{1,20}",
        suffix in "[a-z0-9]{1,20}",
    ) {
        let name = BucketName::with_suffix(&prefix, &suffix).unwrap();
        prop_assert!(name.has_prefix(&prefix));
        prop_assert_eq!(name.as_str(), format!("{}-{}", prefix, suffix));
    }
}
