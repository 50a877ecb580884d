//! Property tests for access key masking.

use proptest::prelude::*;

use bucketship::domain::value_objects::mask_access_key;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Only the visible head of a key survives masking.
    #[test]
    fn property_mask_keeps_only_head(key in "[A-Za-z0-9]{5,40}") {
        let masked = mask_access_key(&key, 4);
        prop_assert_eq!(masked.chars().count(), key.chars().count());
        prop_assert_eq!(&masked[..4], &key[..4]);
        prop_assert!(masked[4..].chars().all(|c| c == '*'));
    }

    /// PROPERTY: Short keys are fully hidden behind a fixed-width mask.
    #[test]
    fn property_short_keys_are_fully_hidden(key in "[A-Za-z0-9]{0,4}") {
        prop_assert_eq!(mask_access_key(&key, 4), "********");
    }
}
