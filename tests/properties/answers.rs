//! Property tests for prompt answers and preflight origin checks.

use proptest::prelude::*;

use bucketship::domain::ports::{is_affirmative, origin_allowed};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Only "y" or "yes" (any case, any surrounding whitespace) confirm.
    #[test]
    fn property_affirmative_answers(answer in "[ \t]{0,3}[A-Za-z]{0,5}[ \t\n]{0,3}") {
        let normalized = answer.trim().to_ascii_lowercase();
        let expected = normalized == "y" || normalized == "yes";
        prop_assert_eq!(is_affirmative(&answer), expected);
    }

    /// PROPERTY: An origin is allowed when echoed back or when the wildcard is returned.
    #[test]
    fn property_origin_echo_or_wildcard(
        origin in "https://[a-z]{1,12}\\.example",
        other in "https://[a-z]{1,12}\\.test",
    ) {
        prop_assert!(origin_allowed(&origin, Some(&origin)));
        prop_assert!(origin_allowed(&origin, Some("*")));
        prop_assert!(!origin_allowed(&origin, Some(&other)));
        prop_assert!(!origin_allowed(&origin, None));
    }
}
