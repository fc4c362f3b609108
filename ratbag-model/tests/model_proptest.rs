//! Property-based tests for capability sets, return codes and keycode names.

use proptest::prelude::*;
use ratbag_model::input_codes::{
    display_name, key_code_from_name, key_name, key_names, KEY_MAX,
};
use ratbag_model::{Capability, CapabilitySet, ProfileCapability, RatbagError};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_query_matches_answers(answers in prop::array::uniform3(any::<bool>())) {
        let set = CapabilitySet::<ProfileCapability>::query(|c| answers[c.bit() as usize]);
        for &cap in ProfileCapability::ALL {
            prop_assert_eq!(set.contains(cap), answers[cap.bit() as usize]);
        }
        prop_assert_eq!(set.iter().count(), answers.iter().filter(|&&a| a).count());
    }

    #[test]
    fn prop_non_negative_codes_succeed(code in 0i32..) {
        prop_assert!(RatbagError::from_code(code, "op").is_ok());
    }

    #[test]
    fn prop_negative_codes_always_fail(code in i32::MIN..0) {
        let err = RatbagError::from_code(code, "op").unwrap_err();
        match err.code() {
            Some(c) => prop_assert!(c == code || (code > -1000 || code < -1004)),
            None => prop_assert!(false, "from_code produced NotFound"),
        }
    }

    #[test]
    fn prop_named_codes_resolve_back(code in 0u32..=KEY_MAX) {
        if let Some(name) = key_name(code) {
            prop_assert_eq!(key_code_from_name(&name), Some(code));
            prop_assert_eq!(key_code_from_name(&name.to_ascii_lowercase()), Some(code));
            prop_assert_eq!(display_name(code), name);
        } else if key_names(code).is_empty() {
            prop_assert_eq!(display_name(code), format!("KEY_{code}"));
        }
    }
}
