//! Property-based test generators using proptest.
//!
//! Provides strategies for keys and values that respect each backend's
//! limits, plus the run configuration shared by the property tests.

use paramstore_core::{SlotKey, MAX_FILE_KEY_LEN, MAX_NVM_STRING_LEN};
use proptest::prelude::*;

/// Strategy for keys the slot backend recognizes.
pub fn slot_key_strategy() -> impl Strategy<Value = SlotKey> {
    prop::sample::select(SlotKey::ALL.to_vec())
}

/// Strategy for keys the slot backend rejects.
pub fn unknown_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_]{0,16}")
        .expect("Invalid regex")
        .prop_filter("Key must not be recognized", |k| {
            SlotKey::match_key(k).is_none()
        })
}

/// Strategy for keys that are valid file names.
pub fn file_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[a-z][a-z0-9_]{{0,{}}}", MAX_FILE_KEY_LEN - 1))
        .expect("Invalid regex")
}

/// Strategy for values that fit an NVM slot.
///
/// NUL is excluded because a slot value ends at the first NUL.
pub fn slot_value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[ -~]{{0,{MAX_NVM_STRING_LEN}}}"))
        .expect("Invalid regex")
}

/// Strategy for values longer than an NVM slot.
pub fn oversized_value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!(
        "[ -~]{{{},{}}}",
        MAX_NVM_STRING_LEN + 1,
        MAX_NVM_STRING_LEN * 4
    ))
    .expect("Invalid regex")
}

/// Strategy for arbitrary file values, including non-ASCII text.
pub fn file_value_strategy() -> impl Strategy<Value = String> {
    ".{0,512}"
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn unknown_keys_have_no_slot(key in unknown_key_strategy()) {
            prop_assert!(SlotKey::match_key(&key).is_none());
        }

        #[test]
        fn file_keys_fit_name_limit(key in file_key_strategy()) {
            prop_assert!(!key.is_empty());
            prop_assert!(key.len() <= MAX_FILE_KEY_LEN);
        }

        #[test]
        fn slot_values_fit(value in slot_value_strategy()) {
            prop_assert!(value.len() <= MAX_NVM_STRING_LEN);
            prop_assert!(!value.contains('\0'));
        }

        #[test]
        fn oversized_values_overflow(value in oversized_value_strategy()) {
            prop_assert!(value.len() > MAX_NVM_STRING_LEN);
        }
    }
}
