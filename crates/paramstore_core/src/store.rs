//! The caller-facing parameter store.

use crate::backend::{KeyValueBackend, SetOutcome};
use crate::error::ParamResult;

/// Uniform key-value access to whichever backend the build carries.
///
/// [`set_key`](Self::set_key) and [`get_key`](Self::get_key) give the
/// boolean contract the firmware uses; [`try_set`](Self::try_set) and
/// [`try_get`](Self::try_get) return the typed error and the truncation
/// outcome. Backends log their own failures, so the boolean forms only
/// collapse the result.
///
/// # Example
///
/// ```rust
/// use paramstore_core::{ParamStore, SlotParamStore};
/// use paramstore_storage::InMemoryNvm;
///
/// let backend = SlotParamStore::new(Box::new(InMemoryNvm::new(256))).unwrap();
/// let mut store = ParamStore::new(Box::new(backend));
///
/// assert!(store.set_key("ssid", "ccom"));
/// let mut value = String::new();
/// assert!(store.get_key("ssid", &mut value));
/// assert_eq!(value, "ccom");
/// ```
pub struct ParamStore {
    backend: Box<dyn KeyValueBackend>,
}

impl ParamStore {
    /// Wraps a backend.
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Stores `value` under `key`, returning true if it was persisted.
    ///
    /// A truncated write still counts as persisted.
    pub fn set_key(&mut self, key: &str, value: &str) -> bool {
        self.try_set(key, value).is_ok()
    }

    /// Reads `key` into `value`, returning true on success.
    ///
    /// On failure `value` is cleared.
    pub fn get_key(&self, key: &str, value: &mut String) -> bool {
        match self.try_get(key) {
            Ok(v) => {
                *value = v;
                true
            }
            Err(_) => {
                value.clear();
                false
            }
        }
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub fn try_set(&mut self, key: &str, value: &str) -> ParamResult<SetOutcome> {
        self.backend.set(key, value)
    }

    /// Reads the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub fn try_get(&self, key: &str) -> ParamResult<String> {
        self.backend.get(key)
    }

    /// Returns the keys the backend reports.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub fn keys(&self) -> ParamResult<Vec<String>> {
        self.backend.keys()
    }

    /// Returns the active backend's name.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

impl std::fmt::Debug for ParamStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParamError;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Backend that records calls and serves from a map.
    #[derive(Default)]
    struct Recording {
        values: HashMap<String, String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl KeyValueBackend for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn set(&mut self, key: &str, value: &str) -> ParamResult<SetOutcome> {
            self.calls.lock().push(format!("set {key}"));
            if key == "full" {
                return Ok(SetOutcome::Truncated {
                    original_len: value.len(),
                    stored_len: 1,
                });
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(SetOutcome::Stored)
        }

        fn get(&self, key: &str) -> ParamResult<String> {
            self.calls.lock().push(format!("get {key}"));
            self.values
                .get(key)
                .cloned()
                .ok_or_else(|| ParamError::key_not_found(key))
        }

        fn keys(&self) -> ParamResult<Vec<String>> {
            Ok(self.values.keys().cloned().collect())
        }
    }

    #[test]
    fn delegates_to_backend() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = Recording {
            calls: Arc::clone(&calls),
            ..Default::default()
        };
        let mut store = ParamStore::new(Box::new(backend));

        assert!(store.set_key("a", "1"));
        let mut value = String::new();
        assert!(store.get_key("a", &mut value));
        assert_eq!(value, "1");

        assert_eq!(*calls.lock(), vec!["set a", "get a"]);
        assert_eq!(store.backend_name(), "recording");
    }

    #[test]
    fn failed_get_clears_value() {
        let mut store = ParamStore::new(Box::<Recording>::default());
        let mut value = String::from("stale");

        assert!(!store.get_key("missing", &mut value));
        assert!(value.is_empty());

        assert!(store.set_key("present", "x"));
        assert!(store.get_key("present", &mut value));
        assert_eq!(value, "x");
    }

    #[test]
    fn truncated_set_counts_as_success() {
        let mut store = ParamStore::new(Box::<Recording>::default());
        assert!(store.set_key("full", "abc"));
        assert!(store.try_set("full", "abc").unwrap().is_truncated());
    }
}
