//! Key-value backend trait.

use crate::error::ParamResult;

/// What a successful set actually stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The whole value was stored.
    Stored,
    /// The value was cut to fit the backend.
    Truncated {
        /// Length of the value passed in, in bytes.
        original_len: usize,
        /// Length actually stored, in bytes.
        stored_len: usize,
    },
}

impl SetOutcome {
    /// Returns true if part of the value was dropped.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// A storage strategy for named string parameters.
///
/// Exactly one backend is active in a given build; [`crate::ParamStore`]
/// forwards to it without adding behavior.
///
/// # Implementors
///
/// - [`crate::FileParamStore`] - One file per key on a flash filesystem
/// - [`crate::SlotParamStore`] - Fixed slots in radio module NVM
pub trait KeyValueBackend: Send + Sync {
    /// Short name of the backend for diagnostics.
    fn name(&self) -> &'static str;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected or the write fails.
    fn set(&mut self, key: &str, value: &str) -> ParamResult<SetOutcome>;

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected, was never set, or the
    /// read fails.
    fn get(&self, key: &str) -> ParamResult<String>;

    /// Returns the keys this backend can report on, sorted for files and
    /// in table order for slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be listed.
    fn keys(&self) -> ParamResult<Vec<String>>;
}
