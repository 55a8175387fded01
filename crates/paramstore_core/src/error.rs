//! Error types for the parameter store.

use thiserror::Error;

/// Result type for parameter store operations.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors that can occur while setting or getting a parameter.
#[derive(Debug, Error)]
pub enum ParamError {
    /// Storage device error.
    #[error("storage error: {0}")]
    Storage(#[from] paramstore_storage::StorageError),

    /// The key is not in the slot table.
    #[error("key not known: {key}")]
    UnknownKey {
        /// The rejected key.
        key: String,
    },

    /// The key cannot be used as a parameter name on this backend.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// No value has been stored under the key.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },

    /// The stored bytes are not a valid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The key that was read.
        key: String,
        /// Description of the problem.
        message: String,
    },

    /// The filesystem failed to mount at startup.
    #[error("filesystem not mounted")]
    Unmounted,

    /// No backend is compiled in for this platform.
    #[error("no parameter backend for this platform")]
    UnsupportedPlatform,
}

impl ParamError {
    /// Creates an unknown key error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason,
        }
    }

    /// Creates a key not found error.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
