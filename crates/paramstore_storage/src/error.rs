//! Error types for storage device operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while talking to a storage device.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Attempted to read beyond the end of the device.
    #[error("read beyond end of device: offset {offset}, len {len}, size {size}")]
    ReadPastEnd {
        /// The requested read offset.
        offset: u64,
        /// The requested read length.
        len: usize,
        /// The device size.
        size: u64,
    },

    /// Attempted to write beyond the end of the device.
    #[error("write beyond end of device: offset {offset}, len {len}, size {size}")]
    WritePastEnd {
        /// The requested write offset.
        offset: u64,
        /// The requested write length.
        len: usize,
        /// The device size.
        size: u64,
    },

    /// The filesystem has no room for the requested write.
    #[error("no space left: need {needed} bytes, {available} available")]
    NoSpace {
        /// Bytes the write would consume.
        needed: u64,
        /// Bytes still free.
        available: u64,
    },

    /// The device is smaller than the layout placed on it.
    #[error("device too small: need {required} bytes, have {actual}")]
    TooSmall {
        /// Bytes required by the layout.
        required: u64,
        /// Actual device size.
        actual: u64,
    },

    /// The filesystem could not be mounted.
    #[error("filesystem not mounted: {0}")]
    NotMounted(String),

    /// The device rejected a write (used for fault injection).
    #[error("write fault at offset {offset}")]
    WriteFault {
        /// Offset of the rejected write.
        offset: u64,
    },
}
