//! Parameter store configuration.

use paramstore_storage::DEFAULT_FS_CAPACITY;
use std::path::PathBuf;

/// Default size of the radio module's user NVM area.
pub const DEFAULT_NVM_SIZE: u64 = 256;

/// Configuration for creating a parameter store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the flash filesystem.
    pub fs_root: PathBuf,

    /// Partition size of the flash filesystem in bytes.
    pub fs_capacity: u64,

    /// Whether to format the filesystem if it fails to mount.
    pub format_if_unmounted: bool,

    /// Image file standing in for the radio module NVM.
    pub nvm_image: PathBuf,

    /// Size of the NVM address space in bytes.
    pub nvm_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fs_root: PathBuf::from("spiffs"),
            fs_capacity: DEFAULT_FS_CAPACITY,
            format_if_unmounted: true,
            nvm_image: PathBuf::from("nvm.bin"),
            nvm_size: DEFAULT_NVM_SIZE,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filesystem root.
    #[must_use]
    pub fn fs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fs_root = root.into();
        self
    }

    /// Sets the filesystem partition size.
    #[must_use]
    pub const fn fs_capacity(mut self, bytes: u64) -> Self {
        self.fs_capacity = bytes;
        self
    }

    /// Sets whether to format an unmountable filesystem.
    #[must_use]
    pub const fn format_if_unmounted(mut self, value: bool) -> Self {
        self.format_if_unmounted = value;
        self
    }

    /// Sets the NVM image path.
    #[must_use]
    pub fn nvm_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.nvm_image = path.into();
        self
    }

    /// Sets the NVM size.
    #[must_use]
    pub const fn nvm_size(mut self, bytes: u64) -> Self {
        self.nvm_size = bytes;
        self
    }
}
