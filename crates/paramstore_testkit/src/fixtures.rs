//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up parameter stores on
//! temporary media.

use paramstore_core::{Config, ParamStore, ParamStoreFactory, Platform};
use paramstore_storage::InMemoryNvm;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Size of the NVM fixtures, matching the radio module's user area.
pub const TEST_NVM_SIZE: usize = 256;

/// Capacity of the filesystem fixtures.
pub const TEST_FS_CAPACITY: u64 = 64 * 1024;

/// A parameter store on temporary media with automatic cleanup.
pub struct TestStore {
    /// The store instance.
    pub store: ParamStore,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestStore {
    /// Creates a slot-backed store on an in-memory NVM.
    pub fn nvm() -> Self {
        Self::nvm_with(InMemoryNvm::new(TEST_NVM_SIZE))
    }

    /// Creates a slot-backed store on the given device.
    pub fn nvm_with(device: InMemoryNvm) -> Self {
        Self {
            store: ParamStoreFactory::with_nvm_device(Box::new(device))
                .expect("Failed to create NVM store"),
            temp_dir: None,
        }
    }

    /// Creates a file-backed store in a fresh temporary directory.
    pub fn flash() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ParamStoreFactory::create_for(Platform::FlashFs, &flash_config(temp_dir.path()))
            .expect("Failed to create flash store");
        Self {
            store,
            temp_dir: Some(temp_dir),
        }
    }

    /// Creates a slot-backed store on an NVM image in a temporary directory.
    pub fn nvm_image() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ParamStoreFactory::create_for(Platform::RadioNvm, &nvm_config(temp_dir.path()))
            .expect("Failed to create NVM image store");
        Self {
            store,
            temp_dir: Some(temp_dir),
        }
    }

    /// Reopens the store on the same media, as after a power cycle.
    ///
    /// Returns `None` for in-memory stores.
    pub fn reopen(self) -> Option<Self> {
        let temp_dir = self.temp_dir?;
        let platform = match self.store.backend_name() {
            "radio-nvm" => Platform::RadioNvm,
            _ => Platform::FlashFs,
        };
        let config = match platform {
            Platform::FlashFs => flash_config(temp_dir.path()),
            Platform::RadioNvm => nvm_config(temp_dir.path()),
        };
        drop(self.store);

        let store =
            ParamStoreFactory::create_for(platform, &config).expect("Failed to reopen store");
        Some(Self {
            store,
            temp_dir: Some(temp_dir),
        })
    }

    /// Returns the media directory if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|d| d.path().to_path_buf())
    }
}

impl std::ops::Deref for TestStore {
    type Target = ParamStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Filesystem config rooted under `dir`.
pub fn flash_config(dir: &Path) -> Config {
    Config::new()
        .fs_root(dir.join("spiffs"))
        .fs_capacity(TEST_FS_CAPACITY)
}

/// NVM image config under `dir`.
pub fn nvm_config(dir: &Path) -> Config {
    Config::new()
        .nvm_image(dir.join("nvm.bin"))
        .nvm_size(TEST_NVM_SIZE as u64)
}

/// Runs a test against a slot-backed store.
///
/// # Example
///
/// ```rust
/// use paramstore_testkit::with_nvm_store;
///
/// with_nvm_store(|store| {
///     assert!(store.set_key("ssid", "ccom"));
/// });
/// ```
pub fn with_nvm_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut ParamStore) -> R,
{
    let mut test_store = TestStore::nvm();
    f(&mut test_store.store)
}

/// Runs a test against a file-backed store.
pub fn with_flash_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut ParamStore) -> R,
{
    let mut test_store = TestStore::flash();
    f(&mut test_store.store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nvm_store() {
        let store = TestStore::nvm();
        assert_eq!(store.backend_name(), "radio-nvm");
        assert!(store.path().is_none());
    }

    #[test]
    fn test_flash_store() {
        let store = TestStore::flash();
        assert_eq!(store.backend_name(), "flash-fs");
        assert!(store.path().unwrap().join("spiffs").is_dir());
    }

    #[test]
    fn test_reopen_keeps_values() {
        let mut store = TestStore::nvm_image();
        assert!(store.set_key("adname", "wibl-3"));

        let store = store.reopen().unwrap();
        let mut value = String::new();
        assert!(store.get_key("adname", &mut value));
        assert_eq!(value, "wibl-3");
    }

    #[test]
    fn test_reopen_in_memory_is_none() {
        assert!(TestStore::nvm().reopen().is_none());
    }
}
