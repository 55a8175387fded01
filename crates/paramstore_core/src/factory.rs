//! Backend selection for the build's hardware target.
//!
//! The backend [`ParamStoreFactory::create`] builds is fixed when the
//! firmware is built:
//!
//! - feature `flash-fs` (default): one file per key on a flash filesystem
//! - feature `radio-nvm`: fixed slots in the radio module's NVM
//!
//! The features select a backend; they do not exclude the other one. Both
//! backends are compiled into every build so host tools can open either
//! medium through [`ParamStoreFactory::create_for`]. `radio-nvm` wins if
//! both features are enabled, and with neither `create` returns
//! [`ParamError::UnsupportedPlatform`].

use crate::config::Config;
use crate::error::{ParamError, ParamResult};
use crate::file_store::FileParamStore;
use crate::slot_store::SlotParamStore;
use crate::store::ParamStore;
use paramstore_storage::{FileNvm, NvmDevice};
use tracing::debug;

/// Hardware families with a parameter backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Microcontroller with a flash filesystem partition.
    FlashFs,
    /// Board whose only NVM is on the attached radio module.
    RadioNvm,
}

impl Platform {
    /// Returns the platform this build targets, if any.
    #[must_use]
    pub const fn current() -> Option<Self> {
        if cfg!(feature = "radio-nvm") {
            Some(Self::RadioNvm)
        } else if cfg!(feature = "flash-fs") {
            Some(Self::FlashFs)
        } else {
            None
        }
    }
}

/// Creates the parameter store for the active platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamStoreFactory;

impl ParamStoreFactory {
    /// Creates the store for the platform this build targets.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnsupportedPlatform`] if no backend feature is
    /// enabled, or the backend's construction error.
    pub fn create(config: &Config) -> ParamResult<ParamStore> {
        let platform = Platform::current().ok_or(ParamError::UnsupportedPlatform)?;
        Self::create_for(platform, config)
    }

    /// Creates the store for an explicit platform.
    ///
    /// Host tools and simulators use this to open either medium.
    ///
    /// # Errors
    ///
    /// Returns an error if the NVM image cannot be opened or is too small.
    /// A filesystem that fails to mount does not error here; the store's
    /// operations fail instead.
    pub fn create_for(platform: Platform, config: &Config) -> ParamResult<ParamStore> {
        debug!(?platform, "creating parameter store");
        match platform {
            Platform::FlashFs => Ok(ParamStore::new(Box::new(FileParamStore::new(config)))),
            Platform::RadioNvm => {
                let device = FileNvm::open(&config.nvm_image, config.nvm_size)?;
                Self::with_nvm_device(Box::new(device))
            }
        }
    }

    /// Creates a slot-backed store on a caller-supplied device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is too small for the slot table.
    pub fn with_nvm_device(device: Box<dyn NvmDevice>) -> ParamResult<ParamStore> {
        Ok(ParamStore::new(Box::new(SlotParamStore::new(device)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramstore_storage::InMemoryNvm;
    use tempfile::tempdir;

    #[test]
    fn current_platform_matches_features() {
        let expected = if cfg!(feature = "radio-nvm") {
            Some(Platform::RadioNvm)
        } else if cfg!(feature = "flash-fs") {
            Some(Platform::FlashFs)
        } else {
            None
        };
        assert_eq!(Platform::current(), expected);
    }

    #[test]
    fn create_uses_current_platform() {
        let dir = tempdir().unwrap();
        let config = Config::new()
            .fs_root(dir.path().join("spiffs"))
            .nvm_image(dir.path().join("nvm.bin"));

        match Platform::current() {
            Some(Platform::FlashFs) => {
                let store = ParamStoreFactory::create(&config).unwrap();
                assert_eq!(store.backend_name(), "flash-fs");
            }
            Some(Platform::RadioNvm) => {
                let store = ParamStoreFactory::create(&config).unwrap();
                assert_eq!(store.backend_name(), "radio-nvm");
            }
            None => assert!(matches!(
                ParamStoreFactory::create(&config),
                Err(ParamError::UnsupportedPlatform)
            )),
        }
    }

    #[test]
    fn create_for_flash() {
        let dir = tempdir().unwrap();
        let config = Config::new().fs_root(dir.path().join("spiffs"));

        let mut store = ParamStoreFactory::create_for(Platform::FlashFs, &config).unwrap();
        assert_eq!(store.backend_name(), "flash-fs");
        assert!(store.set_key("adname", "wibl"));
    }

    #[test]
    fn create_for_radio_nvm() {
        let dir = tempdir().unwrap();
        let config = Config::new().nvm_image(dir.path().join("nvm.bin"));

        let mut store = ParamStoreFactory::create_for(Platform::RadioNvm, &config).unwrap();
        assert_eq!(store.backend_name(), "radio-nvm");
        assert!(store.set_key("adname", "wibl"));
        assert!(!store.set_key("bogus", "x"));
    }

    #[test]
    fn radio_nvm_image_too_small() {
        let dir = tempdir().unwrap();
        let config = Config::new()
            .nvm_image(dir.path().join("nvm.bin"))
            .nvm_size(64);

        assert!(ParamStoreFactory::create_for(Platform::RadioNvm, &config).is_err());
    }

    #[test]
    fn injected_device() {
        let store = ParamStoreFactory::with_nvm_device(Box::new(InMemoryNvm::new(160))).unwrap();
        assert_eq!(store.backend_name(), "radio-nvm");
    }
}
