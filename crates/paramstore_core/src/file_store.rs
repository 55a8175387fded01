//! Parameter backend over a flash filesystem.

use crate::backend::{KeyValueBackend, SetOutcome};
use crate::config::Config;
use crate::error::{ParamError, ParamResult};
use paramstore_storage::FlashFs;
use tracing::{error, info};

/// Extension of parameter files.
pub const PARAM_FILE_EXT: &str = "par";

/// Longest key that fits a flash filesystem object name.
///
/// The object name is 32 bytes including the leading `/`, the `.par`
/// suffix and the terminator.
pub const MAX_FILE_KEY_LEN: usize = 26;

/// Stores each parameter as its own file, `/<key>.par`, holding the raw value.
///
/// Construction mounts the filesystem, formatting it first when it will
/// not mount and the config allows. If that still fails the store is
/// created anyway and every operation returns [`ParamError::Unmounted`].
///
/// # Example
///
/// ```no_run
/// use paramstore_core::{Config, FileParamStore, KeyValueBackend};
///
/// let mut store = FileParamStore::new(&Config::new().fs_root("spiffs"));
/// store.set("idstring", "UNH-CCOM-1").unwrap();
/// ```
#[derive(Debug)]
pub struct FileParamStore {
    fs: Option<FlashFs>,
}

impl FileParamStore {
    /// Mounts the filesystem described by `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let fs = match FlashFs::mount_or_format(
            &config.fs_root,
            config.fs_capacity,
            config.format_if_unmounted,
        ) {
            Ok((fs, formatted)) => {
                if formatted {
                    info!(root = %fs.root().display(), "flash filesystem formatted");
                }
                Some(fs)
            }
            Err(e) => {
                error!(
                    root = %config.fs_root.display(),
                    error = %e,
                    "flash filesystem mount failed"
                );
                None
            }
        };

        let store = Self { fs };
        store.report_usage();
        store
    }

    /// Returns true if the filesystem is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.fs.is_some()
    }

    /// Returns the file name used for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidKey`] if the key is empty, too long,
    /// or contains a path separator or NUL.
    pub fn file_name(key: &str) -> ParamResult<String> {
        if key.is_empty() {
            return Err(ParamError::invalid_key(key, "key is empty"));
        }
        if key.len() > MAX_FILE_KEY_LEN {
            return Err(ParamError::invalid_key(key, "key too long for file name"));
        }
        if key.contains(['/', '\\', '\0']) {
            return Err(ParamError::invalid_key(key, "key contains a path separator"));
        }
        Ok(format!("{key}.{PARAM_FILE_EXT}"))
    }

    fn mounted(&self) -> ParamResult<&FlashFs> {
        self.fs.as_ref().ok_or(ParamError::Unmounted)
    }

    fn report_usage(&self) {
        if let Some(fs) = &self.fs {
            match fs.used_bytes() {
                Ok(used) => info!(total = fs.total_bytes(), used, "flash filesystem usage"),
                Err(e) => error!(error = %e, "failed to read flash filesystem usage"),
            }
        }
    }
}

impl KeyValueBackend for FileParamStore {
    fn name(&self) -> &'static str {
        "flash-fs"
    }

    fn set(&mut self, key: &str, value: &str) -> ParamResult<SetOutcome> {
        let name = Self::file_name(key)?;
        self.mounted()?
            .write_file(&name, value.as_bytes())
            .map_err(|e| {
                error!(key, error = %e, "failed to write key to filesystem");
                ParamError::from(e)
            })?;
        Ok(SetOutcome::Stored)
    }

    fn get(&self, key: &str) -> ParamResult<String> {
        let name = Self::file_name(key)?;
        let data = self.mounted()?.read_file(&name).map_err(|e| {
            error!(key, error = %e, "failed to read key from filesystem");
            ParamError::from(e)
        })?;

        let Some(data) = data else {
            error!(key, "failed to find key in filesystem");
            return Err(ParamError::key_not_found(key));
        };

        String::from_utf8(data).map_err(|e| ParamError::invalid_value(key, e.to_string()))
    }

    fn keys(&self) -> ParamResult<Vec<String>> {
        let suffix = format!(".{PARAM_FILE_EXT}");
        Ok(self
            .mounted()?
            .list()?
            .into_iter()
            .filter_map(|name| name.strip_suffix(&suffix).map(str::to_string))
            .filter(|key| Self::file_name(key).is_ok())
            .collect())
    }
}
