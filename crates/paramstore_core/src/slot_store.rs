//! Parameter backend over fixed NVM slots.

use crate::backend::{KeyValueBackend, SetOutcome};
use crate::error::{ParamError, ParamResult};
use crate::slot::{SlotKey, LENGTH_FIELD_SIZE, MAX_NVM_STRING_LEN, NVM_LAYOUT_SIZE};
use paramstore_storage::{NvmDevice, StorageError};
use tracing::{debug, error, warn};

/// Stores the recognized keys in fixed-offset records on a radio module's NVM.
///
/// Only the keys in [`SlotKey::ALL`] can be stored. Values longer than
/// [`MAX_NVM_STRING_LEN`] bytes are truncated on write; the outcome
/// reports it and a warning is logged, but the set still succeeds.
///
/// # Example
///
/// ```rust
/// use paramstore_core::{KeyValueBackend, SlotParamStore};
/// use paramstore_storage::InMemoryNvm;
///
/// let mut store = SlotParamStore::new(Box::new(InMemoryNvm::new(256))).unwrap();
/// store.set("adname", "wibl-7").unwrap();
/// assert_eq!(store.get("adname").unwrap(), "wibl-7");
/// assert!(store.set("bogus", "x").is_err());
/// ```
pub struct SlotParamStore {
    device: Box<dyn NvmDevice>,
}

impl SlotParamStore {
    /// Creates a store on `device`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::TooSmall`] if the device cannot hold the
    /// whole slot table.
    pub fn new(device: Box<dyn NvmDevice>) -> ParamResult<Self> {
        let actual = device.size();
        if actual < NVM_LAYOUT_SIZE {
            return Err(StorageError::TooSmall {
                required: NVM_LAYOUT_SIZE,
                actual,
            }
            .into());
        }
        Ok(Self { device })
    }

    /// Returns the underlying device.
    #[must_use]
    pub fn device(&self) -> &dyn NvmDevice {
        self.device.as_ref()
    }

    /// Writes `value` into `slot`, truncating it to the slot size.
    ///
    /// # Errors
    ///
    /// Returns an error if the device write or flush fails. A failure
    /// part way through may leave the slot's record inconsistent.
    pub fn write_slot(&mut self, slot: SlotKey, value: &str) -> ParamResult<SetOutcome> {
        let stored = truncate_to_slot(value);

        let mut record = Vec::with_capacity(LENGTH_FIELD_SIZE + stored.len());
        record.extend_from_slice(&(stored.len() as u32).to_le_bytes());
        record.extend_from_slice(stored.as_bytes());

        self.device.write_at(slot.offset(), &record)?;
        self.device.flush()?;

        if stored.len() < value.len() {
            warn!(
                key = slot.name(),
                original_len = value.len(),
                stored_len = stored.len(),
                "value truncated to fit NVM slot"
            );
            Ok(SetOutcome::Truncated {
                original_len: value.len(),
                stored_len: stored.len(),
            })
        } else {
            debug!(key = slot.name(), offset = slot.offset(), "slot written");
            Ok(SetOutcome::Stored)
        }
    }

    /// Reads the value in `slot`.
    ///
    /// The stored length is clamped to the slot size and the value ends
    /// at the first NUL byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the device read fails or the bytes are not
    /// UTF-8.
    pub fn read_slot(&self, slot: SlotKey) -> ParamResult<String> {
        let header = self.device.read_at(slot.offset(), LENGTH_FIELD_SIZE)?;
        let mut len_bytes = [0u8; LENGTH_FIELD_SIZE];
        len_bytes.copy_from_slice(&header);
        let len = (u32::from_le_bytes(len_bytes) as usize).min(MAX_NVM_STRING_LEN);

        let mut bytes = self.device.read_at(slot.value_offset(), len)?;
        if let Some(nul) = bytes.iter().position(|&b| b == 0) {
            bytes.truncate(nul);
        }

        String::from_utf8(bytes).map_err(|e| ParamError::invalid_value(slot.name(), e.to_string()))
    }

    fn resolve(key: &str) -> ParamResult<SlotKey> {
        SlotKey::match_key(key).ok_or_else(|| {
            error!(key, "key not known");
            ParamError::unknown_key(key)
        })
    }
}

impl std::fmt::Debug for SlotParamStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotParamStore")
            .field("nvm_size", &self.device.size())
            .finish()
    }
}

impl KeyValueBackend for SlotParamStore {
    fn name(&self) -> &'static str {
        "radio-nvm"
    }

    fn set(&mut self, key: &str, value: &str) -> ParamResult<SetOutcome> {
        let slot = Self::resolve(key)?;
        self.write_slot(slot, value).inspect_err(|e| {
            error!(key, error = %e, "failed to write key to NVM");
        })
    }

    fn get(&self, key: &str) -> ParamResult<String> {
        let slot = Self::resolve(key)?;
        self.read_slot(slot).inspect_err(|e| {
            error!(key, error = %e, "failed to read key from NVM");
        })
    }

    fn keys(&self) -> ParamResult<Vec<String>> {
        Ok(SlotKey::ALL.iter().map(|k| k.name().to_string()).collect())
    }
}

/// Cuts `value` to at most [`MAX_NVM_STRING_LEN`] bytes on a char boundary.
fn truncate_to_slot(value: &str) -> &str {
    if value.len() <= MAX_NVM_STRING_LEN {
        return value;
    }
    let mut end = MAX_NVM_STRING_LEN;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
