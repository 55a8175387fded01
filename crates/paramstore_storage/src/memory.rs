//! In-memory NVM device for testing and simulation.

use crate::device::{in_bounds, NvmDevice};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;

/// Value of a freshly initialized cell.
pub const NVM_FILL: u8 = 0x00;

/// An in-memory NVM device.
///
/// The address space is allocated up front and filled with [`NVM_FILL`].
/// A write fault can be armed to make the next writes fail, which lets
/// tests exercise the store's failure paths without real hardware.
///
/// # Example
///
/// ```rust
/// use paramstore_storage::{InMemoryNvm, NvmDevice};
///
/// let mut nvm = InMemoryNvm::new(256);
/// nvm.write_at(32, b"logger").unwrap();
/// assert_eq!(nvm.read_at(32, 6).unwrap(), b"logger");
/// ```
#[derive(Debug)]
pub struct InMemoryNvm {
    data: RwLock<Vec<u8>>,
    fail_writes: RwLock<bool>,
}

impl InMemoryNvm {
    /// Creates a device of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_data(vec![NVM_FILL; size])
    }

    /// Creates a device holding pre-existing contents.
    ///
    /// Useful for testing reads of previously written layouts.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(data),
            fail_writes: RwLock::new(false),
        }
    }

    /// Returns a copy of the whole address space.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    /// Makes every subsequent write fail until disarmed.
    pub fn set_write_fault(&self, armed: bool) {
        *self.fail_writes.write() = armed;
    }
}

impl NvmDevice for InMemoryNvm {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let data = self.data.read();
        let size = data.len() as u64;

        if !in_bounds(offset, len, size) {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        let start = offset as usize;
        Ok(data[start..start + len].to_vec())
    }

    fn write_at(&mut self, offset: u64, new_data: &[u8]) -> StorageResult<()> {
        if *self.fail_writes.read() {
            return Err(StorageError::WriteFault { offset });
        }

        let mut data = self.data.write();
        let size = data.len() as u64;

        if !in_bounds(offset, new_data.len(), size) {
            return Err(StorageError::WritePastEnd {
                offset,
                len: new_data.len(),
                size,
            });
        }

        let start = offset as usize;
        data[start..start + new_data.len()].copy_from_slice(new_data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.data.read().len() as u64
    }

    fn flush(&mut self) -> StorageResult<()> {
        // Nothing is buffered
        Ok(())
    }
}
