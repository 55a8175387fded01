//! NVM device trait definition.

use crate::error::StorageResult;

/// A raw, byte-addressed non-volatile memory region.
///
/// This models the user NVM area exposed by a radio module: a small,
/// fixed-size address space that can be read and written at arbitrary
/// offsets. Devices are **opaque byte stores**; slot layout and value
/// encoding belong to the parameter store.
///
/// # Invariants
///
/// - `size` is fixed for the lifetime of the device
/// - `read_at` returns exactly the bytes last written at that range
/// - accesses outside `0..size` fail without side effects
/// - Devices must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryNvm`] - For testing and simulation
/// - [`super::FileNvm`] - NVM image file on the host
pub trait NvmDevice: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range extends past the device or an
    /// I/O error occurs.
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Writes `data` starting at `offset`, overwriting what was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the range extends past the device or the
    /// device rejects the write.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Returns the size of the address space in bytes.
    fn size(&self) -> u64;

    /// Flushes pending writes to the medium.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;
}

/// Checks that `offset..offset + len` lies inside a device of `size` bytes.
pub(crate) fn in_bounds(offset: u64, len: usize, size: u64) -> bool {
    offset
        .checked_add(len as u64)
        .is_some_and(|end| end <= size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_check() {
        assert!(in_bounds(0, 0, 0));
        assert!(in_bounds(0, 32, 32));
        assert!(in_bounds(28, 4, 32));
        assert!(!in_bounds(29, 4, 32));
        assert!(!in_bounds(u64::MAX, 1, 32));
    }
}
