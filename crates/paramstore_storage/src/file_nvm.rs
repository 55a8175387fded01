//! File-backed NVM image.

use crate::device::{in_bounds, NvmDevice};
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An NVM device backed by an image file on the host.
///
/// Used by the simulator and the CLI to stand in for a radio module's
/// NVM. The image is a flat dump of the address space; a new image is
/// zero-filled to the requested size.
///
/// # Durability
///
/// - `write_at` goes straight to the OS
/// - `flush()` calls `File::sync_all()`
///
/// # Example
///
/// ```no_run
/// use paramstore_storage::{FileNvm, NvmDevice};
/// use std::path::Path;
///
/// let mut nvm = FileNvm::open(Path::new("nvm.bin"), 256).unwrap();
/// nvm.write_at(0, b"logger").unwrap();
/// nvm.flush().unwrap();
/// ```
#[derive(Debug)]
pub struct FileNvm {
    path: PathBuf,
    file: RwLock<File>,
    size: u64,
}

impl FileNvm {
    /// Opens or creates an NVM image of at least `size` bytes.
    ///
    /// A shorter image is zero-extended; a longer image keeps its length.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, created or resized.
    pub fn open(path: &Path, size: u64) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let current = file.metadata()?.len();
        if current < size {
            file.set_len(size)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size: current.max(size),
        })
    }

    /// Opens an existing NVM image without creating or resizing it.
    ///
    /// The device size is the image's current length.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the image does not exist or cannot be opened.
    pub fn open_existing(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size,
        })
    }

    /// Returns the path to the image file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NvmDevice for FileNvm {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        if !in_bounds(offset, len, self.size) {
            return Err(StorageError::ReadPastEnd {
                offset,
                len,
                size: self.size,
            });
        }

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        if !in_bounds(offset, data.len(), self.size) {
            return Err(StorageError::WritePastEnd {
                offset,
                len: data.len(),
                size: self.size,
            });
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;

        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn flush(&mut self) -> StorageResult<()> {
        let mut file = self.file.write();
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn image_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nvm.bin");

        let nvm = FileNvm::open(&path, 256).unwrap();
        assert_eq!(nvm.size(), 256);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 256);
        assert_eq!(nvm.read_at(0, 4).unwrap(), vec![0u8; 4]);
    }

    #[test]
    fn image_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nvm.bin");

        let mut nvm = FileNvm::open(&path, 64).unwrap();
        nvm.write_at(32, b"adname").unwrap();

        assert_eq!(nvm.read_at(32, 6).unwrap(), b"adname");
    }

    #[test]
    fn image_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nvm.bin");

        {
            let mut nvm = FileNvm::open(&path, 64).unwrap();
            nvm.write_at(10, b"persistent").unwrap();
            nvm.flush().unwrap();
        }

        {
            let nvm = FileNvm::open(&path, 64).unwrap();
            assert_eq!(nvm.read_at(10, 10).unwrap(), b"persistent");
        }
    }

    #[test]
    fn image_keeps_longer_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nvm.bin");
        std::fs::write(&path, vec![7u8; 300]).unwrap();

        let nvm = FileNvm::open(&path, 256).unwrap();
        assert_eq!(nvm.size(), 300);
        assert_eq!(nvm.read_at(299, 1).unwrap(), vec![7u8]);
    }

    #[test]
    fn image_out_of_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nvm.bin");

        let mut nvm = FileNvm::open(&path, 16).unwrap();
        assert!(matches!(
            nvm.read_at(12, 8),
            Err(StorageError::ReadPastEnd { .. })
        ));
        assert!(matches!(
            nvm.write_at(12, b"12345"),
            Err(StorageError::WritePastEnd { .. })
        ));
    }

    #[test]
    fn open_existing_keeps_image_as_is() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nvm.bin");
        std::fs::write(&path, vec![3u8; 200]).unwrap();

        let nvm = FileNvm::open_existing(&path).unwrap();
        assert_eq!(nvm.size(), 200);
        assert_eq!(nvm.read_at(199, 1).unwrap(), vec![3u8]);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 200);
    }

    #[test]
    fn open_existing_missing_image_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typo").join("nvm.bin");

        let result = FileNvm::open_existing(&path);
        assert!(matches!(
            result,
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound
        ));
        assert!(!path.exists());
        assert!(!dir.path().join("typo").exists());
    }

    #[test]
    fn image_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("nvm.bin");

        let nvm = FileNvm::open(&path, 8).unwrap();
        assert_eq!(nvm.path(), path);
        assert!(path.exists());
    }
}
