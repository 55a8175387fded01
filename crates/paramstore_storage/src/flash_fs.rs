//! Flash filesystem rooted at a host directory.
//!
//! This stands in for the SPIFFS partition on the logger's flash chip:
//!
//! ```text
//! <root>/
//! ├─ idstring.par
//! ├─ ssid.par
//! └─ ...
//! ```
//!
//! The filesystem is flat. Capacity is a fixed partition size, and used
//! space is the sum of the file lengths under the root. Files are opened
//! and closed inside each call; no handle outlives an operation.

use crate::error::{StorageError, StorageResult};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Default partition size (the 1.5 MB SPIFFS partition of the stock ESP32 layout).
pub const DEFAULT_FS_CAPACITY: u64 = 0x17_0000;

/// A mounted flash filesystem.
#[derive(Debug, Clone)]
pub struct FlashFs {
    root: PathBuf,
    capacity: u64,
}

impl FlashFs {
    /// Mounts an existing filesystem at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotMounted`] if `root` is not a directory.
    pub fn mount(root: &Path, capacity: u64) -> StorageResult<Self> {
        if !root.is_dir() {
            return Err(StorageError::NotMounted(format!(
                "no filesystem at {}",
                root.display()
            )));
        }

        Ok(Self {
            root: root.to_path_buf(),
            capacity,
        })
    }

    /// Formats `root` and mounts the empty filesystem.
    ///
    /// This is destructive: anything already at `root` is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the old contents cannot be removed or the
    /// directory cannot be created.
    pub fn format(root: &Path, capacity: u64) -> StorageResult<Self> {
        if root.is_dir() {
            fs::remove_dir_all(root)?;
        } else if root.exists() {
            fs::remove_file(root)?;
        }
        fs::create_dir_all(root)?;
        Self::mount(root, capacity)
    }

    /// Mounts `root`, formatting it first if the mount fails and
    /// `format_if_unmounted` is set.
    ///
    /// Returns the filesystem and whether a format took place.
    ///
    /// # Errors
    ///
    /// Returns the mount error when formatting is not allowed, or the
    /// format error when it fails.
    pub fn mount_or_format(
        root: &Path,
        capacity: u64,
        format_if_unmounted: bool,
    ) -> StorageResult<(Self, bool)> {
        match Self::mount(root, capacity) {
            Ok(fs) => Ok((fs, false)),
            Err(_) if format_if_unmounted => Ok((Self::format(root, capacity)?, true)),
            Err(e) => Err(e),
        }
    }

    /// Returns the filesystem root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the partition size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.capacity
    }

    /// Returns the bytes used by files on the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be listed.
    pub fn used_bytes(&self) -> StorageResult<u64> {
        let mut used = 0;
        for entry in fs::read_dir(&self.root)? {
            let meta = entry?.metadata()?;
            if meta.is_file() {
                used += meta.len();
            }
        }
        Ok(used)
    }

    /// Returns the host path of a file on the filesystem.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Creates or truncates `name` and writes `data` into it.
    ///
    /// The space check runs before the file is opened, so a write that
    /// does not fit leaves the previous contents in place.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoSpace`] if the data does not fit, or an
    /// I/O error if the file cannot be opened or written.
    pub fn write_file(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.path_for(name);
        let existing = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        let used = self.used_bytes()?.saturating_sub(existing);
        let available = self.capacity.saturating_sub(used);
        let needed = data.len() as u64;
        if needed > available {
            return Err(StorageError::NoSpace { needed, available });
        }

        let mut file = File::create(&path)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(())
    }

    /// Reads the whole of `name`, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for anything other than a missing file.
    pub fn read_file(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        let mut file = match File::open(self.path_for(name)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    /// Lists the names of the files on the filesystem, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be listed.
    pub fn list(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mount_missing_root_fails() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("spiffs");

        let result = FlashFs::mount(&root, 1024);
        assert!(matches!(result, Err(StorageError::NotMounted(_))));
    }

    #[test]
    fn mount_or_format_creates_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("spiffs");

        let (fs, formatted) = FlashFs::mount_or_format(&root, 1024, true).unwrap();
        assert!(formatted);
        assert!(root.is_dir());
        assert_eq!(fs.total_bytes(), 1024);
        assert_eq!(fs.used_bytes().unwrap(), 0);

        let (_, formatted) = FlashFs::mount_or_format(&root, 1024, true).unwrap();
        assert!(!formatted);
    }

    #[test]
    fn mount_or_format_without_format_fails() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("spiffs");

        assert!(FlashFs::mount_or_format(&root, 1024, false).is_err());
        assert!(!root.exists());
    }

    #[test]
    fn format_replaces_stray_file() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("spiffs");
        fs::write(&root, b"not a filesystem").unwrap();

        let (fs, formatted) = FlashFs::mount_or_format(&root, 1024, true).unwrap();
        assert!(formatted);
        assert!(fs.list().unwrap().is_empty());
    }

    #[test]
    fn format_wipes_contents() {
        let dir = tempdir().unwrap();
        let fs = FlashFs::format(dir.path(), 1024).unwrap();
        fs.write_file("a.par", b"1").unwrap();

        let fs = FlashFs::format(dir.path(), 1024).unwrap();
        assert!(fs.list().unwrap().is_empty());
    }

    #[test]
    fn write_read_overwrite() {
        let dir = tempdir().unwrap();
        let fs = FlashFs::mount(dir.path(), 1024).unwrap();

        fs.write_file("k.par", b"longer value").unwrap();
        fs.write_file("k.par", b"short").unwrap();

        assert_eq!(fs.read_file("k.par").unwrap().unwrap(), b"short");
        assert_eq!(fs.used_bytes().unwrap(), 5);
    }

    #[test]
    fn read_missing_is_none() {
        let dir = tempdir().unwrap();
        let fs = FlashFs::mount(dir.path(), 1024).unwrap();
        assert!(fs.read_file("nope.par").unwrap().is_none());
    }

    #[test]
    fn write_over_capacity_keeps_old_contents() {
        let dir = tempdir().unwrap();
        let fs = FlashFs::mount(dir.path(), 8).unwrap();

        fs.write_file("k.par", b"1234").unwrap();
        let result = fs.write_file("k.par", b"123456789");
        assert!(matches!(
            result,
            Err(StorageError::NoSpace {
                needed: 9,
                available: 8
            })
        ));
        assert_eq!(fs.read_file("k.par").unwrap().unwrap(), b"1234");

        // Replacing a file may reuse its own space
        fs.write_file("k.par", b"12345678").unwrap();
    }

    #[test]
    fn list_sorted_files_only() {
        let dir = tempdir().unwrap();
        let fs = FlashFs::mount(dir.path(), 1024).unwrap();
        fs.write_file("b.par", b"2").unwrap();
        fs.write_file("a.par", b"1").unwrap();
        std::fs::create_dir(dir.path().join("c.par")).unwrap();

        assert_eq!(fs.list().unwrap(), vec!["a.par", "b.par"]);
    }
}
