//! # ParamStore Storage
//!
//! Storage devices underneath the logger parameter store.
//!
//! This crate provides the lowest-level storage abstraction. Devices are
//! **opaque byte stores** - they do not know about parameter keys, slot
//! layouts or file naming.
//!
//! ## Design Principles
//!
//! - Devices are simple byte stores (read, write, flush)
//! - No knowledge of the key table or value encoding
//! - Must be `Send + Sync`
//! - The parameter store owns all format interpretation
//!
//! ## Available Devices
//!
//! - [`FlashFs`] - Flat flash filesystem rooted at a directory
//! - [`InMemoryNvm`] - Radio module NVM for testing and simulation
//! - [`FileNvm`] - Radio module NVM backed by an image file
//!
//! ## Example
//!
//! ```rust
//! use paramstore_storage::{InMemoryNvm, NvmDevice};
//!
//! let mut nvm = InMemoryNvm::new(256);
//! nvm.write_at(0, b"hello world").unwrap();
//! let data = nvm.read_at(0, 11).unwrap();
//! assert_eq!(&data, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod device;
mod error;
mod file_nvm;
mod flash_fs;
mod memory;

pub use device::NvmDevice;
pub use error::{StorageError, StorageResult};
pub use file_nvm::FileNvm;
pub use flash_fs::{FlashFs, DEFAULT_FS_CAPACITY};
pub use memory::{InMemoryNvm, NVM_FILL};
