//! # ParamStore Core
//!
//! Persistent key-value parameters for the data logger.
//!
//! Callers set and read small named strings (logger id, advertising name,
//! WiFi credentials, IP address) without knowing which medium holds them.
//! Two backends exist, and a build carries one:
//!
//! - [`FileParamStore`] - one file per key on the flash filesystem
//! - [`SlotParamStore`] - fixed 32-byte slots in the radio module's NVM
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paramstore_core::{Config, ParamStoreFactory};
//!
//! let mut params = ParamStoreFactory::create(&Config::default()).unwrap();
//! params.set_key("idstring", "UNH-CCOM-1");
//!
//! let mut id = String::new();
//! if params.get_key("idstring", &mut id) {
//!     println!("logger {id}");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod factory;
mod file_store;
mod slot;
mod slot_store;
mod store;

pub use backend::{KeyValueBackend, SetOutcome};
pub use config::{Config, DEFAULT_NVM_SIZE};
pub use error::{ParamError, ParamResult};
pub use factory::{ParamStoreFactory, Platform};
pub use file_store::{FileParamStore, MAX_FILE_KEY_LEN, PARAM_FILE_EXT};
pub use slot::{
    SlotKey, LENGTH_FIELD_SIZE, MAX_NVM_STRING_LEN, NVM_LAYOUT_SIZE, SLOT_COUNT, SLOT_STRIDE,
};
pub use slot_store::SlotParamStore;
pub use store::ParamStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
