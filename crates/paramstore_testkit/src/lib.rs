//! # ParamStore Testkit
//!
//! Test utilities for the logger parameter store.
//!
//! This crate provides:
//! - Store fixtures on in-memory NVM, NVM images and temporary filesystems
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use paramstore_testkit::prelude::*;
//!
//! with_flash_store(|store| {
//!     assert!(store.set_key("idstring", "UNH-CCOM-1"));
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
