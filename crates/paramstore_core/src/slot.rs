//! Slot table for the radio module NVM.
//!
//! Each recognized key owns a fixed record in NVM:
//!
//! ```text
//! offset  0: idstring   [len: u32 LE][28 bytes]
//! offset 32: adname     [len: u32 LE][28 bytes]
//! offset 64: ssid       ...
//! offset 96: password
//! offset 128: ipaddress
//! ```
//!
//! The layout is not relocatable. Adding or reordering keys moves every
//! later slot and orphans whatever was stored there.

use crate::error::ParamError;
use std::fmt;
use std::str::FromStr;

/// Size of the length prefix of a slot record.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Maximum number of value bytes a slot holds.
pub const MAX_NVM_STRING_LEN: usize = 28;

/// Distance between consecutive slots.
pub const SLOT_STRIDE: usize = LENGTH_FIELD_SIZE + MAX_NVM_STRING_LEN;

/// Number of recognized keys.
pub const SLOT_COUNT: usize = 5;

/// Bytes of NVM the whole table occupies.
pub const NVM_LAYOUT_SIZE: u64 = (SLOT_COUNT * SLOT_STRIDE) as u64;

const OFFSETS: [u64; SLOT_COUNT] = {
    let mut offsets = [0u64; SLOT_COUNT];
    let mut i = 0;
    while i < SLOT_COUNT {
        offsets[i] = (i * SLOT_STRIDE) as u64;
        i += 1;
    }
    offsets
};

/// A key recognized by the slot backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SlotKey {
    /// Logger identification string.
    IdString = 0,
    /// Bluetooth advertising name.
    AdName = 1,
    /// WiFi network SSID.
    Ssid = 2,
    /// WiFi network password.
    Password = 3,
    /// IP address.
    IpAddress = 4,
}

impl SlotKey {
    /// All keys in slot order.
    pub const ALL: [SlotKey; SLOT_COUNT] = [
        SlotKey::IdString,
        SlotKey::AdName,
        SlotKey::Ssid,
        SlotKey::Password,
        SlotKey::IpAddress,
    ];

    /// Matches a key name exactly. No prefix or case-insensitive matching.
    #[must_use]
    pub fn match_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == key)
    }

    /// Returns the key name as callers spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SlotKey::IdString => "idstring",
            SlotKey::AdName => "adname",
            SlotKey::Ssid => "ssid",
            SlotKey::Password => "password",
            SlotKey::IpAddress => "ipaddress",
        }
    }

    /// Returns the slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the byte offset of the slot's length field.
    #[must_use]
    pub const fn offset(self) -> u64 {
        OFFSETS[self.index()]
    }

    /// Returns the byte offset of the slot's value bytes.
    #[must_use]
    pub const fn value_offset(self) -> u64 {
        self.offset() + LENGTH_FIELD_SIZE as u64
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlotKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::match_key(s).ok_or_else(|| ParamError::unknown_key(s))
    }
}
