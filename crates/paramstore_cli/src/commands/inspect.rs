//! Info and layout commands.

use paramstore_core::{Config, Platform, SlotKey, MAX_NVM_STRING_LEN, NVM_LAYOUT_SIZE};
use paramstore_storage::{FileNvm, FlashFs, NvmDevice};
use serde::Serialize;

/// Medium usage report.
#[derive(Debug, Serialize)]
pub struct InfoResult {
    /// Backend name.
    pub backend: &'static str,
    /// Filesystem root or NVM image path.
    pub path: String,
    /// Total bytes of the medium.
    pub total_bytes: u64,
    /// Bytes in use.
    pub used_bytes: u64,
}

/// One row of the slot table.
#[derive(Debug, Serialize)]
pub struct SlotRow {
    /// Key name.
    pub key: &'static str,
    /// Slot index.
    pub index: usize,
    /// Offset of the length field.
    pub offset: u64,
    /// Offset of the value bytes.
    pub value_offset: u64,
    /// Maximum value length.
    pub max_len: usize,
}

/// Gathers usage of the medium `platform` uses under `config`.
///
/// Read-only: a filesystem root that does not mount or an NVM image that
/// does not exist is an error, never created.
pub fn gather(
    platform: Platform,
    config: &Config,
) -> Result<InfoResult, Box<dyn std::error::Error>> {
    let result = match platform {
        Platform::FlashFs => {
            let fs = FlashFs::mount(&config.fs_root, config.fs_capacity)?;
            InfoResult {
                backend: "flash-fs",
                path: fs.root().display().to_string(),
                total_bytes: fs.total_bytes(),
                used_bytes: fs.used_bytes()?,
            }
        }
        Platform::RadioNvm => {
            let nvm = FileNvm::open_existing(&config.nvm_image)?;
            InfoResult {
                backend: "radio-nvm",
                path: nvm.path().display().to_string(),
                total_bytes: nvm.size(),
                used_bytes: NVM_LAYOUT_SIZE,
            }
        }
    };
    Ok(result)
}

/// Prints medium usage.
pub fn info(
    platform: Platform,
    config: &Config,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = gather(platform, config)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!("Parameter Storage");
            println!("=================");
            println!("  Backend: {}", result.backend);
            println!("  Path: {}", result.path);
            println!("  Total: {} bytes", result.total_bytes);
            println!("  Used: {} bytes", result.used_bytes);
        }
    }

    Ok(())
}

/// Returns the slot table.
#[must_use]
pub fn slot_rows() -> Vec<SlotRow> {
    SlotKey::ALL
        .iter()
        .map(|key| SlotRow {
            key: key.name(),
            index: key.index(),
            offset: key.offset(),
            value_offset: key.value_offset(),
            max_len: MAX_NVM_STRING_LEN,
        })
        .collect()
}

/// Prints the NVM slot table.
pub fn layout(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let rows = slot_rows();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => {
            println!("NVM Slot Layout ({NVM_LAYOUT_SIZE} bytes)");
            println!("  {:<5} {:<12} {:>6} {:>6} {:>4}", "slot", "key", "offset", "value", "max");
            for row in &rows {
                println!(
                    "  {:<5} {:<12} {:>6} {:>6} {:>4}",
                    row.index, row.key, row.offset, row.value_offset, row.max_len
                );
            }
        }
    }

    Ok(())
}
