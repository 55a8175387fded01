//! Set, get and list commands.

use paramstore_core::{ParamError, ParamStore, SetOutcome};
use serde::Serialize;
use tracing::info;

/// One parameter in a listing.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ParamEntry {
    /// Key name.
    pub key: String,
    /// Stored value, or `None` if the key has no value.
    pub value: Option<String>,
}

/// Stores a value.
pub fn set(
    store: &mut ParamStore,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(key, backend = store.backend_name(), "setting parameter");

    match store.try_set(key, value)? {
        SetOutcome::Stored => println!("✓ {key} set"),
        SetOutcome::Truncated {
            original_len,
            stored_len,
        } => println!("✓ {key} set (truncated from {original_len} to {stored_len} bytes)"),
    }

    Ok(())
}

/// Prints a value.
pub fn get(store: &ParamStore, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!(key, backend = store.backend_name(), "reading parameter");
    println!("{}", store.try_get(key)?);
    Ok(())
}

/// Collects every key the backend reports with its value.
pub fn collect(store: &ParamStore) -> Result<Vec<ParamEntry>, Box<dyn std::error::Error>> {
    let mut entries = Vec::new();
    for key in store.keys()? {
        let value = match store.try_get(&key) {
            Ok(value) => Some(value),
            Err(ParamError::KeyNotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };
        entries.push(ParamEntry { key, value });
    }
    Ok(entries)
}

/// Prints every parameter.
pub fn list(store: &ParamStore, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entries = collect(store)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        _ => {
            println!("Parameters ({})", store.backend_name());
            println!("==========");
            for entry in &entries {
                match &entry.value {
                    Some(value) => println!("  {:<12} {value}", entry.key),
                    None => println!("  {:<12} <unset>", entry.key),
                }
            }
        }
    }

    Ok(())
}
