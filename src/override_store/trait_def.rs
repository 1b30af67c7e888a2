//! OverrideStore trait definition.
//!
//! The override store is the locally persisted copy of the collection. Once
//! it holds a non-empty sequence it takes precedence over the baseline
//! document. Values are always the JSON serialization of the full record
//! array, whatever the backend.

use crate::record::Record;
use std::sync::Arc;
use thiserror::Error;

/// Name under which the collection is stored by key-value backends.
pub const DEFAULT_OVERRIDE_KEY: &str = "vinylRecords";

#[derive(Debug, Error)]
pub enum OverrideStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed override data: {0}")]
    Corrupt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OverrideStoreResult<T> = Result<T, OverrideStoreError>;

pub trait OverrideStore: Send + Sync {
    /// Read the stored sequence. `Ok(None)` when nothing was ever written.
    fn read(&self) -> OverrideStoreResult<Option<Vec<Record>>>;

    /// Replace the stored sequence with `records`.
    fn write(&self, records: &[Record]) -> OverrideStoreResult<()>;

    /// Forget the stored sequence, so the baseline is used on next load.
    fn clear(&self) -> OverrideStoreResult<()>;

    /// Where the data lives, for display.
    fn describe(&self) -> String;
}

impl<T: OverrideStore + ?Sized> OverrideStore for Arc<T> {
    fn read(&self) -> OverrideStoreResult<Option<Vec<Record>>> {
        (**self).read()
    }

    fn write(&self, records: &[Record]) -> OverrideStoreResult<()> {
        (**self).write(records)
    }

    fn clear(&self) -> OverrideStoreResult<()> {
        (**self).clear()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Decode a stored value. Anything but a JSON array of records is corrupt.
pub fn decode_records(raw: &str) -> OverrideStoreResult<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| OverrideStoreError::Corrupt(format!("invalid JSON: {}", e)))?;
    if !value.is_array() {
        return Err(OverrideStoreError::Corrupt(
            "expected a JSON array of records".to_string(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| OverrideStoreError::Corrupt(format!("invalid record: {}", e)))
}

pub fn encode_records(records: &[Record]) -> OverrideStoreResult<String> {
    Ok(serde_json::to_string(records)?)
}
