//! In-memory override store.
//!
//! Nothing survives the process. Used with `--override-backend memory` and
//! throughout the tests.

use super::trait_def::{decode_records, encode_records, OverrideStore, OverrideStoreResult};
use crate::record::Record;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryOverrideStore {
    value: Mutex<Option<String>>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value, bypassing encoding.
    pub fn with_raw<S: Into<String>>(raw: S) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

impl OverrideStore for InMemoryOverrideStore {
    fn read(&self) -> OverrideStoreResult<Option<Vec<Record>>> {
        match self.value.lock().unwrap().as_deref() {
            None => Ok(None),
            Some(raw) => decode_records(raw).map(Some),
        }
    }

    fn write(&self, records: &[Record]) -> OverrideStoreResult<()> {
        let encoded = encode_records(records)?;
        *self.value.lock().unwrap() = Some(encoded);
        Ok(())
    }

    fn clear(&self) -> OverrideStoreResult<()> {
        *self.value.lock().unwrap() = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
