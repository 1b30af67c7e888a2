//! JSON file override store.
//!
//! The file is a JSON object mapping keys to record arrays, so several
//! collections can share one file the way they would share browser storage:
//!
//! ```json
//! { "vinylRecords": [ { "id": "1700000000000", "artist": "...", ... } ] }
//! ```

use super::trait_def::{decode_records, OverrideStore, OverrideStoreError, OverrideStoreResult};
use crate::record::Record;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonFileOverrideStore {
    file_path: PathBuf,
    key: String,
    // Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl JsonFileOverrideStore {
    pub fn new<P: AsRef<Path>, K: Into<String>>(file_path: P, key: K) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_dump(&self) -> OverrideStoreResult<Option<Map<String, Value>>> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(OverrideStoreError::Corrupt(format!(
                "{} does not contain a JSON object",
                self.file_path.display()
            ))),
            Err(e) => Err(OverrideStoreError::Corrupt(format!(
                "{} is not valid JSON: {}",
                self.file_path.display(),
                e
            ))),
        }
    }

    fn save_dump(&self, dump: &Map<String, Value>) -> OverrideStoreResult<()> {
        if let Some(dir) = self.file_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json_string = serde_json::to_string_pretty(dump)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json_string.as_bytes())?;
        fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }

    /// Existing dump to update in place. A corrupt file is replaced, losing
    /// every key it held.
    fn dump_for_update(&self) -> Map<String, Value> {
        match self.load_dump() {
            Ok(Some(dump)) => dump,
            Ok(None) => Map::new(),
            Err(err) => {
                warn!(
                    "Override file {} is unreadable and will be replaced, other keys in it are lost: {}",
                    self.file_path.display(),
                    err
                );
                Map::new()
            }
        }
    }
}

impl OverrideStore for JsonFileOverrideStore {
    fn read(&self) -> OverrideStoreResult<Option<Vec<Record>>> {
        let _guard = self.lock.lock().unwrap();
        let Some(dump) = self.load_dump()? else {
            return Ok(None);
        };
        match dump.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(raw)) => decode_records(raw).map(Some),
            Some(value) => decode_records(&value.to_string()).map(Some),
        }
    }

    fn write(&self, records: &[Record]) -> OverrideStoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut dump = self.dump_for_update();
        dump.insert(self.key.clone(), serde_json::to_value(records)?);
        self.save_dump(&dump)
    }

    fn clear(&self) -> OverrideStoreResult<()> {
        let _guard = self.lock.lock().unwrap();
        let mut dump = self.dump_for_update();
        if dump.remove(&self.key).is_some() {
            self.save_dump(&dump)?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{} [{}]", self.file_path.display(), self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordFields;
    use tempfile::TempDir;

    fn records() -> Vec<Record> {
        vec![
            Record::new(
                "1".to_string(),
                "2024-01-01T00:00:00.000Z".to_string(),
                RecordFields::new("Portishead", "Dummy").with_year(1994),
            ),
            Record::new(
                "2".to_string(),
                "2024-01-02T00:00:00.000Z".to_string(),
                RecordFields::new("Massive Attack", "Mezzanine").with_genre("Trip Hop"),
            ),
        ]
    }

    #[test]
    fn test_read_returns_none_when_missing() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileOverrideStore::new(dir.path().join("records.json"), "vinylRecords");
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store =
            JsonFileOverrideStore::new(dir.path().join("nested/records.json"), "vinylRecords");
        store.write(&records()).unwrap();
        assert_eq!(store.read().unwrap(), Some(records()));
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let a = JsonFileOverrideStore::new(&path, "a");
        let b = JsonFileOverrideStore::new(&path, "b");

        a.write(&records()).unwrap();
        b.write(&records()[..1]).unwrap();

        assert_eq!(a.read().unwrap().unwrap().len(), 2);
        assert_eq!(b.read().unwrap().unwrap().len(), 1);

        a.clear().unwrap();
        assert!(a.read().unwrap().is_none());
        assert_eq!(b.read().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_string_encoded_value_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let raw = serde_json::to_string(&records()).unwrap();
        let dump = serde_json::json!({ "vinylRecords": raw });
        fs::write(&path, dump.to_string()).unwrap();

        let store = JsonFileOverrideStore::new(&path, "vinylRecords");
        assert_eq!(store.read().unwrap(), Some(records()));
    }

    #[test]
    fn test_corrupt_file_is_reported_then_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileOverrideStore::new(&path, "vinylRecords");
        assert!(matches!(
            store.read().unwrap_err(),
            OverrideStoreError::Corrupt(_)
        ));

        store.write(&records()).unwrap();
        assert_eq!(store.read().unwrap(), Some(records()));

        let dump: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<&String> = dump.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["vinylRecords"]);
    }
}
