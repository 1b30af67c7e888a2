//! Factory function for creating override store instances

use super::{InMemoryOverrideStore, JsonFileOverrideStore, OverrideStore, SqliteOverrideStore};
use anyhow::Result;
use std::fmt;
use std::path::Path;
use tracing::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverrideBackend {
    /// JSON document on disk.
    #[default]
    File,
    /// Key-value table in a SQLite database.
    Sqlite,
    /// Process memory only; changes are lost on exit.
    Memory,
}

impl OverrideBackend {
    /// Location used when none is configured.
    pub fn default_path(&self) -> Option<&'static str> {
        match self {
            OverrideBackend::File => Some("vinyl_records.json"),
            OverrideBackend::Sqlite => Some("vinyl_records.db"),
            OverrideBackend::Memory => None,
        }
    }
}

impl fmt::Display for OverrideBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverrideBackend::File => "file",
            OverrideBackend::Sqlite => "sqlite",
            OverrideBackend::Memory => "memory",
        };
        f.write_str(s)
    }
}

/// Create an override store for the configured backend.
///
/// `path` is ignored by the memory backend.
pub fn create_override_store(
    backend: OverrideBackend,
    path: &Path,
    key: &str,
) -> Result<Box<dyn OverrideStore>> {
    match backend {
        OverrideBackend::File => {
            info!("Using JSON file override store at {:?}", path);
            Ok(Box::new(JsonFileOverrideStore::new(path, key)))
        }
        OverrideBackend::Sqlite => {
            info!("Using SQLite override store at {:?}", path);
            Ok(Box::new(SqliteOverrideStore::new(path, key)?))
        }
        OverrideBackend::Memory => {
            info!("Using in-memory override store (changes are not kept)");
            Ok(Box::new(InMemoryOverrideStore::new()))
        }
    }
}
