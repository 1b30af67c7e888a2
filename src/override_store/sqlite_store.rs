//! SQLite override store.
//!
//! Values live in a small key-value table, one row per collection key.

use super::trait_def::{decode_records, encode_records, OverrideStore, OverrideStoreResult};
use crate::record::Record;
use crate::sqlite_column;
use crate::sqlite_persistence::{read_schema_version, Column, SqlType, Table, VersionedSchema};
use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

const OVERRIDE_STATE_TABLE_V1: Table = Table {
    name: "override_state",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("value", &SqlType::Text, non_null = true),
        sqlite_column!("updated_at", &SqlType::Text, non_null = true),
    ],
};

pub const OVERRIDE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[OVERRIDE_STATE_TABLE_V1],
}];

pub struct SqliteOverrideStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
    key: String,
}

impl SqliteOverrideStore {
    pub fn new<P: AsRef<Path>, K: Into<String>>(db_path: P, key: K) -> anyhow::Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();
        if is_new_db {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() {
                    std::fs::create_dir_all(dir).with_context(|| {
                        format!("Failed to create directory {}", dir.display())
                    })?;
                }
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open override database {}", path.display()))?;
        let latest = Self::latest_schema()?;

        if is_new_db {
            info!("Creating new override database at {:?}", path);
            latest.create(&conn)?;
        } else {
            let db_version = read_schema_version(&conn)?;
            let schema = OVERRIDE_VERSIONED_SCHEMAS
                .iter()
                .find(|s| s.version as i64 == db_version)
                .with_context(|| format!("Unknown override database version {}", db_version))?;
            schema.validate(&conn).with_context(|| {
                format!(
                    "Override database schema validation failed for version {}",
                    db_version
                )
            })?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: Some(path.to_path_buf()),
            key: key.into(),
        })
    }

    pub fn in_memory<K: Into<String>>(key: K) -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::latest_schema()?.create(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: None,
            key: key.into(),
        })
    }

    fn latest_schema() -> anyhow::Result<&'static VersionedSchema> {
        OVERRIDE_VERSIONED_SCHEMAS
            .last()
            .context("No override database schema defined")
    }

    fn get_value(&self) -> OverrideStoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row(
                "SELECT value FROM override_state WHERE key = ?1",
                params![self.key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl OverrideStore for SqliteOverrideStore {
    fn read(&self) -> OverrideStoreResult<Option<Vec<Record>>> {
        match self.get_value()? {
            None => Ok(None),
            Some(raw) => decode_records(&raw).map(Some),
        }
    }

    fn write(&self, records: &[Record]) -> OverrideStoreResult<()> {
        let value = encode_records(records)?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO override_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![self.key, value, now],
        )?;
        Ok(())
    }

    fn clear(&self) -> OverrideStoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM override_state WHERE key = ?1",
            params![self.key],
        )?;
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.db_path {
            Some(path) => format!("{} [{}]", path.display(), self.key),
            None => format!("in-memory sqlite [{}]", self.key),
        }
    }
}
