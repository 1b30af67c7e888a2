//! Vinyl Catalog library
//!
//! This crate exposes the record collection model, its filter/sort pipeline
//! and the persistence adapters so that the interactive shell and the
//! integration tests share one implementation.

pub mod baseline;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod override_store;
pub mod record;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use baseline::{create_baseline_source, BaselineError, BaselineSource};
pub use collection::{CollectionStore, Confirm, DeleteOutcome, LoadOrigin, Query, SortKey};
pub use error::{CatalogError, CatalogResult};
pub use override_store::{create_override_store, OverrideBackend, OverrideStore};
pub use record::{Condition, Grade, Record, RecordFields};
