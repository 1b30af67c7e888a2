mod factory;
mod file_store;
mod memory_store;
mod sqlite_store;
mod trait_def;

pub use factory::{create_override_store, OverrideBackend};
pub use file_store::JsonFileOverrideStore;
pub use memory_store::InMemoryOverrideStore;
pub use sqlite_store::SqliteOverrideStore;
pub use trait_def::{
    decode_records, encode_records, OverrideStore, OverrideStoreError, OverrideStoreResult,
    DEFAULT_OVERRIDE_KEY,
};
