//! Error types shared across the catalog.

use crate::override_store::OverrideStoreError;
use crate::record::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("failed to persist collection: {0}")]
    Persist(#[from] OverrideStoreError),

    #[error("failed to export collection to {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
