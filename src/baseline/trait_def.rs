//! BaselineSource trait definition.
//!
//! The baseline is the read-only document the collection starts from. It is
//! fetched once at startup and must be a JSON array of records.

use crate::record::Record;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("baseline document is not a JSON array")]
    NotAnArray,
}

pub type BaselineResult<T> = Result<T, BaselineError>;

#[async_trait]
pub trait BaselineSource: Send + Sync {
    async fn fetch(&self) -> BaselineResult<Vec<Record>>;

    /// Where the document comes from, for display.
    fn describe(&self) -> String;
}

/// Parse a baseline document. Only a top-level array is accepted.
pub fn parse_document(bytes: &[u8]) -> BaselineResult<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    if !value.is_array() {
        return Err(BaselineError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}
