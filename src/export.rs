//! JSON export of the collection.

use crate::error::{CatalogError, CatalogResult};
use crate::record::Record;
use std::path::Path;
use tracing::info;

/// Pretty-printed JSON with a two-space indent, the same shape a baseline
/// document has, so an export can be loaded back as a baseline.
pub fn export_json(records: &[Record]) -> CatalogResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write [`export_json`] to `path`, replacing any existing file.
pub fn export_to_file<P: AsRef<Path>>(records: &[Record], path: P) -> CatalogResult<()> {
    let path = path.as_ref();
    let json = export_json(records)?;
    std::fs::write(path, json).map_err(|source| CatalogError::Export {
        path: path.display().to_string(),
        source,
    })?;
    info!("Exported {} records to {:?}", records.len(), path);
    Ok(())
}
