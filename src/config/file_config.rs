use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Baseline document: a path, or an http(s) URL.
    pub data_source: Option<String>,
    pub http_timeout_sec: Option<u64>,

    /// Override store backend: "file", "sqlite" or "memory".
    pub override_backend: Option<String>,
    pub override_path: Option<String>,
    pub override_key: Option<String>,

    pub export_path: Option<String>,
    /// Id generation scheme: "timestamp" or "uuid".
    pub id_scheme: Option<String>,
    pub default_sort: Option<String>,
    pub assume_yes: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
