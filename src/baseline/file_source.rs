use super::trait_def::{parse_document, BaselineError, BaselineResult, BaselineSource};
use crate::record::Record;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Baseline document on the local filesystem.
pub struct FileBaselineSource {
    path: PathBuf,
}

impl FileBaselineSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl BaselineSource for FileBaselineSource {
    async fn fetch(&self) -> BaselineResult<Vec<Record>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| BaselineError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        debug!("Read {} bytes from {:?}", bytes.len(), self.path);
        parse_document(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
