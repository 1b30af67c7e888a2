use super::trait_def::{parse_document, BaselineError, BaselineResult, BaselineSource};
use crate::record::Record;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Baseline document served over HTTP(S), fetched with a single GET.
pub struct HttpBaselineSource {
    client: reqwest::Client,
    url: String,
}

impl HttpBaselineSource {
    pub fn new(url: String, timeout_sec: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl BaselineSource for HttpBaselineSource {
    async fn fetch(&self) -> BaselineResult<Vec<Record>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BaselineError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), self.url);
        parse_document(&bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
