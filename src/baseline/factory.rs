//! Factory function for creating baseline sources

use super::{BaselineSource, FileBaselineSource, HttpBaselineSource};
use anyhow::Result;
use tracing::info;

fn is_url(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Create a baseline source for `location`: a URL when it starts with
/// `http://` or `https://`, a file path otherwise.
pub fn create_baseline_source(location: &str, timeout_sec: u64) -> Result<Box<dyn BaselineSource>> {
    if is_url(location) {
        info!("Using HTTP baseline at {}", location);
        Ok(Box::new(HttpBaselineSource::new(
            location.to_string(),
            timeout_sec,
        )?))
    } else {
        info!("Using file baseline at {}", location);
        Ok(Box::new(FileBaselineSource::new(location)))
    }
}
