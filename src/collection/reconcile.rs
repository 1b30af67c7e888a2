//! Selection of the working sequence at startup.
//!
//! A non-empty override replaces the baseline as a whole; there is no
//! per-record merge.

use crate::baseline::BaselineError;
use crate::override_store::OverrideStoreError;
use crate::record::Record;
use std::fmt;
use tracing::{error, warn};

/// Where the working sequence came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Baseline loaded, no usable override.
    Baseline,
    /// Baseline loaded, replaced by a non-empty override.
    Override,
    /// Baseline failed, the override was used instead.
    OverrideFallback,
    /// Baseline failed and no override was available.
    Empty,
}

impl fmt::Display for LoadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadOrigin::Baseline => "baseline",
            LoadOrigin::Override => "local override",
            LoadOrigin::OverrideFallback => "local override (baseline unavailable)",
            LoadOrigin::Empty => "empty (baseline unavailable)",
        };
        f.write_str(s)
    }
}

/// Pick between the baseline and the override.
pub fn select(
    baseline: Option<Vec<Record>>,
    overrides: Option<Vec<Record>>,
) -> (Vec<Record>, LoadOrigin) {
    match (baseline, overrides) {
        (Some(_), Some(overrides)) if !overrides.is_empty() => (overrides, LoadOrigin::Override),
        (Some(baseline), _) => (baseline, LoadOrigin::Baseline),
        (None, Some(overrides)) if !overrides.is_empty() => {
            (overrides, LoadOrigin::OverrideFallback)
        }
        (None, _) => (Vec::new(), LoadOrigin::Empty),
    }
}

/// Like [`select`], but takes the raw outcomes of fetching the baseline and
/// reading the override. Failures are logged and treated as absence.
pub fn reconcile(
    baseline: Result<Vec<Record>, BaselineError>,
    overrides: Result<Option<Vec<Record>>, OverrideStoreError>,
) -> (Vec<Record>, LoadOrigin) {
    let baseline = match baseline {
        Ok(records) => Some(records),
        Err(err) => {
            error!("Error loading baseline records: {}", err);
            None
        }
    };
    let overrides = match overrides {
        Ok(records) => records,
        Err(err) => {
            warn!("Ignoring unreadable local override: {}", err);
            None
        }
    };
    select(baseline, overrides)
}
