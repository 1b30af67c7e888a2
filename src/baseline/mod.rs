mod factory;
mod file_source;
mod http_source;
mod trait_def;

pub use factory::create_baseline_source;
pub use file_source::FileBaselineSource;
pub use http_source::HttpBaselineSource;
pub use trait_def::{parse_document, BaselineError, BaselineResult, BaselineSource};
