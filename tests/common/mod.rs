//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, BASELINE_ROUTE};
//!
//! #[tokio::test]
//! async fn test_http_baseline() {
//!     let server = TestServer::spawn().await;
//!     let url = server.url(BASELINE_ROUTE);
//! }
//! ```

#![allow(dead_code)]

mod constants;
mod fixtures;
mod server;

pub use constants::*;
pub use fixtures::{create_baseline_file, override_records, BASELINE_JSON};
pub use server::TestServer;
