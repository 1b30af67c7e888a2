//! Shared constants for integration tests
//!
//! When the baseline fixture changes, update only this file.

// ============================================================================
// Baseline fixture
// ============================================================================

/// Number of records in the baseline document
pub const BASELINE_RECORD_COUNT: usize = 5;

/// "Kind of Blue" by Miles Davis, 1959, Jazz
pub const KIND_OF_BLUE_ID: &str = "1";

/// "Homogenic" by Björk, year given as a string in the document
pub const HOMOGENIC_ID: &str = "2";

/// "Blue Train" by John Coltrane, no year, Jazz
pub const BLUE_TRAIN_ID: &str = "3";

/// "Dummy" by Portishead, 1994, Trip Hop
pub const DUMMY_ID: &str = "4";

/// "Rumours" by Fleetwood Mac, numeric id in the document
pub const RUMOURS_ID: &str = "5";

/// Number of Jazz records in the baseline document
pub const JAZZ_RECORD_COUNT: usize = 2;

// ============================================================================
// Override store
// ============================================================================

pub const OVERRIDE_KEY: &str = "vinylRecords";

// ============================================================================
// Test server
// ============================================================================

/// Serves the baseline fixture
pub const BASELINE_ROUTE: &str = "/data.json";

/// Always answers 500
pub const BROKEN_ROUTE: &str = "/broken.json";

/// Serves a JSON object instead of an array
pub const OBJECT_ROUTE: &str = "/object.json";

/// Maximum time to wait for the test server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Polling interval while waiting for the test server
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
