//! Test fixtures
//!
//! Baseline documents and override sequences shared by the integration tests.

use std::path::PathBuf;
use tempfile::TempDir;
use vinyl_catalog::{Grade, Record, RecordFields};

/// Baseline document in the shape a hand-maintained `data.json` has: mixed
/// id and year types, missing optional fields.
pub const BASELINE_JSON: &str = r#"[
  {
    "id": "1",
    "artist": "Miles Davis",
    "album": "Kind of Blue",
    "year": 1959,
    "genre": "Jazz",
    "condition": "near-mint",
    "notes": "Original pressing",
    "albumCover": "https://covers.example.org/kind-of-blue.jpg",
    "dateAdded": "2023-01-10T09:00:00.000Z"
  },
  {
    "id": "2",
    "artist": "Björk",
    "album": "Homogenic",
    "year": "1997",
    "genre": "Electronic",
    "condition": "VG+",
    "dateAdded": "2023-02-11T10:30:00.000Z"
  },
  {
    "id": "3",
    "artist": "John Coltrane",
    "album": "Blue Train",
    "genre": "Jazz",
    "condition": "good",
    "dateAdded": "2023-03-12T08:15:00.000Z"
  },
  {
    "id": "4",
    "artist": "Portishead",
    "album": "Dummy",
    "year": 1994,
    "genre": "Trip Hop",
    "condition": "mint",
    "dateAdded": "2023-04-13T18:45:00.000Z"
  },
  {
    "id": 5,
    "artist": "Fleetwood Mac",
    "album": "Rumours",
    "year": 1977,
    "genre": "Rock",
    "condition": "fair",
    "notes": null,
    "dateAdded": "2023-05-14T12:00:00.000Z"
  }
]"#;

/// Writes [`BASELINE_JSON`] into a fresh temporary directory.
pub fn create_baseline_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, BASELINE_JSON).expect("Failed to write baseline");
    (dir, path)
}

/// A locally edited collection, different from the baseline.
pub fn override_records() -> Vec<Record> {
    vec![
        Record::new(
            "1700000000001".to_string(),
            "2024-06-01T20:00:00.000Z".to_string(),
            RecordFields::new("Nina Simone", "Pastel Blues")
                .with_year(1965)
                .with_genre("Jazz")
                .with_condition(Grade::VeryGood),
        ),
        Record::new(
            "1".to_string(),
            "2023-01-10T09:00:00.000Z".to_string(),
            RecordFields::new("Miles Davis", "Kind of Blue")
                .with_year(1959)
                .with_genre("Jazz")
                .with_condition(Grade::NearMint)
                .with_notes("Sleeve worn"),
        ),
    ]
}
