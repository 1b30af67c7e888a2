//! Validation for record fields.
//!
//! Run on normalized fields before a record is inserted or updated, so an
//! invalid form submission never reaches the collection or the override
//! store.

use super::models::RecordFields;
use thiserror::Error;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' is required but was empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_fields(fields: &RecordFields) -> ValidationResult<()> {
    if fields.artist.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "artist" });
    }
    if fields.album.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "album" });
    }
    if let Some(year) = fields.year {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::OutOfRange {
                field: "year",
                value: year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }
    }
    Ok(())
}
