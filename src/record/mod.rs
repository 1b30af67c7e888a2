mod models;
mod validation;

pub use models::{parse_year, Condition, Grade, Record, RecordFields};
pub use validation::{validate_fields, ValidationError, ValidationResult, MAX_YEAR, MIN_YEAR};
