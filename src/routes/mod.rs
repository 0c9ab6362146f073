pub mod assessments;
pub mod courses;
pub mod entrypoint;
pub mod students;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Decodes an already parsed JSON body into a typed request. Missing and
/// mistyped members surface as a validation failure naming the problem.
pub(crate) fn decode_body<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|err| ApiError::Validation(format!("Invalid request format: {err}")))
}

/// Parses a `yyyy-mm-dd` field. A date that does not parse is a format
/// failure, distinct from the field-level rules checked afterwards.
pub(crate) fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::Format(format!("{field} not in iso format")))
}

pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
