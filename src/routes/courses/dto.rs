use sea_orm::{ActiveValue, Set};
use serde::Deserialize;
use serde_json::Number;

use crate::entities::course;
use crate::error::ApiError;

/// Create/replace representation of a course. `ects` is accepted as any
/// JSON number so a fractional value can be rejected with a message
/// instead of a decoding error.
#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub title: String,
    pub teacher: String,
    pub code: String,
    pub ects: Number,
}

impl CourseRequest {
    /// Checks the field-level rules and returns the row to write, id
    /// unset.
    pub fn validate(&self) -> Result<course::ActiveModel, ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Title must not be empty".to_string()));
        }
        if self.teacher.trim().is_empty() {
            return Err(ApiError::Validation(
                "Teacher must not be empty".to_string(),
            ));
        }
        if self.code.trim().is_empty() {
            return Err(ApiError::Validation("Code must not be empty".to_string()));
        }
        let ects = self
            .ects
            .as_i64()
            .and_then(|value| i32::try_from(value).ok())
            .ok_or_else(|| ApiError::Validation("Ects value must be an integer".to_string()))?;
        if ects <= 0 {
            return Err(ApiError::Validation(
                "Ects value must be greater than zero".to_string(),
            ));
        }
        Ok(course::ActiveModel {
            course_id: ActiveValue::NotSet,
            title: Set(self.title.clone()),
            teacher: Set(self.teacher.clone()),
            code: Set(self.code.clone()),
            ects: Set(ects),
        })
    }
}
