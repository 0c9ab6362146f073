use serde::Deserialize;
use serde_json::Number;

use crate::entities::assessment;
use crate::error::ApiError;
use crate::routes::{parse_date, today};

/// Create/replace representation of an assessment. The body carries the
/// full identity, also on item PUT where it may move the assessment to a
/// different (course, student) pair. `grade` is accepted as any JSON
/// number so a fractional value gets a message instead of a decoding
/// error.
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub course_id: i32,
    pub student_id: i32,
    pub grade: Number,
    pub date: String,
}

impl AssessmentRequest {
    /// Checks the field-level rules and returns the complete row to
    /// write. Whether the referenced course and student exist is left to
    /// the storage layer.
    pub fn validate(&self) -> Result<assessment::Model, ApiError> {
        let grade = self
            .grade
            .as_i64()
            .ok_or_else(|| ApiError::Validation("Grade value must be an integer".to_string()))?;
        if !(0..=5).contains(&grade) {
            return Err(ApiError::Validation(
                "Grade value must be between 0 and 5".to_string(),
            ));
        }
        let date = parse_date(&self.date, "Date")?;
        if date > today() {
            return Err(ApiError::Validation(
                "Date must not be in the future".to_string(),
            ));
        }
        Ok(assessment::Model {
            course_id: self.course_id,
            student_id: self.student_id,
            grade: grade as i32,
            date,
        })
    }
}
