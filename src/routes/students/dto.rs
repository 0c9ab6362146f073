use sea_orm::{ActiveValue, Set};
use serde::Deserialize;

use crate::entities::student;
use crate::error::ApiError;
use crate::routes::{parse_date, today};
use crate::utils::ssn::is_valid_ssn;

/// Create/replace representation of a student. Unknown members are
/// ignored, so a representation read from the API can be sent back as is.
#[derive(Debug, Deserialize)]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub ssn: String,
}

impl StudentRequest {
    /// Checks the field-level rules and returns the row to write. The id
    /// stays unset; collection POST lets the database assign it and item
    /// PUT pins it to the path identity.
    pub fn validate(&self) -> Result<student::ActiveModel, ApiError> {
        if self.first_name.trim().is_empty() {
            return Err(ApiError::Validation(
                "First_name must not be empty".to_string(),
            ));
        }
        if self.last_name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Last_name must not be empty".to_string(),
            ));
        }
        let date_of_birth = parse_date(&self.date_of_birth, "Date_of_birth")?;
        if date_of_birth >= today() {
            return Err(ApiError::Validation(
                "Date_of_birth must be in the past".to_string(),
            ));
        }
        if !is_valid_ssn(&self.ssn, date_of_birth) {
            return Err(ApiError::Validation(format!(
                "Ssn '{}' is not valid for the given date of birth",
                self.ssn
            )));
        }
        Ok(student::ActiveModel {
            student_id: ActiveValue::NotSet,
            first_name: Set(self.first_name.clone()),
            last_name: Set(self.last_name.clone()),
            date_of_birth: Set(date_of_birth),
            ssn: Set(self.ssn.clone()),
        })
    }
}
