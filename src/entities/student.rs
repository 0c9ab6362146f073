//! `SeaORM` Entity for the student table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    #[sea_orm(unique)]
    pub ssn: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assessment::Entity")]
    Assessments,
}

impl Related<super::assessment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessments.def()
    }
}

// The set of courses the student has assessments for, reached through the
// assessments table as a junction. Read-only view over committed rows.
impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::assessment::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::assessment::Relation::Student.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Flat field mapping of the student, used in collection listings.
    pub fn serialize(&self) -> Value {
        json!({
            "student_id": self.student_id,
            "first_name": self.first_name,
            "last_name": self.last_name,
            "date_of_birth": self.date_of_birth.format("%Y-%m-%d").to_string(),
            "ssn": self.ssn,
        })
    }

    /// Full item view with the student's assessments embedded.
    pub fn serialize_full(&self, assessments: &[super::assessment::Model]) -> Value {
        let mut doc = self.serialize();
        doc["assessments"] = Value::Array(assessments.iter().map(|a| a.serialize()).collect());
        doc
    }

    /// JSON schema for a valid student create/edit request body.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["first_name", "last_name", "ssn", "date_of_birth"],
            "properties": {
                "ssn": {
                    "description": "Student social security number",
                    "type": "string"
                },
                "first_name": {
                    "description": "Student first name",
                    "type": "string"
                },
                "last_name": {
                    "description": "Student last name",
                    "type": "string"
                },
                "date_of_birth": {
                    "description": "Student birth date in the format yyyy-mm-dd",
                    "type": "string",
                    "format": "date"
                }
            }
        })
    }
}
