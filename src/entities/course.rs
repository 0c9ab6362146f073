//! `SeaORM` Entity for the course table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub course_id: i32,
    pub title: String,
    pub teacher: String,
    #[sea_orm(unique)]
    pub code: String,
    pub ects: i32,
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

// Students enrolled on the course, reached through the assessments table.
impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        super::assessment::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::assessment::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Flat field mapping of the course, used in collection listings.
    pub fn serialize(&self) -> Value {
        json!({
            "course_id": self.course_id,
            "title": self.title,
            "teacher": self.teacher,
            "code": self.code,
            "ects": self.ects,
        })
    }

    /// Full item view with the course's assessments embedded.
    pub fn serialize_full(&self, assessments: &[super::assessment::Model]) -> Value {
        let mut doc = self.serialize();
        doc["assessments"] = Value::Array(assessments.iter().map(|a| a.serialize()).collect());
        doc
    }

    /// JSON schema for a valid course create/edit request body.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["title", "teacher", "code", "ects"],
            "properties": {
                "title": {
                    "description": "Course title",
                    "type": "string"
                },
                "teacher": {
                    "description": "Name of the course teacher",
                    "type": "string"
                },
                "code": {
                    "description": "Course code",
                    "type": "string"
                },
                "ects": {
                    "description": "Number of ECTS credits awarded",
                    "type": "number"
                }
            }
        })
    }
}
