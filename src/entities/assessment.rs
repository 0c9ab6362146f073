//! `SeaORM` Entity for the assessments table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One grading of one student on one course. The (course, student) pair is
/// the natural primary key, so a student can hold at most one assessment
/// per course.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i32,
    pub grade: i32,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::StudentId",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::CourseId",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Field mapping of the assessment, used both standalone and embedded
    /// in student and course item views.
    pub fn serialize(&self) -> Value {
        json!({
            "course_id": self.course_id,
            "student_id": self.student_id,
            "grade": self.grade,
            "date": self.date.format("%Y-%m-%d").to_string(),
        })
    }

    /// JSON schema for a valid assessment create/edit request body.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["course_id", "student_id", "grade", "date"],
            "properties": {
                "course_id": {
                    "description": "Id of the graded course",
                    "type": "number"
                },
                "student_id": {
                    "description": "Id of the graded student",
                    "type": "number"
                },
                "grade": {
                    "description": "Grade given on the course, from 0 to 5",
                    "type": "number"
                },
                "date": {
                    "description": "Assessment date in the format yyyy-mm-dd",
                    "type": "string",
                    "format": "date"
                }
            }
        })
    }
}
