use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::{assessment, course, student};
use crate::error::ApiError;
use crate::repositories::parse_id;

pub struct StudentRepository;

impl StudentRepository {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<student::Model>, DbErr> {
        student::Entity::find()
            .order_by_asc(student::Column::StudentId)
            .all(db)
            .await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Option<student::Model>, DbErr> {
        student::Entity::find_by_id(student_id).one(db).await
    }

    /// Looks up the student a path segment points at. A segment that does
    /// not parse as an id, or that matches no row, is a missing resource.
    pub async fn resolve(
        db: &DatabaseConnection,
        raw_id: &str,
    ) -> Result<student::Model, ApiError> {
        let student_id = parse_id(raw_id)?;
        let student = Self::find_by_id(db, student_id).await?;
        student.ok_or(ApiError::NotFound)
    }

    pub async fn find_assessments(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Vec<assessment::Model>, DbErr> {
        assessment::Entity::find()
            .filter(assessment::Column::StudentId.eq(student_id))
            .order_by_asc(assessment::Column::CourseId)
            .all(db)
            .await
    }

    /// Courses the student holds assessments for, through the assessments
    /// table. Read-only view over committed rows.
    pub async fn find_courses(
        db: &DatabaseConnection,
        student: &student::Model,
    ) -> Result<Vec<course::Model>, DbErr> {
        student.find_related(course::Entity).all(db).await
    }

    pub async fn create(
        db: &DatabaseConnection,
        model: student::ActiveModel,
    ) -> Result<student::Model, DbErr> {
        model.insert(db).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        model: student::ActiveModel,
    ) -> Result<student::Model, DbErr> {
        model.update(db).await
    }

    /// Deletes the student row. Assessments referencing it go with it
    /// through the cascading foreign key.
    pub async fn delete(db: &DatabaseConnection, student: student::Model) -> Result<(), DbErr> {
        let active: student::ActiveModel = student.into();
        active.delete(db).await?;
        Ok(())
    }
}
