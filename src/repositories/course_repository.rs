use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::{assessment, course, student};
use crate::error::ApiError;
use crate::repositories::parse_id;

pub struct CourseRepository;

impl CourseRepository {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<course::Model>, DbErr> {
        course::Entity::find()
            .order_by_asc(course::Column::CourseId)
            .all(db)
            .await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<Option<course::Model>, DbErr> {
        course::Entity::find_by_id(course_id).one(db).await
    }

    /// Looks up the course a path segment points at. A segment that does
    /// not parse as an id, or that matches no row, is a missing resource.
    pub async fn resolve(db: &DatabaseConnection, raw_id: &str) -> Result<course::Model, ApiError> {
        let course_id = parse_id(raw_id)?;
        let course = Self::find_by_id(db, course_id).await?;
        course.ok_or(ApiError::NotFound)
    }

    pub async fn find_assessments(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<Vec<assessment::Model>, DbErr> {
        assessment::Entity::find()
            .filter(assessment::Column::CourseId.eq(course_id))
            .order_by_asc(assessment::Column::StudentId)
            .all(db)
            .await
    }

    /// Students holding an assessment on the course, through the
    /// assessments table. Read-only view over committed rows.
    pub async fn find_students(
        db: &DatabaseConnection,
        course: &course::Model,
    ) -> Result<Vec<student::Model>, DbErr> {
        course.find_related(student::Entity).all(db).await
    }

    pub async fn create(
        db: &DatabaseConnection,
        model: course::ActiveModel,
    ) -> Result<course::Model, DbErr> {
        model.insert(db).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        model: course::ActiveModel,
    ) -> Result<course::Model, DbErr> {
        model.update(db).await
    }

    /// Deletes the course row. Assessments referencing it go with it
    /// through the cascading foreign key.
    pub async fn delete(db: &DatabaseConnection, course: course::Model) -> Result<(), DbErr> {
        let active: course::ActiveModel = course.into();
        active.delete(db).await?;
        Ok(())
    }
}
