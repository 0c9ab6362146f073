use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::assessment;
use crate::error::ApiError;

pub struct AssessmentRepository;

impl AssessmentRepository {
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<assessment::Model>, DbErr> {
        assessment::Entity::find()
            .order_by_asc(assessment::Column::CourseId)
            .order_by_asc(assessment::Column::StudentId)
            .all(db)
            .await
    }

    pub async fn find_by_pair(
        db: &DatabaseConnection,
        course_id: i32,
        student_id: i32,
    ) -> Result<Option<assessment::Model>, DbErr> {
        assessment::Entity::find_by_id((course_id, student_id))
            .one(db)
            .await
    }

    /// The assessment joining an already resolved course and student, or a
    /// missing resource.
    pub async fn resolve(
        db: &DatabaseConnection,
        course_id: i32,
        student_id: i32,
    ) -> Result<assessment::Model, ApiError> {
        let assessment = Self::find_by_pair(db, course_id, student_id).await?;
        assessment.ok_or(ApiError::NotFound)
    }

    pub async fn create(
        db: &DatabaseConnection,
        model: assessment::Model,
    ) -> Result<assessment::Model, DbErr> {
        let active = assessment::ActiveModel {
            course_id: Set(model.course_id),
            student_id: Set(model.student_id),
            grade: Set(model.grade),
            date: Set(model.date),
        };
        active.insert(db).await
    }

    /// Replaces the row identified by the old pair with `replacement` in a
    /// single UPDATE, including its identity. Uniqueness of the new pair
    /// and existence of the rows it references are arbitrated by the
    /// storage engine, so a lost race surfaces as a constraint violation
    /// rather than a partial write.
    pub async fn replace(
        db: &DatabaseConnection,
        old_course_id: i32,
        old_student_id: i32,
        replacement: &assessment::Model,
    ) -> Result<(), DbErr> {
        assessment::Entity::update_many()
            .col_expr(
                assessment::Column::CourseId,
                Expr::value(replacement.course_id),
            )
            .col_expr(
                assessment::Column::StudentId,
                Expr::value(replacement.student_id),
            )
            .col_expr(assessment::Column::Grade, Expr::value(replacement.grade))
            .col_expr(assessment::Column::Date, Expr::value(replacement.date))
            .filter(assessment::Column::CourseId.eq(old_course_id))
            .filter(assessment::Column::StudentId.eq(old_student_id))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn delete(
        db: &DatabaseConnection,
        assessment: assessment::Model,
    ) -> Result<(), DbErr> {
        let active: assessment::ActiveModel = assessment.into();
        active.delete(db).await?;
        Ok(())
    }
}
