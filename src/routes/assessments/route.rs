use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::Value;

use super::dto::AssessmentRequest;
use crate::builder::{
    MasonDocument, assessment_collection_url, course_assessment_url, course_assessments_url,
    course_item_url, mason_response, student_assessment_url, student_assessments_url,
    student_item_url,
};
use crate::constants::{ASSESSMENT_PROFILE, LINK_RELATIONS_URL, NAMESPACE};
use crate::entities::assessment;
use crate::error::ApiError;
use crate::extractor::RequireAssessmentKey;
use crate::repositories::{AssessmentRepository, CourseRepository, StudentRepository};
use crate::routes::decode_body;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/assessments/", get(get_all_assessments))
        .route("/api/assessments/", post(add_assessment))
        .route(
            "/api/students/{student_id}/assessments/",
            get(get_student_assessments),
        )
        .route(
            "/api/courses/{course_id}/assessments/",
            get(get_course_assessments),
        )
        .route(
            "/api/students/{student_id}/assessments/{course_id}/",
            get(get_student_assessment),
        )
        .route(
            "/api/students/{student_id}/assessments/{course_id}/",
            put(edit_student_assessment),
        )
        .route(
            "/api/students/{student_id}/assessments/{course_id}/",
            delete(delete_student_assessment),
        )
        .route(
            "/api/courses/{course_id}/assessments/{student_id}/",
            get(get_course_assessment),
        )
        .route(
            "/api/courses/{course_id}/assessments/{student_id}/",
            put(edit_course_assessment),
        )
        .route(
            "/api/courses/{course_id}/assessments/{student_id}/",
            delete(delete_course_assessment),
        )
}

/// The same assessment is addressable through its student or its course;
/// the orientation decides which URLs its controls point at.
#[derive(Clone, Copy)]
enum Orientation {
    ViaStudent,
    ViaCourse,
}

impl Orientation {
    fn item_url(self, course_id: i32, student_id: i32) -> String {
        match self {
            Orientation::ViaStudent => student_assessment_url(student_id, course_id),
            Orientation::ViaCourse => course_assessment_url(course_id, student_id),
        }
    }

    fn collection_url(self, course_id: i32, student_id: i32) -> String {
        match self {
            Orientation::ViaStudent => student_assessments_url(student_id),
            Orientation::ViaCourse => course_assessments_url(course_id),
        }
    }
}

/// Every cached path whose body embeds this assessment: both item
/// orientations, the three collections listing it and the two parent
/// items embedding the assessment list.
fn clear_assessment_cache(state: &AppState, course_id: i32, student_id: i32) {
    state.cache.delete_many([
        student_assessment_url(student_id, course_id),
        course_assessment_url(course_id, student_id),
        assessment_collection_url(),
        student_assessments_url(student_id),
        course_assessments_url(course_id),
        student_item_url(student_id),
        course_item_url(course_id),
    ]);
}

fn serialize_items(assessments: &[assessment::Model], orientation: Orientation) -> Value {
    let items: Vec<Value> = assessments
        .iter()
        .map(|assessment| {
            let mut item = MasonDocument::with_fields(assessment.serialize());
            item.add_control(
                "self",
                &orientation.item_url(assessment.course_id, assessment.student_id),
            );
            item.add_control("profile", ASSESSMENT_PROFILE);
            item.into_value()
        })
        .collect();
    Value::Array(items)
}

/// Every assessment in the system, in short form.
pub async fn get_all_assessments(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = assessment_collection_url();
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let assessments = AssessmentRepository::find_all(&state.db).await?;
    let mut body = MasonDocument::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control_add_assessment();
    body.add_control_all_students();
    body.add_control_all_courses();
    body.insert(
        "items",
        serialize_items(&assessments, Orientation::ViaCourse),
    );

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

/// Record a new assessment. Either key class may write here.
pub async fn add_assessment(
    _writer: RequireAssessmentKey,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let request: AssessmentRequest = decode_body(payload)?;
    let model = request.validate()?;
    let created = AssessmentRepository::create(&state.db, model)
        .await
        .map_err(|err| {
            ApiError::conflict_on_constraint(
                err,
                format!(
                    "Assessment already exists with course_id '{}' and student_id '{}'",
                    request.course_id, request.student_id
                ),
            )
        })?;

    clear_assessment_cache(&state, created.course_id, created.student_id);
    let location = course_assessment_url(created.course_id, created.student_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Assessments held by one student.
pub async fn get_student_assessments(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let student = StudentRepository::resolve(&state.db, &student_id).await?;
    let path = student_assessments_url(student.student_id);
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let assessments = StudentRepository::find_assessments(&state.db, student.student_id).await?;
    let mut body = MasonDocument::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control_all_assessments();
    body.add_control_get_student(student.student_id);
    body.insert(
        "items",
        serialize_items(&assessments, Orientation::ViaStudent),
    );

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

/// Assessments given on one course.
pub async fn get_course_assessments(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Response, ApiError> {
    let course = CourseRepository::resolve(&state.db, &course_id).await?;
    let path = course_assessments_url(course.course_id);
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let assessments = CourseRepository::find_assessments(&state.db, course.course_id).await?;
    let mut body = MasonDocument::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control_all_assessments();
    body.add_control_get_course(course.course_id);
    body.insert("items", serialize_items(&assessments, Orientation::ViaCourse));

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

async fn assessment_item_get(
    state: AppState,
    raw_course_id: String,
    raw_student_id: String,
    orientation: Orientation,
) -> Result<Response, ApiError> {
    let course = CourseRepository::resolve(&state.db, &raw_course_id).await?;
    let student = StudentRepository::resolve(&state.db, &raw_student_id).await?;
    let assessment =
        AssessmentRepository::resolve(&state.db, course.course_id, student.student_id).await?;
    let path = orientation.item_url(assessment.course_id, assessment.student_id);
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let mut body = MasonDocument::with_fields(assessment.serialize());
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control("profile", ASSESSMENT_PROFILE);
    body.add_control(
        "collection",
        &orientation.collection_url(assessment.course_id, assessment.student_id),
    );
    body.add_control_put(
        "Edit this assessment",
        &path,
        assessment::Model::json_schema(),
    );
    body.add_control_delete("Delete this assessment", &path);
    body.add_control_get_student(assessment.student_id);
    body.add_control_get_course(assessment.course_id);
    body.add_control_all_assessments();

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

async fn assessment_item_put(
    state: AppState,
    raw_course_id: String,
    raw_student_id: String,
    payload: Value,
) -> Result<Response, ApiError> {
    let course = CourseRepository::resolve(&state.db, &raw_course_id).await?;
    let student = StudentRepository::resolve(&state.db, &raw_student_id).await?;
    let current =
        AssessmentRepository::resolve(&state.db, course.course_id, student.student_id).await?;

    let request: AssessmentRequest = decode_body(payload)?;
    let replacement = request.validate()?;
    AssessmentRepository::replace(&state.db, current.course_id, current.student_id, &replacement)
        .await
        .map_err(|err| {
            ApiError::conflict_on_constraint(
                err,
                format!(
                    "Assessment already exists with course_id '{}' and student_id '{}'",
                    replacement.course_id, replacement.student_id
                ),
            )
        })?;

    clear_assessment_cache(&state, current.course_id, current.student_id);
    if (replacement.course_id, replacement.student_id) != (current.course_id, current.student_id) {
        clear_assessment_cache(&state, replacement.course_id, replacement.student_id);
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn assessment_item_delete(
    state: AppState,
    raw_course_id: String,
    raw_student_id: String,
) -> Result<Response, ApiError> {
    let course = CourseRepository::resolve(&state.db, &raw_course_id).await?;
    let student = StudentRepository::resolve(&state.db, &raw_student_id).await?;
    let assessment =
        AssessmentRepository::resolve(&state.db, course.course_id, student.student_id).await?;
    let (course_id, student_id) = (assessment.course_id, assessment.student_id);
    AssessmentRepository::delete(&state.db, assessment).await?;

    clear_assessment_cache(&state, course_id, student_id);
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Single assessment addressed through its student.
pub async fn get_student_assessment(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    assessment_item_get(state, course_id, student_id, Orientation::ViaStudent).await
}

/// Single assessment addressed through its course.
pub async fn get_course_assessment(
    State(state): State<AppState>,
    Path((course_id, student_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    assessment_item_get(state, course_id, student_id, Orientation::ViaCourse).await
}

/// Replace an assessment addressed through its student. Either key class
/// may write here.
pub async fn edit_student_assessment(
    _writer: RequireAssessmentKey,
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    assessment_item_put(state, course_id, student_id, payload).await
}

/// Replace an assessment addressed through its course. Either key class
/// may write here.
pub async fn edit_course_assessment(
    _writer: RequireAssessmentKey,
    State(state): State<AppState>,
    Path((course_id, student_id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    assessment_item_put(state, course_id, student_id, payload).await
}

/// Remove an assessment addressed through its student. Either key class
/// may write here.
pub async fn delete_student_assessment(
    _writer: RequireAssessmentKey,
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    assessment_item_delete(state, course_id, student_id).await
}

/// Remove an assessment addressed through its course. Either key class
/// may write here.
pub async fn delete_course_assessment(
    _writer: RequireAssessmentKey,
    State(state): State<AppState>,
    Path((course_id, student_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    assessment_item_delete(state, course_id, student_id).await
}
