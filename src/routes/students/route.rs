use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use sea_orm::Set;
use serde_json::Value;

use super::dto::StudentRequest;
use crate::builder::{MasonDocument, mason_response, student_collection_url, student_item_url};
use crate::constants::{LINK_RELATIONS_URL, NAMESPACE, STUDENT_PROFILE};
use crate::entities::student;
use crate::error::ApiError;
use crate::extractor::RequireAdminKey;
use crate::repositories::StudentRepository;
use crate::routes::decode_body;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/students/", get(get_all_students))
        .route("/api/students/", post(add_student))
        .route("/api/students/{student_id}/", get(get_student))
        .route("/api/students/{student_id}/", put(edit_student))
        .route("/api/students/{student_id}/", delete(delete_student))
}

/// List every student in short form, with controls to drill in or add.
pub async fn get_all_students(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = student_collection_url();
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let students = StudentRepository::find_all(&state.db).await?;
    let mut body = MasonDocument::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control_add_student();
    body.add_control_all_courses();
    body.add_control_all_assessments();
    let items: Vec<Value> = students
        .iter()
        .map(|student| {
            let mut item = MasonDocument::with_fields(student.serialize());
            item.add_control("self", &student_item_url(student.student_id));
            item.add_control("profile", STUDENT_PROFILE);
            item.into_value()
        })
        .collect();
    body.insert("items", Value::Array(items));

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

/// Add a new student. Admin key required.
pub async fn add_student(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let request: StudentRequest = decode_body(payload)?;
    let model = request.validate()?;
    let created = StudentRepository::create(&state.db, model)
        .await
        .map_err(|err| {
            ApiError::conflict_on_constraint(
                err,
                format!("Student with ssn '{}' already exists.", request.ssn),
            )
        })?;

    state.cache.delete(&student_collection_url());
    let location = student_item_url(created.student_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Single student with their assessments embedded.
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let student = StudentRepository::resolve(&state.db, &student_id).await?;
    let path = student_item_url(student.student_id);
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let assessments = StudentRepository::find_assessments(&state.db, student.student_id).await?;
    let mut body = MasonDocument::with_fields(student.serialize_full(&assessments));
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control("profile", STUDENT_PROFILE);
    body.add_control("collection", &student_collection_url());
    body.add_control_put("Edit this student", &path, student::Model::json_schema());
    body.add_control_delete("Delete this student", &path);
    body.add_control_student_assessments(student.student_id);
    body.add_control_all_assessments();

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

/// Replace an existing student's representation. Admin key required.
pub async fn edit_student(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let current = StudentRepository::resolve(&state.db, &student_id).await?;
    let request: StudentRequest = decode_body(payload)?;
    let mut replacement = request.validate()?;
    replacement.student_id = Set(current.student_id);
    StudentRepository::update(&state.db, replacement)
        .await
        .map_err(|err| {
            ApiError::conflict_on_constraint(
                err,
                format!("Student with ssn '{}' already exists.", request.ssn),
            )
        })?;

    state.cache.delete_many([
        student_item_url(current.student_id),
        student_collection_url(),
    ]);
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Remove a student and, through the cascade, every assessment they hold.
/// Admin key required.
pub async fn delete_student(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    let student = StudentRepository::resolve(&state.db, &student_id).await?;
    let deleted_id = student.student_id;
    StudentRepository::delete(&state.db, student).await?;

    state
        .cache
        .delete_many([student_item_url(deleted_id), student_collection_url()]);
    Ok(StatusCode::NO_CONTENT.into_response())
}
