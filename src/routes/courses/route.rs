use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use sea_orm::Set;
use serde_json::Value;

use super::dto::CourseRequest;
use crate::builder::{MasonDocument, course_collection_url, course_item_url, mason_response};
use crate::constants::{COURSE_PROFILE, LINK_RELATIONS_URL, NAMESPACE};
use crate::entities::course;
use crate::error::ApiError;
use crate::extractor::RequireAdminKey;
use crate::repositories::CourseRepository;
use crate::routes::decode_body;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/courses/", get(get_all_courses))
        .route("/api/courses/", post(add_course))
        .route("/api/courses/{course_id}/", get(get_course))
        .route("/api/courses/{course_id}/", put(edit_course))
        .route("/api/courses/{course_id}/", delete(delete_course))
}

/// List every course in short form, with controls to drill in or add.
pub async fn get_all_courses(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = course_collection_url();
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let courses = CourseRepository::find_all(&state.db).await?;
    let mut body = MasonDocument::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control_add_course();
    body.add_control_all_students();
    body.add_control_all_assessments();
    let items: Vec<Value> = courses
        .iter()
        .map(|course| {
            let mut item = MasonDocument::with_fields(course.serialize());
            item.add_control("self", &course_item_url(course.course_id));
            item.add_control("profile", COURSE_PROFILE);
            item.into_value()
        })
        .collect();
    body.insert("items", Value::Array(items));

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

/// Add a new course. Admin key required.
pub async fn add_course(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let request: CourseRequest = decode_body(payload)?;
    let model = request.validate()?;
    let created = CourseRepository::create(&state.db, model)
        .await
        .map_err(|err| {
            ApiError::conflict_on_constraint(
                err,
                format!("Course already exists with code '{}'", request.code),
            )
        })?;

    state.cache.delete(&course_collection_url());
    let location = course_item_url(created.course_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Single course with its assessments embedded.
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Response, ApiError> {
    let course = CourseRepository::resolve(&state.db, &course_id).await?;
    let path = course_item_url(course.course_id);
    if let Some(cached) = state.cache.get(&path) {
        return Ok(mason_response(cached));
    }

    let assessments = CourseRepository::find_assessments(&state.db, course.course_id).await?;
    let mut body = MasonDocument::with_fields(course.serialize_full(&assessments));
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &path);
    body.add_control("profile", COURSE_PROFILE);
    body.add_control("collection", &course_collection_url());
    body.add_control_put("Edit this course", &path, course::Model::json_schema());
    body.add_control_delete("Delete this course", &path);
    body.add_control_course_assessments(course.course_id);
    body.add_control_all_assessments();

    let rendered = body.render();
    state.cache.insert(&path, rendered.clone());
    Ok(mason_response(rendered))
}

/// Replace an existing course's representation. Admin key required.
pub async fn edit_course(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let current = CourseRepository::resolve(&state.db, &course_id).await?;
    let request: CourseRequest = decode_body(payload)?;
    let mut replacement = request.validate()?;
    replacement.course_id = Set(current.course_id);
    CourseRepository::update(&state.db, replacement)
        .await
        .map_err(|err| {
            ApiError::conflict_on_constraint(
                err,
                format!("Course with code '{}' already exists.", request.code),
            )
        })?;

    state.cache.delete_many([
        course_item_url(current.course_id),
        course_collection_url(),
    ]);
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Remove a course and, through the cascade, every assessment given on
/// it. Admin key required.
pub async fn delete_course(
    _admin: RequireAdminKey,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Response, ApiError> {
    let course = CourseRepository::resolve(&state.db, &course_id).await?;
    let deleted_id = course.course_id;
    CourseRepository::delete(&state.db, course).await?;

    state
        .cache
        .delete_many([course_item_url(deleted_id), course_collection_url()]);
    Ok(StatusCode::NO_CONTENT.into_response())
}
