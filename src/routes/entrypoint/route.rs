use axum::Router;
use axum::extract::Path;
use axum::response::{Html, Response};
use axum::routing::get;

use crate::builder::{MasonDocument, entrypoint_url, mason_response};
use crate::constants::{LINK_RELATIONS_URL, NAMESPACE};
use crate::error::ApiError;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/", get(get_entrypoint))
        .route(LINK_RELATIONS_URL, get(send_link_relations_html))
        .route("/profiles/{resource}/", get(send_profile_html))
}

/// API entrypoint. Carries no data, only the namespace declaration and
/// controls into the three top level collections.
pub async fn get_entrypoint() -> Result<Response, ApiError> {
    let mut body = MasonDocument::new();
    body.add_namespace(NAMESPACE, LINK_RELATIONS_URL);
    body.add_control("self", &entrypoint_url());
    body.add_control_all_students();
    body.add_control_all_courses();
    body.add_control_all_assessments();
    Ok(mason_response(body.render()))
}

/// Placeholder page documenting the custom link relations. Exists so the
/// namespace name in every response resolves.
pub async fn send_link_relations_html() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n<html>\n<head><title>Link relations</title></head>\n\
         <body><h1>Student manager link relations</h1>\n\
         <p>Documentation of the relations used in the studman namespace.</p></body>\n</html>",
    )
}

/// Placeholder profile pages for the resource types referenced by the
/// `profile` controls.
pub async fn send_profile_html(Path(resource): Path<String>) -> Result<Html<String>, ApiError> {
    match resource.as_str() {
        "student" | "course" | "assessment" | "error" => Ok(Html(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{resource} profile</title></head>\n\
             <body><h1>Profile: {resource}</h1></body>\n</html>"
        ))),
        _ => Err(ApiError::NotFound),
    }
}
