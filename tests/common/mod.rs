//! Shared fixtures for the integration suites: an in-memory database
//! populated with a known roster, a router built on top of it, and small
//! request helpers so the tests read like the API walks they are.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::{Value, json};
use tower::ServiceExt;

use student_manager::app::create_app;
use student_manager::constants::API_KEY_HEADER;
use student_manager::db::create_tables;
use student_manager::entities::{api_key, assessment, course, student};
use student_manager::state::AppState;

pub const TEST_KEY: &str = "verysafetestkey";

/// Fresh in-memory database with the fixture roster loaded. A single
/// pooled connection keeps the database alive for the test's lifetime.
pub async fn setup_database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("in-memory database");
    create_tables(&db).await.expect("schema creation");
    populate(&db).await;
    db
}

/// Complete application over a fresh fixture database. The state is
/// returned alongside so tests can reach the cache and the connection.
pub async fn setup_app() -> (Router, AppState) {
    let state = AppState::new(setup_database().await);
    (create_app(state.clone()), state)
}

pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("fixture date")
}

async fn populate(db: &DatabaseConnection) {
    insert_student(db, 1, "Draco", "Malfoy", "1980-06-05", "050680-6367").await;
    insert_student(db, 2, "Harry", "Potter", "1980-07-31", "310780-6176").await;
    insert_student(db, 3, "Hermione", "Granger", "1979-09-19", "190979-8400").await;

    insert_course(db, 1, "Transfiguration", "Minerva Mcgonagall", "004723", 5).await;
    insert_course(
        db,
        2,
        "Defence Against the Dark Arts",
        "Professur Severus Snape",
        "006031",
        8,
    )
    .await;
    insert_course(
        db,
        3,
        "Advanced Defence Against the Dark Arts",
        "Professur Severus Snape",
        "006032",
        8,
    )
    .await;

    insert_assessment(db, 1, 1, 5, "1993-02-08").await;
    insert_assessment(db, 2, 1, 4, "1993-02-17").await;
    insert_assessment(db, 1, 2, 3, "1993-02-08").await;
    insert_assessment(db, 2, 2, 4, "1993-02-17").await;
    insert_assessment(db, 1, 3, 5, "1993-02-08").await;
    insert_assessment(db, 2, 3, 5, "1993-02-17").await;

    api_key::ActiveModel {
        key: Set(api_key::Model::key_hash(TEST_KEY)),
        admin: Set(true),
    }
    .insert(db)
    .await
    .expect("fixture api key");
}

async fn insert_student(
    db: &DatabaseConnection,
    student_id: i32,
    first_name: &str,
    last_name: &str,
    date_of_birth: &str,
    ssn: &str,
) {
    student::ActiveModel {
        student_id: Set(student_id),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        date_of_birth: Set(date(date_of_birth)),
        ssn: Set(ssn.to_string()),
    }
    .insert(db)
    .await
    .expect("fixture student");
}

async fn insert_course(
    db: &DatabaseConnection,
    course_id: i32,
    title: &str,
    teacher: &str,
    code: &str,
    ects: i32,
) {
    course::ActiveModel {
        course_id: Set(course_id),
        title: Set(title.to_string()),
        teacher: Set(teacher.to_string()),
        code: Set(code.to_string()),
        ects: Set(ects),
    }
    .insert(db)
    .await
    .expect("fixture course");
}

async fn insert_assessment(
    db: &DatabaseConnection,
    course_id: i32,
    student_id: i32,
    grade: i32,
    iso_date: &str,
) {
    assessment::ActiveModel {
        course_id: Set(course_id),
        student_id: Set(student_id),
        grade: Set(grade),
        date: Set(date(iso_date)),
    }
    .insert(db)
    .await
    .expect("fixture assessment");
}

// Request bodies the API accepts as is, mirroring data no fixture row
// holds yet.

pub fn student_payload() -> Value {
    json!({
        "first_name": "name",
        "last_name": "surname",
        "date_of_birth": "1979-09-19",
        "ssn": "190979-520N",
    })
}

pub fn course_payload() -> Value {
    json!({
        "title": "course1",
        "teacher": "teacher1",
        "code": "12345",
        "ects": 5,
    })
}

pub fn assessment_payload() -> Value {
    json!({
        "course_id": 3,
        "student_id": 1,
        "grade": 4,
        "date": "1993-02-06",
    })
}

// Thin request wrappers. Writes always carry the fixture admin key unless
// the test opts out through the `*_with_key` form.

pub async fn get(router: &Router, path: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn post_json(router: &Router, path: &str, body: &Value) -> Response {
    post_json_with_key(router, path, body, TEST_KEY).await
}

pub async fn post_json_with_key(router: &Router, path: &str, body: &Value, key: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .header(API_KEY_HEADER, key)
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn put_json(router: &Router, path: &str, body: &Value) -> Response {
    put_json_with_key(router, path, body, TEST_KEY).await
}

pub async fn put_json_with_key(router: &Router, path: &str, body: &Value, key: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .header(API_KEY_HEADER, key)
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn delete(router: &Router, path: &str) -> Response {
    delete_with_key(router, path, TEST_KEY).await
}

pub async fn delete_with_key(router: &Router, path: &str, key: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(path)
                .header(API_KEY_HEADER, key)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

/// Sends a write with a body that is not JSON and no JSON content type.
pub async fn send_plain_text(router: &Router, method: &str, path: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .header(header::CONTENT_TYPE, "text/plain")
                .header(API_KEY_HEADER, TEST_KEY)
                .body(Body::from("notjson"))
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

// Hypermedia walk helpers. Each one follows a control out of `body` the
// way a client would and asserts the advertised request works.

/// The namespace name must resolve to the link relations page.
pub async fn check_namespace(router: &Router, body: &Value) {
    let href = body["@namespaces"]["studman"]["name"]
        .as_str()
        .expect("namespace name");
    let response = get(router, href).await;
    assert_eq!(response.status(), StatusCode::OK);
}

pub async fn check_control_get(router: &Router, ctrl: &str, body: &Value) {
    let href = body["@controls"][ctrl]["href"].as_str().expect("href");
    let response = get(router, href).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {href} via {ctrl}");
}

pub async fn check_control_post(router: &Router, ctrl: &str, body: &Value, payload: &Value) {
    let control = &body["@controls"][ctrl];
    assert_eq!(control["method"], "POST");
    assert_eq!(control["encoding"], "json");
    assert!(control["schema"]["required"].is_array());
    let href = control["href"].as_str().expect("href");
    let response = post_json(router, href, payload).await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "POST {href} via {ctrl}"
    );
}

pub async fn check_control_put(router: &Router, body: &Value, payload: &Value) {
    let control = &body["@controls"]["edit"];
    assert_eq!(control["method"], "PUT");
    assert_eq!(control["encoding"], "json");
    assert!(control["schema"]["required"].is_array());
    let href = control["href"].as_str().expect("href");
    let response = put_json(router, href, payload).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT, "PUT {href}");
}

pub async fn check_control_delete(router: &Router, body: &Value) {
    let control = &body["@controls"]["studman:delete"];
    assert_eq!(control["method"], "DELETE");
    let href = control["href"].as_str().expect("href");
    let response = delete(router, href).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT, "DELETE {href}");
}
