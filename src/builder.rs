//! Mason (`application/vnd.mason+json`) document assembly.
//!
//! Every response body in the API is built through [`MasonDocument`] so the
//! reserved `@namespaces` / `@controls` / `@error` properties are shaped in
//! one place. The URL helpers below are the only source of resource paths;
//! the same strings double as cache keys, so handlers never format paths by
//! hand.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use crate::constants::MASON;
use crate::entities::{assessment, course, student};

pub fn entrypoint_url() -> String {
    "/api/".to_string()
}

pub fn student_collection_url() -> String {
    "/api/students/".to_string()
}

pub fn student_item_url(student_id: i32) -> String {
    format!("/api/students/{student_id}/")
}

pub fn student_assessments_url(student_id: i32) -> String {
    format!("/api/students/{student_id}/assessments/")
}

pub fn course_collection_url() -> String {
    "/api/courses/".to_string()
}

pub fn course_item_url(course_id: i32) -> String {
    format!("/api/courses/{course_id}/")
}

pub fn course_assessments_url(course_id: i32) -> String {
    format!("/api/courses/{course_id}/assessments/")
}

pub fn assessment_collection_url() -> String {
    "/api/assessments/".to_string()
}

pub fn student_assessment_url(student_id: i32, course_id: i32) -> String {
    format!("/api/students/{student_id}/assessments/{course_id}/")
}

pub fn course_assessment_url(course_id: i32, student_id: i32) -> String {
    format!("/api/courses/{course_id}/assessments/{student_id}/")
}

/// A JSON object under construction, with shorthands for the Mason
/// reserved properties and for this API's link relations.
#[derive(Debug, Default)]
pub struct MasonDocument {
    root: Map<String, Value>,
}

impl MasonDocument {
    pub fn new() -> Self {
        Self { root: Map::new() }
    }

    /// Document seeded from an entity's serialized fields. Anything other
    /// than a JSON object seeds an empty document.
    pub fn with_fields(fields: Value) -> Self {
        let root = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { root }
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.root.insert(key.to_owned(), value);
    }

    /// Declares where the `studman:` link relations are documented.
    pub fn add_namespace(&mut self, name_space: &str, uri: &str) {
        let namespaces = self
            .root
            .entry("@namespaces")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = namespaces {
            map.insert(name_space.to_owned(), json!({ "name": uri }));
        }
    }

    /// Error element for the root object. Mason allows several strings in
    /// `@messages`; one is enough here.
    pub fn add_error(&mut self, title: &str, details: &str) {
        self.root.insert(
            "@error".to_owned(),
            json!({
                "@message": title,
                "@messages": [details],
            }),
        );
    }

    fn add_raw_control(&mut self, ctrl_name: &str, control: Value) {
        let controls = self
            .root
            .entry("@controls")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = controls {
            map.insert(ctrl_name.to_owned(), control);
        }
    }

    /// Plain link relation with no method hint, e.g. `self`, `profile` and
    /// `collection`. Mason defaults these to GET.
    pub fn add_control(&mut self, ctrl_name: &str, href: &str) {
        self.add_raw_control(ctrl_name, json!({ "href": href }));
    }

    pub fn add_control_get(&mut self, ctrl_name: &str, title: &str, href: &str) {
        self.add_raw_control(
            ctrl_name,
            json!({
                "href": href,
                "method": "GET",
                "title": title,
            }),
        );
    }

    pub fn add_control_post(&mut self, ctrl_name: &str, title: &str, href: &str, schema: Value) {
        self.add_raw_control(
            ctrl_name,
            json!({
                "href": href,
                "method": "POST",
                "encoding": "json",
                "title": title,
                "schema": schema,
            }),
        );
    }

    /// PUT control. The relation name is always `edit`.
    pub fn add_control_put(&mut self, title: &str, href: &str, schema: Value) {
        self.add_raw_control(
            "edit",
            json!({
                "href": href,
                "method": "PUT",
                "encoding": "json",
                "title": title,
                "schema": schema,
            }),
        );
    }

    /// DELETE control. IANA defines no relation for deletion, so the name
    /// comes from the application namespace.
    pub fn add_control_delete(&mut self, title: &str, href: &str) {
        self.add_raw_control(
            "studman:delete",
            json!({
                "href": href,
                "method": "DELETE",
                "title": title,
            }),
        );
    }

    pub fn add_control_all_students(&mut self) {
        self.add_control_get(
            "studman:students-all",
            "The collection of all students",
            &student_collection_url(),
        );
    }

    pub fn add_control_all_courses(&mut self) {
        self.add_control_get(
            "studman:courses-all",
            "The collection of all courses",
            &course_collection_url(),
        );
    }

    pub fn add_control_all_assessments(&mut self) {
        self.add_control_get(
            "studman:assessments-all",
            "The collection of all assessments",
            &assessment_collection_url(),
        );
    }

    pub fn add_control_add_student(&mut self) {
        self.add_control_post(
            "studman:add-student",
            "Add a new student",
            &student_collection_url(),
            student::Model::json_schema(),
        );
    }

    pub fn add_control_add_course(&mut self) {
        self.add_control_post(
            "studman:add-course",
            "Add a new course",
            &course_collection_url(),
            course::Model::json_schema(),
        );
    }

    pub fn add_control_add_assessment(&mut self) {
        self.add_control_post(
            "studman:add-assessment",
            "Add a new assessment",
            &assessment_collection_url(),
            assessment::Model::json_schema(),
        );
    }

    pub fn add_control_get_student(&mut self, student_id: i32) {
        self.add_control_get(
            "studman:student",
            "Get the student this assessment is assigned to",
            &student_item_url(student_id),
        );
    }

    pub fn add_control_get_course(&mut self, course_id: i32) {
        self.add_control_get(
            "studman:course",
            "Get the course this assessment is assigned to",
            &course_item_url(course_id),
        );
    }

    pub fn add_control_student_assessments(&mut self, student_id: i32) {
        self.add_control_get(
            "studman:student-assessments",
            "Get all the assessments of a student",
            &student_assessments_url(student_id),
        );
    }

    pub fn add_control_course_assessments(&mut self, course_id: i32) {
        self.add_control_get(
            "studman:course-assessments",
            "Get all the assessments of a course",
            &course_assessments_url(course_id),
        );
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Serializes the document once. The returned string is what gets
    /// cached and what goes on the wire.
    pub fn render(self) -> String {
        self.into_value().to_string()
    }
}

/// A 200 response carrying an already serialized Mason body.
pub fn mason_response(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, MASON)],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_and_controls_land_under_reserved_keys() {
        let mut doc = MasonDocument::new();
        doc.add_namespace("studman", "/studentmanager/link-relations/");
        doc.add_control("self", "/api/students/1/");
        doc.add_control_delete("Delete this student", "/api/students/1/");

        let value = doc.into_value();
        assert_eq!(
            value["@namespaces"]["studman"]["name"],
            "/studentmanager/link-relations/"
        );
        assert_eq!(value["@controls"]["self"]["href"], "/api/students/1/");
        assert!(value["@controls"]["self"].get("method").is_none());
        assert_eq!(value["@controls"]["studman:delete"]["method"], "DELETE");
    }

    #[test]
    fn post_and_put_controls_carry_schema_and_encoding() {
        let mut doc = MasonDocument::new();
        doc.add_control_add_student();
        doc.add_control_put(
            "Edit this course",
            "/api/courses/1/",
            crate::entities::course::Model::json_schema(),
        );

        let value = doc.into_value();
        let add = &value["@controls"]["studman:add-student"];
        assert_eq!(add["method"], "POST");
        assert_eq!(add["encoding"], "json");
        assert_eq!(add["href"], "/api/students/");
        assert_eq!(add["schema"]["type"], "object");
        let edit = &value["@controls"]["edit"];
        assert_eq!(edit["method"], "PUT");
        assert_eq!(
            edit["schema"]["required"],
            serde_json::json!(["title", "teacher", "code", "ects"])
        );
    }

    #[test]
    fn error_element_wraps_title_and_single_message() {
        let mut doc = MasonDocument::new();
        doc.add_error("Conflict", "Course with code '004723' already exists.");

        let value = doc.into_value();
        assert_eq!(value["@error"]["@message"], "Conflict");
        assert_eq!(
            value["@error"]["@messages"][0],
            "Course with code '004723' already exists."
        );
    }

    #[test]
    fn with_fields_keeps_entity_payload_at_the_root() {
        let mut doc = MasonDocument::with_fields(serde_json::json!({
            "course_id": 1,
            "title": "Transfiguration",
        }));
        doc.add_control("self", "/api/courses/1/");

        let value = doc.into_value();
        assert_eq!(value["title"], "Transfiguration");
        assert_eq!(value["@controls"]["self"]["href"], "/api/courses/1/");
    }

    #[test]
    fn item_urls_are_canonical_with_trailing_slash() {
        assert_eq!(student_item_url(3), "/api/students/3/");
        assert_eq!(course_assessments_url(2), "/api/courses/2/assessments/");
        assert_eq!(student_assessment_url(1, 2), "/api/students/1/assessments/2/");
        assert_eq!(course_assessment_url(2, 1), "/api/courses/2/assessments/1/");
    }
}
