pub mod api_key_repository;
pub mod assessment_repository;
pub mod course_repository;
pub mod student_repository;

pub use api_key_repository::ApiKeyRepository;
pub use assessment_repository::AssessmentRepository;
pub use course_repository::CourseRepository;
pub use student_repository::StudentRepository;

use crate::error::ApiError;

/// Parses a path segment as an entity id. Ids in URLs are opaque, so a
/// segment that does not parse can only name a resource that is not there.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::parse_id;
    use crate::error::ApiError;

    #[test]
    fn non_numeric_segments_resolve_to_not_found() {
        assert!(matches!(parse_id("x"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id(""), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("1.5"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("99999999999999"), Err(ApiError::NotFound)));
        assert_eq!(parse_id("42").unwrap(), 42);
    }
}
