//! Constants shared across the API: media type, namespace and the
//! profile/documentation URLs handed out in hypermedia controls.

pub const MASON: &str = "application/vnd.mason+json";

pub const API_KEY_HEADER: &str = "Studentmanager-Api-Key";

pub const NAMESPACE: &str = "studman";
pub const LINK_RELATIONS_URL: &str = "/studentmanager/link-relations/";

pub const STUDENT_PROFILE: &str = "/profiles/student/";
pub const COURSE_PROFILE: &str = "/profiles/course/";
pub const ASSESSMENT_PROFILE: &str = "/profiles/assessment/";
pub const ERROR_PROFILE: &str = "/profiles/error/";
