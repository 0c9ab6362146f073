pub mod api_key;
pub mod assessment;
pub mod course;
pub mod student;
