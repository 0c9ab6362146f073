pub mod ssn;
pub mod tracing;
