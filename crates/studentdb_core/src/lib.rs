//! Core domain logic for the student database app.
//! This crate owns persistence and business invariants; UI crates stay thin.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{StudentRecord, StudentValidationError};
pub use repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
pub use service::student_service::{MutationOutcome, StudentService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
