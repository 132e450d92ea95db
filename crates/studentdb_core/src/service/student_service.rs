//! Student use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points the presentation layer calls.
//! - Validate field presence before any storage call.
//!
//! # Invariants
//! - Validation failures never reach the repository.
//! - Update/delete matching zero rows completes without error and reports
//!   `MutationOutcome::NoRowMatched` so the UI can warn instead of staying
//!   silent.

use crate::model::student::{StudentRecord, StudentValidationError};
use crate::repo::student_repo::{RepoResult, StudentRepository};

/// Result of a keyed mutation (update or delete).
///
/// `NoRowMatched` is the documented policy for the "zero rows affected"
/// boundary case: not an error, but not silent either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Exactly the targeted row was changed.
    Applied,
    /// No stored row matched the key; storage is unchanged.
    NoRowMatched,
}

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Reads the full row set.
    pub fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        self.repo.list_students()
    }

    /// Validates and inserts one student row.
    ///
    /// # Contract
    /// - All three fields must be non-empty; otherwise the repository is
    ///   never called.
    /// - Returns the inserted record for display.
    pub fn add_student(
        &self,
        id: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
    ) -> RepoResult<StudentRecord> {
        let student = StudentRecord::new(id, name, age);
        student.validate()?;
        self.repo.insert_student(&student)?;
        Ok(student)
    }

    /// Updates name/age of the row keyed by `id`.
    ///
    /// # Contract
    /// - `name` and `age` must be non-empty; `id` comes from an existing
    ///   row selection and must be present.
    /// - An absent `id` yields `NoRowMatched`, not an error.
    pub fn update_student(&self, id: &str, name: &str, age: &str) -> RepoResult<MutationOutcome> {
        if id.is_empty() {
            return Err(StudentValidationError::EmptyId.into());
        }
        if name.is_empty() {
            return Err(StudentValidationError::EmptyName.into());
        }
        if age.is_empty() {
            return Err(StudentValidationError::EmptyAge.into());
        }

        let changed = self.repo.update_student(id, name, age)?;
        Ok(outcome_from_count(changed))
    }

    /// Deletes the row keyed by `id`.
    ///
    /// An absent `id` yields `NoRowMatched`, not an error.
    pub fn delete_student(&self, id: &str) -> RepoResult<MutationOutcome> {
        if id.is_empty() {
            return Err(StudentValidationError::EmptyId.into());
        }

        let changed = self.repo.delete_student(id)?;
        Ok(outcome_from_count(changed))
    }
}

fn outcome_from_count(changed: usize) -> MutationOutcome {
    if changed == 0 {
        MutationOutcome::NoRowMatched
    } else {
        MutationOutcome::Applied
    }
}
