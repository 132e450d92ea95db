//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record and its field-presence validation.
//!
//! # Invariants
//! - `id` is user-supplied and used as the key in mutation predicates.
//! - Validation checks only that fields are non-empty; `age` stays text
//!   exactly as entered.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One row of the `students` table.
///
/// All fields are kept as the user typed them. The underlying table may
/// carry extra columns (a legacy `grade`), which this model never touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// User-supplied identifier; the table's primary key.
    pub id: String,
    /// Student name.
    pub name: String,
    /// Age as entered. Deliberately text, not a number.
    pub age: String,
}

/// Field-presence validation failures for student input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyId,
    EmptyName,
    EmptyAge,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "student id must not be empty"),
            Self::EmptyName => write!(f, "student name must not be empty"),
            Self::EmptyAge => write!(f, "student age must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}

impl StudentRecord {
    /// Builds a record from raw field input without validating it.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
        }
    }

    /// Checks that every field is non-empty.
    ///
    /// This is the full extent of input validation; anything beyond presence
    /// (numeric age, id format) is out of scope.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.id.is_empty() {
            return Err(StudentValidationError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if self.age.is_empty() {
            return Err(StudentValidationError::EmptyAge);
        }
        Ok(())
    }
}
