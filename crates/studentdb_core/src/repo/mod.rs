//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for student rows.
//! - Isolate SQLite query details from service/UI orchestration.
//!
//! # Invariants
//! - Repository writes validate field presence before touching SQL.
//! - Update/delete report the affected-row count instead of failing when no
//!   row matches the key.

pub mod student_repo;
