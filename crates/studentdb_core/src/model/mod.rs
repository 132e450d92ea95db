//! Domain model for student rows.
//!
//! # Responsibility
//! - Define the canonical record shape shared by repository and UI layers.
//!
//! # Invariants
//! - Fields are stored exactly as entered; no type coercion happens here.

pub mod student;
