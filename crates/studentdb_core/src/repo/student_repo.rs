//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-row CRUD APIs over the `students` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every operation acquires its own connection and releases it when the
//!   call returns, on success and error paths alike.
//! - Insert validates field presence before SQL; constraint violations
//!   (duplicate id) surface as storage errors unchanged, with no retry.
//! - Update/delete matching zero rows is not an error; the affected-row
//!   count is returned so callers can decide how to report it.

use crate::db::{open_db, DbError};
use crate::model::student::{StudentRecord, StudentValidationError};
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "database is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Reads every row, in whatever order the storage returns them.
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>>;
    /// Inserts one row after validating field presence.
    fn insert_student(&self, student: &StudentRecord) -> RepoResult<()>;
    /// Updates name/age of the row matching `id`; returns rows affected.
    fn update_student(&self, id: &str, name: &str, age: &str) -> RepoResult<usize>;
    /// Deletes the row matching `id`; returns rows affected.
    fn delete_student(&self, id: &str) -> RepoResult<usize>;
}

/// SQLite-backed student repository.
///
/// Holds only the database path. Each operation opens a fresh connection and
/// drops it before returning, so the file handle is never held between user
/// actions and release is guaranteed on error paths by RAII.
pub struct SqliteStudentRepository {
    db_path: PathBuf,
}

impl SqliteStudentRepository {
    /// Creates a repository after checking the database is usable.
    ///
    /// Opens the file once to apply migrations and verify the `students`
    /// table and its columns exist, then releases the connection.
    pub fn try_new(db_path: impl AsRef<Path>) -> RepoResult<Self> {
        let conn = open_db(&db_path)?;
        ensure_students_table_ready(&conn)?;
        Ok(Self {
            db_path: db_path.as_ref().to_path_buf(),
        })
    }

    fn connect(&self) -> RepoResult<Connection> {
        Ok(open_db(&self.db_path)?)
    }
}

impl StudentRepository for SqliteStudentRepository {
    fn list_students(&self) -> RepoResult<Vec<StudentRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name, age FROM students;")?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(StudentRecord {
                id: row.get("id")?,
                name: row.get("name")?,
                age: row.get("age")?,
            });
        }
        Ok(students)
    }

    fn insert_student(&self, student: &StudentRecord) -> RepoResult<()> {
        student.validate()?;

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO students (id, name, age) VALUES (?1, ?2, ?3);",
            params![
                student.id.as_str(),
                student.name.as_str(),
                student.age.as_str()
            ],
        )?;
        Ok(())
    }

    fn update_student(&self, id: &str, name: &str, age: &str) -> RepoResult<usize> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE students SET name = ?2, age = ?3 WHERE id = ?1;",
            params![id, name, age],
        )?;
        Ok(changed)
    }

    fn delete_student(&self, id: &str) -> RepoResult<usize> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM students WHERE id = ?1;", [id])?;
        Ok(changed)
    }
}

fn ensure_students_table_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "students")? {
        return Err(RepoError::MissingRequiredTable("students"));
    }

    for column in ["id", "name", "age"] {
        if !table_has_column(conn, "students", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "students",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
