//! Application state and event handling for the student table UI.
//!
//! # Responsibility
//! - Own the row snapshot, input buffers, selection, and status notice.
//! - Map key events onto service calls and refresh the snapshot afterwards.
//!
//! # Invariants
//! - No widget state lives outside this struct.
//! - Every mutation re-reads the full row set; nothing is patched in place.
//! - A failed action only affects its own notice; the app keeps running.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{error, info, warn};
use ratatui::widgets::TableState;
use studentdb_core::{MutationOutcome, StudentRecord, StudentRepository, StudentService};

/// Input field focus, cycled with Tab / Shift-Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Age,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Id => Self::Name,
            Self::Name => Self::Age,
            Self::Age => Self::Id,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Id => Self::Age,
            Self::Name => Self::Id,
            Self::Age => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Age => "Age",
        }
    }
}

/// Status line message, styled by severity when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

/// Whole-application state: row snapshot, inputs, selection, status.
pub struct App<R: StudentRepository> {
    service: StudentService<R>,
    pub rows: Vec<StudentRecord>,
    pub table_state: TableState,
    pub id_input: String,
    pub name_input: String,
    pub age_input: String,
    pub focus: Field,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl<R: StudentRepository> App<R> {
    pub fn new(service: StudentService<R>) -> Self {
        Self {
            service,
            rows: Vec::new(),
            table_state: TableState::default(),
            id_input: String::new(),
            name_input: String::new(),
            age_input: String::new(),
            focus: Field::Id,
            notice: None,
            should_quit: false,
        }
    }

    /// Reloads the row snapshot from storage and re-clamps the selection.
    pub fn populate(&mut self) {
        match self.service.list_students() {
            Ok(rows) => {
                self.rows = rows;
                let selected = match self.table_state.selected() {
                    Some(index) if !self.rows.is_empty() => {
                        Some(index.min(self.rows.len() - 1))
                    }
                    _ => None,
                };
                self.table_state.select(selected);
            }
            Err(err) => {
                error!("event=student_list module=tui status=error error={err}");
                self.notice = Some(Notice::Error(format!("error fetching data: {err}")));
            }
        }
    }

    /// Returns the row behind the current table selection, if any.
    pub fn selected_student(&self) -> Option<&StudentRecord> {
        self.table_state
            .selected()
            .and_then(|index| self.rows.get(index))
    }

    /// Moves the selection down one row and copies it into the inputs.
    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(index) => (index + 1).min(self.rows.len() - 1),
            None => 0,
        };
        self.table_state.select(Some(next));
        self.copy_selection_to_inputs();
    }

    /// Moves the selection up one row and copies it into the inputs.
    pub fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = match self.table_state.selected() {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(previous));
        self.copy_selection_to_inputs();
    }

    fn copy_selection_to_inputs(&mut self) {
        if let Some(student) = self.selected_student().cloned() {
            self.id_input = student.id.clone();
            self.name_input = student.name.clone();
            self.age_input = student.age.clone();
        }
    }

    /// Inserts a row from the three input fields.
    pub fn add(&mut self) {
        if self.id_input.is_empty() || self.name_input.is_empty() || self.age_input.is_empty() {
            warn!("event=student_add module=tui status=warn reason=missing_fields");
            self.notice = Some(Notice::Warning("please fill all fields".to_string()));
            return;
        }

        match self.service.add_student(
            self.id_input.as_str(),
            self.name_input.as_str(),
            self.age_input.as_str(),
        )
        {
            Ok(student) => {
                info!("event=student_add module=tui status=ok id={}", student.id);
                self.id_input.clear();
                self.name_input.clear();
                self.age_input.clear();
                self.populate();
                self.notice = Some(Notice::Info("data inserted successfully".to_string()));
            }
            Err(err) => {
                error!("event=student_add module=tui status=error error={err}");
                self.notice = Some(Notice::Error(format!("error inserting data: {err}")));
            }
        }
    }

    /// Updates name/age of the selected row, keyed by its id.
    pub fn update(&mut self) {
        let Some(selected_id) = self.selected_student().map(|student| student.id.clone()) else {
            warn!("event=student_update module=tui status=warn reason=no_selection");
            self.notice = Some(Notice::Warning("please select a row to update".to_string()));
            return;
        };

        if self.name_input.is_empty() || self.age_input.is_empty() {
            warn!("event=student_update module=tui status=warn reason=missing_fields");
            self.notice = Some(Notice::Warning(
                "please fill both name and age fields".to_string(),
            ));
            return;
        }

        match self
            .service
            .update_student(&selected_id, &self.name_input, &self.age_input)
        {
            Ok(MutationOutcome::Applied) => {
                info!("event=student_update module=tui status=ok id={selected_id}");
                self.populate();
                self.notice = Some(Notice::Info("data updated successfully".to_string()));
            }
            Ok(MutationOutcome::NoRowMatched) => {
                warn!("event=student_update module=tui status=warn id={selected_id} reason=no_row_matched");
                self.populate();
                self.notice = Some(Notice::Warning(format!(
                    "no stored row matched id {selected_id}"
                )));
            }
            Err(err) => {
                error!("event=student_update module=tui status=error error={err}");
                self.notice = Some(Notice::Error(format!("error updating data: {err}")));
            }
        }
    }

    /// Deletes the selected row, keyed by its id.
    pub fn delete(&mut self) {
        let Some(selected_id) = self.selected_student().map(|student| student.id.clone()) else {
            warn!("event=student_delete module=tui status=warn reason=no_selection");
            self.notice = Some(Notice::Warning("please select a row to delete".to_string()));
            return;
        };

        match self.service.delete_student(&selected_id) {
            Ok(MutationOutcome::Applied) => {
                info!("event=student_delete module=tui status=ok id={selected_id}");
                self.populate();
                self.notice = Some(Notice::Info("data deleted successfully".to_string()));
            }
            Ok(MutationOutcome::NoRowMatched) => {
                warn!("event=student_delete module=tui status=warn id={selected_id} reason=no_row_matched");
                self.populate();
                self.notice = Some(Notice::Warning(format!(
                    "no stored row matched id {selected_id}"
                )));
            }
            Err(err) => {
                error!("event=student_delete module=tui status=error error={err}");
                self.notice = Some(Notice::Error(format!("error deleting data: {err}")));
            }
        }
    }

    /// Routes one key press to editing, selection, or an action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => self.add(),
                KeyCode::Char('u') => self.update(),
                KeyCode::Char('d') => self.delete(),
                KeyCode::Char('r') => self.populate(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Backspace => {
                self.focused_input_mut().pop();
            }
            KeyCode::Char(c) => self.focused_input_mut().push(c),
            _ => {}
        }
    }

    pub fn input(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id_input,
            Field::Name => &self.name_input,
            Field::Age => &self.age_input,
        }
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Id => &mut self.id_input,
            Field::Name => &mut self.name_input,
            Field::Age => &mut self.age_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Field, Notice};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use studentdb_core::{
        SqliteStudentRepository, StudentRecord, StudentRepository, StudentService,
    };
    use tempfile::TempDir;

    fn test_app() -> (TempDir, App<SqliteStudentRepository>) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteStudentRepository::try_new(dir.path().join("students.db")).unwrap();
        let mut app = App::new(StudentService::new(repo));
        app.populate();
        (dir, app)
    }

    fn set_inputs(app: &mut App<SqliteStudentRepository>, id: &str, name: &str, age: &str) {
        app.id_input = id.to_string();
        app.name_input = name.to_string();
        app.age_input = age.to_string();
    }

    fn ids(app: &App<SqliteStudentRepository>) -> Vec<&str> {
        app.rows.iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn add_inserts_row_and_clears_inputs() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();

        assert_eq!(app.rows, vec![StudentRecord::new("1", "Alice", "20")]);
        assert!(app.id_input.is_empty());
        assert!(app.name_input.is_empty());
        assert!(app.age_input.is_empty());
        assert_eq!(
            app.notice,
            Some(Notice::Info("data inserted successfully".to_string()))
        );
    }

    #[test]
    fn add_with_missing_field_warns_and_skips_storage() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "", "20");
        app.add();

        assert!(app.rows.is_empty());
        assert_eq!(
            app.notice,
            Some(Notice::Warning("please fill all fields".to_string()))
        );
    }

    #[test]
    fn add_duplicate_id_reports_storage_error_and_keeps_running() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        set_inputs(&mut app, "1", "Bob", "30");
        app.add();

        assert!(matches!(app.notice, Some(Notice::Error(_))));
        assert!(!app.should_quit);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].name, "Alice");
    }

    #[test]
    fn selecting_a_row_copies_it_into_the_inputs() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        set_inputs(&mut app, "2", "Bob", "30");
        app.add();

        app.select_next();
        let first = app.rows[0].clone();
        assert_eq!(app.id_input, first.id);
        assert_eq!(app.name_input, first.name);
        assert_eq!(app.age_input, first.age);

        app.select_next();
        let second = app.rows[1].clone();
        assert_eq!(app.id_input, second.id);
        assert_eq!(app.name_input, second.name);
        assert_eq!(app.age_input, second.age);
    }

    #[test]
    fn update_uses_the_selected_rows_id_as_key() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        app.select_next();

        // Editing the id field must not change which row gets updated.
        app.id_input = "999".to_string();
        app.name_input = "Alicia".to_string();
        app.age_input = "21".to_string();
        app.update();

        assert_eq!(app.rows, vec![StudentRecord::new("1", "Alicia", "21")]);
        assert_eq!(
            app.notice,
            Some(Notice::Info("data updated successfully".to_string()))
        );
    }

    #[test]
    fn update_without_selection_warns() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alicia", "21");
        app.update();

        assert_eq!(
            app.notice,
            Some(Notice::Warning("please select a row to update".to_string()))
        );
    }

    #[test]
    fn update_with_empty_name_or_age_warns_before_storage() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        app.select_next();
        app.name_input.clear();
        app.update();

        assert_eq!(
            app.notice,
            Some(Notice::Warning(
                "please fill both name and age fields".to_string()
            ))
        );
        assert_eq!(app.rows[0].name, "Alice");
    }

    #[test]
    fn delete_removes_selected_row() {
        let (_dir, mut app) = test_app();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        set_inputs(&mut app, "2", "Bob", "30");
        app.add();

        app.select_next();
        let deleted_id = app.rows[0].id.clone();
        app.delete();

        assert!(!ids(&app).contains(&deleted_id.as_str()));
        assert_eq!(app.rows.len(), 1);
        assert_eq!(
            app.notice,
            Some(Notice::Info("data deleted successfully".to_string()))
        );
    }

    #[test]
    fn delete_without_selection_warns() {
        let (_dir, mut app) = test_app();

        app.delete();

        assert_eq!(
            app.notice,
            Some(Notice::Warning("please select a row to delete".to_string()))
        );
    }

    #[test]
    fn mutation_against_externally_removed_row_warns_without_error() {
        // Another writer on the same file can remove a row between our
        // snapshot and the mutation; the app must warn, not fail.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.db");
        let repo = SqliteStudentRepository::try_new(&path).unwrap();
        let mut app = App::new(StudentService::new(repo));
        app.populate();

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        app.select_next();

        let external = SqliteStudentRepository::try_new(&path).unwrap();
        external.delete_student("1").unwrap();

        app.delete();

        assert_eq!(
            app.notice,
            Some(Notice::Warning("no stored row matched id 1".to_string()))
        );
        assert!(app.rows.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn key_events_drive_editing_and_actions() {
        let (_dir, mut app) = test_app();

        app.handle_key(KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('E'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('9'), KeyModifiers::NONE));
        assert_eq!(app.id_input, "7");
        assert_eq!(app.name_input, "Eve");
        assert_eq!(app.age_input, "19");

        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(app.rows, vec![StudentRecord::new("7", "Eve", "19")]);

        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(app.rows.is_empty());

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn backspace_edits_focused_field() {
        let (_dir, mut app) = test_app();

        app.focus = Field::Name;
        app.name_input = "Bob".to_string();
        app.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.name_input, "Bo");
    }

    #[test]
    fn refresh_picks_up_external_inserts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.db");
        let repo = SqliteStudentRepository::try_new(&path).unwrap();
        let mut app = App::new(StudentService::new(repo));
        app.populate();
        assert!(app.rows.is_empty());

        let external = SqliteStudentRepository::try_new(&path).unwrap();
        external
            .insert_student(&StudentRecord::new("1", "Alice", "20"))
            .unwrap();

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.rows.len(), 1);
    }

    #[test]
    fn full_add_update_delete_scenario() {
        let (_dir, mut app) = test_app();
        assert!(app.rows.is_empty());

        set_inputs(&mut app, "1", "Alice", "20");
        app.add();
        assert_eq!(app.rows, vec![StudentRecord::new("1", "Alice", "20")]);

        app.select_next();
        app.name_input = "Alicia".to_string();
        app.age_input = "21".to_string();
        app.update();
        assert_eq!(app.rows, vec![StudentRecord::new("1", "Alicia", "21")]);

        app.delete();
        assert!(app.rows.is_empty());
    }
}
