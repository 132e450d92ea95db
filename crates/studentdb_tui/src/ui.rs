//! Rendering for the student table screen.
//!
//! # Responsibility
//! - Draw the title, table, input form, action bar, and status line from
//!   `App` state. No state mutation happens here beyond the table scroll.

use crate::app::{App, Field, Notice};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use studentdb_core::StudentRepository;

pub fn draw<R: StudentRepository>(frame: &mut Frame, app: &mut App<R>) {
    let areas = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_title(frame, areas[0]);
    draw_table(frame, areas[1], app);
    draw_inputs(frame, areas[2], app);
    draw_action_bar(frame, areas[3]);
    draw_status(frame, areas[4], app);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Database Table Data")
        .centered()
        .block(Block::bordered());
    frame.render_widget(title, area);
}

fn draw_table<R: StudentRepository>(frame: &mut Frame, area: Rect, app: &mut App<R>) {
    let header = Row::new([Cell::from("ID"), Cell::from("Name"), Cell::from("Age")])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.rows.iter().map(|student| {
        Row::new([
            Cell::from(student.id.as_str()),
            Cell::from(student.name.as_str()),
            Cell::from(student.age.as_str()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::bordered().title("Students"))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_inputs<R: StudentRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let boxes = Layout::horizontal([
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(12),
    ])
    .split(area);

    for (field, slot) in [Field::Id, Field::Name, Field::Age].into_iter().zip(boxes.iter()) {
        let style = if app.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(app.input(field))
            .block(Block::bordered().title(field.label()).border_style(style));
        frame.render_widget(input, *slot);
    }
}

fn draw_action_bar(frame: &mut Frame, area: Rect) {
    let hints = Line::from(
        "Ctrl-A add  Ctrl-U update  Ctrl-D delete  Ctrl-R refresh  Tab field  \u{2191}\u{2193} select  Esc quit",
    )
    .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(Paragraph::new(hints), area);
}

fn draw_status<R: StudentRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let Some(notice) = &app.notice else {
        return;
    };

    let (text, color) = match notice {
        Notice::Info(message) => (message.as_str(), Color::Green),
        Notice::Warning(message) => (message.as_str(), Color::Yellow),
        Notice::Error(message) => (message.as_str(), Color::Red),
    };
    let status = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(status, area);
}
