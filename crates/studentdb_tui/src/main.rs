//! Terminal front end for the student database.
//!
//! # Responsibility
//! - Parse CLI flags, bootstrap logging and the repository, run the event
//!   loop, and restore the terminal on every exit path.

mod app;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::App;
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::Duration;
use studentdb_core::{
    core_version, default_log_level, init_logging, SqliteStudentRepository, StudentService,
};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Student table viewer/editor over a local SQLite file.
#[derive(Debug, Parser)]
#[command(name = "studentdb", version, about)]
struct Args {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "db.db")]
    db: PathBuf,

    /// Directory for rolling log files. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()?.join(log_dir)
        };
        let level = args.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, &log_dir.to_string_lossy())
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let repo = SqliteStudentRepository::try_new(&args.db)
        .with_context(|| format!("failed to open database `{}`", args.db.display()))?;
    let mut app = App::new(StudentService::new(repo));
    app.populate();

    info!(
        "event=app_start module=tui status=ok version={} db={}",
        core_version(),
        args.db.display()
    );

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app);
    ratatui::restore();

    info!("event=app_exit module=tui status=ok");
    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App<SqliteStudentRepository>) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if event::poll(EVENT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
