//! Momentum command-line front end.
//!
//! # Responsibility
//! - Resolve the data directory, config, logging and database for a session.
//! - Dispatch one subcommand against the goal service.

use clap::{Parser, Subcommand};
use momentum_core::db::open_db;
use momentum_core::{
    default_log_level, init_logging, GoalService, LazyFeedback, SqliteKvStore, SystemClock,
    TrackerConfig,
};
use std::error::Error;
use std::path::PathBuf;

mod commands;
mod feedback;
mod render;

const DB_FILE_NAME: &str = "momentum.sqlite3";
const DEFAULT_COLOR: &str = "#ff7a00";

#[derive(Parser)]
#[command(name = "momentum", version, about = "Daily goal streak tracker")]
struct Cli {
    /// Directory holding the database, config and logs.
    #[arg(long, global = true, env = "MOMENTUM_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Suppress the terminal bell on completion.
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new goal
    Add {
        name: String,
        /// Display color
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
        /// First tracked day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,
    },
    /// Delete a goal by id or unique id prefix
    Delete { id: String },
    /// Mark a goal complete for today
    Done { id: String },
    /// Show all goals with streaks and chains
    List,
    /// Show one goal in detail
    Show { id: String },
    /// Goals completed today out of all goals
    Score,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let config = TrackerConfig::load_from_dir(&data_dir)?;

    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &data_dir.join("logs")) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = open_db(data_dir.join(DB_FILE_NAME))?;
    let mut service = GoalService::open(SqliteKvStore::new(&conn), SystemClock, config)?;
    if !cli.quiet {
        service = service.with_feedback(LazyFeedback::new(feedback::TerminalBell::open));
    }

    match cli.command {
        Commands::Add { name, color, start } => {
            commands::add(&mut service, &name, &color, start.as_deref())
        }
        Commands::Delete { id } => commands::delete(&mut service, &id),
        Commands::Done { id } => commands::done(&mut service, &id),
        Commands::List => commands::list(&mut service),
        Commands::Show { id } => commands::show(&mut service, &id),
        Commands::Score => commands::score(&service),
    }
}

/// `--data-dir`/`MOMENTUM_DATA_DIR`, else `~/.config/momentum`; created if missing.
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    let dir = match explicit {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => std::env::current_dir()?.join(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("momentum"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
