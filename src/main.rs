mod db;
mod export;
mod ledger;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    init_logging(&db_path)?;

    let mut db = db::Database::open(&db_path)?;
    let ledger = ledger::Ledger::new(db.load_expenses()?);
    tracing::info!(expenses = ledger.len(), "loaded expenses");

    match args.len() {
        1 => run::as_tui(ledger, &mut db),
        2.. => run::as_cli(&args, ledger, &mut db),
        _ => {
            eprintln!("Usage: expensetui [command]");
            Ok(())
        }
    }
}

fn get_db_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("EXPENSETUI_DB") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        return Ok(path);
    }

    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("expensetui.db"))
}

/// Log to `expensetui.log` beside the database; the terminal belongs to the UI.
fn init_logging(db_path: &Path) -> Result<()> {
    let log_path = db_path.with_file_name("expensetui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env("EXPENSETUI_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
