mod db;
mod generate;
mod models;
mod reports;
mod run;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the default database location.
const DB_ENV_VAR: &str = "EXPENSES_DB";

fn main() -> Result<()> {
    init_tracing();

    let mut args: Vec<String> = std::env::args().collect();
    let db_override = take_db_flag(&mut args)?;
    let db_path = get_db_path(db_override)?;
    tracing::debug!(path = %db_path.display(), "using database");

    let store = db::ExpenseStore::new(db_path);
    run::as_cli(&args, &store)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Remove `--db <path>` from `args`, returning the path.
fn take_db_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|a| a == "--db") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("--db requires a path");
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(PathBuf::from(path)))
}

fn get_db_path(db_override: Option<PathBuf>) -> Result<PathBuf> {
    let path = match db_override.or_else(|| std::env::var_os(DB_ENV_VAR).map(PathBuf::from)) {
        Some(path) => path,
        None => {
            let proj_dirs = directories::ProjectDirs::from("com", "expenses", "Expenses")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
            proj_dirs.data_dir().join("expenses.db")
        }
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }
    Ok(path)
}
