mod error;
mod ledger;
mod models;
mod run;
mod store;
mod summary;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    let store = store::SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    let mut ledger = ledger::Ledger::open(store, category_policy())?;

    match args.len() {
        1 => run::as_tui(&mut ledger),
        2.. => run::as_cli(&args, &mut ledger),
        _ => {
            eprintln!("Usage: tally [command]");
            Ok(())
        }
    }
}

/// Category enforcement is a configuration choice: the built-in sets by
/// default, free-form labels when TALLY_ANY_CATEGORY is set.
fn category_policy() -> models::CategoryPolicy {
    match std::env::var("TALLY_ANY_CATEGORY").as_deref() {
        Ok("1") | Ok("true") => models::CategoryPolicy::Open,
        _ => models::CategoryPolicy::Closed,
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "tally", "Tally")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("tally.db"))
}
