pub mod csv;
pub mod json;

use crate::db::pool::DbPool;
use crate::db::queries::{find_driver, load_events_since, load_timeline};
use crate::errors::{AppError, AppResult};
use crate::models::duty_event::DutyEvent;
use crate::ui::messages::success;
use crate::utils::date::days_ago;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export one driver's logbook (optionally limited to the last `days`).
pub fn run_export(
    pool: &mut DbPool,
    driver_ident: &str,
    format: &ExportFormat,
    file: &str,
    days: Option<i64>,
    force: bool,
) -> AppResult<()> {
    let path = Path::new(file);
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "file '{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let driver = find_driver(&pool.conn, driver_ident)?;

    let events: Vec<DutyEvent> = match days {
        Some(days) => load_events_since(&pool.conn, driver.id, days_ago(days))?,
        None => load_timeline(&pool.conn, driver.id)?.events().to_vec(),
    };

    match format {
        ExportFormat::Csv => csv::write_csv(file, &events).map_err(AppError::Io)?,
        ExportFormat::Json => json::write_json(file, &events)?,
    }

    success(format!(
        "Exported {} duty events for {} to {}",
        events.len(),
        driver.name,
        path.display()
    ));
    Ok(())
}
