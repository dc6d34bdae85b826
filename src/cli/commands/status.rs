use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator;
use crate::core::detector;
use crate::core::rules::RuleSet;
use crate::db::pool::DbPool;
use crate::db::queries::{find_driver, load_timeline};
use crate::errors::{AppError, AppResult};
use crate::models::hos_state::HosState;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{paint_can_drive, paint_status};
use crate::utils::formatting::fmt_hours;
use crate::utils::time::{fmt_ts, now};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { driver, json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let driver = find_driver(&pool.conn, driver)?;

        let rules = RuleSet::default();
        let timeline = load_timeline(&pool.conn, driver.id)?;
        let state = aggregator::hos_state(&timeline, &rules, driver.id, now());
        let warnings = detector::current_warnings(&state, &rules, &cfg.warning_margins());

        if *json {
            let payload = serde_json::json!({
                "driver": driver,
                "hos_status": state,
                "warnings": warnings,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .map_err(|e| AppError::Other(e.to_string()))?
            );
            return Ok(());
        }

        header(format!("HOS status — {}", driver.name));
        print_state(&state);

        for w in &warnings {
            warning(w);
        }
    }
    Ok(())
}

/// Shared state printout used by `status` and after `duty` appends.
pub fn print_state(state: &HosState) {
    println!(
        "Current status:   {}  (duty period since {})",
        paint_status(state.current_duty_status),
        fmt_ts(state.duty_period_start)
    );
    println!(
        "Driven:           {}  (remaining {})",
        fmt_hours(state.hours_driven_today),
        fmt_hours(state.remaining_drive_time)
    );
    println!(
        "On duty:          {}  (window remaining {})",
        fmt_hours(state.hours_on_duty_today),
        fmt_hours(state.remaining_duty_time)
    );
    println!(
        "8-day on duty:    {}  (remaining {})",
        fmt_hours(state.hours_in_8_day_period),
        fmt_hours(state.remaining_70_hour)
    );
    println!(
        "Since last break: {} driving{}",
        fmt_hours(state.time_since_last_break),
        if state.needs_30_min_break {
            "  — 30-minute break due"
        } else {
            ""
        }
    );
    println!("Can drive:        {}", paint_can_drive(state.can_drive));
}
