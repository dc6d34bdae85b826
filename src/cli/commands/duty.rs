use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::detector;
use crate::core::rules::RuleSet;
use crate::db::pool::DbPool;
use crate::db::queries::{append_duty_event, find_driver};
use crate::errors::{AppError, AppResult};
use crate::models::duty_event::DutyEvent;
use crate::models::duty_status::DutyStatus;
use crate::ui::messages::{success, warning};
use crate::utils::time::{now, parse_ts};

use super::status::print_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Duty {
        driver,
        status,
        location,
        odometer,
        remarks,
        at,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let driver = find_driver(&pool.conn, driver)?;

        let status = DutyStatus::from_code(status)
            .ok_or_else(|| AppError::InvalidDutyStatus(status.clone()))?;

        let odometer = odometer.unwrap_or(0);
        if odometer < 0 {
            return Err(AppError::Validation(format!(
                "odometer must not be negative, got {}",
                odometer
            )));
        }

        let start_time = match at {
            Some(s) => parse_ts(s)?,
            None => now(),
        };

        let event = DutyEvent::new(
            driver.id,
            status,
            start_time,
            location.clone().unwrap_or_default(),
            odometer,
            remarks.clone().unwrap_or_default(),
        );

        let rules = RuleSet::default();
        let state = append_duty_event(&mut pool.conn, &rules, &event)?;

        success(format!(
            "{} is now {} ({})",
            driver.name,
            status.describe(),
            status.to_db_str()
        ));
        print_state(&state);

        for w in detector::current_warnings(&state, &rules, &cfg.warning_margins()) {
            warning(w);
        }
    }
    Ok(())
}
