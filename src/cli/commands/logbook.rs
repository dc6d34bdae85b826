use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{find_driver, load_events_since};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::date::days_ago;
use crate::utils::formatting::fmt_odometer;
use crate::utils::table::Table;
use crate::utils::time::fmt_ts;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logbook { driver, days } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let driver = find_driver(&pool.conn, driver)?;

        let events = load_events_since(&pool.conn, driver.id, days_ago(*days))?;

        header(format!("Logbook — {} (last {} days)", driver.name, days));

        if events.is_empty() {
            println!("No duty events recorded.");
            return Ok(());
        }

        // Plain status codes here: escape sequences would skew the
        // width-aware column sizing.
        let mut table = Table::new(&["START", "END", "STATUS", "LOCATION", "ODOMETER", "REMARKS"]);
        for ev in events {
            table.add_row(vec![
                fmt_ts(ev.start_time),
                ev.end_time.map(fmt_ts).unwrap_or_else(|| "(open)".into()),
                ev.status.to_db_str().to_string(),
                ev.location,
                fmt_odometer(ev.odometer),
                ev.remarks,
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
