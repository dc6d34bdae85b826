use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::{find_driver, load_violations};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::paint_severity;
use crate::utils::date::days_ago;
use crate::utils::time::fmt_ts;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Violations { driver, days } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let driver = find_driver(&pool.conn, driver)?;

        let since = days.map(days_ago);
        let violations = load_violations(&pool.conn, driver.id, since)?;

        match days {
            Some(d) => header(format!(
                "Violations — {} (last {} days)",
                driver.name, d
            )),
            None => header(format!("Violations — {}", driver.name)),
        }

        if violations.is_empty() {
            println!("No violations on record.");
            return Ok(());
        }

        for v in violations {
            println!(
                "{}  {}  [{}]",
                fmt_ts(v.occurred_at),
                v.kind.to_db_str(),
                paint_severity(v.severity)
            );
            for line in textwrap::wrap(&v.description, 70) {
                println!("    {}", line);
            }
        }
    }
    Ok(())
}
