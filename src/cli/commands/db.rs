use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::rules::RuleSet;
use crate::db::db_utils::{integrity_check, recheck_violations, vacuum};
use crate::db::migrate::migrate_with_report;
use crate::db::pool::DbPool;
use crate::db::stats::print_db_info;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum: do_vacuum,
        info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            migrate_with_report(&pool.conn)?;
        }

        if *check {
            integrity_check(&mut pool)?;
            let recorded = recheck_violations(&mut pool, &RuleSet::default())?;
            if recorded > 0 {
                success(format!("Backfilled {} missing violation(s).", recorded));
            } else {
                success("Violation record is complete.");
            }
        }

        if *do_vacuum {
            vacuum(&mut pool)?;
        }

        if *info {
            print_db_info(&mut pool, &cfg.database)?;
        }
    }
    Ok(())
}
