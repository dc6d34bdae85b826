use crate::core::detector;
use crate::core::rules::RuleSet;
use crate::db::pool::DbPool;
use crate::db::queries::{list_drivers, load_timeline, record_violation};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::time::now;

/// Run SQLite's integrity check and report the outcome.
pub fn integrity_check(pool: &mut DbPool) -> AppResult<bool> {
    let result: String = pool
        .conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result == "ok" {
        success("Database integrity check passed.");
        Ok(true)
    } else {
        warning(format!("Database integrity check reported: {}", result));
        Ok(false)
    }
}

pub fn vacuum(pool: &mut DbPool) -> AppResult<()> {
    pool.conn.execute_batch("VACUUM;")?;
    success("Database optimized (VACUUM).");
    Ok(())
}

/// Re-scan every driver's timeline and backfill any violation missing from
/// the record. Inserts are idempotent, so this is safe to run repeatedly.
pub fn recheck_violations(pool: &mut DbPool, rules: &RuleSet) -> AppResult<usize> {
    let drivers = list_drivers(&pool.conn)?;
    let at = now();

    let mut recorded = 0;
    for driver in drivers {
        let timeline = load_timeline(&pool.conn, driver.id)?;
        for v in detector::scan_violations(&timeline, rules, driver.id, at) {
            if record_violation(&pool.conn, &v)? {
                recorded += 1;
            }
        }
    }

    Ok(recorded)
}
