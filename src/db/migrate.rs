//! Versioned schema migrations.
//!
//! Applied migrations are marked with `migration_applied` rows in the
//! internal `log` table, so re-running the runner is always safe.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'schema migration applied')",
        [version],
    )?;
    Ok(())
}

fn create_drivers_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS drivers (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL,
            license_number TEXT NOT NULL UNIQUE,
            created_at     TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_duty_events_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS duty_events (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_id  INTEGER NOT NULL REFERENCES drivers(id),
            status     TEXT NOT NULL CHECK(status IN ('OFF','SB','DR','ON')),
            start_time TEXT NOT NULL,
            end_time   TEXT,
            location   TEXT NOT NULL DEFAULT '',
            odometer   INTEGER NOT NULL DEFAULT 0,
            remarks    TEXT NOT NULL DEFAULT '',
            source     TEXT NOT NULL DEFAULT 'cli',
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_duty_events_driver_start
            ON duty_events(driver_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_duty_events_open
            ON duty_events(driver_id) WHERE end_time IS NULL;
        "#,
    )?;
    Ok(())
}

fn create_violations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS violations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_id   INTEGER NOT NULL REFERENCES drivers(id),
            kind        TEXT NOT NULL,
            description TEXT NOT NULL,
            occurred_at TEXT NOT NULL,
            severity    TEXT NOT NULL CHECK(severity IN ('VIOLATION','CRITICAL')),
            created_at  TEXT NOT NULL,
            UNIQUE(driver_id, kind, occurred_at)
        );

        CREATE INDEX IF NOT EXISTS idx_violations_driver_time
            ON violations(driver_id, occurred_at);
        "#,
    )?;
    Ok(())
}

/// Run every migration not yet marked as applied, in order.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let migrations: &[(&str, fn(&Connection) -> rusqlite::Result<()>)] = &[
        ("20250401_0001_create_drivers", create_drivers_table),
        ("20250401_0002_create_duty_events", create_duty_events_table),
        ("20250401_0003_create_violations", create_violations_table),
    ];

    for (version, run) in migrations {
        if migration_applied(conn, version)? {
            continue;
        }

        run(conn).map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;
        mark_applied(conn, version)?;
    }

    Ok(())
}

/// Entry point for `db --migrate`: run and report.
pub fn migrate_with_report(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    success("Database schema is up to date.");
    Ok(())
}
