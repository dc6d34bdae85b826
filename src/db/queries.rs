use crate::core::aggregator;
use crate::core::detector;
use crate::core::rules::RuleSet;
use crate::core::timeline::Timeline;
use crate::errors::{AppError, AppResult};
use crate::models::driver::Driver;
use crate::models::duty_event::DutyEvent;
use crate::models::duty_status::DutyStatus;
use crate::models::hos_state::HosState;
use crate::models::violation::{Severity, Violation, ViolationKind};
use crate::utils::time::{fmt_ts, parse_ts};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};

fn conversion_err(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
}

pub fn map_driver_row(row: &Row) -> rusqlite::Result<Driver> {
    Ok(Driver {
        id: row.get("id")?,
        name: row.get("name")?,
        license_number: row.get("license_number")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_event_row(row: &Row) -> rusqlite::Result<DutyEvent> {
    let status_str: String = row.get("status")?;
    let status = DutyStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_err(AppError::InvalidDutyStatus(status_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let start_time =
        parse_ts(&start_str).map_err(|_| conversion_err(AppError::InvalidTimestamp(start_str)))?;

    let end_time = match row.get::<_, Option<String>>("end_time")? {
        Some(s) => {
            Some(parse_ts(&s).map_err(|_| conversion_err(AppError::InvalidTimestamp(s)))?)
        }
        None => None,
    };

    Ok(DutyEvent {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        status,
        start_time,
        end_time,
        location: row.get("location")?,
        odometer: row.get("odometer")?,
        remarks: row.get("remarks")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_violation_row(row: &Row) -> rusqlite::Result<Violation> {
    let kind_str: String = row.get("kind")?;
    let kind = ViolationKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_err(AppError::Other(format!("unknown violation kind: {kind_str}"))))?;

    let sev_str: String = row.get("severity")?;
    let severity = Severity::from_db_str(&sev_str)
        .ok_or_else(|| conversion_err(AppError::Other(format!("unknown severity: {sev_str}"))))?;

    let at_str: String = row.get("occurred_at")?;
    let occurred_at =
        parse_ts(&at_str).map_err(|_| conversion_err(AppError::InvalidTimestamp(at_str)))?;

    Ok(Violation {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        kind,
        description: row.get("description")?,
        occurred_at,
        severity,
    })
}

// ---------------------------
// Drivers
// ---------------------------

pub fn insert_driver(conn: &Connection, name: &str, license_number: &str) -> AppResult<Driver> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("driver name must not be empty".into()));
    }
    if license_number.trim().is_empty() {
        return Err(AppError::Validation(
            "license number must not be empty".into(),
        ));
    }

    conn.execute(
        "INSERT INTO drivers (name, license_number, created_at)
         VALUES (?1, ?2, datetime('now'))",
        params![name.trim(), license_number.trim()],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row("SELECT * FROM drivers WHERE id = ?1", [id], map_driver_row)
        .map_err(AppError::Db)
}

pub fn list_drivers(conn: &Connection) -> AppResult<Vec<Driver>> {
    let mut stmt = conn.prepare("SELECT * FROM drivers ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_driver_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Resolve a CLI driver reference: numeric id, license number, or exact name.
pub fn find_driver(conn: &Connection, ident: &str) -> AppResult<Driver> {
    if let Ok(id) = ident.parse::<i64>() {
        let found = conn
            .query_row("SELECT * FROM drivers WHERE id = ?1", [id], map_driver_row)
            .optional()?;
        if let Some(d) = found {
            return Ok(d);
        }
    }

    let found = conn
        .query_row(
            "SELECT * FROM drivers WHERE license_number = ?1 OR name = ?1 LIMIT 1",
            [ident],
            map_driver_row,
        )
        .optional()?;

    found.ok_or_else(|| AppError::DriverNotFound(ident.to_string()))
}

// ---------------------------
// Duty events
// ---------------------------

pub fn load_timeline(conn: &Connection, driver_id: i64) -> AppResult<Timeline> {
    let mut stmt = conn.prepare(
        "SELECT * FROM duty_events
         WHERE driver_id = ?1
         ORDER BY start_time ASC",
    )?;

    let rows = stmt.query_map([driver_id], map_event_row)?;

    let mut events = Vec::new();
    for r in rows {
        events.push(r?);
    }
    Ok(Timeline::new(events))
}

pub fn load_events_since(
    conn: &Connection,
    driver_id: i64,
    since: NaiveDateTime,
) -> AppResult<Vec<DutyEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM duty_events
         WHERE driver_id = ?1 AND start_time >= ?2
         ORDER BY start_time ASC",
    )?;

    let rows = stmt.query_map(params![driver_id, fmt_ts(since)], map_event_row)?;

    let mut events = Vec::new();
    for r in rows {
        events.push(r?);
    }
    Ok(events)
}

/// Append a duty-status change for one driver, atomically.
///
/// Inside a single IMMEDIATE transaction: re-check the ordering invariant
/// against the driver's last recorded event, close the open event at the
/// new start time, insert the new open event, re-run the violation
/// detector, and record any newly-breached violations. Either all of it
/// lands or none of it does; concurrent writers for the same driver
/// serialize here and the loser gets an ordering error instead of a merge.
pub fn append_duty_event(
    conn: &mut Connection,
    rules: &RuleSet,
    ev: &DutyEvent,
) -> AppResult<HosState> {
    if ev.odometer < 0 {
        return Err(AppError::Validation(format!(
            "odometer must not be negative, got {}",
            ev.odometer
        )));
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    // Re-read the timeline inside the transaction: the ordering check must
    // see any append that won a concurrent race.
    let before = {
        let mut stmt = tx.prepare(
            "SELECT * FROM duty_events WHERE driver_id = ?1 ORDER BY start_time ASC",
        )?;
        let rows = stmt.query_map([ev.driver_id], map_event_row)?;

        let mut events = Vec::new();
        for r in rows {
            events.push(r?);
        }
        Timeline::new(events)
    };

    before.check_append(ev.start_time)?;

    // The new event implicitly closes the previous open one.
    tx.execute(
        "UPDATE duty_events SET end_time = ?1
         WHERE driver_id = ?2 AND end_time IS NULL",
        params![fmt_ts(ev.start_time), ev.driver_id],
    )?;

    tx.execute(
        "INSERT INTO duty_events
             (driver_id, status, start_time, end_time, location, odometer, remarks, source, created_at)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?7, ?8)",
        params![
            ev.driver_id,
            ev.status.to_db_str(),
            fmt_ts(ev.start_time),
            ev.location,
            ev.odometer,
            ev.remarks,
            ev.source,
            ev.created_at,
        ],
    )?;

    // Mirror the close + insert on the in-memory snapshot, then re-evaluate
    // the whole timeline and record breaches at their instant.
    let timeline = {
        let mut events = before.events().to_vec();
        if let Some(last) = events.last_mut()
            && last.end_time.is_none()
        {
            last.end_time = Some(ev.start_time);
        }
        events.push(ev.clone());
        Timeline::new(events)
    };

    let violations = detector::scan_violations(&timeline, rules, ev.driver_id, ev.start_time);
    for v in &violations {
        record_violation(&tx, v)?;
    }

    crate::db::log::record(
        &tx,
        "duty_change",
        &ev.driver_id.to_string(),
        &format!("{} at {}", ev.status.to_db_str(), fmt_ts(ev.start_time)),
    )?;

    tx.commit()?;

    Ok(aggregator::hos_state(
        &timeline,
        rules,
        ev.driver_id,
        ev.start_time,
    ))
}

// ---------------------------
// Violations
// ---------------------------

/// Insert a violation unless the same breach is already on record.
/// The UNIQUE(driver_id, kind, occurred_at) constraint makes re-scans
/// idempotent. Returns whether a new row was recorded.
pub fn record_violation(conn: &Connection, v: &Violation) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO violations
             (driver_id, kind, description, occurred_at, severity, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))",
        params![
            v.driver_id,
            v.kind.to_db_str(),
            v.description,
            fmt_ts(v.occurred_at),
            v.severity.to_db_str(),
        ],
    )?;
    Ok(changed > 0)
}

pub fn load_violations(
    conn: &Connection,
    driver_id: i64,
    since: Option<NaiveDateTime>,
) -> AppResult<Vec<Violation>> {
    let mut out = Vec::new();

    match since {
        Some(since) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM violations
                 WHERE driver_id = ?1 AND occurred_at >= ?2
                 ORDER BY occurred_at ASC",
            )?;
            let rows = stmt.query_map(params![driver_id, fmt_ts(since)], map_violation_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT * FROM violations
                 WHERE driver_id = ?1
                 ORDER BY occurred_at ASC",
            )?;
            let rows = stmt.query_map([driver_id], map_violation_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}
