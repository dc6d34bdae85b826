//! Store-level tests: the compare-and-append discipline and the
//! recompute-from-timeline invariant.

use chrono::NaiveDateTime;
use eldlog::core::aggregator::hos_state;
use eldlog::core::rules::RuleSet;
use eldlog::db::initialize::init_db;
use eldlog::db::pool::DbPool;
use eldlog::db::queries::{
    append_duty_event, find_driver, insert_driver, load_timeline, load_violations,
};
use eldlog::errors::AppError;
use eldlog::models::duty_event::DutyEvent;
use eldlog::models::duty_status::DutyStatus;
use rusqlite::Connection;

fn ts(s: &str) -> NaiveDateTime {
    eldlog::utils::time::parse_ts(s).expect("valid timestamp")
}

fn fresh_db() -> (Connection, i64) {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    init_db(&conn).expect("init schema");
    let driver = insert_driver(&conn, "Sam Freight", "CDL-XX-7").expect("insert driver");
    (conn, driver.id)
}

fn event(driver_id: i64, status: DutyStatus, at: &str) -> DutyEvent {
    DutyEvent::new(driver_id, status, ts(at), String::new(), 0, String::new())
}

#[test]
fn append_then_requery_reflects_the_event_exactly_once() {
    let (mut conn, id) = fresh_db();
    let rules = RuleSet::default();

    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Dr, "2025-03-10 06:00"))
        .expect("append DR");
    let state = append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Off, "2025-03-10 08:00"))
        .expect("append OFF");

    assert_eq!(state.hours_driven_today, 2.0);

    // Recomputing from a fresh load yields the identical state.
    let timeline = load_timeline(&conn, id).expect("load timeline");
    let recomputed = hos_state(&timeline, &rules, id, ts("2025-03-10 08:00"));
    assert_eq!(state, recomputed);
}

#[test]
fn append_implicitly_closes_the_open_event() {
    let (mut conn, id) = fresh_db();
    let rules = RuleSet::default();

    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::On, "2025-03-10 06:00"))
        .expect("append ON");
    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Dr, "2025-03-10 07:30"))
        .expect("append DR");

    let timeline = load_timeline(&conn, id).expect("load timeline");
    let events = timeline.events();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].end_time, Some(ts("2025-03-10 07:30")));
    assert_eq!(events[1].end_time, None);
}

#[test]
fn out_of_order_append_is_rejected_and_nothing_changes() {
    let (mut conn, id) = fresh_db();
    let rules = RuleSet::default();

    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Dr, "2025-03-10 08:00"))
        .expect("append DR");

    let err = append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Off, "2025-03-10 07:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::Ordering(_)));

    // Equal start times are rejected too: the timeline is strictly ordered.
    let err = append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Off, "2025-03-10 08:00"))
        .unwrap_err();
    assert!(matches!(err, AppError::Ordering(_)));

    // The failed appends left no trace: the open event is still open.
    let timeline = load_timeline(&conn, id).expect("load timeline");
    assert_eq!(timeline.events().len(), 1);
    assert_eq!(timeline.events()[0].end_time, None);
}

#[test]
fn violations_recorded_on_append_are_not_duplicated_later() {
    let (mut conn, id) = fresh_db();
    let rules = RuleSet::default();

    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Dr, "2025-03-10 06:00"))
        .expect("append DR");
    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Off, "2025-03-10 18:00"))
        .expect("append OFF");

    let first = load_violations(&conn, id, None).expect("load violations");
    assert!(!first.is_empty());

    // A later append re-runs the detector over the same history.
    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::On, "2025-03-10 20:00"))
        .expect("append ON");

    let second = load_violations(&conn, id, None).expect("load violations");
    assert_eq!(first.len(), second.len());
}

#[test]
fn violations_survive_eligibility_recovering() {
    let (mut conn, id) = fresh_db();
    let rules = RuleSet::default();

    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Dr, "2025-03-10 06:00"))
        .expect("append DR");
    append_duty_event(&mut conn, &rules, &event(id, DutyStatus::Off, "2025-03-10 18:00"))
        .expect("append OFF");

    // A full qualifying reset restores the budgets...
    let state = append_duty_event(&mut conn, &rules, &event(id, DutyStatus::On, "2025-03-11 05:00"))
        .expect("append ON");
    assert_eq!(state.remaining_drive_time, 11.0);

    // ...but the recorded violations stay.
    let violations = load_violations(&conn, id, None).expect("load violations");
    assert!(!violations.is_empty());
}

#[test]
fn drivers_resolve_by_id_license_or_name() {
    let (conn, id) = fresh_db();

    assert_eq!(find_driver(&conn, &id.to_string()).expect("by id").id, id);
    assert_eq!(find_driver(&conn, "CDL-XX-7").expect("by license").id, id);
    assert_eq!(find_driver(&conn, "Sam Freight").expect("by name").id, id);
    assert!(matches!(
        find_driver(&conn, "ghost"),
        Err(AppError::DriverNotFound(_))
    ));
}

#[test]
fn pool_wrapper_opens_a_working_connection() {
    let mut path = std::env::temp_dir();
    path.push("pool_eldlog.sqlite");
    let db_path = path.to_string_lossy().to_string();
    std::fs::remove_file(&db_path).ok();

    let pool = DbPool::new(&db_path).expect("open pool");
    init_db(&pool.conn).expect("init schema");

    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM drivers", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 0);
}
