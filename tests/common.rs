#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use eldlog::core::rules::RuleSet;
use eldlog::db::initialize::init_db;
use eldlog::db::queries::{append_duty_event, insert_driver};
use eldlog::models::duty_event::DutyEvent;
use eldlog::models::duty_status::DutyStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn eld() -> Command {
    cargo_bin_cmd!("eldlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_eldlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema and register one driver through the library API.
/// Returns the new driver's id.
pub fn init_db_with_driver(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    init_db(&conn).expect("init db");
    let driver = insert_driver(&conn, "Jo Driver", "CDL-TEST-1").expect("insert driver");
    driver.id
}

/// Append a duty event at a fixed timestamp via the library API.
pub fn append_at(db_path: &str, driver_id: i64, status: DutyStatus, at: &str) {
    let mut conn = rusqlite::Connection::open(db_path).expect("open db");
    let start = eldlog::utils::time::parse_ts(at).expect("parse timestamp");
    let ev = DutyEvent::new(driver_id, status, start, String::new(), 0, String::new());
    append_duty_event(&mut conn, &RuleSet::default(), &ev).expect("append duty event");
}
