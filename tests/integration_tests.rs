use predicates::str::contains;

mod common;
use common::{append_at, eld, init_db_with_driver, setup_test_db};
use eldlog::models::duty_status::DutyStatus;

#[test]
fn init_creates_the_schema() {
    let db_path = setup_test_db("init");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    eld()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Drivers:"))
        .stdout(contains("Duty events:"));
}

#[test]
fn driver_add_and_list() {
    let db_path = setup_test_db("driver_add");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    eld()
        .args([
            "--db",
            &db_path,
            "driver",
            "--add",
            "--name",
            "Alex Hauler",
            "--license",
            "CDL-GA-42",
        ])
        .assert()
        .success()
        .stdout(contains("Alex Hauler"));

    eld()
        .args(["--db", &db_path, "driver", "--list"])
        .assert()
        .success()
        .stdout(contains("CDL-GA-42"));
}

#[test]
fn duty_change_reports_the_new_state() {
    let db_path = setup_test_db("duty_change");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args([
            "--db",
            &db_path,
            "duty",
            &id.to_string(),
            "DR",
            "--location",
            "Atlanta, GA",
            "--odometer",
            "120500",
            "--at",
            "2025-03-10 06:00",
        ])
        .assert()
        .success()
        .stdout(contains("Driving"))
        .stdout(contains("Can drive"));
}

#[test]
fn out_of_order_duty_change_is_rejected() {
    let db_path = setup_test_db("ordering");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);
    append_at(&db_path, id, DutyStatus::Dr, "2025-03-10 08:00");

    eld()
        .args([
            "--db",
            &db_path,
            "duty",
            &id.to_string(),
            "OFF",
            "--at",
            "2025-03-10 07:00",
        ])
        .assert()
        .failure()
        .stderr(contains("ordering error"));
}

#[test]
fn unknown_duty_status_is_rejected() {
    let db_path = setup_test_db("bad_status");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args(["--db", &db_path, "duty", &id.to_string(), "NAP"])
        .assert()
        .failure()
        .stderr(contains("Invalid duty status code"));
}

#[test]
fn negative_odometer_is_rejected() {
    let db_path = setup_test_db("bad_odometer");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args(["--db", &db_path, "duty", &id.to_string(), "DR", "--odometer=-5"])
        .assert()
        .failure()
        .stderr(contains("odometer"));
}

#[test]
fn unknown_driver_is_reported() {
    let db_path = setup_test_db("no_driver");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    eld()
        .args(["--db", &db_path, "status", "nobody"])
        .assert()
        .failure()
        .stderr(contains("Driver not found"));
}

#[test]
fn status_shows_the_current_budgets() {
    let db_path = setup_test_db("status");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args(["--db", &db_path, "status", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("HOS status"))
        .stdout(contains("Can drive"));
}

#[test]
fn status_json_is_machine_readable() {
    let db_path = setup_test_db("status_json");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args(["--db", &db_path, "status", &id.to_string(), "--json"])
        .assert()
        .success()
        .stdout(contains("\"remaining_drive_time\""))
        .stdout(contains("\"can_drive\""));
}

#[test]
fn logbook_lists_recorded_events() {
    let db_path = setup_test_db("logbook");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    // Recent timestamps so the default 8-day window includes them.
    let start = chrono::Local::now().naive_local() - chrono::Duration::hours(3);
    let later = start + chrono::Duration::hours(1);
    append_at(
        &db_path,
        id,
        DutyStatus::Dr,
        &start.format("%Y-%m-%d %H:%M").to_string(),
    );
    append_at(
        &db_path,
        id,
        DutyStatus::Off,
        &later.format("%Y-%m-%d %H:%M").to_string(),
    );

    eld()
        .args(["--db", &db_path, "logbook", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("DR"))
        .stdout(contains("(open)"));
}

#[test]
fn violations_are_recorded_and_listed() {
    let db_path = setup_test_db("violations");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    // 12 hours of driving, then going off duty triggers detection.
    append_at(&db_path, id, DutyStatus::Dr, "2025-03-10 06:00");
    append_at(&db_path, id, DutyStatus::Off, "2025-03-10 18:00");

    eld()
        .args(["--db", &db_path, "violations", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("DRIVE_LIMIT_EXCEEDED"))
        .stdout(contains("MISSED_30_MIN_BREAK"));
}

#[test]
fn violations_list_is_empty_for_a_clean_record() {
    let db_path = setup_test_db("violations_empty");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args(["--db", &db_path, "violations", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("No violations on record."));
}

#[test]
fn plan_succeeds_for_a_short_trip() {
    let db_path = setup_test_db("plan_ok");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args([
            "--db",
            &db_path,
            "plan",
            &id.to_string(),
            "--from",
            "Atlanta, GA",
            "--pickup",
            "Macon, GA",
            "--dropoff",
            "Jacksonville, FL",
            "--hours",
            "5",
        ])
        .assert()
        .success()
        .stdout(contains("Trip is feasible"))
        .stdout(contains("dropoff"));
}

#[test]
fn plan_rejects_non_positive_hours() {
    let db_path = setup_test_db("plan_bad_hours");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args([
            "--db",
            &db_path,
            "plan",
            &id.to_string(),
            "--from",
            "Atlanta",
            "--pickup",
            "Macon",
            "--dropoff",
            "Tampa",
            "--hours",
            "0",
        ])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn plan_json_includes_waypoints() {
    let db_path = setup_test_db("plan_json");

    eld()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    let id = init_db_with_driver(&db_path);

    eld()
        .args([
            "--db",
            &db_path,
            "plan",
            &id.to_string(),
            "--from",
            "Atlanta, GA",
            "--pickup",
            "Savannah, GA",
            "--dropoff",
            "Miami, FL",
            "--hours",
            "10",
            "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"can_complete_trip\": true"))
        .stdout(contains("\"waypoints\""))
        .stdout(contains("\"rest\""));
}

#[test]
fn rules_prints_the_constants() {
    eld()
        .args(["rules"])
        .assert()
        .success()
        .stdout(contains("11"))
        .stdout(contains("30-minute break"));
}
