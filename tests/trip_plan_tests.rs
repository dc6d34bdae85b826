//! Library-level tests of the trip feasibility simulator.

use chrono::NaiveDateTime;
use eldlog::core::rules::RuleSet;
use eldlog::core::simulator::plan_trip;
use eldlog::core::timeline::Timeline;
use eldlog::errors::AppError;
use eldlog::models::duty_event::DutyEvent;
use eldlog::models::duty_status::DutyStatus;
use eldlog::models::trip::{TripRequest, WaypointKind};

const AVG_SPEED: f64 = 60.0;

fn ts(s: &str) -> NaiveDateTime {
    eldlog::utils::time::parse_ts(s).expect("valid timestamp")
}

fn ev(status: DutyStatus, start: &str, end: Option<&str>) -> DutyEvent {
    let mut e = DutyEvent::new(1, status, ts(start), String::new(), 0, String::new());
    e.end_time = end.map(ts);
    e
}

fn request(hours: f64) -> TripRequest {
    TripRequest {
        current_location: "Atlanta, GA".to_string(),
        pickup_location: "Macon, GA".to_string(),
        dropoff_location: "Jacksonville, FL".to_string(),
        estimated_driving_hours: hours,
    }
}

#[test]
fn short_trip_on_fresh_timeline_needs_no_rest_stops() {
    let rules = RuleSet::default();
    let timeline = Timeline::default();

    let plan = plan_trip(
        &timeline,
        &rules,
        1,
        &request(5.0),
        AVG_SPEED,
        ts("2025-03-10 06:00"),
    )
    .expect("plan");

    assert!(plan.can_complete_trip);
    assert!(plan.reasons.is_empty());

    let kinds: Vec<WaypointKind> = plan.route.waypoints.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WaypointKind::Origin, WaypointKind::Pickup, WaypointKind::Dropoff]
    );
}

#[test]
fn break_is_inserted_at_eight_hours_of_driving() {
    let rules = RuleSet::default();
    let timeline = Timeline::default();

    let plan = plan_trip(
        &timeline,
        &rules,
        1,
        &request(10.0),
        AVG_SPEED,
        ts("2025-03-10 06:00"),
    )
    .expect("plan");

    assert!(plan.can_complete_trip);

    let rest = plan
        .route
        .waypoints
        .iter()
        .find(|w| w.kind == WaypointKind::Rest)
        .expect("a rest stop");
    assert_eq!(rest.name, "Rest stop (30-minute break)");
    // 8 driving hours from a 06:00 start.
    assert_eq!(rest.eta, ts("2025-03-10 14:00"));

    // Dropoff lands after 10h driving + 30min break.
    let dropoff = plan.route.waypoints.last().expect("dropoff");
    assert_eq!(dropoff.kind, WaypointKind::Dropoff);
    assert_eq!(dropoff.eta, ts("2025-03-10 16:30"));
}

#[test]
fn long_trip_gets_a_full_reset_when_the_drive_budget_runs_out() {
    let rules = RuleSet::default();
    let timeline = Timeline::default();

    let plan = plan_trip(
        &timeline,
        &rules,
        1,
        &request(13.0),
        AVG_SPEED,
        ts("2025-03-10 06:00"),
    )
    .expect("plan");

    assert!(plan.can_complete_trip);

    let resets: Vec<_> = plan
        .route
        .waypoints
        .iter()
        .filter(|w| w.name == "Rest stop (10-hour reset)")
        .collect();
    assert_eq!(resets.len(), 1);
    // 8h drive, 30m break, 3h drive: the 11-hour budget dies at 17:30.
    assert_eq!(resets[0].eta, ts("2025-03-10 17:30"));

    // At the reset stop the drive budget shows empty.
    assert_eq!(resets[0].arrival_state.remaining_drive_time, 0.0);
}

#[test]
fn insufficient_weekly_budget_is_infeasible_with_partial_route() {
    let rules = RuleSet::default();

    // 62 on-duty hours in the trailing window: 8h of 70h budget left.
    let mut events = Vec::new();
    for day in 10..16 {
        let next = day + 1;
        events.push(ev(
            DutyStatus::Dr,
            &format!("2025-03-{day} 06:00"),
            Some(&format!("2025-03-{day} 16:20")),
        ));
        events.push(ev(
            DutyStatus::Off,
            &format!("2025-03-{day} 16:20"),
            Some(&format!("2025-03-{next} 06:00")),
        ));
    }
    let timeline = Timeline::new(events);

    let plan = plan_trip(
        &timeline,
        &rules,
        1,
        &request(12.5),
        AVG_SPEED,
        ts("2025-03-16 06:00"),
    )
    .expect("plan");

    assert!(!plan.can_complete_trip);
    assert!(
        plan.reasons
            .iter()
            .any(|r| r.contains("Insufficient 70-hour budget remaining")),
        "got: {:?}",
        plan.reasons
    );

    // The partial route still starts from the origin.
    assert_eq!(plan.route.waypoints[0].kind, WaypointKind::Origin);
    assert!(
        plan.route
            .waypoints
            .iter()
            .all(|w| w.kind != WaypointKind::Dropoff)
    );
}

#[test]
fn identical_inputs_produce_identical_plans() {
    let rules = RuleSet::default();
    let timeline = Timeline::new(vec![ev(
        DutyStatus::Dr,
        "2025-03-10 06:00",
        Some("2025-03-10 09:00"),
    )]);

    let now = ts("2025-03-10 09:00");
    let a = plan_trip(&timeline, &rules, 1, &request(9.0), AVG_SPEED, now).expect("plan");
    let b = plan_trip(&timeline, &rules, 1, &request(9.0), AVG_SPEED, now).expect("plan");

    assert_eq!(a.can_complete_trip, b.can_complete_trip);
    assert_eq!(a.reasons, b.reasons);
    assert_eq!(a.route.waypoints.len(), b.route.waypoints.len());
    for (wa, wb) in a.route.waypoints.iter().zip(&b.route.waypoints) {
        assert_eq!(wa.eta, wb.eta);
        assert_eq!(wa.kind, wb.kind);
        assert_eq!(wa.arrival_state, wb.arrival_state);
    }
}

#[test]
fn pending_break_is_taken_before_any_further_driving() {
    let rules = RuleSet::default();
    // 8h already driven and no break: the planner must stop first.
    let timeline = Timeline::new(vec![ev(
        DutyStatus::Dr,
        "2025-03-10 06:00",
        Some("2025-03-10 14:00"),
    )]);

    let plan = plan_trip(
        &timeline,
        &rules,
        1,
        &request(2.0),
        AVG_SPEED,
        ts("2025-03-10 14:00"),
    )
    .expect("plan");

    assert!(plan.can_complete_trip);
    assert_eq!(plan.route.waypoints[1].kind, WaypointKind::Rest);
    assert_eq!(plan.route.waypoints[1].eta, ts("2025-03-10 14:00"));
}

#[test]
fn non_positive_hours_are_rejected() {
    let rules = RuleSet::default();
    let timeline = Timeline::default();

    let err = plan_trip(
        &timeline,
        &rules,
        1,
        &request(0.0),
        AVG_SPEED,
        ts("2025-03-10 06:00"),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn final_status_agrees_with_the_live_aggregator_shape() {
    let rules = RuleSet::default();
    let timeline = Timeline::default();

    let plan = plan_trip(
        &timeline,
        &rules,
        1,
        &request(5.0),
        AVG_SPEED,
        ts("2025-03-10 06:00"),
    )
    .expect("plan");

    // 5h driven straight through: the projected state reflects it.
    assert_eq!(plan.hos_status.hours_driven_today, 5.0);
    assert_eq!(plan.hos_status.remaining_drive_time, 6.0);
    assert_eq!(plan.hos_status.time_since_last_break, 5.0);
    assert!(!plan.hos_status.needs_30_min_break);
}
