//! Trip feasibility simulation.
//!
//! Walks a proposed driving duration forward against a synthetic extension
//! of the driver's timeline, inserting mandatory rest stops eagerly at the
//! earliest instant a threshold would be crossed: a 30-minute break when
//! only the break rule is at risk, a full 10-hour reset when the 14-hour
//! window or the 11-hour drive budget runs out. Identical inputs always
//! produce the identical waypoint sequence and verdict.
//!
//! The walk carries its budgets forward arithmetically (no timeline rescan
//! per step); the aggregator is re-run on the extended timeline only to
//! stamp each waypoint's arrival state and the final status, which keeps
//! the simulation observably in agreement with the live aggregator.
//!
//! The 70-hour budget is consumed without crediting hours that would age
//! out of the trailing window during the trip: feasibility is judged
//! against the budget the driver holds when the plan is made.

use crate::core::aggregator;
use crate::core::route;
use crate::core::rules::RuleSet;
use crate::core::timeline::Timeline;
use crate::errors::{AppError, AppResult};
use crate::models::duty_event::DutyEvent;
use crate::models::duty_status::DutyStatus;
use crate::models::trip::{Route, TripPlanResult, TripRequest, Waypoint, WaypointKind};
use crate::utils::time::to_hours;
use chrono::{Duration, NaiveDateTime};

// Backstop only; the walk terminates long before this for any sane input.
const MAX_STEPS: usize = 10_000;

struct PendingWaypoint {
    kind: WaypointKind,
    name: String,
    lat: Option<f64>,
    lng: Option<f64>,
    eta: NaiveDateTime,
}

/// Simulate the proposed trip for one driver. Side-effect free: the real
/// timeline is read once and never appended to.
pub fn plan_trip(
    timeline: &Timeline,
    rules: &RuleSet,
    driver_id: i64,
    req: &TripRequest,
    avg_speed_mph: f64,
    now: NaiveDateTime,
) -> AppResult<TripPlanResult> {
    if !req.estimated_driving_hours.is_finite() || req.estimated_driving_hours <= 0.0 {
        return Err(AppError::Validation(format!(
            "estimated driving hours must be positive, got {}",
            req.estimated_driving_hours
        )));
    }

    let skeleton = route::build_skeleton(
        &req.current_location,
        &req.pickup_location,
        &req.dropoff_location,
        req.estimated_driving_hours,
        avg_speed_mph,
    );

    let trip_total = hours_to_duration(req.estimated_driving_hours);
    let pickup_offset = hours_to_duration(skeleton.pickup_offset_hours);

    // Seed the carried-forward budgets from the live aggregator.
    let period_start = aggregator::duty_period_start(timeline, rules, now);
    let mut clock = now;
    let mut window_end = period_start + rules.duty_window();
    let mut driven_in_period = aggregator::driving_between(timeline, period_start, now);
    let mut since_break = aggregator::driving_since_break(timeline, rules, now);
    let mut weekly_budget = (rules.weekly_limit()
        - aggregator::rolling_on_duty(timeline, rules, now))
    .max(Duration::zero());

    let mut remaining = trip_total;
    let mut driven_total = Duration::zero();
    let mut pickup_done = false;

    let mut synthetic: Vec<DutyEvent> = Vec::new();
    let mut pending: Vec<PendingWaypoint> = Vec::new();
    let mut reasons: Vec<String> = Vec::new();

    pending.push(PendingWaypoint {
        kind: WaypointKind::Origin,
        name: skeleton.origin.name.clone(),
        lat: skeleton.origin.lat,
        lng: skeleton.origin.lng,
        eta: now,
    });

    // The 70-hour verdict is decidable up front: the rolling cap cannot be
    // reset by any rest stop the planner may insert.
    if trip_total > weekly_budget {
        reasons.push(format!(
            "Insufficient 70-hour budget remaining: need {:.1}h, have {:.1}h",
            req.estimated_driving_hours,
            to_hours(weekly_budget)
        ));
    }

    let mut steps = 0;
    while remaining > Duration::zero() {
        steps += 1;
        if steps > MAX_STEPS {
            reasons.push(
                "Unable to place a qualifying rest stop without violating hours-of-service limits"
                    .to_string(),
            );
            break;
        }

        if weekly_budget <= Duration::zero() {
            // Partial route up to the point of infeasibility.
            break;
        }

        let drive_avail = [
            rules.drive_limit() - driven_in_period,
            window_end - clock,
            rules.break_trigger() - since_break,
            weekly_budget,
        ]
        .into_iter()
        .min()
        .unwrap_or(Duration::zero());

        if drive_avail <= Duration::zero() {
            // A threshold is exhausted right here: insert the mandated rest
            // before consuming any more driving time.
            let needs_reset =
                driven_in_period >= rules.drive_limit() || clock >= window_end;

            let (rest, label) = if needs_reset {
                (rules.reset_rest(), "Rest stop (10-hour reset)")
            } else {
                (rules.min_break(), "Rest stop (30-minute break)")
            };

            pending.push(PendingWaypoint {
                kind: WaypointKind::Rest,
                name: label.to_string(),
                lat: None,
                lng: None,
                eta: clock,
            });

            synthetic.push(synthetic_event(driver_id, DutyStatus::Off, clock, rest));
            clock += rest;

            if needs_reset {
                window_end = clock + rules.duty_window();
                driven_in_period = Duration::zero();
            }
            since_break = Duration::zero();
            continue;
        }

        let mut chunk = drive_avail.min(remaining);

        // Split the segment at the pickup so its waypoint lands exactly at
        // the right driving-hours offset.
        if !pickup_done {
            let to_pickup = pickup_offset - driven_total;
            if to_pickup > Duration::zero() && to_pickup < chunk {
                chunk = to_pickup;
            }
        }

        synthetic.push(synthetic_event(driver_id, DutyStatus::Dr, clock, chunk));
        clock += chunk;
        driven_in_period += chunk;
        since_break += chunk;
        weekly_budget = (weekly_budget - chunk).max(Duration::zero());
        driven_total += chunk;
        remaining -= chunk;

        if !pickup_done && driven_total >= pickup_offset {
            pickup_done = true;
            pending.push(PendingWaypoint {
                kind: WaypointKind::Pickup,
                name: skeleton.pickup.name.clone(),
                lat: skeleton.pickup.lat,
                lng: skeleton.pickup.lng,
                eta: clock,
            });
        }
    }

    let completed = remaining <= Duration::zero();
    if completed {
        pending.push(PendingWaypoint {
            kind: WaypointKind::Dropoff,
            name: skeleton.dropoff.name.clone(),
            lat: skeleton.dropoff.lat,
            lng: skeleton.dropoff.lng,
            eta: clock,
        });
    }

    // Stamp arrival states with the real aggregator over the extended
    // synthetic timeline: events after a waypoint's ETA cannot influence
    // the state at that ETA, so one extension serves every waypoint.
    // A still-open real event is closed at the planning instant first, or
    // it would run on underneath the synthetic events and double-count.
    let extended = {
        let mut events = timeline.events().to_vec();
        if let Some(last) = events.last_mut()
            && last.end_time.is_none()
        {
            last.end_time = Some(now);
        }
        events.extend_from_slice(&synthetic);
        Timeline::new(events)
    };
    let waypoints: Vec<Waypoint> = pending
        .into_iter()
        .map(|w| {
            let arrival_state = aggregator::hos_state(&extended, rules, driver_id, w.eta);
            Waypoint {
                kind: w.kind,
                name: w.name,
                lat: w.lat,
                lng: w.lng,
                eta: w.eta,
                arrival_state,
            }
        })
        .collect();

    let hos_status = aggregator::hos_state(&extended, rules, driver_id, clock);

    Ok(TripPlanResult {
        can_complete_trip: completed && reasons.is_empty(),
        reasons,
        route: Route {
            waypoints,
            total_distance_miles: skeleton.total_distance_miles,
            estimated_driving_time: req.estimated_driving_hours,
        },
        hos_status,
    })
}

fn synthetic_event(
    driver_id: i64,
    status: DutyStatus,
    start: NaiveDateTime,
    length: Duration,
) -> DutyEvent {
    let mut ev = DutyEvent::new(
        driver_id,
        status,
        start,
        String::new(),
        0,
        "trip plan projection".to_string(),
    );
    ev.end_time = Some(start + length);
    ev.source = "simulator".to_string();
    ev
}

fn hours_to_duration(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}
