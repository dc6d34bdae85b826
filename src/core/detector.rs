//! Violation detection and soft warnings.
//!
//! The detector replays the timeline event by event and computes the exact
//! instant each threshold is crossed inside an event, so a recorded
//! violation carries the moment of breach rather than the moment someone
//! happened to query the state. Recorded violations are append-only
//! history; eligibility recovering later never removes them.

use crate::core::aggregator;
use crate::core::rules::RuleSet;
use crate::core::timeline::Timeline;
use crate::models::hos_state::HosState;
use crate::models::violation::{Severity, Violation, ViolationKind};
use chrono::{Duration, NaiveDateTime};

/// Scan the full timeline (clipped at `now`) and return every violation at
/// the instant it first became true. Each kind is recorded once per breach:
/// the same exhausted limit does not repeat on every later event, but a new
/// duty period (or a taken break) re-arms the check.
pub fn scan_violations(
    timeline: &Timeline,
    rules: &RuleSet,
    driver_id: i64,
    now: NaiveDateTime,
) -> Vec<Violation> {
    let mut found: Vec<Violation> = Vec::new();

    let mut flag_drive = false;
    let mut flag_window = false;
    let mut flag_break = false;
    let mut flag_weekly = false;
    let mut flag_reset = false;

    for ev in timeline.events() {
        let start = ev.start_time;
        if start >= now {
            break;
        }
        let end = ev.end_clipped(now);
        if end <= start {
            continue;
        }

        let period_start = aggregator::duty_period_start(timeline, rules, start);
        let window_end = period_start + rules.duty_window();
        let driven_before = aggregator::driving_between(timeline, period_start, start);
        let since_break_before = aggregator::driving_since_break(timeline, rules, start);
        let rolling_before = aggregator::rolling_on_duty(timeline, rules, start);

        // Re-arm checks whose metric dropped back under its threshold
        // (a qualifying rest or break intervened).
        if driven_before < rules.drive_limit() {
            flag_drive = false;
        }
        if start < window_end {
            flag_window = false;
        }
        if since_break_before < rules.break_trigger() {
            flag_break = false;
        }
        if rolling_before < rules.weekly_limit() {
            flag_weekly = false;
        }
        if start < window_end && driven_before < rules.drive_limit() {
            flag_reset = false;
        }

        if ev.status.is_driving() {
            // Driving that begins with the window or drive budget already
            // exhausted means the previous duty period was never closed by
            // a qualifying reset.
            if !flag_reset && (start >= window_end || driven_before >= rules.drive_limit()) {
                flag_reset = true;
                found.push(violation(
                    driver_id,
                    ViolationKind::InsufficientReset,
                    "Driving resumed without a qualifying 10-hour reset",
                    start,
                    Severity::Violation,
                ));
            }

            // 11-hour driving limit crossed inside this event (or already
            // sitting exactly on the limit when the wheels start rolling).
            if !flag_drive
                && driven_before <= rules.drive_limit()
                && driven_before + (end - start) > rules.drive_limit()
            {
                flag_drive = true;
                found.push(violation(
                    driver_id,
                    ViolationKind::DriveLimitExceeded,
                    "Exceeded 11-hour driving limit",
                    start + (rules.drive_limit() - driven_before),
                    Severity::Critical,
                ));
            }

            // 14-hour window: driving continuing past the wall-clock end.
            if !flag_window && start < window_end && end > window_end {
                flag_window = true;
                found.push(violation(
                    driver_id,
                    ViolationKind::DutyWindowExceeded,
                    "Drove beyond the 14-hour duty window",
                    window_end,
                    Severity::Critical,
                ));
            }

            // 30-minute break rule: driving continuing past 8 cumulative
            // hours since the last qualifying break.
            if !flag_break
                && since_break_before <= rules.break_trigger()
                && since_break_before + (end - start) > rules.break_trigger()
            {
                flag_break = true;
                found.push(violation(
                    driver_id,
                    ViolationKind::Missed30MinBreak,
                    "30-minute break required after 8 hours of driving",
                    start + (rules.break_trigger() - since_break_before),
                    Severity::Violation,
                ));
            }
        }

        if ev.status.is_on_duty()
            && !flag_weekly
            && rolling_before <= rules.weekly_limit()
            && rolling_before + (end - start) > rules.weekly_limit()
        {
            // The naive crossing instant ignores hours aging out of the
            // trailing window during the event; verify it, falling back to
            // the event boundary when aging pushed the breach later.
            let candidate = start + (rules.weekly_limit() - rolling_before);
            let at = if aggregator::rolling_on_duty(timeline, rules, candidate)
                >= rules.weekly_limit()
            {
                Some(candidate)
            } else if aggregator::rolling_on_duty(timeline, rules, end) > rules.weekly_limit() {
                Some(end)
            } else {
                None
            };

            if let Some(at) = at {
                flag_weekly = true;
                found.push(violation(
                    driver_id,
                    ViolationKind::Weekly70HourExceeded,
                    "Exceeded 70 on-duty hours in 8 days",
                    at,
                    Severity::Critical,
                ));
            }
        }
    }

    found.sort_by_key(|v| v.occurred_at);
    found
}

fn violation(
    driver_id: i64,
    kind: ViolationKind,
    description: &str,
    occurred_at: NaiveDateTime,
    severity: Severity,
) -> Violation {
    Violation {
        id: 0,
        driver_id,
        kind,
        description: description.to_string(),
        occurred_at,
        severity,
    }
}

/// Soft-warning margins, read from the user config ("1h"-style strings).
#[derive(Debug, Clone, Copy)]
pub struct WarningMargins {
    pub drive: Duration,
    pub duty: Duration,
    pub weekly: Duration,
}

impl Default for WarningMargins {
    fn default() -> Self {
        Self {
            drive: Duration::hours(1),
            duty: Duration::hours(2),
            weekly: Duration::hours(5),
        }
    }
}

/// Warnings about the *current* state only: approaching limits within the
/// configured margins. Never persisted.
pub fn current_warnings(state: &HosState, rules: &RuleSet, margins: &WarningMargins) -> Vec<String> {
    let mut warnings = Vec::new();

    let margin_h = |d: Duration| d.num_seconds() as f64 / 3600.0;

    if state.remaining_drive_time <= margin_h(margins.drive) {
        warnings.push(format!(
            "Approaching 11-hour driving limit: {:.1}h remaining.",
            state.remaining_drive_time
        ));
    }

    if state.remaining_duty_time <= margin_h(margins.duty) {
        warnings.push(format!(
            "Approaching 14-hour duty window limit: {:.1}h remaining.",
            state.remaining_duty_time
        ));
    }

    if state.remaining_70_hour <= margin_h(margins.weekly) {
        warnings.push(format!(
            "Approaching 70-hour limit: {:.1}h remaining.",
            state.remaining_70_hour
        ));
    }

    if state.needs_30_min_break {
        warnings.push("30-minute break required before continuing to drive.".to_string());
    } else if state.time_since_last_break >= (rules.break_trigger_hours - 1) as f64 {
        warnings.push("30-minute break will be required soon.".to_string());
    }

    warnings
}
