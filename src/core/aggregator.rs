//! Rolling-window aggregation: folds a duty timeline into the live
//! regulatory state at one evaluation instant.
//!
//! Everything here is a pure function of (timeline, rules, instant).
//! Threshold arithmetic stays on integer-second `Duration`s so the 8h/10h
//! boundaries compare exactly; hours become `f64` only in the reported
//! `HosState`.

use crate::core::rules::RuleSet;
use crate::core::timeline::Timeline;
use crate::models::duty_status::DutyStatus;
use crate::models::hos_state::{HosState, round2};
use crate::utils::time::to_hours;
use chrono::{Duration, NaiveDateTime};

/// Start of the current duty window as of `at`: the end of the most recent
/// continuous OFF/SB block lasting at least `reset_hours`. Adjacent OFF and
/// SB events merge into one block for this test. With no qualifying block
/// the window is anchored at the first recorded event.
pub fn duty_period_start(timeline: &Timeline, rules: &RuleSet, at: NaiveDateTime) -> NaiveDateTime {
    let blocks = timeline.merged_blocks(at, |s| s.is_rest());

    for block in blocks.iter().rev() {
        if block.duration() >= rules.reset_rest() {
            return block.end;
        }
    }

    timeline.first_start().unwrap_or(at)
}

/// Total driving time inside `[from, to]`.
pub fn driving_between(timeline: &Timeline, from: NaiveDateTime, to: NaiveDateTime) -> Duration {
    sum_overlap(timeline, from, to, |s| s.is_driving())
}

/// Total on-duty (ON + DR) time inside `[from, to]`.
pub fn on_duty_between(timeline: &Timeline, from: NaiveDateTime, to: NaiveDateTime) -> Duration {
    sum_overlap(timeline, from, to, |s| s.is_on_duty())
}

fn sum_overlap<F>(timeline: &Timeline, from: NaiveDateTime, to: NaiveDateTime, pred: F) -> Duration
where
    F: Fn(DutyStatus) -> bool,
{
    let mut total = Duration::zero();
    for ev in timeline.events() {
        if ev.start_time >= to {
            break;
        }
        if pred(ev.status) {
            total += ev.overlap(from, to);
        }
    }
    total
}

/// End of the most recent qualifying 30-minute break taken since the duty
/// window opened. Any contiguous non-driving span (OFF, SB or ON) of at
/// least `break_duration_minutes` qualifies; an open rest that has already
/// lasted that long qualifies too.
pub fn last_break_end(
    timeline: &Timeline,
    rules: &RuleSet,
    period_start: NaiveDateTime,
    at: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let blocks = timeline.merged_blocks(at, |s| !s.is_driving());

    blocks
        .iter()
        .rev()
        .find(|b| {
            let start = b.start.max(period_start);
            b.end > start && b.end - start >= rules.min_break()
        })
        .map(|b| b.end)
}

/// Cumulative driving since the last qualifying break (or since the duty
/// window opened when none was taken). This is the 30-minute-break meter.
pub fn driving_since_break(timeline: &Timeline, rules: &RuleSet, at: NaiveDateTime) -> Duration {
    let period_start = duty_period_start(timeline, rules, at);
    let from = last_break_end(timeline, rules, period_start, at).unwrap_or(period_start);
    driving_between(timeline, from, at)
}

/// On-duty time inside the trailing `weekly_period_days × 24h` window
/// ending at `at`. Events straddling the window boundary contribute only
/// the portion inside it; the window slides continuously.
pub fn rolling_on_duty(timeline: &Timeline, rules: &RuleSet, at: NaiveDateTime) -> Duration {
    on_duty_between(timeline, at - rules.weekly_period(), at)
}

/// Produce the full `HosState` for a driver as of `at`.
pub fn hos_state(
    timeline: &Timeline,
    rules: &RuleSet,
    driver_id: i64,
    at: NaiveDateTime,
) -> HosState {
    let period_start = duty_period_start(timeline, rules, at);

    let driven = driving_between(timeline, period_start, at);
    let on_duty = on_duty_between(timeline, period_start, at);
    let elapsed = at - period_start;

    let since_break = {
        let from = last_break_end(timeline, rules, period_start, at).unwrap_or(period_start);
        driving_between(timeline, from, at)
    };

    let rolling = rolling_on_duty(timeline, rules, at);

    let remaining_drive = (rules.drive_limit() - driven).max(Duration::zero());
    let remaining_duty = (rules.duty_window() - elapsed).max(Duration::zero());
    let remaining_weekly = (rules.weekly_limit() - rolling).max(Duration::zero());

    let needs_break = since_break >= rules.break_trigger();

    // Zero remaining on any budget means no driving: the boundary itself
    // is already out of bounds.
    let can_drive = remaining_drive > Duration::zero()
        && remaining_duty > Duration::zero()
        && remaining_weekly > Duration::zero()
        && !needs_break;

    HosState {
        driver_id,
        current_duty_status: timeline.status_at(at),
        duty_period_start: period_start,
        hours_driven_today: round2(to_hours(driven)),
        hours_on_duty_today: round2(to_hours(on_duty)),
        hours_in_8_day_period: round2(to_hours(rolling)),
        time_since_last_break: round2(to_hours(since_break)),
        remaining_drive_time: round2(to_hours(remaining_drive)),
        remaining_duty_time: round2(to_hours(remaining_duty)),
        remaining_70_hour: round2(to_hours(remaining_weekly)),
        needs_30_min_break: needs_break,
        can_drive,
    }
}
