use super::duty_status::DutyStatus;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Derived regulatory state of a driver at one evaluation instant.
///
/// Never persisted as a source of truth: recomputed from the duty timeline
/// and the rule set on every query or mutation. Hour fields are rounded to
/// two decimals for display/serialization; all threshold arithmetic happens
/// upstream on integer-second durations.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HosState {
    pub driver_id: i64,
    pub current_duty_status: DutyStatus,
    pub duty_period_start: NaiveDateTime,

    pub hours_driven_today: f64,
    pub hours_on_duty_today: f64,
    pub hours_in_8_day_period: f64,

    /// Cumulative driving hours since the last qualifying 30-minute break
    /// (or since the duty-period start when no break was taken).
    pub time_since_last_break: f64,

    pub remaining_drive_time: f64,
    pub remaining_duty_time: f64,
    pub remaining_70_hour: f64,

    pub needs_30_min_break: bool,
    pub can_drive: bool,
}

/// Round an hour figure to two decimals for the reported state.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
