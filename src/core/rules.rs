use chrono::Duration;
use serde::Serialize;

/// Interstate property-carrying HOS rule constants (FMCSA, April 2022
/// driver's guide). Pure configuration, no logic.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    /// Maximum driving hours inside one duty window (11-hour rule).
    pub drive_limit_hours: i64,
    /// Wall-clock length of the duty window (14-hour rule). Off-duty time
    /// taken inside the window does not pause it.
    pub duty_window_hours: i64,
    /// Cumulative driving hours after which a 30-minute break is due.
    pub break_trigger_hours: i64,
    /// Minimum qualifying break length, minutes.
    pub break_duration_minutes: i64,
    /// On-duty cap over the rolling multi-day period (70-hour rule).
    pub weekly_limit_hours: i64,
    /// Length of the rolling period, days (8 consecutive days).
    pub weekly_period_days: i64,
    /// Continuous OFF/SB hours that reset the duty window (10-hour rule).
    pub reset_hours: i64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            drive_limit_hours: 11,
            duty_window_hours: 14,
            break_trigger_hours: 8,
            break_duration_minutes: 30,
            weekly_limit_hours: 70,
            weekly_period_days: 8,
            reset_hours: 10,
        }
    }
}

impl RuleSet {
    pub fn drive_limit(&self) -> Duration {
        Duration::hours(self.drive_limit_hours)
    }

    pub fn duty_window(&self) -> Duration {
        Duration::hours(self.duty_window_hours)
    }

    pub fn break_trigger(&self) -> Duration {
        Duration::hours(self.break_trigger_hours)
    }

    pub fn min_break(&self) -> Duration {
        Duration::minutes(self.break_duration_minutes)
    }

    pub fn weekly_limit(&self) -> Duration {
        Duration::hours(self.weekly_limit_hours)
    }

    pub fn weekly_period(&self) -> Duration {
        Duration::days(self.weekly_period_days)
    }

    pub fn reset_rest(&self) -> Duration {
        Duration::hours(self.reset_hours)
    }
}
