use chrono::NaiveDateTime;
use serde::Serialize;

/// Closed set of recordable HOS violations.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ViolationKind {
    DriveLimitExceeded,
    DutyWindowExceeded,
    Missed30MinBreak,
    Weekly70HourExceeded,
    InsufficientReset,
}

impl ViolationKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ViolationKind::DriveLimitExceeded => "DRIVE_LIMIT_EXCEEDED",
            ViolationKind::DutyWindowExceeded => "DUTY_WINDOW_EXCEEDED",
            ViolationKind::Missed30MinBreak => "MISSED_30_MIN_BREAK",
            ViolationKind::Weekly70HourExceeded => "WEEKLY_70_HOUR_EXCEEDED",
            ViolationKind::InsufficientReset => "INSUFFICIENT_RESET",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "DRIVE_LIMIT_EXCEEDED" => Some(ViolationKind::DriveLimitExceeded),
            "DUTY_WINDOW_EXCEEDED" => Some(ViolationKind::DutyWindowExceeded),
            "MISSED_30_MIN_BREAK" => Some(ViolationKind::Missed30MinBreak),
            "WEEKLY_70_HOUR_EXCEEDED" => Some(ViolationKind::Weekly70HourExceeded),
            "INSUFFICIENT_RESET" => Some(ViolationKind::InsufficientReset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Severity {
    Violation,
    Critical,
}

impl Severity {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Severity::Violation => "VIOLATION",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "VIOLATION" => Some(Severity::Violation),
            "CRITICAL" => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// A recorded breach, stamped at the moment it occurred.
/// Immutable once recorded: the record stays even if the driver's
/// eligibility later recovers.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub id: i64,
    pub driver_id: i64,
    pub kind: ViolationKind,
    pub description: String,
    pub occurred_at: NaiveDateTime,
    pub severity: Severity,
}
