use super::duty_status::DutyStatus;
use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;

/// One entry in a driver's append-only duty timeline.
///
/// `end_time = None` means the entry is still open (currently in effect).
/// Entries are a regulatory record: they are never edited or deleted, and a
/// new entry implicitly closes the previous open one at its own start time.
#[derive(Debug, Clone, Serialize)]
pub struct DutyEvent {
    pub id: i64,
    pub driver_id: i64,
    pub status: DutyStatus,    // ⇔ duty_events.status ('OFF'|'SB'|'DR'|'ON')
    pub start_time: NaiveDateTime, // ⇔ duty_events.start_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub end_time: Option<NaiveDateTime>, // NULL = open
    pub location: String,
    pub odometer: i64,
    pub remarks: String,

    pub source: String,     // ⇔ duty_events.source (TEXT, default 'cli')
    pub created_at: String, // ⇔ duty_events.created_at (TEXT, ISO8601)
}

impl DutyEvent {
    /// High-level constructor for events created from the CLI.
    /// - Leaves `end_time` open (closed later by the next append)
    /// - Sets `source = "cli"` and `created_at = now() in ISO8601`
    pub fn new(
        driver_id: i64,
        status: DutyStatus,
        start_time: NaiveDateTime,
        location: String,
        odometer: i64,
        remarks: String,
    ) -> Self {
        Self {
            id: 0,
            driver_id,
            status,
            start_time,
            end_time: None,
            location,
            odometer,
            remarks,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// End of the event as of evaluation instant `at`: an open event is
    /// treated as ongoing until `at`, a closed one never extends past `at`.
    pub fn end_clipped(&self, at: NaiveDateTime) -> NaiveDateTime {
        match self.end_time {
            Some(end) => end.min(at),
            None => at,
        }
    }

    /// Portion of this event falling inside `[from, to]`, as a duration.
    /// Zero when the event lies entirely outside the range.
    pub fn overlap(&self, from: NaiveDateTime, to: NaiveDateTime) -> Duration {
        let start = self.start_time.max(from);
        let end = self.end_clipped(to);
        if end > start {
            end - start
        } else {
            Duration::zero()
        }
    }
}
