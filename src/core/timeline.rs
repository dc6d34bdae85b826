use crate::errors::{AppError, AppResult};
use crate::models::duty_event::DutyEvent;
use crate::models::duty_status::DutyStatus;
use chrono::{Duration, NaiveDateTime};

/// An immutable, chronologically ordered snapshot of one driver's duty
/// timeline. All engine components (aggregator, detector, simulator) read
/// through this type; none of them mutate it.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    events: Vec<DutyEvent>,
}

/// A merged run of consecutive events sharing a predicate (all-rest or
/// all-non-driving), used for the 10-hour reset and 30-minute break scans.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Block {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl Timeline {
    /// Build a timeline from rows loaded out of the database.
    /// Rows are sorted defensively; the append path already guarantees
    /// strict start-time ordering per driver.
    pub fn new(mut events: Vec<DutyEvent>) -> Self {
        events.sort_by_key(|e| e.start_time);
        Self { events }
    }

    pub fn events(&self) -> &[DutyEvent] {
        &self.events
    }

    pub fn first_start(&self) -> Option<NaiveDateTime> {
        self.events.first().map(|e| e.start_time)
    }

    pub fn last_start(&self) -> Option<NaiveDateTime> {
        self.events.last().map(|e| e.start_time)
    }

    /// Duty status in effect at `at`. OFF when nothing covers the instant.
    pub fn status_at(&self, at: NaiveDateTime) -> DutyStatus {
        for ev in self.events.iter().rev() {
            if ev.start_time <= at {
                return match ev.end_time {
                    Some(end) if end <= at => DutyStatus::Off,
                    _ => ev.status,
                };
            }
        }
        DutyStatus::Off
    }

    /// Reject an append that would break the strict per-driver ordering.
    /// The caller re-checks inside the write transaction; this is the same
    /// test applied to an in-memory snapshot.
    pub fn check_append(&self, at: NaiveDateTime) -> AppResult<()> {
        if let Some(last) = self.last_start()
            && at <= last
        {
            return Err(AppError::Ordering(format!(
                "new event at {} does not follow the last recorded event at {}",
                at.format("%Y-%m-%d %H:%M:%S"),
                last.format("%Y-%m-%d %H:%M:%S"),
            )));
        }
        Ok(())
    }

    /// Merge consecutive events satisfying `pred` into continuous blocks,
    /// clipped to `at`. Events starting at or after `at` are ignored.
    ///
    /// An unlogged gap between an explicitly closed event and the next one
    /// breaks contiguity: unknown time counts toward nothing.
    pub fn merged_blocks<F>(&self, at: NaiveDateTime, pred: F) -> Vec<Block>
    where
        F: Fn(DutyStatus) -> bool,
    {
        let mut blocks: Vec<Block> = Vec::new();

        for ev in &self.events {
            if ev.start_time >= at {
                break;
            }
            if !pred(ev.status) {
                continue;
            }

            let start = ev.start_time;
            let end = ev.end_clipped(at);
            if end <= start {
                continue;
            }

            match blocks.last_mut() {
                Some(last) if start <= last.end => {
                    if end > last.end {
                        last.end = end;
                    }
                }
                _ => blocks.push(Block { start, end }),
            }
        }

        blocks
    }
}
