//! Time utilities: timestamp parsing, duration strings, hour conversions.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use regex::Regex;

const TS_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Current wall-clock instant, truncated to whole seconds so stored and
/// in-memory timestamps round-trip identically.
pub fn now() -> NaiveDateTime {
    let t = Local::now().naive_local();
    t.with_nanosecond(0).unwrap_or(t)
}

pub fn parse_ts(s: &str) -> AppResult<NaiveDateTime> {
    for fmt in TS_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    Err(AppError::InvalidTimestamp(s.to_string()))
}

pub fn fmt_ts(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn to_hours(d: Duration) -> f64 {
    d.num_seconds() as f64 / 3600.0
}

/// Parse a compact duration string like "1h", "30m" or "1h30m".
pub fn parse_duration_str(s: &str) -> AppResult<Duration> {
    let re = Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?$").expect("valid duration regex");

    let caps = re
        .captures(s.trim())
        .filter(|c| c.get(1).is_some() || c.get(2).is_some())
        .ok_or_else(|| AppError::InvalidDuration(s.to_string()))?;

    let hours: i64 = caps
        .get(1)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .unwrap_or(0);
    let minutes: i64 = caps
        .get(2)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .unwrap_or(0);

    Ok(Duration::hours(hours) + Duration::minutes(minutes))
}
