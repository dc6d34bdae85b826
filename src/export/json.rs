use crate::errors::{AppError, AppResult};
use crate::models::duty_event::DutyEvent;

/// Write duty events as pretty-printed JSON.
pub fn write_json(path: &str, events: &[DutyEvent]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(events).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
