use crate::models::duty_event::DutyEvent;
use crate::utils::time::fmt_ts;
use csv::Writer;

/// Write duty events as CSV to the given file.
pub fn write_csv(path: &str, events: &[DutyEvent]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "start_time",
        "end_time",
        "status",
        "location",
        "odometer",
        "remarks",
    ])?;

    for ev in events {
        wtr.write_record(&[
            fmt_ts(ev.start_time),
            ev.end_time.map(fmt_ts).unwrap_or_default(),
            ev.status.to_db_str().to_string(),
            ev.location.clone(),
            ev.odometer.to_string(),
            ev.remarks.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
