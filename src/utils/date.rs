use chrono::{NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Midnight `days` before today, for `--days N` range filters.
pub fn days_ago(days: i64) -> NaiveDateTime {
    (today() - chrono::Duration::days(days))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
}
