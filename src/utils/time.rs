use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::Result;

/// Fixed-width UTC format used for state bookmarks.
///
/// Zero-padded and fixed-width, so string order matches chronological order.
pub const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a bookmark timestamp such as `2024-03-01T08:15:00Z`.
pub fn strptime(dt: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(dt, DATETIME_FMT)?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Format a datetime as a bookmark timestamp, dropping sub-second precision.
pub fn strftime(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FMT).to_string()
}
