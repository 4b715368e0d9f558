//! Timestamp helpers
//!
//! All instants are UTC. Display strings use `YYYY-MM-DD HH:MM:SS.ffffff`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::{EventStoreError, Result};

/// Display format for full timestamps
pub const TS_FMT_FULL: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parse format matching [`TS_FMT_FULL`], lenient on fractional digits
const TS_PARSE_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Completion template for partial timestamps
const TS_TEMPLATE: &str = "0000-00-00 00:00:00.000000";

/// Convert milliseconds since the epoch to a UTC instant
pub fn timestamp_from_millis(msecs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(msecs).single()
}

/// Format an instant for display
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TS_FMT_FULL).to_string()
}

/// Parse a possibly partial timestamp
///
/// Missing trailing parts are defaulted, so `"2024-01-05"`, `"2024-01-05 12"`
/// and `"2024-01-05 12:30:00.5"` are all accepted. The date part is required.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    let completed = if s.len() < TS_TEMPLATE.len() {
        format!("{}{}", s, &TS_TEMPLATE[s.len()..])
    } else {
        s.to_string()
    };

    NaiveDateTime::parse_from_str(&completed, TS_PARSE_FMT)
        .map(|naive| naive.and_utc())
        .map_err(|e| EventStoreError::invalid_argument(format!("invalid timestamp '{}': {}", s, e)))
}
