//! Calendar day selection
//!
//! Partitions are keyed by UTC calendar day. Callers designate a day either
//! as a date value or as a `YYYY-MM-DD` / `YYYY/MM/DD` string, and restrict
//! day listings with a `(year, month)` filter.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::{EventStoreError, Result};

/// Display format for days
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Format a day as `YYYY-MM-DD`
pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FMT).to_string()
}

/// Designates one partition day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySelector {
    /// Explicit date
    Date(NaiveDate),
    /// `YYYY-MM-DD` or `YYYY/MM/DD`; only the first 10 characters are read
    Text(String),
}

impl DaySelector {
    /// Resolve to a date
    pub fn resolve(&self) -> Result<NaiveDate> {
        match self {
            DaySelector::Date(day) => Ok(*day),
            DaySelector::Text(text) => {
                let head: String = text.chars().take(10).collect();
                let normalized = head.replace('/', "-");
                NaiveDate::parse_from_str(&normalized, DATE_FMT).map_err(|e| {
                    EventStoreError::invalid_argument(format!("invalid day '{}': {}", text, e))
                })
            }
        }
    }
}

impl From<NaiveDate> for DaySelector {
    fn from(day: NaiveDate) -> Self {
        DaySelector::Date(day)
    }
}

impl From<DateTime<Utc>> for DaySelector {
    fn from(ts: DateTime<Utc>) -> Self {
        DaySelector::Date(ts.date_naive())
    }
}

impl From<&str> for DaySelector {
    fn from(s: &str) -> Self {
        DaySelector::Text(s.to_string())
    }
}

impl From<String> for DaySelector {
    fn from(s: String) -> Self {
        DaySelector::Text(s)
    }
}

impl From<&String> for DaySelector {
    fn from(s: &String) -> Self {
        DaySelector::Text(s.clone())
    }
}

/// Restricts a day listing to one month
///
/// Partition names only carry a two-digit year, so the year is normalized to
/// its two-digit form: `24` and `2024` select the same month. Only years
/// 0..=99 and 2000..=2099 are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    year: u32,
    month: u32,
}

impl MonthFilter {
    /// Create a filter, validating both members
    pub fn new(year: u32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(EventStoreError::invalid_argument(format!(
                "month out of range: {}",
                month
            )));
        }
        let year = match year {
            0..=99 => year,
            2000..=2099 => year - 2000,
            other => {
                return Err(EventStoreError::invalid_argument(format!(
                    "year out of range: {} (expected 0..=99 or 2000..=2099)",
                    other
                )))
            }
        };
        Ok(Self { year, month })
    }

    /// Two-digit year
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Month number (1..=12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// True if the day falls in the filtered month
    pub fn matches(&self, day: NaiveDate) -> bool {
        day.year().rem_euclid(100) as u32 == self.year && day.month() == self.month
    }
}

impl TryFrom<(u32, u32)> for MonthFilter {
    type Error = EventStoreError;

    fn try_from((year, month): (u32, u32)) -> Result<Self> {
        MonthFilter::new(year, month)
    }
}
