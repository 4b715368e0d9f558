//! Query filtering across day partitions
//!
//! Multi-day queries are layered on top of single-day scans:
//!
//! 1. Select the available days inside `[from.date(), to.date()]`
//! 2. Scan each day in ascending order, filtering on type/name at the day layer
//! 3. Trim events before `from` on the first scanned day and after `to` on the
//!    last scanned day; intermediate days are entirely in range
//!
//! Both time bounds are inclusive.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::contract::EventsDao;
use crate::error::Result;
use crate::event::Event;

/// Type/name predicate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Required variable type, if any
    pub var_type: Option<String>,
    /// Required variable name, if any
    pub var_name: Option<String>,
}

impl EventFilter {
    /// Build a filter from optional criteria
    pub fn new(var_type: Option<&str>, var_name: Option<&str>) -> Self {
        Self {
            var_type: var_type.map(str::to_string),
            var_name: var_name.map(str::to_string),
        }
    }

    /// True if no criterion is set
    pub fn is_empty(&self) -> bool {
        self.var_type.is_none() && self.var_name.is_none()
    }

    /// Check raw type/name fields
    pub fn matches_fields(&self, var_type: &str, var_name: &str) -> bool {
        self.var_type.as_deref().map_or(true, |t| t == var_type)
            && self.var_name.as_deref().map_or(true, |n| n == var_name)
    }

    /// Check an event
    pub fn matches(&self, event: &Event) -> bool {
        self.matches_fields(&event.var_type, &event.var_name)
    }
}

/// Inclusive time range, either end open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBounds {
    /// Lower bound
    pub from: Option<DateTime<Utc>>,
    /// Upper bound
    pub to: Option<DateTime<Utc>>,
}

impl TimeBounds {
    /// True if neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// `ts >= from`
    pub fn admits_from(&self, ts: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| *ts >= from)
    }

    /// `ts <= to`
    pub fn admits_to(&self, ts: &DateTime<Utc>) -> bool {
        self.to.map_or(true, |to| *ts <= to)
    }

    /// True if the day overlaps the range
    pub fn day_in_range(&self, day: NaiveDate) -> bool {
        self.from.map_or(true, |from| day >= from.date_naive())
            && self.to.map_or(true, |to| day <= to.date_naive())
    }
}

/// Multi-day query criteria
///
/// # Example
///
/// ```ignore
/// let query = EventQuery::new()
///     .from_time(start)
///     .to_time(end)
///     .var_type("temperature");
/// for event in dao.get_events(&query)? {
///     let event = event?;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Time range
    pub bounds: TimeBounds,
    /// Type/name criteria
    pub filter: EventFilter,
}

impl EventQuery {
    /// Query matching everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound
    pub fn from_time(mut self, from: DateTime<Utc>) -> Self {
        self.bounds.from = Some(from);
        self
    }

    /// Inclusive upper bound
    pub fn to_time(mut self, to: DateTime<Utc>) -> Self {
        self.bounds.to = Some(to);
        self
    }

    /// Restrict to a variable type
    pub fn var_type(mut self, var_type: impl Into<String>) -> Self {
        self.filter.var_type = Some(var_type.into());
        self
    }

    /// Restrict to a variable name
    pub fn var_name(mut self, var_name: impl Into<String>) -> Self {
        self.filter.var_name = Some(var_name.into());
        self
    }
}

/// Lazy result of a multi-day query
///
/// Opens one partition at a time; a consumer that stops early leaves later
/// partitions unopened. Errors opening a partition are yielded in place and
/// the scan moves on to the next day.
pub struct Events<'a, D: EventsDao> {
    dao: &'a D,
    days: std::vec::IntoIter<NaiveDate>,
    first_day: Option<NaiveDate>,
    last_day: Option<NaiveDate>,
    query: EventQuery,
    current: Option<(NaiveDate, D::DayEvents)>,
}

impl<'a, D: EventsDao> Events<'a, D> {
    /// Select the days to scan for `query`
    pub fn new(dao: &'a D, query: &EventQuery) -> Result<Self> {
        debug!(?query, "get_events called");

        let days: Vec<NaiveDate> = if query.bounds.is_unbounded() {
            dao.get_available_days(None)?
        } else {
            dao.get_available_days(None)?
                .into_iter()
                .filter(|day| query.bounds.day_in_range(*day))
                .collect()
        };

        Ok(Self {
            dao,
            first_day: days.first().copied(),
            last_day: days.last().copied(),
            days: days.into_iter(),
            query: query.clone(),
            current: None,
        })
    }

    fn trimmed(&self, day: NaiveDate, event: &Event) -> bool {
        (Some(day) == self.first_day && !self.query.bounds.admits_from(&event.timestamp))
            || (Some(day) == self.last_day && !self.query.bounds.admits_to(&event.timestamp))
    }
}

impl<'a, D: EventsDao> Iterator for Events<'a, D> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((day, day_events)) = self.current.as_mut() {
                let day = *day;
                match day_events.next() {
                    Some(Ok(event)) => {
                        if self.trimmed(day, &event) {
                            continue;
                        }
                        return Some(Ok(event));
                    }
                    Some(Err(e)) => {
                        self.current = None;
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }

            let day = self.days.next()?;
            match self.dao.get_events_for_day(
                day,
                self.query.filter.var_type.as_deref(),
                self.query.filter.var_name.as_deref(),
            ) {
                Ok(day_events) => self.current = Some((day, day_events)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
