//! Capability traits for event storage backends
//!
//! [`EventsDao`] is the mandatory persistence contract: append plus the two
//! day-oriented read primitives. Multi-day queries are derived from them.
//!
//! [`DaoLifecycle`] is the optional surface (open/close/flush). It has no
//! default bodies: a backend that has nothing to do there implements the
//! methods as explicit no-ops, so a forgotten override cannot go unnoticed.

use chrono::NaiveDate;

use crate::day::{DaySelector, MonthFilter};
use crate::error::Result;
use crate::event::{AppendOutcome, Event, EventPayload};
use crate::query::{EventQuery, Events};

/// Persistence contract for one channel's events
pub trait EventsDao {
    /// Lazy single-day scan returned by [`EventsDao::get_events_for_day`]
    type DayEvents: Iterator<Item = Result<Event>>;

    /// Store an event
    ///
    /// `timestamp_ms` is milliseconds since the epoch. `data` must hold a
    /// `value` entry, which becomes the event value; the rest is kept as
    /// metadata. Malformed data is dropped, not raised: see [`AppendOutcome`].
    ///
    /// # Errors
    ///
    /// - `ContractViolation` if a required argument is empty
    /// - `ReadOnly` if the store was opened read-only
    /// - `Io` on write failure
    fn append(
        &mut self,
        timestamp_ms: i64,
        var_type: &str,
        var_name: &str,
        data: EventPayload,
    ) -> Result<AppendOutcome>;

    /// Days for which events are stored, ascending
    fn get_available_days(&self, month: Option<MonthFilter>) -> Result<Vec<NaiveDate>>;

    /// Events of one day, in storage order, optionally filtered by type/name
    ///
    /// A day without stored events yields an empty sequence.
    fn get_events_for_day(
        &self,
        day: impl Into<DaySelector>,
        var_type: Option<&str>,
        var_name: Option<&str>,
    ) -> Result<Self::DayEvents>;

    /// Events matching `query`, across days, in chronological day order
    fn get_events(&self, query: &EventQuery) -> Result<Events<'_, Self>>
    where
        Self: Sized,
    {
        Events::new(self, query)
    }

    /// Store an already built event
    fn append_event(&mut self, event: &Event) -> Result<AppendOutcome> {
        self.append(
            event.timestamp_millis(),
            &event.var_type,
            &event.var_name,
            EventPayload::Map(event.to_data_map()),
        )
    }
}

/// Optional lifecycle hooks
pub trait DaoLifecycle {
    /// Prepare the backend. Opening twice is harmless.
    fn open(&mut self) -> Result<()>;

    /// Release resources, flushing pending writes
    fn close(&mut self) -> Result<()>;

    /// Push pending writes to stable storage now
    fn flush(&mut self) -> Result<()>;
}
