//! Core types and traits for the event store
//!
//! This crate defines the foundational types used throughout the system:
//! - Event: timestamped, typed, named value plus metadata
//! - EventPayload / AppendOutcome: append input and tolerant-ingest result
//! - Error: Error type hierarchy
//! - Contract: EventsDao (mandatory) and DaoLifecycle (optional) traits
//! - Day selection and month filters
//! - Query filter and the lazy multi-day `Events` iterator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod contract;
pub mod day;
pub mod error;
pub mod event;
pub mod query;
pub mod time;

pub use channel::{FRAMEWORK_EVENT_CHANNEL, SENSOR_EVENT_CHANNEL, SYSMON_EVENT_CHANNEL};
pub use contract::{DaoLifecycle, EventsDao};
pub use day::{format_day, DaySelector, MonthFilter, DATE_FMT};
pub use error::{EventStoreError, Result};
pub use event::{
    value_to_string, AppendOutcome, DropReason, Event, EventData, EventPayload, VALUE_KEY,
};
pub use query::{EventFilter, EventQuery, Events, TimeBounds};
pub use time::{format_timestamp, parse_timestamp, timestamp_from_millis, TS_FMT_FULL};
