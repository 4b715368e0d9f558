//! evtstore - Day-partitioned, file-backed time-series event store
//!
//! Events are timestamped, typed, named values with free-form metadata,
//! produced by sensors and system monitors. Each channel (`sensor`, `sysmon`,
//! ...) is stored in its own directory, one plain-text file per UTC day.
//!
//! # Quick Start
//!
//! ```ignore
//! use evtstore::prelude::*;
//!
//! let config = EventStoreConfig::new("/var/db/cstbox/events");
//! let mut dao = FsysEventsDao::new(SENSOR_EVENT_CHANNEL, &config, false)?;
//!
//! dao.append(1_704_499_199_000, "temperature", "living", r#"{"value": 21.5}"#.into())?;
//!
//! let query = EventQuery::new()
//!     .from_time(parse_timestamp("2024-01-05")?)
//!     .var_type("temperature");
//! for event in dao.get_events(&query)? {
//!     let event = event?;
//!     println!("{} {}={}", event.timestamp, event.var_name, event.value);
//! }
//! ```
//!
//! # Architecture
//!
//! - `evtstore-core`: event model, errors, the `EventsDao` contract and the
//!   multi-day query layer
//! - `evtstore-durability`: record codec, flush policy, day partition files
//! - `evtstore-engine`: configuration and the file-system DAO

pub use evtstore_durability as durability;
pub use evtstore_engine as engine;

pub use evtstore_core::{
    AppendOutcome, DaoLifecycle, DropReason, Event, EventFilter, EventPayload, EventQuery,
    EventStoreError, Events, EventsDao, MonthFilter, Result,
};
pub use evtstore_durability::FlushPolicy;
pub use evtstore_engine::{EventStoreConfig, FsysEventsDao};

/// Commonly used items
pub mod prelude {
    pub use evtstore_core::{
        format_timestamp, parse_timestamp, AppendOutcome, DaoLifecycle, DaySelector, DropReason,
        Event, EventPayload, EventQuery, EventStoreError, EventsDao, MonthFilter, Result,
        FRAMEWORK_EVENT_CHANNEL, SENSOR_EVENT_CHANNEL, SYSMON_EVENT_CHANNEL,
    };
    pub use evtstore_engine::{EventStoreConfig, FsysEventsDao};
}
