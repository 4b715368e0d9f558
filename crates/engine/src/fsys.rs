//! File-system events DAO
//!
//! Stores the events of one channel as day partitions under
//! `<evts_db_home_dir>/<channel>/`, one tab-separated record per line.
//!
//! ## Ingest policy
//!
//! Caller mistakes (zero timestamp, empty type or name) are contract
//! violations and fail the call. Bad event *content* (unparseable JSON, no
//! `value` entry) is logged and dropped, reported as
//! [`AppendOutcome::Dropped`]: the event source cannot retransmit, so a bad
//! event must not stop the stream.

use std::path::Path;

use chrono::NaiveDate;
use evtstore_core::{
    timestamp_from_millis, value_to_string, AppendOutcome, DaoLifecycle, DaySelector,
    DropReason, Event, EventData, EventFilter, EventPayload, EventStoreError, EventsDao,
    MonthFilter, Result, VALUE_KEY,
};
use evtstore_durability::{DayEvents, FlushPolicy, PartitionPaths, PartitionWriter};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::EventStoreConfig;

fn has_separator(text: &str) -> bool {
    text.contains(|c| c == '\t' || c == '\n' || c == '\r')
}

/// File-system backed store of one channel's events
///
/// # Example
///
/// ```ignore
/// use evtstore_engine::{EventStoreConfig, FsysEventsDao};
/// use evtstore_core::{EventsDao, EventQuery};
///
/// let config = EventStoreConfig::new("/var/db/cstbox/events");
/// let mut dao = FsysEventsDao::new("sensor", &config, false)?;
/// dao.append(1_704_499_199_000, "temperature", "living", r#"{"value": 21.5}"#.into())?;
///
/// for event in dao.get_events(&EventQuery::new().var_type("temperature"))? {
///     println!("{:?}", event?);
/// }
/// ```
#[derive(Debug)]
pub struct FsysEventsDao {
    channel: String,
    read_only: bool,
    is_open: bool,
    writer: PartitionWriter,
}

impl FsysEventsDao {
    /// Open the store of `channel`
    ///
    /// In write mode the home directory and the channel root are created if
    /// needed. In read-only mode they must already exist.
    ///
    /// # Errors
    ///
    /// - `Config` if the channel is empty or a path exists but is not a directory
    /// - `NotFound` if the channel root is missing in read-only mode
    /// - `Io` if the directories cannot be created
    pub fn new(channel: &str, config: &EventStoreConfig, read_only: bool) -> Result<Self> {
        if channel.is_empty() {
            return Err(EventStoreError::config("missing mandatory parameter : channel"));
        }
        if config.evts_db_home_dir.as_os_str().is_empty() {
            return Err(EventStoreError::config(
                "missing mandatory parameter : evts_db_home_dir",
            ));
        }

        let paths = PartitionPaths::for_channel(&config.evts_db_home_dir, channel);
        if read_only {
            paths.validate()?;
        } else {
            paths.create_directories()?;
        }

        let policy = config.flush_policy();
        if !policy.requires_immediate_flush() {
            warn!(
                channel,
                "Flash memory support declared: systematic flush on write will be disabled"
            );
        }

        info!(
            channel,
            root = %paths.root().display(),
            read_only,
            policy = policy.description(),
            "Events store opened"
        );

        Ok(Self {
            channel: channel.to_string(),
            read_only,
            is_open: true,
            writer: PartitionWriter::new(paths, policy),
        })
    }

    /// Channel served by this store
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Channel storage root
    pub fn root(&self) -> &Path {
        self.writer.paths().root()
    }

    /// True if appends are refused
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// True between construction or `open()` and `close()`
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Flush policy in effect
    pub fn flush_policy(&self) -> FlushPolicy {
        self.writer.policy()
    }

    /// Physical flushes performed so far
    pub fn flush_count(&self) -> u64 {
        self.writer.flush_count()
    }

    /// Day of the partition currently open for writing
    pub fn current_day(&self) -> Option<NaiveDate> {
        self.writer.current_day()
    }

    fn check_append_contract(
        timestamp_ms: i64,
        var_type: &str,
        var_name: &str,
        data: &EventPayload,
    ) -> Result<()> {
        if timestamp_ms == 0 {
            return Err(EventStoreError::contract("timestamp must not be zero"));
        }
        if var_type.is_empty() {
            return Err(EventStoreError::contract("var_type must not be empty"));
        }
        if var_name.is_empty() {
            return Err(EventStoreError::contract("var_name must not be empty"));
        }
        if data.is_empty() {
            return Err(EventStoreError::contract("event data must not be empty"));
        }
        if has_separator(var_type) || has_separator(var_name) {
            return Err(EventStoreError::contract(
                "var_type and var_name must not contain tabs or newlines",
            ));
        }
        Ok(())
    }

    fn drop_event(&self, reason: DropReason, data: &dyn std::fmt::Display) -> AppendOutcome {
        error!(
            channel = %self.channel,
            reason = reason.description(),
            data = %data,
            "Event dropped"
        );
        AppendOutcome::Dropped(reason)
    }
}

impl EventsDao for FsysEventsDao {
    type DayEvents = DayEvents;

    fn append(
        &mut self,
        timestamp_ms: i64,
        var_type: &str,
        var_name: &str,
        data: EventPayload,
    ) -> Result<AppendOutcome> {
        Self::check_append_contract(timestamp_ms, var_type, var_name, &data)?;

        if self.read_only {
            error!(channel = %self.channel, "Database opened in readonly");
            return Err(EventStoreError::ReadOnly {
                channel: self.channel.clone(),
            });
        }

        let timestamp = timestamp_from_millis(timestamp_ms).ok_or_else(|| {
            EventStoreError::contract(format!("timestamp out of range: {}", timestamp_ms))
        })?;

        let mut map: EventData = match data {
            EventPayload::Map(map) => map,
            EventPayload::Json(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                _ => return Ok(self.drop_event(DropReason::MalformedData, &text)),
            },
        };

        let value = match map.remove(VALUE_KEY) {
            Some(value) => value_to_string(&value),
            None => return Ok(self.drop_event(DropReason::MissingValue, &Value::Object(map))),
        };
        if has_separator(&value) {
            return Ok(self.drop_event(DropReason::UnencodableValue, &value));
        }

        let mut event = Event::new(timestamp, var_type, var_name, value);
        event.data = map;

        self.writer.append(&event)?;
        self.is_open = true;
        Ok(AppendOutcome::Stored)
    }

    fn get_available_days(&self, month: Option<MonthFilter>) -> Result<Vec<NaiveDate>> {
        debug!(channel = %self.channel, ?month, "get_available_days called");
        let days = self.writer.paths().list_days()?;
        Ok(match month {
            Some(filter) => days.into_iter().filter(|day| filter.matches(*day)).collect(),
            None => days,
        })
    }

    fn get_events_for_day(
        &self,
        day: impl Into<DaySelector>,
        var_type: Option<&str>,
        var_name: Option<&str>,
    ) -> Result<DayEvents> {
        let day = day.into().resolve()?;
        debug!(channel = %self.channel, %day, var_type, var_name, "get_events_for_day called");
        let path = self.writer.paths().day_file(day);
        Ok(DayEvents::open(path, EventFilter::new(var_type, var_name))?)
    }
}

impl DaoLifecycle for FsysEventsDao {
    fn open(&mut self) -> Result<()> {
        if self.is_open {
            warn!(channel = %self.channel, "Events store already open");
            return Ok(());
        }
        self.is_open = true;
        info!(channel = %self.channel, "Events store reopened");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.close()?;
        if self.is_open {
            self.is_open = false;
            info!(channel = %self.channel, "Events store closed");
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
