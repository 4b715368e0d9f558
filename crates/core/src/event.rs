//! Event types
//!
//! These types define the structure of the timestamped events kept by the
//! store, and the shape of the data handed to `append`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time::format_timestamp;

/// Key of the data entry lifted out as the event's first-class value
pub const VALUE_KEY: &str = "value";

/// Additional event metadata (everything but the value)
pub type EventData = Map<String, Value>;

/// A stored event
///
/// The value is kept as its string representation: the original JSON type is
/// not preserved on disk. `data` never contains a [`VALUE_KEY`] entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// UTC instant, microsecond precision
    pub timestamp: DateTime<Utc>,
    /// Variable category (e.g. "temperature")
    pub var_type: String,
    /// Variable identifier within its type
    pub var_name: String,
    /// Stringified value
    pub value: String,
    /// Remaining metadata
    pub data: EventData,
}

impl Event {
    /// Create an event with no metadata besides its value
    pub fn new(
        timestamp: DateTime<Utc>,
        var_type: impl Into<String>,
        var_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            var_type: var_type.into(),
            var_name: var_name.into(),
            value: value.into(),
            data: EventData::new(),
        }
    }

    /// Add a metadata entry. A `value` key is ignored.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != VALUE_KEY {
            self.data.insert(key, value.into());
        }
        self
    }

    /// Data map with the value reinserted, as originally received
    pub fn to_data_map(&self) -> EventData {
        let mut map = self.data.clone();
        map.insert(VALUE_KEY.to_string(), Value::String(self.value.clone()));
        map
    }

    /// Timestamp as milliseconds since the epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Row form published to remote clients:
    /// `(timestamp, var_type, var_name, value, data)`
    pub fn as_row(&self) -> (String, &str, &str, &str, &EventData) {
        (
            format_timestamp(&self.timestamp),
            &self.var_type,
            &self.var_name,
            &self.value,
            &self.data,
        )
    }
}

/// Data argument of `append`: either a parsed map or its JSON text
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Already parsed mapping
    Map(EventData),
    /// JSON-encoded mapping, parsed at append time
    Json(String),
}

impl EventPayload {
    /// Empty map or blank string
    pub fn is_empty(&self) -> bool {
        match self {
            EventPayload::Map(m) => m.is_empty(),
            EventPayload::Json(s) => s.trim().is_empty(),
        }
    }
}

impl From<EventData> for EventPayload {
    fn from(map: EventData) -> Self {
        EventPayload::Map(map)
    }
}

impl From<&str> for EventPayload {
    fn from(s: &str) -> Self {
        EventPayload::Json(s.to_string())
    }
}

impl From<String> for EventPayload {
    fn from(s: String) -> Self {
        EventPayload::Json(s)
    }
}

impl From<Value> for EventPayload {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(map) => EventPayload::Map(map),
            Value::String(s) => EventPayload::Json(s),
            // Not a mapping: keep its text so that append reports it as malformed
            other => EventPayload::Json(other.to_string()),
        }
    }
}

/// String form of a value as written in the record's value field
///
/// JSON strings are taken verbatim, everything else uses its compact JSON text.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Why an append was dropped without raising an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// JSON payload could not be parsed into a mapping
    MalformedData,
    /// Data has no `value` entry
    MissingValue,
    /// Value text contains a field or record separator
    UnencodableValue,
}

impl DropReason {
    /// Short description for logs
    pub fn description(&self) -> &'static str {
        match self {
            DropReason::MalformedData => "malformed event data",
            DropReason::MissingValue => "missing value field in data",
            DropReason::UnencodableValue => "value contains a tab or newline",
        }
    }
}

/// Result of a successful `append` call
///
/// Events rejected by the tolerant ingest policy are lost: the source cannot
/// be asked to retransmit, so the store logs them and moves on instead of
/// failing. `Dropped` lets callers observe that loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Record written to the day partition
    Stored,
    /// Record discarded
    Dropped(DropReason),
}

impl AppendOutcome {
    /// True if the event was written
    pub fn is_stored(&self) -> bool {
        matches!(self, AppendOutcome::Stored)
    }
}
