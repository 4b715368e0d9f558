//! Line codec for event records.

use chrono::{DateTime, NaiveDateTime, Utc};
use evtstore_core::{Event, EventData, VALUE_KEY};

use super::CodecError;

/// Field separator
pub const FIELD_SEP: char = '\t';

/// Record terminator
pub const RECORD_SEP: char = '\n';

/// Number of fields in a record
pub const FIELD_COUNT: usize = 5;

/// Timestamp pattern (two-digit year, microseconds)
pub const RECORD_TS_FMT: &str = "%y%m%d-%H%M%S%.6f";

/// Parse pattern, lenient on the number of fractional digits
const RECORD_TS_PARSE_FMT: &str = "%y%m%d-%H%M%S%.f";

/// Width of a full timestamp field; shorter fields are right-padded with '0'
pub const RECORD_TS_WIDTH: usize = 20;

fn check_field(field: &'static str, text: &str) -> Result<(), CodecError> {
    if text.contains(|c| c == FIELD_SEP || c == RECORD_SEP || c == '\r') {
        return Err(CodecError::Separator { field });
    }
    Ok(())
}

/// Encode an event as one record line, terminator included
///
/// Fails if a text field contains a separator or the metadata carries a
/// `value` key, since either would produce an undecodable record.
pub fn encode_record(event: &Event) -> Result<String, CodecError> {
    check_field("var_type", &event.var_type)?;
    check_field("var_name", &event.var_name)?;
    check_field("value", &event.value)?;
    if event.data.contains_key(VALUE_KEY) {
        return Err(CodecError::ReservedKey);
    }

    // serde_json escapes control characters, so the metadata never contains separators
    let metadata =
        serde_json::to_string(&event.data).map_err(|e| CodecError::Metadata(e.to_string()))?;

    Ok(format!(
        "{ts}{sep}{var_type}{sep}{var_name}{sep}{value}{sep}{metadata}{end}",
        ts = event.timestamp.format(RECORD_TS_FMT),
        sep = FIELD_SEP,
        var_type = event.var_type,
        var_name = event.var_name,
        value = event.value,
        metadata = metadata,
        end = RECORD_SEP,
    ))
}

/// Record split into its raw fields, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Timestamp text
    pub timestamp: &'a str,
    /// Variable type
    pub var_type: &'a str,
    /// Variable name
    pub var_name: &'a str,
    /// Value text
    pub value: &'a str,
    /// JSON metadata text
    pub metadata: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Parse the timestamp field
    ///
    /// Truncated fractional seconds are accepted: the field is right-padded
    /// with '0' to [`RECORD_TS_WIDTH`] characters first.
    pub fn parse_timestamp(&self) -> Result<DateTime<Utc>, CodecError> {
        let padded = format!("{:0<width$}", self.timestamp, width = RECORD_TS_WIDTH);
        NaiveDateTime::parse_from_str(&padded, RECORD_TS_PARSE_FMT)
            .map(|naive| naive.and_utc())
            .map_err(|e| CodecError::Timestamp {
                raw: self.timestamp.to_string(),
                detail: e.to_string(),
            })
    }

    /// Parse the metadata field
    pub fn parse_metadata(&self) -> Result<EventData, CodecError> {
        let data: EventData = serde_json::from_str(self.metadata)
            .map_err(|e| CodecError::Metadata(e.to_string()))?;
        if data.contains_key(VALUE_KEY) {
            return Err(CodecError::ReservedKey);
        }
        Ok(data)
    }

    /// Build the event, given its already parsed timestamp
    pub fn into_event(self, timestamp: DateTime<Utc>) -> Result<Event, CodecError> {
        let data = self.parse_metadata()?;
        Ok(Event {
            timestamp,
            var_type: self.var_type.to_string(),
            var_name: self.var_name.to_string(),
            value: self.value.to_string(),
            data,
        })
    }
}

/// Split a line into its five fields
///
/// Surrounding whitespace, including the terminator, is ignored.
pub fn split_record(line: &str) -> Result<RawRecord<'_>, CodecError> {
    let fields: Vec<&str> = line.trim().split(FIELD_SEP).collect();
    if fields.len() != FIELD_COUNT {
        return Err(CodecError::FieldCount {
            found: fields.len(),
        });
    }
    Ok(RawRecord {
        timestamp: fields[0],
        var_type: fields[1],
        var_name: fields[2],
        value: fields[3],
        metadata: fields[4],
    })
}

/// Decode one record line
pub fn decode_record(line: &str) -> Result<Event, CodecError> {
    let raw = split_record(line)?;
    let timestamp = raw.parse_timestamp()?;
    raw.into_event(timestamp)
}
