//! Codec errors.

use evtstore_core::EventStoreError;

/// Record encode/decode errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Line does not split into the expected number of fields
    #[error("expected 5 tab-separated fields, found {found}")]
    FieldCount {
        /// Number of fields found
        found: usize,
    },

    /// Timestamp field cannot be parsed
    #[error("invalid timestamp '{raw}': {detail}")]
    Timestamp {
        /// Field content
        raw: String,
        /// Parser message
        detail: String,
    },

    /// Metadata field is not a JSON object
    #[error("invalid metadata: {0}")]
    Metadata(String),

    /// Metadata carries a `value` entry
    #[error("metadata contains the reserved 'value' key")]
    ReservedKey,

    /// A text field contains a tab or a line break
    #[error("{field} contains a field or record separator")]
    Separator {
        /// Offending field
        field: &'static str,
    },

    /// Line is not valid UTF-8
    #[error("record is not valid UTF-8")]
    Encoding,
}

impl From<CodecError> for EventStoreError {
    fn from(e: CodecError) -> Self {
        EventStoreError::Corruption(e.to_string())
    }
}
