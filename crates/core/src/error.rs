//! Error types for the event store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Only some of these surface to callers in practice. Record-level problems
//! (a corrupted line, an unparseable ingest payload) are logged and skipped by
//! the storage layer; see [`crate::AppendOutcome`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for event store operations
pub type Result<T> = std::result::Result<T, EventStoreError>;

/// Error types for the event store
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// I/O error (open, read, write, flush)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing or invalid configuration, or a storage root of the wrong kind
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage root does not exist (read-only open)
    #[error("Path not found: {}", path.display())]
    NotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Append attempted on a store opened read-only
    #[error("Event store for channel '{channel}' is opened read-only")]
    ReadOnly {
        /// Channel of the store
        channel: String,
    },

    /// Caller broke an API precondition. Not recoverable at runtime.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Malformed query argument (day string, month filter)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Stored record could not be decoded
    #[error("Data corruption: {0}")]
    Corruption(String),
}

impl EventStoreError {
    /// Create a contract violation error
    pub fn contract(msg: impl Into<String>) -> Self {
        EventStoreError::ContractViolation(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        EventStoreError::InvalidArgument(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EventStoreError::Config(msg.into())
    }

    /// True for programmer errors that must not be retried
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, EventStoreError::ContractViolation(_))
    }

    /// True for record decode failures
    pub fn is_corruption(&self) -> bool {
        matches!(self, EventStoreError::Corruption(_))
    }

    /// True when the store refused a write because it is read-only
    pub fn is_read_only(&self) -> bool {
        matches!(self, EventStoreError::ReadOnly { .. })
    }
}
