//! Durability layer for the event store
//!
//! This crate handles everything that touches disk:
//!
//! - Codec: one tab-separated text line per event
//! - Flush policy: flush every append, or throttle flushes for flash media
//! - Partitions: one file per UTC day under the channel's storage root,
//!   with a day-switching writer and a corruption-tolerant reader

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod flush;
pub mod partition;

pub use codec::{decode_record, encode_record, CodecError};
pub use flush::{FlushPolicy, MAX_FLUSH_AGE};
pub use partition::{
    DayEvents, PartitionPathError, PartitionPaths, PartitionWriter, PARTITION_EXT,
};
