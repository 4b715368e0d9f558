//! Day partitions
//!
//! Events of one channel live in a directory holding one append-only file per
//! UTC calendar day:
//!
//! ```text
//! <evts_db_home_dir>/
//! └── sensor/
//!     ├── 240105.evt-log
//!     ├── 240106.evt-log   (current, writable)
//!     └── ...
//! ```
//!
//! # Key Invariants
//!
//! - All records in a file share the UTC calendar day named by the file
//! - Files are append-only
//! - At most one file is open for writing per writer

pub mod paths;
pub mod reader;
pub mod writer;

pub use paths::{PartitionPathError, PartitionPaths, PARTITION_EXT};
pub use reader::DayEvents;
pub use writer::PartitionWriter;
