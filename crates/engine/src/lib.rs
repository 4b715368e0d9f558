//! Storage engine for the event store
//!
//! This crate ties the lower layers together:
//! - Config: home directory and flash memory settings (`EventStoreConfig`)
//! - File-system DAO: day-partitioned storage of one channel's events
//!   (`FsysEventsDao`), implementing the `EventsDao` and `DaoLifecycle`
//!   contracts of `evtstore-core`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod fsys;

pub use config::{EventStoreConfig, CFGKEY_EVTS_DB_HOME_DIR, CFGKEY_FLASH_MEMORY};
pub use fsys::FsysEventsDao;
