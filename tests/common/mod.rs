//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use chrono::{DateTime, NaiveDate, TimeZone, Utc};
pub use evtstore::prelude::*;
pub use serde_json::{json, Value};
use tempfile::TempDir;

/// 2024-01-05T23:59:59Z
pub const TS_A: i64 = 1_704_499_199_000;

/// 2024-01-06T00:00:01Z
pub const TS_B: i64 = 1_704_499_201_000;

// ============================================================================
// TestStore - DAO over a temporary home directory
// ============================================================================

/// File-system store in a temporary home, removed on drop.
pub struct TestStore {
    pub dao: FsysEventsDao,
    pub dir: TempDir,
}

impl TestStore {
    /// Write-mode `sensor` store with the default flush policy.
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    /// Write-mode `sensor` store in flash memory mode.
    pub fn flash(interval: Duration) -> Self {
        Self::with_config(|config| config.with_flash_memory(true).with_flush_interval(interval))
    }

    /// Write-mode `sensor` store with an adjusted config.
    pub fn with_config(adjust: impl FnOnce(EventStoreConfig) -> EventStoreConfig) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let config = adjust(EventStoreConfig::new(dir.path()));
        let dao = FsysEventsDao::new(SENSOR_EVENT_CHANNEL, &config, false).expect("open store");
        Self { dao, dir }
    }

    /// Config pointing at this store's home.
    pub fn config(&self) -> EventStoreConfig {
        EventStoreConfig::new(self.dir.path())
    }

    /// A second, read-only DAO over the same channel.
    pub fn read_only(&self) -> FsysEventsDao {
        FsysEventsDao::new(SENSOR_EVENT_CHANNEL, &self.config(), true).expect("open read-only")
    }

    /// Channel storage root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join(SENSOR_EVENT_CHANNEL)
    }

    /// Partition file of a `YYMMDD` day key.
    pub fn partition(&self, key: &str) -> PathBuf {
        self.root().join(format!("{}.evt-log", key))
    }

    /// Append `{"value": value}` and expect it to be stored.
    pub fn put(&mut self, ts_ms: i64, var_type: &str, var_name: &str, value: Value) {
        let outcome = self
            .dao
            .append(ts_ms, var_type, var_name, json!({ "value": value }).into())
            .expect("append");
        assert_eq!(outcome, AppendOutcome::Stored);
    }

    /// Collect a query, failing on any error.
    pub fn query(&self, query: &EventQuery) -> Vec<Event> {
        self.dao
            .get_events(query)
            .expect("get_events")
            .collect::<Result<Vec<_>>>()
            .expect("scan")
    }

    /// Collect one day, failing on any error.
    pub fn day(&self, day: &str) -> Vec<Event> {
        self.dao
            .get_events_for_day(day, None, None)
            .expect("get_events_for_day")
            .collect::<Result<Vec<_>>>()
            .expect("scan")
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// UTC instant from calendar fields.
pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Calendar date.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Values of a list of events.
pub fn values(events: &[Event]) -> Vec<String> {
    events.iter().map(|e| e.value.clone()).collect()
}

/// Snapshot of every file under a directory, keyed by relative path.
pub fn snapshot_dir(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(root).expect("read_dir") {
        let path = entry.expect("entry").path();
        if path.is_file() {
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, fs::read(&path).expect("read"));
        }
    }
    files
}

/// Number of lines in a file.
pub fn line_count(path: &Path) -> usize {
    fs::read_to_string(path).expect("read").lines().count()
}
