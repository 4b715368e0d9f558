//! Partition writer
//!
//! Appends encoded records to the file of the event's UTC day. Only the
//! current day's file is held open; it is released when an event for another
//! day arrives, or on `close()`.
//!
//! ## Flush Policy
//!
//! - `Always`: physical flush (buffer flush + `sync_data`) after every append
//! - `Throttled`: physical flush only when the policy's interval has elapsed
//!   since the last one, evaluated inline on each append
//!
//! `flush()` always forces a physical flush of the current file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use evtstore_core::{Event, EventStoreError, Result};
use tracing::{debug, error, info, trace};

use super::paths::PartitionPaths;
use crate::codec::encode_record;
use crate::flush::FlushPolicy;

/// Open partition file of the current day
struct DayFile {
    day: NaiveDate,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl DayFile {
    fn open(path: PathBuf, day: NaiveDate) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), %day, "Opened partition for writing");
        Ok(Self {
            day,
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffer and push data to stable storage
    fn sync(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()
    }

    /// Hand buffered data to the OS and release the handle
    fn release(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for DayFile {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            error!(path = %self.path.display(), error = %e, "Failed to flush partition on release");
        }
    }
}

/// Day-partitioned record writer
///
/// # Example
///
/// ```ignore
/// use evtstore_durability::{FlushPolicy, PartitionPaths, PartitionWriter};
///
/// let paths = PartitionPaths::for_channel("/var/db/events", "sensor");
/// let mut writer = PartitionWriter::new(paths, FlushPolicy::Always);
/// writer.append(&event)?;
/// writer.close()?;
/// ```
pub struct PartitionWriter {
    /// Storage paths
    paths: PartitionPaths,

    /// Flush policy
    policy: FlushPolicy,

    /// Current day's file, if any
    current: Option<DayFile>,

    /// Time of last physical flush
    last_flush: Option<Instant>,

    /// Physical flushes performed
    flush_count: u64,

    /// Records appended
    records_written: u64,
}

impl PartitionWriter {
    /// Create a writer; no file is opened until the first append
    pub fn new(paths: PartitionPaths, policy: FlushPolicy) -> Self {
        Self {
            paths,
            policy,
            current: None,
            last_flush: None,
            flush_count: 0,
            records_written: 0,
        }
    }

    /// Append one event to its day's partition
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the event cannot be encoded
    /// - `Io` if the partition cannot be opened, written or flushed
    pub fn append(&mut self, event: &Event) -> Result<()> {
        let line = encode_record(event)
            .map_err(|e| EventStoreError::invalid_argument(format!("unencodable event: {}", e)))?;

        let day = event.timestamp.date_naive();
        let file = self.file_for_day(day)?;
        file.writer.write_all(line.as_bytes())?;
        self.records_written += 1;

        if self.policy.should_flush(self.last_flush, Instant::now()) {
            self.sync_current()?;
            trace!(%day, "Record flushed");
        }
        Ok(())
    }

    /// Current file for `day`, switching partitions when the day changes
    fn file_for_day(&mut self, day: NaiveDate) -> io::Result<&mut DayFile> {
        let switch = self.current.as_ref().map_or(true, |f| f.day != day);
        if switch {
            if let Some(previous) = self.current.take() {
                debug!(from = %previous.day, to = %day, "Switching partition");
                previous.release()?;
            }
            self.current = Some(DayFile::open(self.paths.day_file(day), day)?);
        }
        match self.current.as_mut() {
            Some(file) => Ok(file),
            None => Err(io::Error::new(io::ErrorKind::Other, "no current partition")),
        }
    }

    /// Sync the current file; the throttle interval restarts once the sync completes
    fn sync_current(&mut self) -> io::Result<bool> {
        match self.current.as_mut() {
            Some(file) => {
                file.sync()?;
                self.last_flush = Some(Instant::now());
                self.flush_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Force a physical flush of the current partition
    ///
    /// Returns `false` if no partition is open.
    pub fn flush(&mut self) -> Result<bool> {
        let flushed = self.sync_current()?;
        if flushed {
            info!(root = %self.paths.root().display(), "On-demand data flush executed");
        } else {
            info!(
                root = %self.paths.root().display(),
                "Nothing to flush (no file currently in write mode)"
            );
        }
        Ok(flushed)
    }

    /// Flush and release the current partition
    pub fn close(&mut self) -> Result<()> {
        if self.current.is_some() {
            self.sync_current()?;
        }
        if let Some(file) = self.current.take() {
            debug!(
                path = %file.path.display(),
                records_written = self.records_written,
                "Closed partition"
            );
            file.release()?;
        }
        Ok(())
    }

    /// Day of the partition currently open for writing
    pub fn current_day(&self) -> Option<NaiveDate> {
        self.current.as_ref().map(|f| f.day)
    }

    /// Physical flushes performed so far
    pub fn flush_count(&self) -> u64 {
        self.flush_count
    }

    /// Get flush policy
    pub fn policy(&self) -> FlushPolicy {
        self.policy
    }

    /// Get storage paths
    pub fn paths(&self) -> &PartitionPaths {
        &self.paths
    }
}

impl std::fmt::Debug for PartitionWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionWriter")
            .field("root", &self.paths.root())
            .field("policy", &self.policy)
            .field("current_day", &self.current_day())
            .field("flush_count", &self.flush_count)
            .field("records_written", &self.records_written)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
