//! Partition reader
//!
//! Lazy, forward-only scan of one day's partition file. Records that cannot
//! be decoded are logged and skipped; the scan continues with the next line.
//! A missing file reads as an empty day.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use evtstore_core::{Event, EventFilter, EventStoreError, Result};
use tracing::{debug, warn};

use crate::codec::{split_record, CodecError};

/// Events of one day partition, in storage order
pub struct DayEvents {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    filter: EventFilter,
    buf: Vec<u8>,
    /// 1-based number of the last line read
    line_no: u64,
    skipped: u64,
}

impl DayEvents {
    /// Open a partition for scanning
    ///
    /// A file that does not exist yields an empty scan.
    pub fn open(path: impl AsRef<Path>, filter: EventFilter) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = match File::open(&path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No partition for day");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            reader,
            filter,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
        })
    }

    /// Number of corrupted records skipped so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Path of the scanned partition
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode one line; `Ok(None)` when the filter rejects it
    fn decode(&self, line: &[u8]) -> std::result::Result<Option<Event>, CodecError> {
        let text = std::str::from_utf8(line).map_err(|_| CodecError::Encoding)?;
        let raw = split_record(text)?;
        let timestamp = raw.parse_timestamp()?;
        if !self.filter.matches_fields(raw.var_type, raw.var_name) {
            return Ok(None);
        }
        raw.into_event(timestamp).map(Some)
    }
}

impl Iterator for DayEvents {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.reader.as_mut()?;
            self.buf.clear();
            match reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    // Fused after a read failure
                    self.reader = None;
                    return Some(Err(EventStoreError::Io(e)));
                }
            }

            let line = std::mem::take(&mut self.buf);
            let decoded = self.decode(&line);
            self.buf = line;

            match decoded {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(e) => {
                    self.skipped += 1;
                    warn!(
                        path = %self.path.display(),
                        record = self.line_no,
                        error = %e,
                        "Ignoring corrupted event"
                    );
                }
            }
        }
    }
}

impl std::fmt::Debug for DayEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayEvents")
            .field("path", &self.path)
            .field("filter", &self.filter)
            .field("line_no", &self.line_no)
            .field("skipped", &self.skipped)
            .finish()
    }
}
