//! Partition directory structure
//!
//! A channel's storage root holds one file per day, named `YYMMDD.evt-log`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use evtstore_core::EventStoreError;
use tracing::warn;

/// Extension of partition files
pub const PARTITION_EXT: &str = ".evt-log";

/// Date pattern of partition file stems
const DAY_KEY_FMT: &str = "%y%m%d";

/// Channel storage paths
///
/// Provides access to all paths within a channel's storage root.
#[derive(Debug, Clone)]
pub struct PartitionPaths {
    /// Storage root (`<home>/<channel>`)
    root: PathBuf,
}

impl PartitionPaths {
    /// Create paths from the storage root directory
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        PartitionPaths {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create paths for a channel under the database home
    pub fn for_channel(home: impl AsRef<Path>, channel: &str) -> Self {
        Self::from_root(home.as_ref().join(channel))
    }

    /// Get the storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the partition file path for a day
    ///
    /// Always returns a path, whether or not the file exists.
    pub fn day_file(&self, day: NaiveDate) -> PathBuf {
        self.root.join(format!("{}{}", day_key(day), PARTITION_EXT))
    }

    /// Check if the storage root exists
    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Create the storage root and its parent, for write-mode opens
    ///
    /// Existing directories are kept; an existing non-directory is an error.
    pub fn create_directories(&self) -> Result<(), PartitionPathError> {
        if let Some(home) = self.root.parent() {
            if !home.as_os_str().is_empty() {
                ensure_directory(home)?;
            }
        }
        ensure_directory(&self.root)
    }

    /// Validate the storage root for read-only opens
    pub fn validate(&self) -> Result<(), PartitionPathError> {
        if !self.root.exists() {
            return Err(PartitionPathError::NotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(PartitionPathError::NotADirectory {
                path: self.root.clone(),
            });
        }
        Ok(())
    }

    /// Days with a partition file, ascending
    ///
    /// Files carrying the partition extension but no valid day key are
    /// logged and ignored.
    pub fn list_days(&self) -> io::Result<Vec<NaiveDate>> {
        let mut days = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();

            let Some(stem) = name.strip_suffix(PARTITION_EXT) else {
                continue;
            };
            match parse_day_key(stem) {
                Some(day) => days.push(day),
                None => warn!(
                    root = %self.root.display(),
                    file = %name,
                    "Ignoring partition file with invalid day key"
                ),
            }
        }

        days.sort();
        days.dedup();
        Ok(days)
    }
}

fn ensure_directory(path: &Path) -> Result<(), PartitionPathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PartitionPathError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        return Ok(());
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// Six-digit `YYMMDD` key of a day
pub fn day_key(day: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        day.year().rem_euclid(100),
        day.month(),
        day.day()
    )
}

/// Parse a six-digit `YYMMDD` key
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    if key.len() != 6 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(key, DAY_KEY_FMT).ok()
}

/// Storage root validation errors
#[derive(Debug, thiserror::Error)]
pub enum PartitionPathError {
    /// Storage root not found
    #[error("path not found : {}", path.display())]
    NotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Path exists but is not a directory
    #[error("path is not a directory : {}", path.display())]
    NotADirectory {
        /// Offending path
        path: PathBuf,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<PartitionPathError> for EventStoreError {
    fn from(e: PartitionPathError) -> Self {
        match e {
            PartitionPathError::NotFound { path } => EventStoreError::NotFound { path },
            e @ PartitionPathError::NotADirectory { .. } => EventStoreError::Config(e.to_string()),
            PartitionPathError::Io(e) => EventStoreError::Io(e),
        }
    }
}
