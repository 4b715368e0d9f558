//! Event store configuration
//!
//! Loaded from a TOML file, a TOML string, or a JSON-style key/value mapping
//! as handed over by the hosting service.

use std::path::{Path, PathBuf};
use std::time::Duration;

use evtstore_core::{EventStoreError, Result};
use evtstore_durability::{FlushPolicy, MAX_FLUSH_AGE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the database home directory
pub const CFGKEY_EVTS_DB_HOME_DIR: &str = "evts_db_home_dir";

/// Key of the flash memory switch
pub const CFGKEY_FLASH_MEMORY: &str = "flash_memory";

/// Configuration of a file-system event store.
///
/// # Example
///
/// ```toml
/// evts_db_home_dir = "/var/db/cstbox/events"
///
/// # Throttle physical flushes to spare SD cards
/// flash_memory = true
/// flash_flush_interval_ms = 7200000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventStoreConfig {
    /// Home directory; each channel gets a subdirectory.
    pub evts_db_home_dir: PathBuf,
    /// Flash-memory mode: throttle physical flushes.
    #[serde(default)]
    pub flash_memory: bool,
    /// Minimum milliseconds between physical flushes in flash-memory mode.
    #[serde(default = "default_flash_flush_interval_ms")]
    pub flash_flush_interval_ms: u64,
}

fn default_flash_flush_interval_ms() -> u64 {
    duration_to_millis(MAX_FLUSH_AGE)
}

/// Whole milliseconds of `interval`, saturating
fn duration_to_millis(interval: Duration) -> u64 {
    u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)
}

impl EventStoreConfig {
    /// Configuration for `home` with default settings.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            evts_db_home_dir: home.into(),
            flash_memory: false,
            flash_flush_interval_ms: default_flash_flush_interval_ms(),
        }
    }

    /// Enable or disable flash-memory mode.
    pub fn with_flash_memory(mut self, enabled: bool) -> Self {
        self.flash_memory = enabled;
        self
    }

    /// Set the flash-memory flush interval, kept at millisecond precision.
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flash_flush_interval_ms = duration_to_millis(interval);
        self
    }

    /// Flush policy implied by the settings.
    pub fn flush_policy(&self) -> FlushPolicy {
        if self.flash_memory {
            FlushPolicy::Throttled {
                max_age: Duration::from_millis(self.flash_flush_interval_ms),
            }
        } else {
            FlushPolicy::Always
        }
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the text cannot be parsed or lacks
    /// `evts_db_home_dir`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            EventStoreError::config(format!("Failed to parse event store config: {}", e))
        })
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EventStoreError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            EventStoreError::config(format!("{} (file '{}')", e, path.display()))
        })
    }

    /// Build config from a key/value mapping.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `evts_db_home_dir` is missing or a value
    /// has the wrong type.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        if !map.contains_key(CFGKEY_EVTS_DB_HOME_DIR) {
            return Err(EventStoreError::config(format!(
                "missing mandatory parameter : {}",
                CFGKEY_EVTS_DB_HOME_DIR
            )));
        }
        serde_json::from_value(Value::Object(map.clone())).map_err(|e| {
            EventStoreError::config(format!("Invalid event store config: {}", e))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Event store configuration
#
# Home directory of the events database; one subdirectory per channel.
evts_db_home_dir = "/var/db/cstbox/events"

# Flash memory mode (default: false)
#   false = flush every event to disk, no loss on power cut
#   true  = flush at most every flash_flush_interval_ms, sparing SD cards;
#           the most recent events may be lost on power cut
flash_memory = false

# Minimum milliseconds between flushes in flash memory mode
# (default: 7200000, i.e. 2 hours)
# flash_flush_interval_ms = 7200000
"#
    }
}
