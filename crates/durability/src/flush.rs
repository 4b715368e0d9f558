//! Flush policy for partition writes.
//!
//! Defines when appended records are pushed to stable storage.

use std::time::{Duration, Instant};

/// Minimum time between physical flushes in flash-memory mode (2 hours)
pub const MAX_FLUSH_AGE: Duration = Duration::from_secs(2 * 3600);

/// Flush policy for partition writes.
///
/// Controls when written records are flushed to disk, trading durability
/// against physical write wear.
///
/// # Mode Comparison
///
/// | Mode | Physical flushes | Loss window on power cut |
/// |------|------------------|--------------------------|
/// | Always | one per append | none |
/// | Throttled | at most one per `max_age` | up to `max_age` of appends |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Flush after every append.
    #[default]
    Always,

    /// Flash-memory mode: flush on append only once `max_age` has elapsed
    /// since the previous physical flush.
    ///
    /// Lets the OS coalesce writes to spare SD cards and other flash media.
    /// The most recent appends may be lost on abrupt power loss.
    Throttled {
        /// Minimum time between physical flushes
        max_age: Duration,
    },
}

impl FlushPolicy {
    /// Flash-memory mode with the standard [`MAX_FLUSH_AGE`] interval.
    pub fn flash_default() -> Self {
        FlushPolicy::Throttled {
            max_age: MAX_FLUSH_AGE,
        }
    }

    /// Check if every append is flushed.
    pub fn requires_immediate_flush(&self) -> bool {
        matches!(self, FlushPolicy::Always)
    }

    /// Human-readable description of the policy.
    pub fn description(&self) -> &'static str {
        match self {
            FlushPolicy::Always => "Flush on every write (safest)",
            FlushPolicy::Throttled { .. } => {
                "Throttled flush (flash memory friendly, may lose recent writes)"
            }
        }
    }

    /// Decide whether an append made at `now` must be flushed.
    ///
    /// `last_flush` is `None` until the first physical flush, so the first
    /// append is always flushed.
    pub fn should_flush(&self, last_flush: Option<Instant>, now: Instant) -> bool {
        match self {
            FlushPolicy::Always => true,
            FlushPolicy::Throttled { max_age } => match last_flush {
                None => true,
                Some(last) => now.saturating_duration_since(last) >= *max_age,
            },
        }
    }
}
