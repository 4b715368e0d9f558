//! Well-known event channels
//!
//! A channel is a named category of events with its own storage subtree.
//! Any non-empty name is accepted; these are the ones the platform emits.

/// Sensor readings (the default channel)
pub const SENSOR_EVENT_CHANNEL: &str = "sensor";

/// System monitoring events
pub const SYSMON_EVENT_CHANNEL: &str = "sysmon";

/// Framework internal events
pub const FRAMEWORK_EVENT_CHANNEL: &str = "framework";
