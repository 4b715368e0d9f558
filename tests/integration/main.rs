//! Integration Tests
//!
//! End-to-end tests of the file-system store, through the public API only:
//! - Round trip and partitioning by UTC day
//! - Corruption tolerance of the reader
//! - Query bounds and filters across days
//! - Flash memory flush throttling
//! - Read-only enforcement

#[path = "../common/mod.rs"]
mod common;

mod flash;
mod queries;
mod read_only;
mod scenario;
