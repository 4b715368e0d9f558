//! Flash memory mode: throttled physical flushes

use std::time::Duration;

use crate::common::*;
use evtstore::FlushPolicy;

#[test]
fn default_mode_flushes_every_append() {
    let mut store = TestStore::new();
    for i in 0..5 {
        store.put(TS_A + i, "t", "n", json!(i));
    }
    assert_eq!(store.dao.flush_count(), 5);

    // A concurrent reader sees everything without an explicit flush
    let reader = store.read_only();
    let events: Vec<Event> = reader
        .get_events_for_day("2024-01-05", None, None)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(events.len(), 5);
}

#[test]
fn flash_mode_flushes_once_within_interval() {
    let mut store = TestStore::flash(Duration::from_secs(3600));
    store.put(TS_A, "t", "n", json!(1));
    store.put(TS_A + 1, "t", "n", json!(2));

    assert_eq!(store.dao.flush_count(), 1);
}

#[test]
fn sub_second_interval_still_throttles() {
    let mut store = TestStore::flash(Duration::from_millis(50));
    assert_eq!(
        store.dao.flush_policy(),
        FlushPolicy::Throttled {
            max_age: Duration::from_millis(50)
        }
    );
    store.put(TS_A, "t", "n", json!(1));
    store.put(TS_A + 1, "t", "n", json!(2));
    assert_eq!(store.dao.flush_count(), 1);
}

#[test]
fn flash_mode_flushes_again_after_interval() {
    let mut store = TestStore::flash(Duration::from_millis(50));
    store.put(TS_A, "t", "n", json!(1));
    store.put(TS_A + 1, "t", "n", json!(2));
    assert_eq!(store.dao.flush_count(), 1);

    std::thread::sleep(Duration::from_millis(100));
    store.put(TS_A + 2, "t", "n", json!(3));
    assert_eq!(store.dao.flush_count(), 2);
}

#[test]
fn explicit_flush_makes_pending_events_visible() {
    let mut store = TestStore::flash(Duration::from_secs(3600));
    store.put(TS_A, "t", "n", json!(1));
    store.put(TS_A + 1, "t", "n", json!(2));
    assert_eq!(line_count(&store.partition("240105")), 1);

    store.dao.flush().unwrap();
    assert_eq!(store.dao.flush_count(), 2);
    assert_eq!(line_count(&store.partition("240105")), 2);
}

#[test]
fn flush_without_writes_is_harmless() {
    let mut store = TestStore::flash(Duration::from_secs(3600));
    store.dao.flush().unwrap();
    assert_eq!(store.dao.flush_count(), 0);
}

#[test]
fn close_persists_pending_events() {
    let mut store = TestStore::flash(Duration::from_secs(3600));
    for i in 0..10 {
        store.put(TS_A + i, "t", "n", json!(i));
    }
    store.dao.close().unwrap();

    assert_eq!(store.day("2024-01-05").len(), 10);
}

#[test]
fn flash_policy_reported() {
    let store = TestStore::flash(Duration::from_secs(60));
    assert_eq!(
        store.dao.flush_policy(),
        FlushPolicy::Throttled {
            max_age: Duration::from_secs(60)
        }
    );
    assert_eq!(TestStore::new().dao.flush_policy(), FlushPolicy::Always);
}
