//! Read-only stores never modify storage

use crate::common::*;

#[test]
fn read_only_append_fails_and_leaves_files_untouched() {
    let mut store = TestStore::new();
    store.put(TS_A, "temperature", "living", json!(1));
    store.dao.close().unwrap();
    let before = snapshot_dir(&store.root());

    let mut reader = store.read_only();
    assert!(reader.is_read_only());
    for ts in [TS_A, TS_B] {
        let err = reader
            .append(ts, "temperature", "living", json!({"value": 2}).into())
            .unwrap_err();
        assert!(err.is_read_only());
    }
    reader.flush().unwrap();
    reader.close().unwrap();

    assert_eq!(snapshot_dir(&store.root()), before);
    assert!(!store.partition("240106").exists());
}

#[test]
fn read_only_store_reads() {
    let mut store = TestStore::new();
    store.put(TS_A, "temperature", "living", json!("A"));
    store.put(TS_B, "temperature", "living", json!("B"));

    let reader = store.read_only();
    let events: Vec<Event> = reader
        .get_events(&EventQuery::new())
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(values(&events), vec!["A", "B"]);
}

#[test]
fn read_only_open_of_missing_home_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = EventStoreConfig::new(dir.path().join("nowhere"));

    let err = FsysEventsDao::new(SENSOR_EVENT_CHANNEL, &config, true).unwrap_err();
    assert!(matches!(err, EventStoreError::NotFound { .. }));
    assert!(!dir.path().join("nowhere").exists());
}

#[test]
fn contract_violation_checked_before_read_only() {
    let store = TestStore::new();
    let mut reader = store.read_only();
    let err = reader
        .append(0, "temperature", "living", json!({"value": 1}).into())
        .unwrap_err();
    assert!(err.is_contract_violation());
}
