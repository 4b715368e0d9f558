//! End-to-end scenario: events on both sides of midnight

use crate::common::*;

#[test]
fn midnight_scenario() {
    let mut store = TestStore::new();

    // Two events, two seconds apart, on either side of midnight UTC
    store.put(TS_A, "temperature", "living", json!(21.5));
    store.put(TS_B, "temperature", "living", json!(21.4));

    // Bad input is dropped without disturbing the stream
    let outcome = store
        .dao
        .append(TS_B + 500, "temperature", "living", "{oops".into())
        .unwrap();
    assert_eq!(outcome, AppendOutcome::Dropped(DropReason::MalformedData));
    let outcome = store
        .dao
        .append(TS_B + 600, "temperature", "living", json!({"unit": "degC"}).into())
        .unwrap();
    assert_eq!(outcome, AppendOutcome::Dropped(DropReason::MissingValue));

    store.dao.close().unwrap();

    // Two partitions, one record each
    assert_eq!(
        store.dao.get_available_days(None).unwrap(),
        vec![date(2024, 1, 5), date(2024, 1, 6)]
    );
    assert_eq!(line_count(&store.partition("240105")), 1);
    assert_eq!(line_count(&store.partition("240106")), 1);

    // Whole range
    let all = store.query(
        &EventQuery::new()
            .from_time(at(2024, 1, 5, 0, 0, 0))
            .to_time(at(2024, 1, 6, 23, 59, 59)),
    );
    assert_eq!(values(&all), vec!["21.5", "21.4"]);

    // Bounds ending exactly on A
    let until_a = store.query(&EventQuery::new().to_time(at(2024, 1, 5, 23, 59, 59)));
    assert_eq!(values(&until_a), vec!["21.5"]);

    // Bounds starting exactly on B
    let from_b = store.query(&EventQuery::new().from_time(at(2024, 1, 6, 0, 0, 1)));
    assert_eq!(values(&from_b), vec!["21.4"]);

    // Between the two: nothing
    let between = store.query(
        &EventQuery::new()
            .from_time(at(2024, 1, 6, 0, 0, 0))
            .to_time(at(2024, 1, 6, 0, 0, 0)),
    );
    assert!(between.is_empty());

    // Display rows
    let (stamp, ..) = all[1].as_row();
    assert_eq!(stamp, "2024-01-06 00:00:01.000000");
    assert_eq!(format_timestamp(&all[0].timestamp), "2024-01-05 23:59:59.000000");
}
