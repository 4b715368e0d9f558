//! Multi-day queries: bounds, filters and ordering

use crate::common::*;

/// Three days of temperature and humidity readings at 08:00 and 20:00.
fn populated() -> TestStore {
    let mut store = TestStore::new();
    for d in 4..=6 {
        for h in [8, 20] {
            let ts = at(2024, 1, d, h, 0, 0).timestamp_millis();
            store.put(ts, "temperature", "living", json!(format!("t{}-{}", d, h)));
            store.put(ts, "humidity", "living", json!(format!("h{}-{}", d, h)));
        }
    }
    store
}

#[test]
fn unbounded_query_returns_everything_in_order() {
    let store = populated();
    let events = store.query(&EventQuery::new().var_type("temperature"));
    assert_eq!(
        values(&events),
        vec!["t4-8", "t4-20", "t5-8", "t5-20", "t6-8", "t6-20"]
    );
}

#[test]
fn bounds_trim_first_and_last_day() {
    let store = populated();
    let query = EventQuery::new()
        .from_time(at(2024, 1, 4, 12, 0, 0))
        .to_time(at(2024, 1, 6, 12, 0, 0))
        .var_type("temperature");
    assert_eq!(
        values(&store.query(&query)),
        vec!["t4-20", "t5-8", "t5-20", "t6-8"]
    );
}

#[test]
fn to_bound_is_inclusive() {
    let store = populated();
    let to = at(2024, 1, 5, 20, 0, 0);

    let query = EventQuery::new().to_time(to).var_type("temperature");
    assert_eq!(values(&store.query(&query)), vec!["t4-8", "t4-20", "t5-8", "t5-20"]);

    let query = EventQuery::new()
        .to_time(to - chrono::Duration::microseconds(1))
        .var_type("temperature");
    assert_eq!(values(&store.query(&query)), vec!["t4-8", "t4-20", "t5-8"]);
}

#[test]
fn event_just_after_to_bound_is_excluded() {
    let mut store = TestStore::new();
    store.put(TS_A, "t", "n", json!("at"));
    store.put(TS_A + 1, "t", "n", json!("after"));

    let to = timestamp_from(TS_A);
    let query = EventQuery::new().to_time(to);
    assert_eq!(values(&store.query(&query)), vec!["at"]);
}

#[test]
fn from_bound_is_inclusive() {
    let store = populated();
    let query = EventQuery::new()
        .from_time(at(2024, 1, 6, 8, 0, 0))
        .var_type("temperature");
    assert_eq!(values(&store.query(&query)), vec!["t6-8", "t6-20"]);
}

#[test]
fn name_and_type_filters_combine() {
    let mut store = populated();
    store.put(
        at(2024, 1, 5, 9, 0, 0).timestamp_millis(),
        "temperature",
        "kitchen",
        json!("k"),
    );

    let query = EventQuery::new().var_type("temperature").var_name("kitchen");
    assert_eq!(values(&store.query(&query)), vec!["k"]);

    let query = EventQuery::new().var_name("kitchen");
    assert_eq!(values(&store.query(&query)), vec!["k"]);

    let events = store
        .dao
        .get_events_for_day("2024-01-05", Some("humidity"), None)
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap();
    assert_eq!(values(&events), vec!["h5-8", "h5-20"]);
}

#[test]
fn range_outside_stored_days_is_empty() {
    let store = populated();
    let query = EventQuery::new()
        .from_time(at(2023, 1, 1, 0, 0, 0))
        .to_time(at(2023, 12, 31, 23, 59, 59));
    assert!(store.query(&query).is_empty());
}

#[test]
fn partial_timestamps_as_bounds() {
    let store = populated();
    let query = EventQuery::new()
        .from_time(parse_timestamp("2024-01-05").unwrap())
        .to_time(parse_timestamp("2024-01-05 12").unwrap())
        .var_type("humidity");
    assert_eq!(values(&store.query(&query)), vec!["h5-8"]);
}

#[test]
fn month_filter_restricts_days() {
    let mut store = populated();
    store.put(at(2024, 2, 1, 0, 0, 0).timestamp_millis(), "t", "n", json!(1));

    let days = store
        .dao
        .get_available_days(Some(MonthFilter::new(2024, 1).unwrap()))
        .unwrap();
    assert_eq!(days, vec![date(2024, 1, 4), date(2024, 1, 5), date(2024, 1, 6)]);

    let days = store
        .dao
        .get_available_days(Some(MonthFilter::try_from((24, 2)).unwrap()))
        .unwrap();
    assert_eq!(days, vec![date(2024, 2, 1)]);

    assert!(MonthFilter::new(2024, 13).is_err());
}

#[test]
fn query_stops_lazily() {
    let store = populated();
    let mut events = store.dao.get_events(&EventQuery::new()).unwrap();
    let first = events.next().unwrap().unwrap();
    assert_eq!(first.value, "t4-8");
}

#[test]
fn rows_render_display_timestamps() {
    let store = populated();
    let events = store.query(&EventQuery::new().var_type("humidity"));
    let (stamp, var_type, var_name, value, data) = events[0].as_row();
    assert_eq!(stamp, "2024-01-04 08:00:00.000000");
    assert_eq!((var_type, var_name, value), ("humidity", "living", "h4-8"));
    assert!(data.is_empty());
}

fn timestamp_from(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}
