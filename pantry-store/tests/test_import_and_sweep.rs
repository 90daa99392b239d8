use chrono::{TimeZone, Utc};
use pantry_core::{FoodCategory, SweepPolicy, sweep_items};
use pantry_store::{ItemRepository, JsonFileItemStore, MemoryItemStore, parse_items_csv};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("groceries.csv")
}

/// Real-data regression: every fixture row imports, unknown categories fall back.
#[test]
fn test_fixture_imports_into_json_store() {
    let items = parse_items_csv(fixture()).unwrap();
    assert_eq!(items.len(), 9);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();

    let mut store = JsonFileItemStore::open(&path).unwrap();
    let stored = store.insert_many(items, now).unwrap();
    assert_eq!(stored.first().unwrap().id, "1");
    assert_eq!(stored.last().unwrap().id, "9");

    let reopened = JsonFileItemStore::open(&path).unwrap();
    let kimchi = reopened.get("9").unwrap().unwrap();
    let prediction = kimchi.predict().unwrap();
    assert_eq!(prediction.category, FoodCategory::Packaged);
    assert_eq!(prediction.shelf_life_days, 200);
}

/// The daily sweep over the fixture picks the short-lived items only.
#[test]
fn test_sweep_over_fixture() {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let mut store = MemoryItemStore::new();
    store.insert_many(parse_items_csv(fixture()).unwrap(), now).unwrap();

    let items = store.list().unwrap();
    let report = sweep_items(&items, now, &SweepPolicy::default());
    assert_eq!(report.checked, 9);
    assert!(report.skipped.is_empty());

    let alerted: Vec<(&str, i64)> = report
        .alerts
        .iter()
        .map(|a| (a.name.as_str(), a.days_left))
        .collect();

    // Spinach: made Jan 8 18:30, expires Jan 13 18:30, safe Jan 12 18:30 -> 2
    // Chicken: made Jan 9, expires Jan 12, safe Jan 11 -> 0 (16h left)
    // Sourdough: made Jan 9 (override), expires Jan 12, safe Jan 11 -> 0
    // Milk: made Jan 8, expires Jan 15, safe Jan 14 -> 3
    // Bananas: made Jan 6, expires Jan 16, safe Jan 15 -> 4, not alerted
    assert_eq!(
        alerted,
        vec![
            ("Chicken thighs", 0),
            ("Sourdough", 0),
            ("Spinach", 2),
            ("Whole milk", 3),
        ]
    );
}
