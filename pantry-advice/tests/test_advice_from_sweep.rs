use chrono::{TimeZone, Utc};
use pantry_advice::{AdviceRequest, Urgency, advice_messages, offline_advice};
use pantry_core::{FoodCategory, NewFoodItem, SweepPolicy, sweep_items};

/// Alerts from the daily sweep turn into advice requests with matching facts.
#[test]
fn test_sweep_alerts_become_advice_requests() {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    let items = vec![
        NewFoodItem::new("Yogurt", "DAIRY", "2024-01-09T00:00:00Z").into_item("1", created),
        NewFoodItem::new("Rice", "packaged", "2024-01-09T00:00:00Z").into_item("2", created),
    ];

    let report = sweep_items(&items, now, &SweepPolicy::default());
    assert_eq!(report.alerts.len(), 1);

    let req = AdviceRequest::from(&report.alerts[0]);
    assert_eq!(req.category, FoodCategory::Dairy);
    // made Jan 7, expires Jan 14, safe Jan 13 -> 2 days 16 hours
    assert_eq!(req.days_left, 2);
    assert_eq!(req.urgency(), Urgency::Soon);

    let msgs = advice_messages(&req);
    assert!(msgs[1].content.contains("Yogurt"));
    assert!(offline_advice(&req).starts_with("Use within 2 days"));
}

/// A tracked item (list/show surface) feeds the same request shape.
#[test]
fn test_tracked_item_to_request() {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let item = NewFoodItem::new("Croissant", "bakery", "2024-01-10").into_item("5", created);
    let tracked = item.track(created).unwrap();

    let req = AdviceRequest::from(&tracked);
    assert_eq!(req.name, "Croissant");
    // bakery: no store delay, 3 day shelf life, 1 day margin
    assert_eq!(req.days_left, 2);

    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["category"], "bakery");
}
