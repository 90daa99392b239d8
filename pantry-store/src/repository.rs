//! Repository abstraction shared by every backing store.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pantry_core::{FoodItem, NewFoodItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage for tracked items. The predictor never sees this; callers load
/// items here and hand them to `pantry_core`.
pub trait ItemRepository {
    /// Validate and store a new item, assigning the next id.
    fn insert(&mut self, item: NewFoodItem, now: DateTime<Utc>) -> Result<FoodItem>;

    fn get(&self, id: &str) -> Result<Option<FoodItem>>;

    /// All items, newest first.
    fn list(&self) -> Result<Vec<FoodItem>>;

    /// Returns `false` when no item had that id.
    fn remove(&mut self, id: &str) -> Result<bool>;

    /// Insert in order, stopping at the first invalid item.
    fn insert_many(&mut self, items: Vec<NewFoodItem>, now: DateTime<Utc>) -> Result<Vec<FoodItem>> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let name = item.name.clone();
            out.push(
                self.insert(item, now)
                    .with_context(|| format!("item #{} ({name})", i + 1))?,
            );
        }
        Ok(out)
    }
}

/// Id counter plus items: the whole state of a store, serializable as one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemLedger {
    pub last_id: u64,
    pub items: BTreeMap<String, FoodItem>,
}

impl ItemLedger {
    pub fn insert(&mut self, item: NewFoodItem, now: DateTime<Utc>) -> Result<FoodItem> {
        item.validate().context("invalid item")?;
        self.last_id += 1;
        let stored = item.into_item(self.last_id.to_string(), now);
        self.items.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    pub fn get(&self, id: &str) -> Option<&FoodItem> {
        self.items.get(id.trim())
    }

    pub fn list(&self) -> Vec<FoodItem> {
        let mut out: Vec<FoodItem> = self.items.values().cloned().collect();
        out.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| id_rank(&b.id).cmp(&id_rank(&a.id)))
        });
        out
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.items.remove(id.trim()).is_some()
    }
}

fn id_rank(id: &str) -> u64 {
    id.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut ledger = ItemLedger::default();
        let a = ledger.insert(NewFoodItem::new("Milk", "dairy", "2024-01-10"), t0()).unwrap();
        let b = ledger.insert(NewFoodItem::new("Bread", "bakery", "2024-01-10"), t0()).unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut ledger = ItemLedger::default();
        ledger.insert(NewFoodItem::new("Milk", "dairy", "2024-01-10"), t0()).unwrap();
        assert!(ledger.remove("1"));
        assert!(!ledger.remove("1"));
        let next = ledger.insert(NewFoodItem::new("Eggs", "dairy", "2024-01-10"), t0()).unwrap();
        assert_eq!(next.id, "2");
    }

    #[test]
    fn test_list_newest_first_with_id_tiebreak() {
        let mut ledger = ItemLedger::default();
        ledger.insert(NewFoodItem::new("Old", "dairy", "2024-01-01"), t0()).unwrap();
        ledger.insert(NewFoodItem::new("Same A", "dairy", "2024-01-01"), t0() + Duration::hours(1)).unwrap();
        ledger.insert(NewFoodItem::new("Same B", "dairy", "2024-01-01"), t0() + Duration::hours(1)).unwrap();
        // fillers share a timestamp, so ids 4..=10 must compare numerically
        for _ in 0..7 {
            ledger.insert(NewFoodItem::new("Filler", "dairy", "2024-01-01"), t0() - Duration::days(1)).unwrap();
        }
        ledger.insert(NewFoodItem::new("Newest", "dairy", "2024-01-01"), t0() + Duration::hours(2)).unwrap();

        let listed = ledger.list();
        let names: Vec<_> = listed.iter().map(|i| i.name.as_str()).take(4).collect();
        assert_eq!(names, vec!["Newest", "Same B", "Same A", "Old"]);
        assert_eq!(listed[4].id, "10");
        assert_eq!(listed.last().unwrap().id, "4");
    }

    #[test]
    fn test_invalid_item_does_not_consume_id() {
        let mut ledger = ItemLedger::default();
        let err = ledger
            .insert(NewFoodItem::new("Milk", "dairy", "not a date"), t0())
            .unwrap_err();
        assert!(format!("{err:#}").contains("not a date"));
        assert_eq!(ledger.last_id, 0);
    }
}
