//! Process-local store. Contents vanish with the process.

use anyhow::Result;
use chrono::{DateTime, Utc};
use pantry_core::{FoodItem, NewFoodItem};
use tracing::debug;

use crate::repository::{ItemLedger, ItemRepository};

#[derive(Debug, Default)]
pub struct MemoryItemStore {
    ledger: ItemLedger,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ledger.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.items.is_empty()
    }
}

impl ItemRepository for MemoryItemStore {
    fn insert(&mut self, item: NewFoodItem, now: DateTime<Utc>) -> Result<FoodItem> {
        let stored = self.ledger.insert(item, now)?;
        debug!(id = %stored.id, name = %stored.name, "stored item in memory");
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<Option<FoodItem>> {
        Ok(self.ledger.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<FoodItem>> {
        Ok(self.ledger.list())
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        Ok(self.ledger.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_insert_get_remove() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let mut store = MemoryItemStore::new();
        assert!(store.is_empty());

        let milk = store.insert(NewFoodItem::new("Milk", "dairy", "2024-01-10"), now).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&milk.id).unwrap(), Some(milk.clone()));
        assert_eq!(store.get("42").unwrap(), None);

        assert!(store.remove(&milk.id).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_many_stops_at_first_invalid() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let mut store = MemoryItemStore::new();
        let err = store
            .insert_many(
                vec![
                    NewFoodItem::new("Milk", "dairy", "2024-01-10"),
                    NewFoodItem::new("", "dairy", "2024-01-10"),
                    NewFoodItem::new("Eggs", "dairy", "2024-01-10"),
                ],
                now,
            )
            .unwrap_err();
        assert!(err.to_string().contains("item #2"));
        assert_eq!(store.len(), 1);
    }
}
