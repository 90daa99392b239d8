//! Single JSON document on disk (`items.json`), rewritten after each change.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pantry_core::{FoodItem, NewFoodItem};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::repository::{ItemLedger, ItemRepository};

#[derive(Debug)]
pub struct JsonFileItemStore {
    path: PathBuf,
    ledger: ItemLedger,
}

impl JsonFileItemStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ledger = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        } else {
            ItemLedger::default()
        };
        debug!(path = %path.display(), items = ledger.items.len(), "opened item store");
        Ok(Self { path, ledger })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.ledger)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

impl ItemRepository for JsonFileItemStore {
    fn insert(&mut self, item: NewFoodItem, now: DateTime<Utc>) -> Result<FoodItem> {
        let stored = self.ledger.insert(item, now)?;
        self.save()?;
        info!(id = %stored.id, name = %stored.name, "added item");
        Ok(stored)
    }

    fn get(&self, id: &str) -> Result<Option<FoodItem>> {
        Ok(self.ledger.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<FoodItem>> {
        Ok(self.ledger.list())
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        if !self.ledger.remove(id) {
            return Ok(false);
        }
        self.save()?;
        info!(id, "removed item");
        Ok(true)
    }

    fn insert_many(&mut self, items: Vec<NewFoodItem>, now: DateTime<Utc>) -> Result<Vec<FoodItem>> {
        // Validate everything first so a bad row leaves the file untouched.
        let mut staged = self.ledger.clone();
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let name = item.name.clone();
            out.push(
                staged
                    .insert(item, now)
                    .with_context(|| format!("item #{} ({name})", i + 1))?,
            );
        }
        self.ledger = staged;
        self.save()?;
        info!(count = out.len(), "imported items");
        Ok(out)
    }
}
