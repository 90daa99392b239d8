//! Tracked food item records.
//!
//! Dates are stored as the text the user supplied and parsed on every
//! prediction, so a bad date surfaces as an `ExpiryError` at read time too.
//! Storage (memory, json file) is a later layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ExpiryError;
use crate::expiry::{ExpiryPrediction, predict_expiry};
use crate::time::parse_instant;

fn default_quantity() -> u32 {
    1
}

/// An item as submitted, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFoodItem {
    pub name: String,
    pub category: String,
    pub purchase_date: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub manufactured_date: Option<String>,
}

/// Why a submitted item was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidItem {
    #[error("item name is empty")]
    EmptyName,
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error(transparent)]
    BadDate(#[from] ExpiryError),
}

impl NewFoodItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        purchase_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            purchase_date: purchase_date.into(),
            quantity: 1,
            notes: None,
            manufactured_date: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_manufactured(mut self, date: impl Into<String>) -> Self {
        self.manufactured_date = Some(date.into());
        self
    }

    /// Reject items the predictor could never handle.
    pub fn validate(&self) -> Result<(), InvalidItem> {
        if self.name.trim().is_empty() {
            return Err(InvalidItem::EmptyName);
        }
        if self.quantity == 0 {
            return Err(InvalidItem::ZeroQuantity);
        }
        let manufactured = self
            .manufactured_date
            .as_deref()
            .map(parse_instant)
            .transpose()?;
        predict_expiry(&self.category, &self.purchase_date, manufactured)?;
        Ok(())
    }

    pub fn into_item(self, id: impl Into<String>, created_at: DateTime<Utc>) -> FoodItem {
        FoodItem {
            id: id.into(),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            purchase_date: self.purchase_date.trim().to_string(),
            quantity: self.quantity,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            manufactured_date: self
                .manufactured_date
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            created_at,
        }
    }
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    /// Category as entered; the predictor normalizes it.
    pub category: String,
    pub purchase_date: String,
    pub quantity: u32,
    pub notes: Option<String>,
    pub manufactured_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FoodItem {
    /// Run the predictor over this item's stored dates.
    pub fn predict(&self) -> Result<ExpiryPrediction, ExpiryError> {
        let manufactured = self
            .manufactured_date
            .as_deref()
            .map(parse_instant)
            .transpose()?;
        predict_expiry(&self.category, &self.purchase_date, manufactured)
    }

    /// Prediction plus days left relative to `now`.
    pub fn track(&self, now: DateTime<Utc>) -> Result<TrackedItem, ExpiryError> {
        let prediction = self.predict()?;
        let days_left = prediction.days_remaining(now);
        Ok(TrackedItem {
            item: self.clone(),
            prediction,
            days_left,
        })
    }
}

/// An item with its freshly computed prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem {
    #[serde(flatten)]
    pub item: FoodItem,
    pub prediction: ExpiryPrediction,
    pub days_left: i64,
}
