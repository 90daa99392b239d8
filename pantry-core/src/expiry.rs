//! Expiry predictor: category shelf-life policies and safe-expiry arithmetic.
//!
//! Everything here is a pure function of its inputs and the const policy
//! table, so it can be called from any thread without coordination.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ExpiryError;
use crate::time::{SECONDS_PER_DAY, days, parse_instant};

/// Shelf-life parameters for one food category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// Assumed days between manufacture and purchase.
    pub store_delay_days: u32,
    /// Nominal shelf life counted from manufacture.
    pub shelf_life_days: u32,
    /// Share of the shelf life held back as a safety margin (0-100).
    pub safety_percent: u32,
}

impl CategoryPolicy {
    pub const fn new(store_delay_days: u32, shelf_life_days: u32, safety_percent: u32) -> Self {
        Self {
            store_delay_days,
            shelf_life_days,
            safety_percent,
        }
    }

    /// `max(1, floor(shelf_life * percent / 100))`. Never zero.
    pub const fn safety_margin_days(&self) -> u32 {
        let raw = self.shelf_life_days * self.safety_percent / 100;
        if raw < 1 { 1 } else { raw }
    }
}

/// Known food categories. Anything else resolves to `Packaged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Dairy,
    Vegetables,
    Fruits,
    Meat,
    Packaged,
    Spices,
    Bakery,
    Frozen,
}

/// The fixed policy table, in display order.
pub const POLICY_TABLE: [(FoodCategory, CategoryPolicy); 8] = [
    (FoodCategory::Dairy, CategoryPolicy::new(2, 7, 20)),
    (FoodCategory::Vegetables, CategoryPolicy::new(1, 5, 15)),
    (FoodCategory::Fruits, CategoryPolicy::new(2, 10, 15)),
    (FoodCategory::Meat, CategoryPolicy::new(1, 3, 20)),
    (FoodCategory::Packaged, CategoryPolicy::new(15, 200, 5)),
    (FoodCategory::Spices, CategoryPolicy::new(25, 365, 5)),
    (FoodCategory::Bakery, CategoryPolicy::new(0, 3, 20)),
    (FoodCategory::Frozen, CategoryPolicy::new(7, 180, 10)),
];

impl FoodCategory {
    pub const FALLBACK: FoodCategory = FoodCategory::Packaged;

    /// Exact lookup on a normalized key; `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        POLICY_TABLE
            .iter()
            .map(|(c, _)| *c)
            .find(|c| c.as_str() == key)
    }

    /// Trim, lowercase, then look up, falling back to `Packaged`.
    pub fn resolve(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        Self::from_key(&key).unwrap_or(Self::FALLBACK)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Dairy => "dairy",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Fruits => "fruits",
            FoodCategory::Meat => "meat",
            FoodCategory::Packaged => "packaged",
            FoodCategory::Spices => "spices",
            FoodCategory::Bakery => "bakery",
            FoodCategory::Frozen => "frozen",
        }
    }

    pub const fn policy(&self) -> CategoryPolicy {
        match self {
            FoodCategory::Dairy => POLICY_TABLE[0].1,
            FoodCategory::Vegetables => POLICY_TABLE[1].1,
            FoodCategory::Fruits => POLICY_TABLE[2].1,
            FoodCategory::Meat => POLICY_TABLE[3].1,
            FoodCategory::Packaged => POLICY_TABLE[4].1,
            FoodCategory::Spices => POLICY_TABLE[5].1,
            FoodCategory::Bakery => POLICY_TABLE[6].1,
            FoodCategory::Frozen => POLICY_TABLE[7].1,
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchase date as callers hand it in: already an instant, or ISO-8601 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    At(DateTime<Utc>),
    Iso(&'a str),
}

impl DateInput<'_> {
    pub fn resolve(self) -> Result<DateTime<Utc>, ExpiryError> {
        match self {
            DateInput::At(dt) => Ok(dt),
            DateInput::Iso(s) => parse_instant(s),
        }
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(dt: DateTime<Utc>) -> Self {
        DateInput::At(dt)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(s: &'a str) -> Self {
        DateInput::Iso(s)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(s: &'a String) -> Self {
        DateInput::Iso(s.as_str())
    }
}

/// Result of one prediction. Recompute it rather than persisting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryPrediction {
    /// Category actually applied, after normalization and fallback.
    pub category: FoodCategory,
    pub purchase_timestamp: DateTime<Utc>,
    pub manufacturing_timestamp: DateTime<Utc>,
    pub predicted_expiry_timestamp: DateTime<Utc>,
    pub safe_expiry_timestamp: DateTime<Utc>,
    pub shelf_life_days: u32,
    pub safety_margin_days: u32,
}

impl ExpiryPrediction {
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        days_remaining(self.safe_expiry_timestamp, now)
    }
}

/// Predict manufacturing, nominal expiry and safe expiry for an item.
///
/// A supplied `manufactured` instant replaces the policy's store delay outright.
/// Fails on an unparsable `purchase_date`, or when an instant lands outside
/// chrono's representable range.
pub fn predict_expiry<'a>(
    category: &str,
    purchase_date: impl Into<DateInput<'a>>,
    manufactured: Option<DateTime<Utc>>,
) -> Result<ExpiryPrediction, ExpiryError> {
    let purchased = purchase_date.into().resolve()?;
    predict_expiry_at(category, purchased, manufactured)
}

/// [`predict_expiry`] for an already-resolved purchase instant.
pub fn predict_expiry_at(
    category: &str,
    purchased: DateTime<Utc>,
    manufactured: Option<DateTime<Utc>>,
) -> Result<ExpiryPrediction, ExpiryError> {
    let category = FoodCategory::resolve(category);
    let policy = category.policy();

    let manufacturing = match manufactured {
        Some(at) => at,
        None => shift(purchased, -i64::from(policy.store_delay_days))?,
    };
    let predicted = shift(manufacturing, i64::from(policy.shelf_life_days))?;
    let margin = policy.safety_margin_days();
    let safe = shift(predicted, -i64::from(margin))?;

    Ok(ExpiryPrediction {
        category,
        purchase_timestamp: purchased,
        manufacturing_timestamp: manufacturing,
        predicted_expiry_timestamp: predicted,
        safe_expiry_timestamp: safe,
        shelf_life_days: policy.shelf_life_days,
        safety_margin_days: margin,
    })
}

fn shift(at: DateTime<Utc>, n: i64) -> Result<DateTime<Utc>, ExpiryError> {
    at.checked_add_signed(days(n)).ok_or_else(|| {
        ExpiryError::malformed(
            &at.to_rfc3339(),
            format!("shifting by {n} days leaves the representable range"),
        )
    })
}

/// Whole days from `now` until `safe_expiry`, floored, never below zero.
///
/// Overdue items report 0; compare timestamps directly to see how overdue.
pub fn days_remaining(safe_expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (safe_expiry - now)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
        .max(0)
}

/// [`days_remaining`] against the wall clock.
pub fn days_remaining_now(safe_expiry: DateTime<Utc>) -> i64 {
    days_remaining(safe_expiry, Utc::now())
}
