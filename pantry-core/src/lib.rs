//! pantry-core: food expiry prediction and the daily sweep built on it

pub mod error;
pub mod expiry;
pub mod item;
pub mod sweep;
pub mod time;

pub use error::ExpiryError;
pub use expiry::{
    CategoryPolicy, DateInput, ExpiryPrediction, FoodCategory, POLICY_TABLE, days_remaining,
    days_remaining_now, predict_expiry, predict_expiry_at,
};
pub use item::{FoodItem, InvalidItem, NewFoodItem, TrackedItem};
pub use sweep::{ExpiryAlert, SkippedItem, SweepPolicy, SweepReport, next_sweep_at, sweep_items};
pub use time::{parse_instant, to_rfc3339_utc};
