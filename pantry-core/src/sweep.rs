//! Daily expiry sweep: pick the items that need attention and work out when
//! the next sweep should fire.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::FoodCategory;
use crate::item::FoodItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPolicy {
    /// Alert when `days_left <= threshold_days`.
    pub threshold_days: i64,
    /// Local wall-clock time of the daily run.
    pub hour: u32,
    pub minute: u32,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            threshold_days: 3,
            hour: 8,
            minute: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryAlert {
    pub item_id: String,
    pub name: String,
    pub category: FoodCategory,
    pub days_left: i64,
    pub safe_expiry: DateTime<Utc>,
}

impl ExpiryAlert {
    pub fn headline(&self) -> String {
        format!("EXPIRY ALERT: {} ({} days left)", self.name, self.days_left)
    }
}

/// An item the sweep could not evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub item_id: String,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub checked: usize,
    pub alerts: Vec<ExpiryAlert>,
    pub skipped: Vec<SkippedItem>,
}

/// Evaluate every item against `now`. Alerts are ordered soonest first, then by name.
///
/// An item with unparsable dates is reported in `skipped` and does not stop the sweep.
pub fn sweep_items<'a>(
    items: impl IntoIterator<Item = &'a FoodItem>,
    now: DateTime<Utc>,
    policy: &SweepPolicy,
) -> SweepReport {
    let mut report = SweepReport::default();

    for item in items {
        report.checked += 1;
        let tracked = match item.track(now) {
            Ok(t) => t,
            Err(e) => {
                report.skipped.push(SkippedItem {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if tracked.days_left <= policy.threshold_days {
            report.alerts.push(ExpiryAlert {
                item_id: item.id.clone(),
                name: item.name.clone(),
                category: tracked.prediction.category,
                days_left: tracked.days_left,
                safe_expiry: tracked.prediction.safe_expiry_timestamp,
            });
        }
    }

    report
        .alerts
        .sort_by(|a, b| a.days_left.cmp(&b.days_left).then_with(|| a.name.cmp(&b.name)));
    report
}

/// Next `policy.hour:policy.minute` in `tz` strictly after `now`.
///
/// Returns `None` for an out-of-range hour or minute, or when no slot fits
/// inside chrono's representable range. A slot that falls in a DST gap moves
/// forward one hour; an ambiguous slot takes the earlier instant.
pub fn next_sweep_at(now: DateTime<Utc>, tz: Tz, policy: &SweepPolicy) -> Option<DateTime<Utc>> {
    let slot = NaiveTime::from_hms_opt(policy.hour, policy.minute, 0)?;
    let today = now.with_timezone(&tz).date_naive();

    (0..=2)
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .filter_map(|day| local_to_utc(tz, day.and_time(slot)))
        .find(|at| *at > now)
}

fn local_to_utc(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            let shifted = local.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}
