//! Deterministic urgency buckets from days left.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    /// 0 days left: use today or discard.
    Today = 0,
    /// 1-3 days.
    Soon = 1,
    /// 4-7 days.
    ThisWeek = 2,
    Fresh = 3,
}

impl Urgency {
    pub fn from_days_left(days_left: i64) -> Self {
        match days_left {
            i64::MIN..=0 => Urgency::Today,
            1..=3 => Urgency::Soon,
            4..=7 => Urgency::ThisWeek,
            _ => Urgency::Fresh,
        }
    }

    /// One-line summary, e.g. "Use within 2 days".
    pub fn summary(&self, days_left: i64) -> String {
        match self {
            Urgency::Today => "Use today".to_string(),
            Urgency::Soon if days_left == 1 => "Use by tomorrow".to_string(),
            Urgency::Soon | Urgency::ThisWeek => format!("Use within {days_left} days"),
            Urgency::Fresh => format!("Fresh for about {days_left} more days"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(Urgency::from_days_left(0), Urgency::Today);
        assert_eq!(Urgency::from_days_left(1), Urgency::Soon);
        assert_eq!(Urgency::from_days_left(3), Urgency::Soon);
        assert_eq!(Urgency::from_days_left(4), Urgency::ThisWeek);
        assert_eq!(Urgency::from_days_left(7), Urgency::ThisWeek);
        assert_eq!(Urgency::from_days_left(8), Urgency::Fresh);
        assert!(Urgency::Today < Urgency::Fresh);
    }

    #[test]
    fn test_summary_wording() {
        assert_eq!(Urgency::Today.summary(0), "Use today");
        assert_eq!(Urgency::Soon.summary(1), "Use by tomorrow");
        assert_eq!(Urgency::Soon.summary(2), "Use within 2 days");
        assert_eq!(Urgency::Fresh.summary(30), "Fresh for about 30 more days");
    }
}
