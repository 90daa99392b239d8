//! Time utilities: instant parsing and the fixed-length day.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::ExpiryError;

/// Seconds in a predictor day. Month lengths and DST never enter the arithmetic.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A whole number of predictor days as a chrono duration.
pub fn days(n: i64) -> Duration {
    Duration::seconds(n * SECONDS_PER_DAY)
}

/// Parse an ISO-8601 instant into UTC.
///
/// Accepted shapes:
/// - RFC 3339 with an offset or a trailing `Z` (`2024-01-10T00:00:00Z`)
/// - naive date-time, read as UTC (`2024-01-10T08:30:00`, `2024-01-10 08:30`)
/// - bare date, read as midnight UTC (`2024-01-10`)
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, ExpiryError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ExpiryError::malformed(input, "empty input"));
    }

    let rfc_err = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.and_utc());
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = d.and_hms_opt(0, 0, 0) {
            return Ok(ndt.and_utc());
        }
    }

    Err(ExpiryError::malformed(input, rfc_err.to_string()))
}

/// Helper: format a UTC time into RFC3339.
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_zulu_suffix() {
        let dt = parse_instant("2024-01-10T00:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_normalizes_to_utc() {
        let dt = parse_instant("2024-01-10T05:30:00+05:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_and_bare_date_as_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-03-05").unwrap(), expected);
        assert_eq!(parse_instant("2024-03-05T00:00:00").unwrap(), expected);
        assert_eq!(parse_instant(" 2024-03-05 00:00 ").unwrap(), expected);
        assert_eq!(
            parse_instant("2024-03-05T12:15:30.250").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 12, 15, 30).unwrap() + Duration::milliseconds(250)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "yesterday", "2024-13-01", "10/01/2024"] {
            let err = parse_instant(bad).unwrap_err();
            match err {
                ExpiryError::MalformedTimestamp { input, .. } => assert_eq!(input, bad),
            }
        }
    }

    #[test]
    fn test_day_is_fixed_length() {
        assert_eq!(days(1).num_seconds(), 86_400);
        assert_eq!(days(-25).num_seconds(), -25 * 86_400);
    }
}
