//! Timestamp coercion
//!
//! The store hands out timestamps in several encodings depending on the
//! client that wrote them. Everything is coerced to `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    UnsupportedShape,
    OutOfRange,
    Unparseable(String),
}

impl std::error::Error for TimestampError {}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedShape => write!(f, "unsupported timestamp encoding"),
            Self::OutOfRange => write!(f, "timestamp out of range"),
            Self::Unparseable(s) => write!(f, "cannot parse timestamp '{}'", s),
        }
    }
}

/// Coerce a raw timestamp value.
///
/// Accepts `{seconds, nanoseconds}`, `{_seconds, _nanoseconds}`,
/// `{__time__: "<rfc3339>"}`, a date or date-time string, or epoch
/// milliseconds.
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, TimestampError> {
    match value {
        Value::Object(map) => {
            if let Some(time) = map.get("__time__") {
                return parse_timestamp(time);
            }
            let seconds = map.get("seconds").or_else(|| map.get("_seconds"));
            let nanos = map.get("nanoseconds").or_else(|| map.get("_nanoseconds"));
            match seconds.and_then(Value::as_i64) {
                Some(secs) => {
                    let nanos = nanos.and_then(Value::as_u64).unwrap_or(0);
                    let nanos = u32::try_from(nanos).map_err(|_| TimestampError::OutOfRange)?;
                    Utc.timestamp_opt(secs, nanos).single().ok_or(TimestampError::OutOfRange)
                }
                None => Err(TimestampError::UnsupportedShape),
            }
        }
        Value::String(s) => {
            parse_text(s.trim()).ok_or_else(|| TimestampError::Unparseable(s.clone()))
        }
        Value::Number(n) => {
            let millis = n.as_i64().ok_or(TimestampError::OutOfRange)?;
            Utc.timestamp_millis_opt(millis).single().ok_or(TimestampError::OutOfRange)
        }
        _ => Err(TimestampError::UnsupportedShape),
    }
}

/// RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS` taken as UTC, or a bare
/// `YYYY-MM-DD` taken as UTC midnight
fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar day of an instant, always in UTC
pub fn utc_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_firestore_seconds_shape() {
        let ts = parse_timestamp(&json!({ "seconds": 1704067200, "nanoseconds": 500 })).unwrap();
        assert_eq!(utc_day(ts), day(2024, 1, 1));
        assert_eq!(ts.timestamp_subsec_nanos(), 500);
    }

    #[test]
    fn test_admin_sdk_shape() {
        let ts = parse_timestamp(&json!({ "_seconds": 1704153600, "_nanoseconds": 0 })).unwrap();
        assert_eq!(utc_day(ts), day(2024, 1, 2));
    }

    #[test]
    fn test_time_wrapper_and_rfc3339() {
        let wrapped = parse_timestamp(&json!({ "__time__": "2024-03-05T23:30:00-05:00" })).unwrap();
        // 23:30 at UTC-5 is already the next day in UTC
        assert_eq!(utc_day(wrapped), day(2024, 3, 6));

        let plain = parse_timestamp(&json!("2024-03-05T10:00:00Z")).unwrap();
        assert_eq!(utc_day(plain), day(2024, 3, 5));
    }

    #[test]
    fn test_date_only_and_zoneless_strings() {
        let date = parse_timestamp(&json!("2024-01-05")).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());

        let zoneless = parse_timestamp(&json!("2024-01-05T23:15:00")).unwrap();
        assert_eq!(utc_day(zoneless), day(2024, 1, 5));
    }

    #[test]
    fn test_epoch_millis() {
        let ts = parse_timestamp(&json!(1704067200000i64)).unwrap();
        assert_eq!(utc_day(ts), day(2024, 1, 1));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp(&json!(true)), Err(TimestampError::UnsupportedShape));
        assert_eq!(parse_timestamp(&json!({ "when": 1 })), Err(TimestampError::UnsupportedShape));
        assert!(matches!(
            parse_timestamp(&json!("yesterday")),
            Err(TimestampError::Unparseable(_))
        ));
        assert_eq!(parse_timestamp(&json!(1.5)), Err(TimestampError::OutOfRange));
    }
}
