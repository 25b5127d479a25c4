//! Canonicalization of stored time values to epoch milliseconds.
//!
//! Driver documents carry `created_at`, `updated_at` and `last_login` in
//! whatever form the enrolling client wrote them: epoch seconds, epoch
//! milliseconds, ISO-8601 text, native datetimes, or nothing at all.
//! [`normalize`] maps every form onto epoch milliseconds; values that cannot
//! be read fall back to the current time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Integers below this magnitude are epoch seconds.
pub const SECONDS_CUTOFF: i64 = 10_000_000_000;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A time value of unknown representation, as read from the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TimestampValue {
    #[default]
    Absent,
    Integer(i64),
    Text(String),
    Instant(DateTime<Utc>),
    /// Anything else (reals, booleans, structured values), kept as its textual form.
    Other(String),
}

/// Outcome of reading a [`TimestampValue`] without a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Parsed(i64),
    Absent,
    Malformed,
}

impl TimestampValue {
    pub fn resolve(&self) -> Resolution {
        match self {
            TimestampValue::Absent => Resolution::Absent,
            TimestampValue::Integer(v) => Resolution::Parsed(scale_integer(*v)),
            TimestampValue::Text(s) => match parse_iso8601(s) {
                Some(dt) => Resolution::Parsed(dt.timestamp_millis()),
                None => {
                    log::debug!("unparseable timestamp text {s:?}, using current time");
                    Resolution::Malformed
                }
            },
            TimestampValue::Instant(dt) => Resolution::Parsed(dt.timestamp_millis()),
            TimestampValue::Other(_) => Resolution::Malformed,
        }
    }
}

impl From<i64> for TimestampValue {
    fn from(v: i64) -> Self {
        TimestampValue::Integer(v)
    }
}

impl From<&str> for TimestampValue {
    fn from(s: &str) -> Self {
        TimestampValue::Text(s.to_string())
    }
}

impl From<&Value> for TimestampValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => TimestampValue::Absent,
            Value::Number(n) => match n.as_i64() {
                Some(i) => TimestampValue::Integer(i),
                None => TimestampValue::Other(n.to_string()),
            },
            Value::String(s) => TimestampValue::Text(s.clone()),
            Value::Object(map) => match map.get("$date").and_then(extended_json_date) {
                Some(dt) => TimestampValue::Instant(dt),
                None => TimestampValue::Other(v.to_string()),
            },
            Value::Bool(_) | Value::Array(_) => TimestampValue::Other(v.to_string()),
        }
    }
}

/// Reads the `$date` payload of an extended-JSON datetime export.
fn extended_json_date(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => parse_iso8601(s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Object(inner) => inner
            .get("$numberLong")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn scale_integer(v: i64) -> i64 {
    if v.unsigned_abs() < SECONDS_CUTOFF as u64 {
        v * 1000
    } else {
        v
    }
}

/// Parses ISO-8601 date-times. A trailing `Z` or explicit offset is honoured;
/// naive date-times and bare dates are read as UTC.
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Normalizes against an explicit clock reading.
pub fn normalize_at(value: &TimestampValue, now_ms: i64) -> i64 {
    match value.resolve() {
        Resolution::Parsed(ms) => ms,
        Resolution::Absent | Resolution::Malformed => now_ms,
    }
}

/// Normalizes to epoch milliseconds, falling back to the current time.
pub fn normalize(value: &TimestampValue) -> i64 {
    normalize_at(value, now_millis())
}
