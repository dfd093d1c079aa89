//! Timestamp parsing for the several shapes records arrive in.
//!
//! Records written by different clients store their creation time as a
//! `{seconds, nanoseconds}` object, its `_seconds` serialized twin, a bare
//! epoch number, an ISO-like string or an extended-JSON `{"$date": ...}`
//! value. [`parse_instant`] tries the encodings in [`TimestampEncoding::ORDER`]
//! and returns `None` instead of a sentinel; the "Recent" placeholder is
//! only applied by [`display_date`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

/// Shown when a group's date cannot be resolved
pub const RECENT_PLACEHOLDER: &str = "Recent";

/// Epoch numbers at or above this magnitude are milliseconds, below it seconds
const MILLIS_THRESHOLD: f64 = 1e11;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Recognised timestamp encodings, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampEncoding {
    /// `{"seconds": 1700000000, "nanoseconds": 0}`
    Seconds,
    /// `{"_seconds": 1700000000, "_nanoseconds": 0}`
    UnderscoreSeconds,
    /// `1700000000` or `1700000000000`
    EpochNumber,
    /// `"2023-11-14T22:13:20Z"`, `"2023-11-14"`, ...
    Text,
    /// `{"$date": "2023-11-14T22:13:20Z"}` or `{"$date": 1700000000000}`
    DateValue,
}

impl TimestampEncoding {
    pub const ORDER: [TimestampEncoding; 5] = [
        TimestampEncoding::Seconds,
        TimestampEncoding::UnderscoreSeconds,
        TimestampEncoding::EpochNumber,
        TimestampEncoding::Text,
        TimestampEncoding::DateValue,
    ];

    /// First encoding whose shape matches `value`.
    ///
    /// Matching is by shape only: an object carrying `seconds` is a
    /// `Seconds` timestamp even when the field does not resolve.
    pub fn detect(value: &Value) -> Option<Self> {
        Self::ORDER.into_iter().find(|encoding| encoding.matches(value))
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            TimestampEncoding::Seconds => value.get("seconds").is_some(),
            TimestampEncoding::UnderscoreSeconds => value.get("_seconds").is_some(),
            TimestampEncoding::EpochNumber => value.is_number(),
            TimestampEncoding::Text => value.is_string(),
            TimestampEncoding::DateValue => value.get("$date").is_some(),
        }
    }

    fn resolve(self, value: &Value) -> Option<DateTime<Utc>> {
        match self {
            TimestampEncoding::Seconds => from_seconds_object(value, "seconds", "nanoseconds"),
            TimestampEncoding::UnderscoreSeconds => {
                from_seconds_object(value, "_seconds", "_nanoseconds")
            }
            TimestampEncoding::EpochNumber => value.as_f64().and_then(from_epoch_number),
            TimestampEncoding::Text => value.as_str().and_then(parse_text),
            TimestampEncoding::DateValue => match value.get("$date")? {
                Value::String(text) => parse_text(text),
                Value::Number(number) => number.as_f64().and_then(from_epoch_millis),
                _ => None,
            },
        }
    }
}

/// Conversion to a calendar instant.
///
/// Implemented for raw JSON values and for the chrono date types, so typed
/// timestamps can be handed to the same formatting helpers as wire values.
pub trait ToInstant {
    fn to_instant(&self) -> Option<DateTime<Utc>>;
}

impl ToInstant for Value {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        TimestampEncoding::detect(self)?.resolve(self)
    }
}

impl<Tz: TimeZone> ToInstant for DateTime<Tz> {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl ToInstant for NaiveDateTime {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        Some(self.and_utc())
    }
}

impl ToInstant for NaiveDate {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        self.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc())
    }
}

impl<T: ToInstant> ToInstant for Option<T> {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        self.as_ref().and_then(ToInstant::to_instant)
    }
}

impl<T: ToInstant + ?Sized> ToInstant for &T {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        (**self).to_instant()
    }
}

/// Resolve any supported timestamp shape to an instant
pub fn parse_instant<T: ToInstant + ?Sized>(value: &T) -> Option<DateTime<Utc>> {
    value.to_instant()
}

/// Format an instant as `DD Mon YYYY` in the given offset, e.g. `14 Nov 2023`
pub fn format_calendar_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%d %b %Y").to_string()
}

/// Presentation boundary: formatted date, or the "Recent" placeholder
pub fn display_date(instant: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    instant
        .map(|instant| format_calendar_date(instant, offset))
        .unwrap_or_else(|| RECENT_PLACEHOLDER.to_string())
}

pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

fn from_seconds_object(value: &Value, seconds_key: &str, nanos_key: &str) -> Option<DateTime<Utc>> {
    let seconds = numeric_field(value.get(seconds_key)?)?;
    let nanos = value.get(nanos_key).and_then(numeric_field).unwrap_or(0.0);
    from_epoch_millis(seconds * 1000.0 + nanos / 1_000_000.0)
}

fn numeric_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn from_epoch_number(number: f64) -> Option<DateTime<Utc>> {
    if number.abs() < MILLIS_THRESHOLD {
        from_epoch_millis(number * 1000.0)
    } else {
        from_epoch_millis(number)
    }
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis.round() as i64).single()
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.to_instant())
}
