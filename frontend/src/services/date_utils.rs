use chrono::{DateTime, FixedOffset, Offset, Utc};
use js_sys::Date;

/// Offset of the browser's local timezone right now.
///
/// `getTimezoneOffset` reports minutes *behind* UTC, so the sign is flipped.
pub fn browser_offset() -> FixedOffset {
    let minutes_behind = Date::new_0().get_timezone_offset();
    offset_from_minutes_behind(minutes_behind)
}

pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(Date::now() as i64).unwrap_or_default()
}

fn offset_from_minutes_behind(minutes_behind: f64) -> FixedOffset {
    let seconds_east = -(minutes_behind.round() as i32) * 60;
    FixedOffset::east_opt(seconds_east).unwrap_or_else(|| Utc.fix())
}
