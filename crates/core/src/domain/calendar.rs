// UTC calendar time

use chrono::{DateTime, Datelike, Timelike};
use serde::{Deserialize, Serialize};

/// Broken-down UTC time.
///
/// Unlike C's `struct tm`, `year` is the full year and `month` starts at 1.
/// `weekday` counts from Sunday = 0 and `yearday` from January 1st = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub weekday: u32,
    pub yearday: u32,
}

impl CalendarTime {
    /// Convert seconds since the Unix epoch to calendar fields.
    ///
    /// Returns `None` when the value falls outside the representable range.
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        let utc = DateTime::from_timestamp(secs, 0)?;

        Some(CalendarTime {
            year: utc.year(),
            month: utc.month(),
            day: utc.day(),
            hour: utc.hour(),
            minute: utc.minute(),
            second: utc.second(),
            weekday: utc.weekday().num_days_from_sunday(),
            yearday: utc.ordinal0(),
        })
    }
}
