//! Calendar and clock helpers for sun path generation.
//!
//! All dates are proleptic Gregorian. Local clock times are expressed as
//! fractional hours on a local calendar date and converted to UTC with a fixed
//! standard offset; daylight saving is applied separately through labels.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::{Error, Result};

/// Seconds per hour (3,600)
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Gregorian leap-year rule: divisible by 4 and not by 100, unless also divisible by 400.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given year (365 or 366).
#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Builds a calendar date, reporting unrepresentable dates as errors.
///
/// # Errors
/// Returns `InvalidDate` if the date does not exist or is outside chrono's range.
///
/// # Example
/// ```
/// # use sun_path::time::calendar_date;
/// assert!(calendar_date(2024, 2, 29).is_ok());
/// assert!(calendar_date(2023, 2, 29).is_err());
/// ```
pub fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::invalid_date(year, month, day))
}

/// Builds the date for a 1-based day of year.
///
/// # Errors
/// Returns `InvalidDayOfYear` if the ordinal is zero or exceeds the year's length.
pub fn ordinal_date(year: i32, day_of_year: u32) -> Result<NaiveDate> {
    NaiveDate::from_yo_opt(year, day_of_year)
        .ok_or(Error::invalid_day_of_year(year, day_of_year))
}

/// Converts a local standard clock time into a UTC instant.
///
/// `clock_hours` may exceed 24 (rolls into the next day); `standard_offset_hours`
/// is the zone's offset from UTC without any daylight-saving component.
#[must_use]
pub fn clock_to_utc(
    date: NaiveDate,
    clock_hours: f64,
    standard_offset_hours: f64,
) -> NaiveDateTime {
    let seconds = ((clock_hours - standard_offset_hours) * SECONDS_PER_HOUR).round() as i64;
    date.and_time(NaiveTime::MIN) + Duration::seconds(seconds)
}

/// Fractional UTC hours since midnight for an instant.
#[must_use]
pub fn utc_hours(instant: &NaiveDateTime) -> f64 {
    f64::from(instant.num_seconds_from_midnight()) / SECONDS_PER_HOUR
        + f64::from(instant.nanosecond()) / 1e9 / SECONDS_PER_HOUR
}

/// Continuous day of year measured at UTC noon (day 1 at 12:00 UTC on Jan 1 is `1.0`).
#[must_use]
pub fn fractional_day_of_year(instant: &NaiveDateTime) -> f64 {
    f64::from(instant.ordinal()) + (utc_hours(instant) - 12.0) / 24.0
}

/// Short date label such as `"Jun 21"`.
#[must_use]
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Clock label for a whole hour, wrapped onto a 24-hour dial (`25` renders as `"1:00"`).
#[must_use]
pub fn format_clock_label(hour: i64) -> String {
    format!("{}:00", hour.rem_euclid(24))
}
