//! Excel serial date numbers
//!
//! Workbooks store dates as days since a base date, with the time of day as
//! the fractional part. In the 1900 date system serial 60 is the fictional
//! 1900-02-29, so serials from 61 onward are one day ahead of the Gregorian
//! count.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Serial of 9999-12-31, the last date a workbook can hold
pub const MAX_SERIAL: f64 = 2_958_465.0;

fn epoch(before_leap_bug: bool) -> Option<NaiveDateTime> {
    let day = if before_leap_bug { 31 } else { 30 };
    NaiveDate::from_ymd_opt(1899, 12, day).map(|d| d.and_time(NaiveTime::MIN))
}

/// Convert a 1900-system serial to a date-time.
///
/// Returns `None` for serials outside `0..=MAX_SERIAL` or non-finite ones.
/// Serial 60 maps to 1900-02-28.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.trunc();
    let millis = ((serial - days) * MILLIS_PER_DAY).round() as i64;
    let days = days as i64;

    let (base, days) = if days >= 61 {
        (epoch(false)?, days)
    } else if days == 60 {
        (epoch(true)?, 59)
    } else {
        (epoch(true)?, days)
    };

    base.checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_milliseconds(millis)?)
}

/// Convert a date-time to a 1900-system serial
pub fn datetime_to_serial(dt: NaiveDateTime) -> f64 {
    let leap_bug_start = NaiveDate::from_ymd_opt(1900, 3, 1).map(|d| d.and_time(NaiveTime::MIN));
    let before_bug = leap_bug_start.map_or(false, |start| dt < start);

    match epoch(before_bug) {
        Some(base) => (dt - base).num_milliseconds() as f64 / MILLIS_PER_DAY,
        None => 0.0,
    }
}
