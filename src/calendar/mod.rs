//! Calendar interval conversion and clock formatting.
//!
//! Intervals are measured from the Unix epoch (1970-01-01T00:00:00 UTC) with
//! Gregorian arithmetic, so months and years have their real lengths. Both
//! directions go through the same epoch, which makes them exact inverses:
//! `to_seconds(&to_interval(d)?)? == d`.

use chrono::{DateTime, Datelike, Days, Months, NaiveDateTime, TimeDelta, Timelike, Utc};
use thiserror::Error;
use tracing::trace;

use crate::models::{CalendarInterval, Seconds};

/// Errors that can occur during calendar conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("{0} seconds is outside the supported calendar range")]
    SecondsOutOfRange(Seconds),

    #[error("Interval {0} is outside the supported calendar range")]
    IntervalOutOfRange(CalendarInterval),
}

fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Break `value` seconds into calendar components.
pub fn to_interval(value: Seconds) -> Result<CalendarInterval, CalendarError> {
    let start = epoch();
    let end = i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(CalendarError::SecondsOutOfRange(value))?;

    // The epoch sits on a year boundary, so the end point's own calendar
    // fields are the elapsed components.
    let interval = CalendarInterval {
        years: (end.year() - start.year()) as u32,
        months: end.month0(),
        days: end.day0(),
        hours: end.hour(),
        minutes: end.minute(),
        seconds: end.second(),
    };

    trace!(value, %interval, "converted seconds to interval");
    Ok(interval)
}

/// Add each component to the epoch, largest first, and return the offset.
pub fn to_seconds(interval: &CalendarInterval) -> Result<Seconds, CalendarError> {
    let out_of_range = || CalendarError::IntervalOutOfRange(*interval);
    let start = epoch();

    let clock = i64::from(interval.hours) * 3600
        + i64::from(interval.minutes) * 60
        + i64::from(interval.seconds);

    let end = interval
        .years
        .checked_mul(12)
        .and_then(|months| start.checked_add_months(Months::new(months)))
        .and_then(|t| t.checked_add_months(Months::new(interval.months)))
        .and_then(|t| t.checked_add_days(Days::new(u64::from(interval.days))))
        .and_then(|t| t.checked_add_signed(TimeDelta::try_seconds(clock)?))
        .ok_or_else(out_of_range)?;

    let seconds = (end - start).num_seconds();
    u64::try_from(seconds).map_err(|_| out_of_range())
}

/// Render `value` as zero-padded `HH:MM`, dropping seconds.
///
/// Hours are not capped: 100 hours or more renders with three or more digits.
pub fn to_hh_mm(value: Seconds) -> String {
    format!("{:02}:{:02}", value / 3600, (value % 3600) / 60)
}
