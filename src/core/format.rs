//! Date/time formatting and day arithmetic.
//!
//! Every helper takes anything convertible into a [`DateInput`], so
//! `format_date(NaiveDate)` and `format_date("2024-03-15")` agree.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::core::clock::{Clock, SystemClock};
use crate::core::datetime::{shift_months, DateInput};
use crate::error::TimeCraftError;

/// `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `hh:mm:ss AM/PM`
pub const TIME_FORMAT: &str = "%I:%M:%S %p";
/// `YYYY-MM-DD hh:mm:ss AM/PM`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";
/// `YYYY-MM-DD HH:MM:SS AM/PM`, 24-hour clock followed by the meridiem.
pub const HUMAN_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %p";
/// `YYYY-MM-DD HH:MM:SS`, the layout used for range bounds.
pub const SQL_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn resolve(value: impl Into<DateInput>) -> Result<NaiveDateTime, TimeCraftError> {
    value.into().resolve()
}

/// Format as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
///
/// # Examples
///
/// ```
/// use timecraft::core::format_date;
///
/// assert_eq!(format_date("2024-03-15 18:00:00").unwrap(), "2024-03-15");
/// ```
pub fn format_date(value: impl Into<DateInput>) -> Result<String, TimeCraftError> {
    Ok(resolve(value)?.format(DATE_FORMAT).to_string())
}

/// Format as `hh:mm:ss AM/PM`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
pub fn format_time(value: impl Into<DateInput>) -> Result<String, TimeCraftError> {
    Ok(resolve(value)?.format(TIME_FORMAT).to_string())
}

/// Format as `YYYY-MM-DD hh:mm:ss AM/PM`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
pub fn format_date_time(value: impl Into<DateInput>) -> Result<String, TimeCraftError> {
    Ok(resolve(value)?.format(DATE_TIME_FORMAT).to_string())
}

/// Format a structured value as `YYYY-MM-DD HH:MM:SS AM/PM`.
///
/// Text is returned unchanged, without being parsed.
#[must_use]
pub fn human_date_time(value: impl Into<DateInput>) -> String {
    match value.into().into_structured_at(SystemClock.now()) {
        Ok(value) => value.format(HUMAN_DATE_TIME_FORMAT).to_string(),
        Err(text) => text,
    }
}

/// Describe how long ago (or how far ahead) a value is, relative to now.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
pub fn format_time_ago(value: impl Into<DateInput>) -> Result<String, TimeCraftError> {
    format_time_ago_at(value, SystemClock.now())
}

/// Describe a value relative to `now`: `"3 days ago"`, `"in 2 hours"`,
/// `"just now"`.
///
/// The largest whole unit wins. Months and years are counted on the
/// calendar, so January 31 to February 29 is one month.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timecraft::core::format_time_ago_at;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(format_time_ago_at("2024-03-14", now).unwrap(), "1 day ago");
/// ```
pub fn format_time_ago_at(
    value: impl Into<DateInput>,
    now: NaiveDateTime,
) -> Result<String, TimeCraftError> {
    let then = value.into().resolve_at(now)?;

    let (earlier, later, past) = if then <= now {
        (then, now, true)
    } else {
        (now, then, false)
    };

    let Some((count, unit)) = largest_unit(earlier, later) else {
        return Ok("just now".to_string());
    };

    let plural = if count == 1 { "" } else { "s" };
    Ok(if past {
        format!("{count} {unit}{plural} ago")
    } else {
        format!("in {count} {unit}{plural}")
    })
}

/// Pick the largest whole unit separating two moments, or `None` when they
/// are less than a second apart.
fn largest_unit(earlier: NaiveDateTime, later: NaiveDateTime) -> Option<(i64, &'static str)> {
    let months = whole_months(earlier, later);
    if months >= 12 {
        return Some((months / 12, "year"));
    }
    if months > 0 {
        return Some((months, "month"));
    }

    let elapsed = later - earlier;
    let units = [
        (elapsed.num_weeks(), "week"),
        (elapsed.num_days(), "day"),
        (elapsed.num_hours(), "hour"),
        (elapsed.num_minutes(), "minute"),
        (elapsed.num_seconds(), "second"),
    ];

    units.into_iter().find(|(count, _)| *count > 0)
}

/// Count whole calendar months from `earlier` to `later`.
fn whole_months(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());

    if months > 0 && shift_months(earlier, months).map_or(true, |reached| reached > later) {
        months -= 1;
    }

    months.max(0)
}

/// Format as `YYYY-MM-DD 00:00:00`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
pub fn start_of_day(value: impl Into<DateInput>) -> Result<String, TimeCraftError> {
    Ok(resolve(value)?.format("%Y-%m-%d 00:00:00").to_string())
}

/// Format as `YYYY-MM-DD 23:59:59`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
pub fn end_of_day(value: impl Into<DateInput>) -> Result<String, TimeCraftError> {
    Ok(resolve(value)?.format("%Y-%m-%d 23:59:59").to_string())
}

/// Whether the value falls on a Saturday or Sunday.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] if a string input cannot be parsed.
pub fn is_weekend(value: impl Into<DateInput>) -> Result<bool, TimeCraftError> {
    Ok(matches!(
        resolve(value)?.weekday(),
        Weekday::Sat | Weekday::Sun
    ))
}

/// Move the value `days` calendar days forward and format as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] for unparseable input and
/// [`TimeCraftError::OutOfRange`] if the result leaves the calendar.
pub fn add_days(value: impl Into<DateInput>, days: i64) -> Result<String, TimeCraftError> {
    let date = shift_days(resolve(value)?.date(), days)?;
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Move the value `days` calendar days back and format as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] for unparseable input and
/// [`TimeCraftError::OutOfRange`] if the result leaves the calendar.
pub fn subtract_days(value: impl Into<DateInput>, days: i64) -> Result<String, TimeCraftError> {
    let days = days
        .checked_neg()
        .ok_or_else(|| TimeCraftError::OutOfRange(format!("cannot subtract {days} days")))?;
    add_days(value, days)
}

/// Validate a textual day count.
///
/// # Errors
///
/// Returns [`TimeCraftError::InvalidDays`] unless the input is an integer.
pub fn parse_days(input: &str) -> Result<i64, TimeCraftError> {
    input
        .trim()
        .parse()
        .map_err(|_| TimeCraftError::InvalidDays(input.to_string()))
}

pub(crate) fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, TimeCraftError> {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.ok_or_else(|| TimeCraftError::OutOfRange(format!("{date} shifted by {days} days")))
}
