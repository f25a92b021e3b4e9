//! Date and time parsing.
//!
//! Every string-shaped date/time accepted by timecraft goes through
//! [`parse_datetime_at`]. It understands machine formats (RFC 3339,
//! RFC 2822, ISO-like `YYYY-MM-DD HH:MM:SS`) as well as the natural
//! expressions people type into a query box:
//!
//! - `now`, `today`, `tomorrow`, `yesterday`
//! - `monday`, `next friday`, `last sunday`
//! - `+3 days`, `-1 week`, `in 2 hours`, `5 minutes ago`
//! - `dec 15`, `march 15, 2024`, `12/15/2024`
//! - `3pm`, `15:00`, `noon`, `tomorrow 3pm`
//!
//! Anything else is an error; an unparseable value never silently becomes
//! "now" or the epoch.

use chrono::{
    DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Weekday,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::clock::{Clock, SystemClock};
use crate::error::TimeCraftError;

/// Date-time layouts tried against the untouched input.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S %p",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

static OFFSET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "+3 days", "-1 week", "in 2 hours", "5 minutes ago", "3 days"
    Regex::new(
        r"^(?:(?P<sign>[+-])\s*(?P<signed>\d+)|in\s+(?P<ahead>\d+)|(?P<plain>\d+))\s*(?P<unit>sec|second|min|minute|hour|day|week|fortnight|month|year)s?(?P<ago>\s+ago)?$",
    )
    .unwrap_or_else(|e| panic!("Invalid offset regex: {e}"))
});

/// A date/time value as handed to timecraft: either already structured or
/// still a string.
///
/// Both forms resolve to the same [`NaiveDateTime`]. Dates resolve to
/// midnight; bare times take today's date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// A full date and time.
    DateTime(NaiveDateTime),
    /// A calendar date.
    Date(NaiveDate),
    /// A time of day.
    Time(NaiveTime),
    /// Text to be parsed.
    Text(String),
}

impl DateInput {
    /// Whether this value is already structured (not text).
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// Resolve to a date-time using the system clock for relative input.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::Parse`] if text input cannot be parsed.
    pub fn resolve(&self) -> Result<NaiveDateTime, TimeCraftError> {
        self.resolve_at(SystemClock.now())
    }

    /// Resolve to a date-time relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::Parse`] if text input cannot be parsed.
    pub fn resolve_at(&self, now: NaiveDateTime) -> Result<NaiveDateTime, TimeCraftError> {
        self.clone()
            .into_structured_at(now)
            .or_else(|text| parse_datetime_at(&text, now))
    }

    /// The structured value placed at `now`, or the text handed back
    /// unparsed.
    ///
    /// # Errors
    ///
    /// Returns the text itself for [`DateInput::Text`].
    pub fn into_structured_at(self, now: NaiveDateTime) -> Result<NaiveDateTime, String> {
        match self {
            Self::DateTime(value) => Ok(value),
            Self::Date(date) => Ok(date.and_time(NaiveTime::default())),
            Self::Time(time) => Ok(now.date().and_time(time)),
            Self::Text(text) => Err(text),
        }
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for DateInput {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.naive_local())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for DateInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// Parse a date/time string relative to the system clock.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] naming the input if it is not
/// understood.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, TimeCraftError> {
    parse_datetime_at(input, SystemClock.now())
}

/// Parse a date/time string, resolving relative expressions against `now`.
///
/// # Errors
///
/// Returns [`TimeCraftError::Parse`] naming the input if it is not
/// understood.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timecraft::core::parse_datetime_at;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let parsed = parse_datetime_at("tomorrow 3pm", now).unwrap();
/// assert_eq!(parsed.to_string(), "2024-03-16 15:00:00");
/// ```
pub fn parse_datetime_at(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime, TimeCraftError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeCraftError::parse(input));
    }

    parse_absolute(trimmed)
        .or_else(|| parse_relative(&trimmed.to_lowercase(), now))
        .ok_or_else(|| TimeCraftError::parse(input))
}

/// Parse machine-oriented layouts.
fn parse_absolute(input: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(input) {
        return Some(value.naive_local());
    }
    if let Ok(value) = DateTime::parse_from_rfc2822(input) {
        return Some(value.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// Parse natural expressions (input is already lowercase).
fn parse_relative(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let today = now.date();

    if input == "now" {
        return Some(now);
    }

    if let Some(value) = parse_offset(input, now) {
        return Some(value);
    }

    if let Some(date) = parse_date_part(input, today) {
        return Some(date.and_time(NaiveTime::default()));
    }

    if let Some(time) = parse_time(input) {
        return Some(today.and_time(time));
    }

    parse_date_with_time(input, today)
}

/// Parse `+N unit`, `-N unit`, `in N units` and `N units ago`.
fn parse_offset(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = OFFSET_PATTERN.captures(input)?;

    let mut amount: i64 = if let Some(n) = caps.name("signed") {
        let n: i64 = n.as_str().parse().ok()?;
        if &caps["sign"] == "-" {
            -n
        } else {
            n
        }
    } else {
        caps.name("ahead")
            .or_else(|| caps.name("plain"))?
            .as_str()
            .parse()
            .ok()?
    };

    if caps.name("ago").is_some() {
        amount = amount.checked_neg()?;
    }

    shift(now, amount, &caps["unit"])
}

/// Move `now` by `amount` of `unit`. Months and years are calendar-aware.
fn shift(now: NaiveDateTime, amount: i64, unit: &str) -> Option<NaiveDateTime> {
    let delta = match unit {
        "sec" | "second" => Duration::try_seconds(amount)?,
        "min" | "minute" => Duration::try_minutes(amount)?,
        "hour" => Duration::try_hours(amount)?,
        "day" => Duration::try_days(amount)?,
        "week" => Duration::try_weeks(amount)?,
        "fortnight" => Duration::try_weeks(amount.checked_mul(2)?)?,
        "month" => return shift_months(now, amount),
        "year" => return shift_months(now, amount.checked_mul(12)?),
        _ => return None,
    };

    now.checked_add_signed(delta)
}

/// Add (or, for negative counts, subtract) calendar months.
///
/// Days past the end of the target month clamp to its last day.
pub(crate) fn shift_months(now: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        now.checked_add_months(count)
    } else {
        now.checked_sub_months(count)
    }
}

/// Parse a date-only expression (input is already lowercase).
fn parse_date_part(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input {
        "today" | "midnight" => return Some(today),
        "tomorrow" => return today.checked_add_days(Days::new(1)),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {},
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
    {
        return Some(date);
    }

    parse_us_date(input, today)
        .or_else(|| parse_month_day(input, today))
        .or_else(|| parse_weekday(input, today))
}

/// Parse weekday names, optionally prefixed with `next` or `last`.
///
/// A bare weekday is today if it matches, else its next occurrence.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (direction, day_str) = if let Some(rest) = input.strip_prefix("next ") {
        (1, rest)
    } else if let Some(rest) = input.strip_prefix("last ") {
        (-1, rest)
    } else {
        (0, input)
    };

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let target_idx = u64::from(target.num_days_from_monday());
    let today_idx = u64::from(today.weekday().num_days_from_monday());

    if direction < 0 {
        let mut back = (today_idx + 7 - target_idx) % 7;
        if back == 0 {
            back = 7;
        }
        return today.checked_sub_days(Days::new(back));
    }

    let mut ahead = (target_idx + 7 - today_idx) % 7;
    if ahead == 0 && direction > 0 {
        ahead = 7;
    }
    today.checked_add_days(Days::new(ahead))
}

/// Parse `dec 15` or `15 dec` in the current year.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let (month, day) = match (parse_month_name(parts[0]), parse_month_name(parts[1])) {
        (Some(month), None) => (month, parts[1].parse::<u32>().ok()?),
        (None, Some(month)) => (month, parts[0].parse::<u32>().ok()?),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(today.year(), month, day)
}

/// Parse month name to number.
fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse US date format (MM/DD or MM/DD/YYYY).
fn parse_us_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').collect();

    match parts.len() {
        2 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;

            NaiveDate::from_ymd_opt(today.year(), month, day)
        },
        3 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;
            let year: i32 = parts[2].parse().ok()?;

            // Handle 2-digit years
            let year = if parts[2].len() <= 2 { 2000 + year } else { year };

            NaiveDate::from_ymd_opt(year, month, day)
        },
        _ => None,
    }
}

/// Parse a date followed by a time, e.g. `tomorrow 3pm` or `dec 15 at 9:30 am`.
fn parse_date_with_time(input: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let input = input.replace(" at ", " ").replace(" @ ", " ");
    let parts: Vec<&str> = input.split_whitespace().collect();

    // The time is the last token, or the last two when the meridiem is detached.
    for time_tokens in [1, 2] {
        if parts.len() <= time_tokens {
            continue;
        }
        let (date_parts, time_parts) = parts.split_at(parts.len() - time_tokens);
        let Some(time) = parse_time(&time_parts.join(" ")) else {
            continue;
        };
        if let Some(date) = parse_date_part(&date_parts.join(" "), today) {
            return Some(date.and_time(time));
        }
    }

    None
}

/// Parse a time of day (input is already lowercase).
fn parse_time(input: &str) -> Option<NaiveTime> {
    match input {
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        _ => {},
    }

    // 24-hour format (15:00, 15:30:05)
    for format in ["%H:%M:%S%.f", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(input, format) {
            return Some(time);
        }
    }

    // 12-hour format (3pm, 3:30pm, 3:30:15 pm)
    let (time_str, is_pm) = if let Some(rest) = input.strip_suffix("pm") {
        (rest.trim_end(), true)
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest.trim_end(), false)
    } else {
        return None;
    };

    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut hour: u32 = parts[0].parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }
    let minute: u32 = parts.get(1).map_or(Ok(0), |m| m.parse::<u32>()).ok()?;
    let second: u32 = parts.get(2).map_or(Ok(0), |s| s.parse::<u32>()).ok()?;

    if is_pm && hour < 12 {
        hour += 12;
    } else if !is_pm && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    // Friday
    fn now() -> NaiveDateTime {
        at(2024, 3, 15, 10, 30, 0)
    }

    fn parse(input: &str) -> NaiveDateTime {
        parse_datetime_at(input, now()).unwrap()
    }

    #[test]
    fn test_into_structured_at() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            DateInput::from(date).into_structured_at(now()),
            Ok(at(2024, 2, 29, 0, 0, 0))
        );

        let time = NaiveTime::from_hms_opt(14, 5, 0).unwrap();
        assert_eq!(
            DateInput::from(time).into_structured_at(now()),
            Ok(at(2024, 3, 15, 14, 5, 0))
        );

        assert_eq!(
            DateInput::from("next tuesday").into_structured_at(now()),
            Err("next tuesday".to_string())
        );
    }

    #[test]
    fn test_resolve_at_parses_only_text() {
        assert_eq!(
            DateInput::from("tomorrow").resolve_at(now()).unwrap(),
            at(2024, 3, 16, 0, 0, 0)
        );
        assert_eq!(
            DateInput::from(at(2024, 1, 2, 3, 4, 5)).resolve_at(now()).unwrap(),
            at(2024, 1, 2, 3, 4, 5)
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse("2024-12-15"), at(2024, 12, 15, 0, 0, 0));
        assert_eq!(parse("2024/12/15"), at(2024, 12, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_iso_datetime() {
        assert_eq!(parse("2024-03-15 14:05:09"), at(2024, 3, 15, 14, 5, 9));
        assert_eq!(parse("2024-03-15T14:05:09"), at(2024, 3, 15, 14, 5, 9));
        assert_eq!(parse("2024-03-15 14:05"), at(2024, 3, 15, 14, 5, 0));
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        assert_eq!(parse("2024-03-15T14:05:09+02:00"), at(2024, 3, 15, 14, 5, 9));
        assert_eq!(parse("2024-03-15T14:05:09Z"), at(2024, 3, 15, 14, 5, 9));
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            parse("Fri, 15 Mar 2024 14:05:09 +0000"),
            at(2024, 3, 15, 14, 5, 9)
        );
    }

    #[test]
    fn test_parse_meridiem_datetime() {
        assert_eq!(parse("2024-03-15 02:05:09 PM"), at(2024, 3, 15, 14, 5, 9));
        assert_eq!(parse("2024-03-15 14:05:09 PM"), at(2024, 3, 15, 14, 5, 9));
        assert_eq!(parse("2024-03-15 12:00:00 AM"), at(2024, 3, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse("now"), now());
        assert_eq!(parse("today"), at(2024, 3, 15, 0, 0, 0));
        assert_eq!(parse("Tomorrow"), at(2024, 3, 16, 0, 0, 0));
        assert_eq!(parse("yesterday"), at(2024, 3, 14, 0, 0, 0));
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse("+3 days"), at(2024, 3, 18, 10, 30, 0));
        assert_eq!(parse("-1 week"), at(2024, 3, 8, 10, 30, 0));
        assert_eq!(parse("in 2 hours"), at(2024, 3, 15, 12, 30, 0));
        assert_eq!(parse("5 minutes ago"), at(2024, 3, 15, 10, 25, 0));
        assert_eq!(parse("1 year ago"), at(2023, 3, 15, 10, 30, 0));
    }

    #[test]
    fn test_parse_month_offset_clamps() {
        let end_of_march = at(2024, 3, 31, 8, 0, 0);
        assert_eq!(
            parse_datetime_at("-1 month", end_of_march).unwrap(),
            at(2024, 2, 29, 8, 0, 0)
        );
    }

    #[test]
    fn test_parse_weekdays() {
        // now() is a Friday
        assert_eq!(parse("friday"), at(2024, 3, 15, 0, 0, 0));
        assert_eq!(parse("next friday"), at(2024, 3, 22, 0, 0, 0));
        assert_eq!(parse("monday"), at(2024, 3, 18, 0, 0, 0));
        assert_eq!(parse("last monday"), at(2024, 3, 11, 0, 0, 0));
        assert_eq!(parse("last friday"), at(2024, 3, 8, 0, 0, 0));
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse("dec 15"), at(2024, 12, 15, 0, 0, 0));
        assert_eq!(parse("15 dec"), at(2024, 12, 15, 0, 0, 0));
        assert_eq!(parse("March 15, 2023"), at(2023, 3, 15, 0, 0, 0));
        assert_eq!(parse("15 March 2023"), at(2023, 3, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_us_dates() {
        assert_eq!(parse("12/15/2024"), at(2024, 12, 15, 0, 0, 0));
        assert_eq!(parse("12/15/24"), at(2024, 12, 15, 0, 0, 0));
        assert_eq!(parse("12/15"), at(2024, 12, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_time_12hour() {
        assert_eq!(parse_time("3pm"), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_time("3:30pm"), NaiveTime::from_hms_opt(15, 30, 0));
        assert_eq!(parse_time("3:30:15 pm"), NaiveTime::from_hms_opt(15, 30, 15));
        assert_eq!(parse_time("12am"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time("12pm"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_time("13pm"), None);
    }

    #[test]
    fn test_parse_time_24hour() {
        assert_eq!(parse_time("15:00"), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_time("09:30:05"), NaiveTime::from_hms_opt(9, 30, 5));
    }

    #[test]
    fn test_time_only_uses_today() {
        assert_eq!(parse("15:00"), at(2024, 3, 15, 15, 0, 0));
        assert_eq!(parse("noon"), at(2024, 3, 15, 12, 0, 0));
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(parse("tomorrow 3pm"), at(2024, 3, 16, 15, 0, 0));
        assert_eq!(parse("dec 15 at 9:30 am"), at(2024, 12, 15, 9, 30, 0));
        assert_eq!(parse("12/15/2024 17:45"), at(2024, 12, 15, 17, 45, 0));
    }

    #[test]
    fn test_unparseable_is_an_error() {
        for input in ["", "   ", "not a date", "2024-13-45", "31/31/2024", "sometime"] {
            let err = parse_datetime_at(input, now()).unwrap_err();
            assert!(
                matches!(&err, TimeCraftError::Parse { value } if value == input),
                "unexpected error for {input:?}: {err}"
            );
        }
    }

    #[test]
    fn test_date_input_forms_agree() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let structured = DateInput::from(date).resolve_at(now()).unwrap();
        let text = DateInput::from("2024-03-15").resolve_at(now()).unwrap();
        assert_eq!(structured, text);
        assert!(DateInput::from(date).is_structured());
        assert!(!DateInput::from("2024-03-15").is_structured());
    }

    #[test]
    fn test_date_input_time_takes_today() {
        let time = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
        assert_eq!(
            DateInput::from(time).resolve_at(now()).unwrap(),
            at(2024, 3, 15, 8, 15, 0)
        );
    }

    #[test]
    fn test_date_input_from_zoned_datetime() {
        let zoned = chrono::Utc.with_ymd_and_hms(2024, 3, 15, 14, 5, 9).unwrap();
        assert_eq!(
            DateInput::from(zoned),
            DateInput::DateTime(at(2024, 3, 15, 14, 5, 9))
        );
    }
}
