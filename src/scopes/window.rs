//! Named relative time windows and the constraints they expand to.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;

use crate::core::{shift_days, shift_months, SQL_DATE_TIME_FORMAT};
use crate::error::TimeCraftError;
use crate::scopes::query::{Comparison, Constraint};

/// A named window relative to "now".
///
/// Weeks run Monday 00:00:00 through Sunday 23:59:59. Month and year steps
/// are calendar steps; a day that does not exist in the target month clamps
/// to that month's last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Window {
    /// `date(field) == today`
    Today,
    /// `date(field) == today - 1 day`
    Yesterday,
    /// `date(field) >= today - 7 days`
    OneWeekAgo,
    /// Monday through Sunday of the previous week.
    LastWeek,
    /// Monday through Sunday of this week.
    CurrentWeek,
    /// `date(field) >= today - 30 days`
    OneMonthAgo,
    /// Same month and year as one month ago.
    LastMonth,
    /// Same month as now, in any year.
    CurrentMonth,
    /// Previous calendar year.
    LastYear,
    /// Exactly one calendar year before today.
    OneYearAgo,
    /// This calendar year.
    CurrentYear,
}

impl Window {
    /// Every window, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Today,
        Self::Yesterday,
        Self::OneWeekAgo,
        Self::LastWeek,
        Self::CurrentWeek,
        Self::OneMonthAgo,
        Self::LastMonth,
        Self::CurrentMonth,
        Self::LastYear,
        Self::OneYearAgo,
        Self::CurrentYear,
    ];

    /// The snake_case name of this window.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::OneWeekAgo => "one_week_ago",
            Self::LastWeek => "last_week",
            Self::CurrentWeek => "current_week",
            Self::OneMonthAgo => "one_month_ago",
            Self::LastMonth => "last_month",
            Self::CurrentMonth => "current_month",
            Self::LastYear => "last_year",
            Self::OneYearAgo => "one_year_ago",
            Self::CurrentYear => "current_year",
        }
    }

    /// The constraints this window places on `field` at the moment `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::OutOfRange`] when `now` sits at the edge of
    /// the supported calendar.
    pub fn constraints(
        self,
        field: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<Constraint>, TimeCraftError> {
        let today = now.date();
        let field = field.to_string();

        let constraints = match self {
            Self::Today => vec![on_date(field, Comparison::Equal, today)],
            Self::Yesterday => vec![on_date(field, Comparison::Equal, shift_days(today, -1)?)],
            Self::OneWeekAgo => vec![on_date(
                field,
                Comparison::GreaterThanOrEqual,
                shift_days(today, -7)?,
            )],
            Self::LastWeek => vec![week_of(field, shift_days(today, -7)?)?],
            Self::CurrentWeek => vec![week_of(field, today)?],
            Self::OneMonthAgo => vec![on_date(
                field,
                Comparison::GreaterThanOrEqual,
                shift_days(today, -30)?,
            )],
            Self::LastMonth => {
                let previous = months_before(now, 1)?;
                vec![
                    Constraint::Month {
                        field: field.clone(),
                        month: previous.month(),
                    },
                    Constraint::Year {
                        field,
                        year: previous.year(),
                    },
                ]
            },
            // Month only: a record from the same month of another year matches.
            Self::CurrentMonth => vec![Constraint::Month {
                field,
                month: now.month(),
            }],
            Self::LastYear => vec![Constraint::Year {
                field,
                year: months_before(now, 12)?.year(),
            }],
            Self::OneYearAgo => vec![on_date(
                field,
                Comparison::Equal,
                months_before(now, 12)?.date(),
            )],
            Self::CurrentYear => vec![Constraint::Year {
                field,
                year: now.year(),
            }],
        };

        Ok(constraints)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Window {
    type Err = TimeCraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|window| window.name() == normalized)
            .ok_or_else(|| TimeCraftError::Config(format!("Unknown window: {s}")))
    }
}

fn on_date(field: String, comparison: Comparison, value: NaiveDate) -> Constraint {
    Constraint::Date {
        field,
        comparison,
        value,
    }
}

fn months_before(now: NaiveDateTime, months: i64) -> Result<NaiveDateTime, TimeCraftError> {
    shift_months(now, -months)
        .ok_or_else(|| TimeCraftError::OutOfRange(format!("{now} minus {months} months")))
}

/// Monday of the week containing `date`.
///
/// # Errors
///
/// Returns [`TimeCraftError::OutOfRange`] if that Monday precedes the
/// supported calendar.
pub fn start_of_week(date: NaiveDate) -> Result<NaiveDate, TimeCraftError> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .ok_or_else(|| TimeCraftError::OutOfRange(format!("start of week of {date}")))
}

/// Sunday of the week containing `date`.
///
/// # Errors
///
/// Returns [`TimeCraftError::OutOfRange`] if either end of the week falls
/// outside the supported calendar.
pub fn end_of_week(date: NaiveDate) -> Result<NaiveDate, TimeCraftError> {
    start_of_week(date)?
        .checked_add_days(Days::new(6))
        .ok_or_else(|| TimeCraftError::OutOfRange(format!("end of week of {date}")))
}

/// Monday 00:00:00 through Sunday 23:59:59 of the week containing `date`.
fn week_of(field: String, date: NaiveDate) -> Result<Constraint, TimeCraftError> {
    let first = start_of_week(date)?;
    let last = end_of_week(date)?;
    let end_time = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| TimeCraftError::OutOfRange("23:59:59".to_string()))?;

    Ok(Constraint::Between {
        field,
        low: first
            .and_time(NaiveTime::default())
            .format(SQL_DATE_TIME_FORMAT)
            .to_string(),
        high: last.and_time(end_time).format(SQL_DATE_TIME_FORMAT).to_string(),
    })
}
