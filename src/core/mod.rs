//! Date/time utilities.
//!
//! Parsing, formatting, and day arithmetic shared by the query scopes and
//! the command-line front end.

pub mod clock;
mod datetime;
mod format;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{parse_datetime, parse_datetime_at, DateInput};
pub use format::{
    add_days, end_of_day, format_date, format_date_time, format_time, format_time_ago,
    format_time_ago_at, human_date_time, is_weekend, parse_days, start_of_day, subtract_days,
    DATE_FORMAT, DATE_TIME_FORMAT, HUMAN_DATE_TIME_FORMAT, SQL_DATE_TIME_FORMAT, TIME_FORMAT,
};

pub(crate) use datetime::shift_months;
pub(crate) use format::shift_days;
