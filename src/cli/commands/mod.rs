//! Command implementations for timecraft.
//!
//! Every command returns the text to print; `main` does the printing.

mod config;
mod scope;
mod shell;

pub use config::{config, load_config};
pub use scope::scope;
pub use shell::completions;

use crate::cli::args::OutputFormat;
use crate::core::{self, parse_datetime, parse_days};
use crate::error::TimeCraftError;
use crate::output::{format_flag, format_value};

/// Execute format-date command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn format_date(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::format_date(value)?;
    format_value("format_date", value, &result, format)
}

/// Execute format-time command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn format_time(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::format_time(value)?;
    format_value("format_time", value, &result, format)
}

/// Execute format-date-time command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn format_date_time(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::format_date_time(value)?;
    format_value("format_date_time", value, &result, format)
}

/// Execute human command
///
/// Text given to the library helper comes back untouched, so the command
/// parses it first.
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn human(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::human_date_time(parse_datetime(value)?);
    format_value("human_date_time", value, &result, format)
}

/// Execute ago command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn ago(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::format_time_ago(value)?;
    format_value("format_time_ago", value, &result, format)
}

/// Execute start-of-day command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn start_of_day(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::start_of_day(value)?;
    format_value("start_of_day", value, &result, format)
}

/// Execute end-of-day command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn end_of_day(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::end_of_day(value)?;
    format_value("end_of_day", value, &result, format)
}

/// Execute weekend command
///
/// # Errors
///
/// Returns an error if `value` cannot be parsed or output formatting fails.
pub fn weekend(value: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::is_weekend(value)?;
    format_flag("is_weekend", value, result, format)
}

/// Execute add-days command
///
/// # Errors
///
/// Returns an error if `days` is not an integer, `value` cannot be parsed,
/// or the result leaves the supported calendar range.
pub fn add_days(value: &str, days: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::add_days(value, parse_days(days)?)?;
    format_value("add_days", value, &result, format)
}

/// Execute sub-days command
///
/// # Errors
///
/// Returns an error if `days` is not an integer, `value` cannot be parsed,
/// or the result leaves the supported calendar range.
pub fn sub_days(value: &str, days: &str, format: OutputFormat) -> Result<String, TimeCraftError> {
    let result = core::subtract_days(value, parse_days(days)?)?;
    format_value("subtract_days", value, &result, format)
}
