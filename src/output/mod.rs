//! Output formatting for timecraft.
//!
//! This module renders command results as colored text or JSON.

mod json;
mod pretty;

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::TimeCraftError;
use crate::scopes::SqlQuery;

pub use json::*;
pub use pretty::*;

/// Format the result of a single-value helper
///
/// # Errors
///
/// Returns `TimeCraftError::Json` if JSON serialization fails.
pub fn format_value(
    command: &str,
    input: &str,
    value: &str,
    format: OutputFormat,
) -> Result<String, TimeCraftError> {
    match format {
        OutputFormat::Pretty => Ok(format_value_pretty(value)),
        OutputFormat::Json => format_value_json(command, input, value),
    }
}

/// Format a yes/no answer
///
/// # Errors
///
/// Returns `TimeCraftError::Json` if JSON serialization fails.
pub fn format_flag(
    command: &str,
    input: &str,
    value: bool,
    format: OutputFormat,
) -> Result<String, TimeCraftError> {
    match format {
        OutputFormat::Pretty => Ok(format_flag_pretty(value)),
        OutputFormat::Json => format_flag_json(command, input, value),
    }
}

/// Format a scoped query, optionally with the number of rows it matched
///
/// # Errors
///
/// Returns `TimeCraftError::InvalidIdentifier` or `InvalidField` if the
/// query cannot be rendered, and `TimeCraftError::Json` if JSON
/// serialization fails.
pub fn format_query(
    scope: &str,
    field: &str,
    query: &SqlQuery,
    count: Option<u64>,
    format: OutputFormat,
) -> Result<String, TimeCraftError> {
    match format {
        OutputFormat::Pretty => format_query_pretty(scope, field, query, count),
        OutputFormat::Json => format_query_json(scope, field, query, count),
    }
}

/// Format the effective configuration
///
/// # Errors
///
/// Returns `TimeCraftError::Json` if JSON serialization fails.
pub fn format_config(
    config: &Config,
    path: &Path,
    format: OutputFormat,
) -> Result<String, TimeCraftError> {
    match format {
        OutputFormat::Pretty => Ok(format_config_pretty(config, path)),
        OutputFormat::Json => format_config_json(config, path),
    }
}
