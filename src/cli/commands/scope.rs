//! The scope command: render (and optionally run) a scoped query.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::config::ScopeConfig;
use crate::error::TimeCraftError;
use crate::output::format_query;
use crate::scopes::{AnyRecord, DateScopes, SqlQuery, Window};

/// Execute scope command
///
/// Applies `window`, or the `start`..=`end` range when no window is given,
/// to a query on `table`. With `database` the query is also run and its
/// matching rows counted.
///
/// # Errors
///
/// Returns an error if no field resolves, a column or table is not a plain
/// identifier, a range bound cannot be parsed, or the database query fails.
pub fn scope(
    config: &ScopeConfig,
    window: Option<Window>,
    table: &str,
    field: Option<&str>,
    range: Option<(&str, &str)>,
    database: Option<&Path>,
    format: OutputFormat,
) -> Result<String, TimeCraftError> {
    let scopes = DateScopes::<AnyRecord>::new(config.clone());
    let query = SqlQuery::table(table);

    let (name, query) = match (window, range) {
        (Some(window), _) => (window.name(), scopes.apply(window, query, field)?),
        (None, Some((start, end))) => (
            "between_dates",
            scopes.between_dates(query, start, end, field)?,
        ),
        (None, None) => {
            return Err(TimeCraftError::Config(
                "Pass a window, or both --start and --end".to_string(),
            ))
        },
    };
    let field = scopes.field(field)?;

    let count = database.map(|path| count_rows(&query, path)).transpose()?;
    format_query(name, field, &query, count, format)
}

fn count_rows(query: &SqlQuery, path: &Path) -> Result<u64, TimeCraftError> {
    debug!(path = %path.display(), "opening database");
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    query.count(&conn)
}
