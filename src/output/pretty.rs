use std::path::Path;

use colored::Colorize;
use rusqlite::types::Value;

use crate::config::Config;
use crate::error::TimeCraftError;
use crate::scopes::SqlQuery;

/// Format a helper result: the bare value, ready for piping
pub fn format_value_pretty(value: &str) -> String {
    value.to_string()
}

/// Format a yes/no answer
pub fn format_flag_pretty(value: bool) -> String {
    value.to_string()
}

/// Format a scoped query as SQL plus its parameters and constraints
///
/// # Errors
///
/// Returns `TimeCraftError::InvalidIdentifier` or `InvalidField` if the
/// query cannot be rendered.
pub fn format_query_pretty(
    scope: &str,
    field: &str,
    query: &SqlQuery,
    count: Option<u64>,
) -> Result<String, TimeCraftError> {
    let (sql, params) = query.to_sql()?;

    let mut output = format!(
        "{} {}\n",
        scope.bold(),
        format!("on {}.{field}", query.table_name()).dimmed()
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!("{}\n", sql.cyan()));

    if !params.is_empty() {
        let params = params.iter().map(param_text).collect::<Vec<_>>().join(", ");
        output.push_str(&format!("  {}: {}\n", "params".dimmed(), params.yellow()));
    }

    for constraint in query.constraints() {
        output.push_str(&format!("  {}: {constraint}\n", "where".dimmed()));
    }

    if let Some(count) = count {
        let rows = if count == 1 { "row" } else { "rows" };
        let matches = format!("{count} {rows}");
        output.push_str(&format!("  {}: {}\n", "matches".dimmed(), matches.green()));
    }

    Ok(output.trim_end().to_string())
}

/// Format the configuration with where it was loaded from
pub fn format_config_pretty(config: &Config, path: &Path) -> String {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    let mut output = format!("{}\n", "Configuration".bold());
    output.push_str(&format!("  {}: {}\n", "File".dimmed(), source));
    output.push_str(&format!(
        "  {}: {}",
        "Default field".dimmed(),
        config.scopes.default_field.cyan()
    ));
    output
}

fn param_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(n) => n.to_string(),
        Value::Text(text) => format!("'{text}'"),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}
