//! JSON output formatting for timecraft.

use std::path::Path;

use rusqlite::types::Value;
use serde_json::json;

use crate::config::Config;
use crate::error::TimeCraftError;
use crate::scopes::SqlQuery;

/// Format a helper result as JSON
///
/// # Errors
///
/// Returns `TimeCraftError::Json` if JSON serialization fails.
pub fn format_value_json(
    command: &str,
    input: &str,
    value: &str,
) -> Result<String, TimeCraftError> {
    let output = json!({
        "command": command,
        "input": input,
        "result": value
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a yes/no answer as JSON
///
/// # Errors
///
/// Returns `TimeCraftError::Json` if JSON serialization fails.
pub fn format_flag_json(
    command: &str,
    input: &str,
    value: bool,
) -> Result<String, TimeCraftError> {
    let output = json!({
        "command": command,
        "input": input,
        "result": value
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a scoped query as JSON
///
/// # Errors
///
/// Returns `TimeCraftError::InvalidIdentifier` or `InvalidField` if the
/// query cannot be rendered, and `TimeCraftError::Json` if JSON
/// serialization fails.
pub fn format_query_json(
    scope: &str,
    field: &str,
    query: &SqlQuery,
    count: Option<u64>,
) -> Result<String, TimeCraftError> {
    let (sql, params) = query.to_sql()?;
    let params: Vec<serde_json::Value> = params.iter().map(param_json).collect();

    let mut output = json!({
        "scope": scope,
        "table": query.table_name(),
        "field": field,
        "sql": sql,
        "params": params,
        "constraints": query.constraints()
    });
    if let Some(count) = count {
        output["count"] = json!(count);
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the configuration as JSON
///
/// # Errors
///
/// Returns `TimeCraftError::Json` if JSON serialization fails.
pub fn format_config_json(config: &Config, path: &Path) -> Result<String, TimeCraftError> {
    let output = json!({
        "path": path.display().to_string(),
        "exists": path.exists(),
        "config": config
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn param_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Blob(_) => serde_json::Value::Null,
        Value::Integer(n) => json!(n),
        Value::Real(n) => json!(n),
        Value::Text(text) => json!(text),
    }
}
