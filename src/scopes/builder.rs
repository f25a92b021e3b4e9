//! A SQLite query builder the scopes can write into.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::{FromSql, Value};
use rusqlite::{Connection, ToSql};
use tracing::debug;

use crate::core::DATE_FORMAT;
use crate::error::TimeCraftError;
use crate::scopes::query::{Comparison, Constraint, DateQuery};

static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // "column" or "table.column"
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .unwrap_or_else(|e| panic!("Invalid identifier regex: {e}"))
});

/// A `SELECT` against one table, narrowed by date constraints.
///
/// Identifiers are checked when the SQL is rendered; values are always
/// bound as parameters.
///
/// ```
/// use timecraft::scopes::{Comparison, DateQuery, SqlQuery};
/// use chrono::NaiveDate;
///
/// let since = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let query = SqlQuery::table("orders")
///     .where_date("placed_at", Comparison::GreaterThanOrEqual, since)
///     .where_year("placed_at", 2024);
/// let (sql, params) = query.to_sql().unwrap();
/// assert_eq!(
///     sql,
///     "SELECT * FROM orders WHERE date(placed_at) >= ? \
///      AND CAST(strftime('%Y', placed_at) AS INTEGER) = ?"
/// );
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    table: String,
    constraints: Vec<Constraint>,
}

impl SqlQuery {
    /// Start a query on `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            constraints: Vec::new(),
        }
    }

    /// The table this query reads.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Constraints added so far, in order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Render `SELECT * FROM table WHERE ...` with its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::InvalidIdentifier`] for a bad table name and
    /// [`TimeCraftError::InvalidField`] for a bad date column.
    pub fn to_sql(&self) -> Result<(String, Vec<Value>), TimeCraftError> {
        self.select_sql("*")
    }

    /// Render `SELECT COUNT(*) FROM table WHERE ...` with its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::InvalidIdentifier`] for a bad table name and
    /// [`TimeCraftError::InvalidField`] for a bad date column.
    pub fn to_count_sql(&self) -> Result<(String, Vec<Value>), TimeCraftError> {
        self.select_sql("COUNT(*)")
    }

    /// Count matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::InvalidIdentifier`] or
    /// [`TimeCraftError::InvalidField`] for bad names and
    /// [`TimeCraftError::Database`] if SQLite rejects the query.
    pub fn count(&self, conn: &Connection) -> Result<u64, TimeCraftError> {
        let (sql, params) = self.to_count_sql()?;
        debug!(%sql, params = params.len(), "counting rows");

        let mut stmt = conn.prepare(&sql)?;
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let count: i64 = stmt.query_row(params_ref.as_slice(), |row| row.get(0))?;

        u64::try_from(count).map_err(|e| TimeCraftError::Database(format!("Bad row count: {e}")))
    }

    /// Read one column from every matching row.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::InvalidIdentifier`] or
    /// [`TimeCraftError::InvalidField`] for bad names and
    /// [`TimeCraftError::Database`] if SQLite rejects the query or a value
    /// does not convert to `T`.
    pub fn pluck<T: FromSql>(
        &self,
        conn: &Connection,
        column: &str,
    ) -> Result<Vec<T>, TimeCraftError> {
        let column = identifier(column)?;
        let (sql, params) = self.select_sql(column)?;
        debug!(%sql, params = params.len(), "plucking column");

        let mut stmt = conn.prepare(&sql)?;
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt.query_map(params_ref.as_slice(), |row| row.get(0))?;

        rows.collect::<Result<Vec<T>, _>>().map_err(TimeCraftError::from)
    }

    fn select_sql(&self, projection: &str) -> Result<(String, Vec<Value>), TimeCraftError> {
        let mut sql = format!("SELECT {projection} FROM {}", identifier(&self.table)?);
        let mut params = Vec::new();

        let clauses = self
            .constraints
            .iter()
            .map(|constraint| clause_sql(constraint, &mut params))
            .collect::<Result<Vec<_>, _>>()?;

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        Ok((sql, params))
    }
}

fn identifier(name: &str) -> Result<&str, TimeCraftError> {
    if IDENTIFIER_PATTERN.is_match(name) {
        Ok(name)
    } else {
        Err(TimeCraftError::InvalidIdentifier(name.to_string()))
    }
}

fn clause_sql(constraint: &Constraint, params: &mut Vec<Value>) -> Result<String, TimeCraftError> {
    let field = identifier(constraint.field())
        .map_err(|_| TimeCraftError::InvalidField(constraint.field().to_string()))?;

    Ok(match constraint {
        Constraint::Date {
            comparison, value, ..
        } => {
            params.push(Value::Text(value.format(DATE_FORMAT).to_string()));
            format!("date({field}) {} ?", comparison.as_sql())
        },
        Constraint::Between { low, high, .. } => {
            params.push(Value::Text(low.clone()));
            params.push(Value::Text(high.clone()));
            format!("{field} BETWEEN ? AND ?")
        },
        Constraint::Month { month, .. } => {
            params.push(Value::Integer(i64::from(*month)));
            format!("CAST(strftime('%m', {field}) AS INTEGER) = ?")
        },
        Constraint::Year { year, .. } => {
            params.push(Value::Integer(i64::from(*year)));
            format!("CAST(strftime('%Y', {field}) AS INTEGER) = ?")
        },
    })
}

impl DateQuery for SqlQuery {
    fn where_date(mut self, field: &str, comparison: Comparison, value: chrono::NaiveDate) -> Self {
        self.constraints = self.constraints.where_date(field, comparison, value);
        self
    }

    fn where_between(mut self, field: &str, low: &str, high: &str) -> Self {
        self.constraints = self.constraints.where_between(field, low, high);
        self
    }

    fn where_month(mut self, field: &str, month: u32) -> Self {
        self.constraints = self.constraints.where_month(field, month);
        self
    }

    fn where_year(mut self, field: &str, year: i32) -> Self {
        self.constraints = self.constraints.where_year(field, year);
        self
    }
}
