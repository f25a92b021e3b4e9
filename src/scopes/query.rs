//! The query-builder seam the scopes write into.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::core::SQL_DATE_TIME_FORMAT;

/// Comparison operators for date constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparison {
    /// Equality (=)
    #[serde(rename = "=")]
    Equal,
    /// Inequality (!=)
    #[serde(rename = "!=")]
    NotEqual,
    /// Less than (<)
    #[serde(rename = "<")]
    LessThan,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// Greater than (>)
    #[serde(rename = ">")]
    GreaterThan,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
}

impl Comparison {
    /// The SQL spelling of this operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// Evaluate `left <op> right`.
    #[must_use]
    pub fn holds<T: PartialOrd>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Equal => left == right,
            Self::NotEqual => left != right,
            Self::LessThan => left < right,
            Self::LessThanOrEqual => left <= right,
            Self::GreaterThan => left > right,
            Self::GreaterThanOrEqual => left >= right,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One constraint a scope adds to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// `date(field) <op> value`
    Date {
        field: String,
        comparison: Comparison,
        value: NaiveDate,
    },
    /// `field BETWEEN low AND high`, compared as text.
    Between {
        field: String,
        low: String,
        high: String,
    },
    /// `month(field) = month`
    Month { field: String, month: u32 },
    /// `year(field) = year`
    Year { field: String, year: i32 },
}

impl Constraint {
    /// The column this constraint reads.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Date { field, .. }
            | Self::Between { field, .. }
            | Self::Month { field, .. }
            | Self::Year { field, .. } => field,
        }
    }

    /// Evaluate against a stored value the way SQLite would.
    ///
    /// Range bounds compare as `YYYY-MM-DD HH:MM:SS` text, so a date-only
    /// upper bound excludes later times on that day.
    #[must_use]
    pub fn matches(&self, value: NaiveDateTime) -> bool {
        match self {
            Self::Date {
                comparison, value: expected, ..
            } => comparison.holds(&value.date(), expected),
            Self::Between { low, high, .. } => {
                let text = value.format(SQL_DATE_TIME_FORMAT).to_string();
                low.as_str() <= text.as_str() && text.as_str() <= high.as_str()
            },
            Self::Month { month, .. } => value.month() == *month,
            Self::Year { year, .. } => value.year() == *year,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date {
                field,
                comparison,
                value,
            } => write!(f, "date({field}) {comparison} {value}"),
            Self::Between { field, low, high } => {
                write!(f, "{field} between {low} and {high}")
            },
            Self::Month { field, month } => write!(f, "month({field}) = {month}"),
            Self::Year { field, year } => write!(f, "year({field}) = {year}"),
        }
    }
}

/// A query under construction that accepts date constraints.
///
/// Scopes only ever add constraints and hand the same query back.
pub trait DateQuery: Sized {
    /// Constrain the date part of `field`.
    #[must_use]
    fn where_date(self, field: &str, comparison: Comparison, value: NaiveDate) -> Self;

    /// Constrain `field` to the inclusive range `[low, high]`.
    #[must_use]
    fn where_between(self, field: &str, low: &str, high: &str) -> Self;

    /// Constrain the month (1-12) of `field`.
    #[must_use]
    fn where_month(self, field: &str, month: u32) -> Self;

    /// Constrain the year of `field`.
    #[must_use]
    fn where_year(self, field: &str, year: i32) -> Self;

    /// Add a prebuilt constraint.
    #[must_use]
    fn constrain(self, constraint: &Constraint) -> Self {
        match constraint {
            Constraint::Date {
                field,
                comparison,
                value,
            } => self.where_date(field, *comparison, *value),
            Constraint::Between { field, low, high } => self.where_between(field, low, high),
            Constraint::Month { field, month } => self.where_month(field, *month),
            Constraint::Year { field, year } => self.where_year(field, *year),
        }
    }
}

/// Records constraints without rendering them anywhere.
impl DateQuery for Vec<Constraint> {
    fn where_date(mut self, field: &str, comparison: Comparison, value: NaiveDate) -> Self {
        self.push(Constraint::Date {
            field: field.to_string(),
            comparison,
            value,
        });
        self
    }

    fn where_between(mut self, field: &str, low: &str, high: &str) -> Self {
        self.push(Constraint::Between {
            field: field.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        });
        self
    }

    fn where_month(mut self, field: &str, month: u32) -> Self {
        self.push(Constraint::Month {
            field: field.to_string(),
            month,
        });
        self
    }

    fn where_year(mut self, field: &str, year: i32) -> Self {
        self.push(Constraint::Year {
            field: field.to_string(),
            year,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_comparison_holds() {
        assert!(Comparison::Equal.holds(&1, &1));
        assert!(Comparison::NotEqual.holds(&1, &2));
        assert!(Comparison::LessThan.holds(&1, &2));
        assert!(Comparison::LessThanOrEqual.holds(&2, &2));
        assert!(Comparison::GreaterThan.holds(&3, &2));
        assert!(Comparison::GreaterThanOrEqual.holds(&2, &2));
        assert!(!Comparison::GreaterThanOrEqual.holds(&1, &2));
    }

    #[test]
    fn test_date_constraint_ignores_time() {
        let constraint = Constraint::Date {
            field: "created_at".to_string(),
            comparison: Comparison::Equal,
            value: date(2024, 3, 15),
        };
        assert!(constraint.matches(at(2024, 3, 15, 0, 0, 0)));
        assert!(constraint.matches(at(2024, 3, 15, 23, 59, 59)));
        assert!(!constraint.matches(at(2024, 3, 16, 0, 0, 0)));
    }

    #[test]
    fn test_between_compares_as_text() {
        let constraint = Constraint::Between {
            field: "created_at".to_string(),
            low: "2024-03-01".to_string(),
            high: "2024-03-10".to_string(),
        };
        assert!(constraint.matches(at(2024, 3, 1, 0, 0, 0)));
        assert!(constraint.matches(at(2024, 3, 9, 23, 0, 0)));
        // "2024-03-10 00:00:00" sorts after "2024-03-10"
        assert!(!constraint.matches(at(2024, 3, 10, 0, 0, 0)));
    }

    #[test]
    fn test_month_and_year_constraints() {
        let month = Constraint::Month {
            field: "f".to_string(),
            month: 3,
        };
        let year = Constraint::Year {
            field: "f".to_string(),
            year: 2024,
        };
        assert!(month.matches(at(2023, 3, 1, 0, 0, 0)));
        assert!(!month.matches(at(2024, 4, 1, 0, 0, 0)));
        assert!(year.matches(at(2024, 12, 31, 23, 59, 59)));
        assert!(!year.matches(at(2023, 12, 31, 23, 59, 59)));
    }

    #[test]
    fn test_vec_records_constraints_in_order() {
        let query = Vec::<Constraint>::new()
            .where_month("created_at", 2)
            .where_year("created_at", 2024);
        assert_eq!(
            query,
            vec![
                Constraint::Month {
                    field: "created_at".to_string(),
                    month: 2
                },
                Constraint::Year {
                    field: "created_at".to_string(),
                    year: 2024
                },
            ]
        );
    }

    #[test]
    fn test_constrain_dispatches() {
        let constraint = Constraint::Between {
            field: "paid_at".to_string(),
            low: "a".to_string(),
            high: "b".to_string(),
        };
        let query = Vec::<Constraint>::new().constrain(&constraint);
        assert_eq!(query, vec![constraint]);
    }

    #[test]
    fn test_display() {
        let constraint = Constraint::Date {
            field: "created_at".to_string(),
            comparison: Comparison::GreaterThanOrEqual,
            value: date(2024, 3, 8),
        };
        assert_eq!(constraint.to_string(), "date(created_at) >= 2024-03-08");
        assert_eq!(constraint.field(), "created_at");
    }
}
