//! Relative-date query scopes.
//!
//! A record type opts in through [`DateScoped`]; a [`DateScopes`] built
//! with the global [`ScopeConfig`](crate::config::ScopeConfig) then narrows
//! any [`DateQuery`] to a named [`Window`] over the record's date column.
//!
//! ## Windows
//!
//! | Scope | Constraint |
//! |---|---|
//! | `today` | `date(field) = today` |
//! | `yesterday` | `date(field) = today - 1 day` |
//! | `one_week_ago` | `date(field) >= today - 7 days` |
//! | `last_week` | `field` between Monday and Sunday of last week |
//! | `current_week` | `field` between Monday and Sunday of this week |
//! | `one_month_ago` | `date(field) >= today - 30 days` |
//! | `last_month` | month and year of `field` equal those of a month ago |
//! | `current_month` | month of `field` equals this month (any year) |
//! | `last_year` | year of `field` is last year |
//! | `one_year_ago` | `date(field) = today - 1 year` |
//! | `current_year` | year of `field` is this year |
//! | `between_dates` | `field` between two dates, inclusive |

mod builder;
mod filters;
mod query;
mod record;
mod window;

pub use builder::SqlQuery;
pub use filters::DateScopes;
pub use query::{Comparison, Constraint, DateQuery};
pub use record::{resolve_field, AnyRecord, DateScoped};
pub use window::{end_of_week, start_of_week, Window};
