//! The scope methods themselves.

use std::marker::PhantomData;

use tracing::debug;

use crate::config::ScopeConfig;
use crate::core::{Clock, DateInput, SystemClock, DATE_FORMAT};
use crate::error::TimeCraftError;
use crate::scopes::query::DateQuery;
use crate::scopes::record::{resolve_field, DateScoped};
use crate::scopes::window::Window;

/// Relative-date scopes for the record type `R`.
///
/// Built once with the global [`ScopeConfig`] and a [`Clock`]; every scope
/// call re-reads the clock and re-resolves the field.
///
/// # Examples
///
/// ```
/// use timecraft::config::ScopeConfig;
/// use timecraft::scopes::{AnyRecord, DateScopes, SqlQuery};
///
/// let scopes = DateScopes::<AnyRecord>::new(ScopeConfig::default());
/// let query = scopes.today(SqlQuery::table("posts"), None).unwrap();
/// let (sql, _params) = query.to_sql().unwrap();
/// assert_eq!(sql, "SELECT * FROM posts WHERE date(created_at) = ?");
/// ```
#[derive(Debug, Clone)]
pub struct DateScopes<R, C = SystemClock> {
    config: ScopeConfig,
    clock: C,
    record: PhantomData<fn() -> R>,
}

impl<R: DateScoped> DateScopes<R, SystemClock> {
    /// Scopes that read the system clock.
    #[must_use]
    pub fn new(config: ScopeConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<R: DateScoped, C: Clock> DateScopes<R, C> {
    /// Scopes that read `clock` for "now".
    #[must_use]
    pub fn with_clock(config: ScopeConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            record: PhantomData,
        }
    }

    /// The injected configuration.
    #[must_use]
    pub const fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Resolve the column a scope call will constrain.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::UnresolvedField`] when no source names one.
    pub fn field<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, TimeCraftError> {
        resolve_field(
            explicit,
            R::date_field(),
            Some(self.config.default_field.as_str()),
        )
    }

    /// Narrow `query` to `window` over the resolved field.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::UnresolvedField`] when no field can be
    /// resolved and [`TimeCraftError::OutOfRange`] at the calendar's edges.
    pub fn apply<Q: DateQuery>(
        &self,
        window: Window,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        let field = self.field(field)?;
        let constraints = window.constraints(field, self.clock.now())?;
        debug!(%window, field, count = constraints.len(), "applying date window");

        Ok(constraints
            .iter()
            .fold(query, |query, constraint| query.constrain(constraint)))
    }

    /// Records whose date is today.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn today<Q: DateQuery>(&self, query: Q, field: Option<&str>) -> Result<Q, TimeCraftError> {
        self.apply(Window::Today, query, field)
    }

    /// Records whose date is yesterday.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn yesterday<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::Yesterday, query, field)
    }

    /// Records dated within the last seven days (or later).
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn one_week_ago<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::OneWeekAgo, query, field)
    }

    /// Records from Monday through Sunday of last week.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn last_week<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::LastWeek, query, field)
    }

    /// Records from Monday through Sunday of this week.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn current_week<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::CurrentWeek, query, field)
    }

    /// Records dated within the last thirty days (or later).
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn one_month_ago<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::OneMonthAgo, query, field)
    }

    /// Records from last calendar month.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn last_month<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::LastMonth, query, field)
    }

    /// Records whose month matches the current month, in any year.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn current_month<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::CurrentMonth, query, field)
    }

    /// Records from last calendar year.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn last_year<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::LastYear, query, field)
    }

    /// Records dated exactly one calendar year before today.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn one_year_ago<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::OneYearAgo, query, field)
    }

    /// Records from this calendar year.
    ///
    /// # Errors
    ///
    /// See [`DateScopes::apply`].
    pub fn current_year<Q: DateQuery>(
        &self,
        query: Q,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        self.apply(Window::CurrentYear, query, field)
    }

    /// Records whose field lies in `[start, end]`, both bounds normalized to
    /// `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCraftError::Parse`] for an unparseable bound, plus the
    /// errors of [`DateScopes::field`].
    pub fn between_dates<Q: DateQuery>(
        &self,
        query: Q,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
        field: Option<&str>,
    ) -> Result<Q, TimeCraftError> {
        let field = self.field(field)?;
        let now = self.clock.now();
        let start = start.into().resolve_at(now)?.format(DATE_FORMAT).to_string();
        let end = end.into().resolve_at(now)?.format(DATE_FORMAT).to_string();
        debug!(field, %start, %end, "applying date range");

        Ok(query.where_between(field, &start, &end))
    }
}
