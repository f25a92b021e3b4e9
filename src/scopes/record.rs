//! Record types that carry a date column, and how that column is chosen.

use crate::error::TimeCraftError;

/// A record type whose queries can be narrowed to a time window.
///
/// Implement this on your entity type. Override [`DateScoped::date_field`]
/// when the type keeps its date somewhere other than the configured
/// default column.
///
/// ```
/// use timecraft::scopes::DateScoped;
///
/// struct Invoice;
///
/// impl DateScoped for Invoice {
///     fn date_field() -> Option<&'static str> {
///         Some("issued_on")
///     }
/// }
///
/// assert_eq!(Invoice::date_field(), Some("issued_on"));
/// ```
pub trait DateScoped {
    /// The column this record type filters on by default.
    fn date_field() -> Option<&'static str> {
        None
    }
}

/// A record type with no override; always uses the configured default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRecord;

impl DateScoped for AnyRecord {}

/// Pick the column to filter on: the explicit argument, then the record
/// type's override, then the global default. Blank names are skipped.
///
/// # Errors
///
/// Returns [`TimeCraftError::UnresolvedField`] when all three are missing
/// or blank.
pub fn resolve_field<'a>(
    explicit: Option<&'a str>,
    record_default: Option<&'a str>,
    global_default: Option<&'a str>,
) -> Result<&'a str, TimeCraftError> {
    [explicit, record_default, global_default]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|field| !field.is_empty())
        .ok_or(TimeCraftError::UnresolvedField)
}
