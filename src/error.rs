//! Error types for the calendrica crate.

use crate::era::AnyEra;
use crate::range::ValueRange;
use crate::types::{Field, Unit};

/// Error type for all fallible calendar operations.
///
/// Validation happens eagerly when a date is built or a field is changed, so
/// no partially valid date is ever observable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A field value lies outside the calendar's valid domain.
    #[error("Invalid value for {field}: {value} (valid values {range})")]
    InvalidValue {
        /// The field that was rejected.
        field: Field,
        /// The rejected value.
        value: i64,
        /// The values the field accepts in this context.
        range: ValueRange,
    },

    /// The field is outside the closed set a calendar understands.
    #[error("Unsupported field: {0}")]
    UnsupportedField(Field),

    /// The unit is outside the closed set a calendar understands.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(Unit),

    /// An era from another calendar family was supplied.
    #[error("Era must be {expected}, found {found}")]
    EraMismatch {
        /// Name of the era type the calendar expects.
        expected: &'static str,
        /// The era that was supplied.
        found: AnyEra,
    },

    /// A configurable calendar was built without a required setting.
    #[error("Missing required configuration: {0}")]
    MissingConfiguration(&'static str),

    /// Two dates carry different calendar configurations.
    #[error("Calendars differ: expected {expected}, found {found}")]
    CalendarMismatch { expected: String, found: String },

    /// A calendar configuration is internally inconsistent.
    #[error("Invalid calendar configuration: {0}")]
    InvalidConfiguration(String),

    /// Integer arithmetic on a caller-supplied amount overflowed.
    #[error("Arithmetic overflow")]
    Overflow,
}

impl CalendarError {
    pub(crate) const fn invalid(field: Field, value: i64, range: ValueRange) -> Self {
        Self::InvalidValue { field, value, range }
    }
}
