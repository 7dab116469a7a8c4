use serde::{Deserialize, Serialize};

use crate::{CalendarError, Field, prelude::*};

/// The inclusive range of values a field can take for a particular date.
/// The minimum must be less than or equal to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{min} - {max}")]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    /// Creates a new range with validation.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidConfiguration` if min > max.
    pub fn new(min: i64, max: i64) -> Result<Self, CalendarError> {
        if min > max {
            return Err(CalendarError::InvalidConfiguration(format!(
                "Invalid value range: min ({min}) is after max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Creates a range known to be ordered
    pub(crate) const fn of(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Returns the smallest valid value
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Returns the largest valid value
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Checks if the range contains a given value
    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks that `value` is valid for `field`, returning it unchanged.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` naming `field` if the value is outside the range.
    pub fn check(&self, value: i64, field: Field) -> Result<i64, CalendarError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(CalendarError::invalid(field, value, *self))
        }
    }

    /// Checks that `value` is valid for `field` and narrows it to `i32`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if the value is outside the range or `i32`.
    pub fn check_i32(&self, value: i64, field: Field) -> Result<i32, CalendarError> {
        let value = self.check(value, field)?;
        i32::try_from(value).map_err(|_| CalendarError::invalid(field, value, *self))
    }
}

impl TryFrom<(i64, i64)> for ValueRange {
    type Error = CalendarError;

    fn try_from((min, max): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<ValueRange> for (i64, i64) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}
