use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};

use crate::{Calendar, CalendarError, Date, Field, Unit, ValueRange};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_DAY: i64 = 86_400 * NANOS_PER_SECOND;

/// A date in calendar `C` with a time of day.
///
/// Time fields and units are handled here; date fields and units go to the
/// [`Date`], with time arithmetic carrying whole days into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "C: Calendar")]
pub struct DateTime<C: Calendar> {
    date: Date<C>,
    time: NaiveTime,
}

fn nano_of_day(time: NaiveTime) -> i64 {
    // leap seconds read as the last nanosecond of their second
    let nanos = i64::from(time.nanosecond()).min(NANOS_PER_SECOND - 1);
    i64::from(time.num_seconds_from_midnight()) * NANOS_PER_SECOND + nanos
}

fn time_of(nano_of_day: i64) -> Result<NaiveTime, CalendarError> {
    let seconds = u32::try_from(nano_of_day / NANOS_PER_SECOND).map_err(|_| CalendarError::Overflow)?;
    let nanos = u32::try_from(nano_of_day % NANOS_PER_SECOND).map_err(|_| CalendarError::Overflow)?;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).ok_or(CalendarError::Overflow)
}

const fn unit_nanos(unit: Unit) -> Option<i64> {
    match unit {
        Unit::Nanos => Some(1),
        Unit::Micros => Some(1_000),
        Unit::Millis => Some(1_000_000),
        Unit::Seconds => Some(NANOS_PER_SECOND),
        Unit::Minutes => Some(60 * NANOS_PER_SECOND),
        Unit::Hours => Some(3_600 * NANOS_PER_SECOND),
        Unit::HalfDays => Some(43_200 * NANOS_PER_SECOND),
        _ => None,
    }
}

const fn time_range(field: Field) -> Option<ValueRange> {
    match field {
        Field::NanoOfDay => Some(ValueRange::of(0, NANOS_PER_DAY - 1)),
        Field::SecondOfMinute | Field::MinuteOfHour => Some(ValueRange::of(0, 59)),
        Field::HourOfDay => Some(ValueRange::of(0, 23)),
        Field::AmPmOfDay => Some(ValueRange::of(0, 1)),
        _ => None,
    }
}

impl<C: Calendar> DateTime<C> {
    pub const fn new(date: Date<C>, time: NaiveTime) -> Self {
        Self { date, time }
    }

    pub const fn date(&self) -> &Date<C> {
        &self.date
    }

    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn with_date(&self, date: Date<C>) -> Self {
        Self::new(date, self.time)
    }

    pub fn with_time(&self, time: NaiveTime) -> Self {
        Self::new(self.date.clone(), time)
    }

    pub const fn is_supported_field(&self, field: Field) -> bool {
        field.is_date_based() || time_range(field).is_some()
    }

    pub const fn is_supported_unit(&self, unit: Unit) -> bool {
        unit.is_date_based() || unit_nanos(unit).is_some()
    }

    /// Reads a date or time field.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for instant fields.
    pub fn get(&self, field: Field) -> Result<i64, CalendarError> {
        let time = self.time;
        match field {
            Field::NanoOfDay => Ok(nano_of_day(time)),
            Field::SecondOfMinute => Ok(i64::from(time.second())),
            Field::MinuteOfHour => Ok(i64::from(time.minute())),
            Field::HourOfDay => Ok(i64::from(time.hour())),
            Field::AmPmOfDay => Ok(i64::from(time.hour12().0)),
            _ => self.date.get(field),
        }
    }

    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for instant fields.
    pub fn range(&self, field: Field) -> Result<ValueRange, CalendarError> {
        time_range(field).map_or_else(|| self.date.range(field), Ok)
    }

    /// Sets a field. Time fields are checked against their range; date
    /// fields follow the lenient rules of [`Date::with`].
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for an out-of-range time field,
    /// plus the errors of [`Date::with`].
    pub fn with(&self, field: Field, value: i64) -> Result<Self, CalendarError> {
        let Some(range) = time_range(field) else {
            return Ok(self.with_date(self.date.with(field, value)?));
        };
        range.check(value, field)?;
        let current = self.get(field)?;
        let scale = match field {
            Field::SecondOfMinute => NANOS_PER_SECOND,
            Field::MinuteOfHour => 60 * NANOS_PER_SECOND,
            Field::HourOfDay => 3_600 * NANOS_PER_SECOND,
            Field::AmPmOfDay => 43_200 * NANOS_PER_SECOND,
            _ => 1,
        };
        let nanos = nano_of_day(self.time) + (value - current) * scale;
        Ok(self.with_time(time_of(nanos)?))
    }

    /// Adds an amount of any supported unit; time units carry into days.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedUnit` for `Forever`, plus the
    /// errors of [`Date::plus`].
    pub fn plus(&self, amount: i64, unit: Unit) -> Result<Self, CalendarError> {
        let Some(nanos) = unit_nanos(unit) else {
            return Ok(self.with_date(self.date.plus(amount, unit)?));
        };
        let total = i128::from(nano_of_day(self.time)) + i128::from(amount) * i128::from(nanos);
        let day = i128::from(NANOS_PER_DAY);
        let days = i64::try_from(total.div_euclid(day)).map_err(|_| CalendarError::Overflow)?;
        let nano_of_day = i64::try_from(total.rem_euclid(day)).map_err(|_| CalendarError::Overflow)?;
        Ok(Self::new(self.date.plus_days(days)?, time_of(nano_of_day)?))
    }

    /// # Errors
    /// As [`DateTime::plus`].
    pub fn minus(&self, amount: i64, unit: Unit) -> Result<Self, CalendarError> {
        self.plus(amount.checked_neg().ok_or(CalendarError::Overflow)?, unit)
    }

    /// Whole units from `self` to `end`.
    ///
    /// For date units, an end time earlier in the day than the start time
    /// means the last day is not complete.
    ///
    /// # Errors
    /// Returns `CalendarError::CalendarMismatch` if the calendars differ and
    /// `CalendarError::UnsupportedUnit` for `Forever`.
    pub fn until(&self, end: &Self, unit: Unit) -> Result<i64, CalendarError> {
        if let Some(nanos) = unit_nanos(unit) {
            let days = self.date.until(&end.date, Unit::Days)?;
            let total = i128::from(days) * i128::from(NANOS_PER_DAY)
                + i128::from(nano_of_day(end.time) - nano_of_day(self.time));
            return i64::try_from(total / i128::from(nanos)).map_err(|_| CalendarError::Overflow);
        }
        let mut end_date = end.date.clone();
        if end_date > self.date && end.time < self.time {
            end_date = end_date.plus_days(-1)?;
        } else if end_date < self.date && end.time > self.time {
            end_date = end_date.plus_days(1)?;
        }
        self.date.until(&end_date, unit)
    }
}

impl<C: Calendar> PartialOrd for DateTime<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.date.partial_cmp(&other.date)? {
            Ordering::Equal => Some(self.time.cmp(&other.time)),
            ordering => Some(ordering),
        }
    }
}

impl<C: Calendar> fmt::Display for DateTime<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}
