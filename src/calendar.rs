//! The kernel every calendar implements, and the factories built on it.
//!
//! A kernel only knows how to place `(year, month, day)` on the epoch-day
//! axis and back, plus the shape of its years and months. Everything else
//! (field access, lenient `with`, unit arithmetic, spans) lives once in
//! [`Date`] and works for every kernel.

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};

use crate::consts::DAYS_IN_WEEK;
use crate::era::{AnyEra, Era};
use crate::{CalendarError, Date, Field, MonthDay, ValueRange, iso};

/// A calendar system: the conversion kernel plus its year and month shape.
///
/// Calendars are small immutable values. Fixed calendars are unit structs;
/// configurable ones carry their configuration, which takes part in
/// equality so dates of differently configured calendars never mix.
pub trait Calendar:
    Clone + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// The era family of this calendar
    type Era: Era;

    /// Stable identifier, also the first word of a date's display form
    fn id(&self) -> Cow<'static, str>;

    /// CLDR calendar type, where one is defined
    fn calendar_type(&self) -> Option<&'static str> {
        None
    }

    /// Supported proleptic years
    fn year_range(&self) -> ValueRange;

    fn days_in_week(&self) -> u8 {
        DAYS_IN_WEEK
    }

    fn months_in_year(&self, year: i32) -> u8;

    /// Whether every year has the same number of months
    fn has_fixed_month_count(&self) -> bool {
        true
    }

    fn is_leap_year(&self, year: i32) -> bool;

    /// Number of days belonging to a month
    fn length_of_month(&self, year: i32, month: u8) -> u8;

    /// Highest day number a month accepts; differs from the length only
    /// where days were skipped
    fn last_day_of_month(&self, year: i32, month: u8) -> u8 {
        self.length_of_month(year, month)
    }

    fn length_of_year(&self, year: i32) -> u16 {
        let days = self.year_start(year + 1) - self.year_start(year);
        u16::try_from(days).unwrap_or(u16::MAX)
    }

    /// Epoch day of a date already known to be valid
    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64;

    /// Date of an epoch day already known to be in range
    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay);

    /// Epoch day of the first day of a year
    fn year_start(&self, year: i32) -> i64 {
        self.to_epoch_day(year, MonthDay::ordinary(1, 1))
    }

    /// Validates numeric fields and returns the canonical date they name.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` naming the first invalid field.
    fn resolve(&self, year: i32, month: u8, day: u8) -> Result<(i32, MonthDay), CalendarError> {
        self.check_ordinary(year, month, day)?;
        Ok((year, MonthDay::ordinary(month, day)))
    }

    /// Range checks for a date on the regular month grid.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` naming the year, month or day.
    fn check_ordinary(&self, year: i32, month: u8, day: u8) -> Result<(), CalendarError> {
        self.year_range().check(i64::from(year), Field::Year)?;
        let months = self.months_in_year(year);
        ValueRange::of(1, i64::from(months)).check(i64::from(month), Field::MonthOfYear)?;
        let last = self.last_day_of_month(year, month);
        ValueRange::of(1, i64::from(last)).check(i64::from(day), Field::DayOfMonth)?;
        Ok(())
    }

    fn is_valid(&self, year: i32, month: u8, day: u8) -> bool {
        self.resolve(year, month, day).is_ok()
    }

    /// Months since year zero of a month
    fn proleptic_month(&self, year: i32, month: u8) -> i64 {
        i64::from(year) * i64::from(self.months_in_year(year)) + i64::from(month) - 1
    }

    /// Inverse of [`Calendar::proleptic_month`]; the year is unchecked
    fn from_proleptic_month(&self, proleptic_month: i64) -> (i64, u8) {
        let months = i64::from(self.months_in_year(1));
        let month = proleptic_month.rem_euclid(months) + 1;
        (proleptic_month.div_euclid(months), month as u8)
    }

    /// Month and day a date keeps when moved to another year, before
    /// end-of-month clamping.
    ///
    /// Epagomenal days survive when the target year has them and otherwise
    /// fall back to the ordinary day before them.
    fn shift_years(&self, _from_year: i32, month_day: MonthDay, to_year: i32) -> MonthDay {
        match month_day {
            MonthDay::Ordinary { .. } => month_day,
            MonthDay::Epagomenal(kind) => {
                let (month, day) = kind.position();
                if self.is_valid(to_year, month, day) {
                    month_day
                } else {
                    let (month, day) = kind.anchor();
                    MonthDay::ordinary(month, day)
                }
            }
        }
    }

    /// ISO day-of-week of an ordinary day; calendars with their own week
    /// override this
    fn day_of_week(&self, _year: i32, _month_day: MonthDay, epoch_day: i64) -> u8 {
        iso::day_of_week(epoch_day)
    }

    /// Position of an ordinary day in its month's week grid
    fn grid_day_of_month(&self, _year: i32, month_day: MonthDay) -> u16 {
        u16::from(month_day.day())
    }

    /// Position of an ordinary day in its year's week grid
    fn grid_day_of_year(&self, year: i32, month_day: MonthDay) -> u16 {
        let days = self.to_epoch_day(year, month_day) - self.year_start(year);
        u16::try_from(days + 1).unwrap_or(u16::MAX)
    }

    /// Days of a month that sit on the week grid
    fn grid_length_of_month(&self, year: i32, month: u8) -> u16 {
        u16::from(self.length_of_month(year, month))
    }

    /// Days of a year that sit on the week grid
    fn grid_length_of_year(&self, year: i32) -> u16 {
        self.length_of_year(year)
    }

    /// Epoch days covered by the supported years
    fn epoch_day_range(&self) -> ValueRange {
        let years = self.year_range();
        let first = self.year_start(years.min() as i32);
        let last = self.year_start(years.max() as i32 + 1) - 1;
        ValueRange::of(first, last)
    }

    /// Proleptic months covered by the supported years
    fn proleptic_month_range(&self) -> ValueRange {
        let years = self.year_range();
        let (first, last) = (years.min() as i32, years.max() as i32);
        ValueRange::of(
            self.proleptic_month(first, 1),
            self.proleptic_month(last, self.months_in_year(last)),
        )
    }

    /// Years-of-era that can occur in some era
    fn year_of_era_range(&self) -> ValueRange {
        let years = self.year_range();
        let low = Self::Era::year_of_era(years.min() as i32);
        let high = Self::Era::year_of_era(years.max() as i32);
        ValueRange::of(1, i64::from(low.max(high)))
    }

    /// Creates a date from proleptic year, month and day.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` naming the invalid field.
    fn date(&self, year: i32, month: u8, day: u8) -> Result<Date<Self>, CalendarError> {
        let (year, month_day) = self.resolve(year, month, day)?;
        Ok(Date::new_unchecked(self.clone(), year, month_day))
    }

    /// Creates a date from era, year-of-era, month and day.
    ///
    /// # Errors
    /// Returns `CalendarError::EraMismatch` for an era of another calendar,
    /// or `CalendarError::InvalidValue` naming the invalid field.
    fn date_with_era(
        &self,
        era: impl Into<AnyEra>,
        year_of_era: i32,
        month: u8,
        day: u8,
    ) -> Result<Date<Self>, CalendarError> {
        let year = self.proleptic_year(era, year_of_era)?;
        self.date(year, month, day)
    }

    /// Creates a date from proleptic year and day-of-year.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for an unsupported year or a
    /// day-of-year beyond the length of the year.
    fn date_year_day(&self, year: i32, day_of_year: u16) -> Result<Date<Self>, CalendarError> {
        self.year_range().check(i64::from(year), Field::Year)?;
        let length = self.length_of_year(year);
        ValueRange::of(1, i64::from(length)).check(i64::from(day_of_year), Field::DayOfYear)?;
        let epoch_day = self.year_start(year) + i64::from(day_of_year) - 1;
        let (year, month_day) = self.from_epoch_day(epoch_day);
        Ok(Date::new_unchecked(self.clone(), year, month_day))
    }

    /// Creates the date of an epoch day.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if the day is outside the supported years.
    fn date_epoch_day(&self, epoch_day: i64) -> Result<Date<Self>, CalendarError> {
        self.epoch_day_range().check(epoch_day, Field::EpochDay)?;
        let (year, month_day) = self.from_epoch_day(epoch_day);
        Ok(Date::new_unchecked(self.clone(), year, month_day))
    }

    /// Converts a standard date into this calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if the day is outside the supported years.
    fn date_from_iso(&self, date: NaiveDate) -> Result<Date<Self>, CalendarError> {
        self.date_epoch_day(iso::epoch_day_of(date))
    }

    /// Converts a date of any calendar into this one.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if the day is outside the supported years.
    fn date_from<D: Calendar>(&self, date: &Date<D>) -> Result<Date<Self>, CalendarError> {
        self.date_epoch_day(date.to_epoch_day())
    }

    /// Proleptic year of a year-of-era.
    ///
    /// # Errors
    /// Returns `CalendarError::EraMismatch` for an era of another calendar,
    /// or `CalendarError::InvalidValue` for a year-of-era below 1.
    fn proleptic_year(&self, era: impl Into<AnyEra>, year_of_era: i32) -> Result<i32, CalendarError> {
        let era = Self::Era::try_from(era.into())?;
        self.year_of_era_range()
            .check(i64::from(year_of_era), Field::YearOfEra)?;
        Ok(era.proleptic_year(year_of_era))
    }

    /// Era with the given numeric value.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if no era has that value.
    fn era_of(&self, value: i64) -> Result<Self::Era, CalendarError> {
        Self::Era::of(value)
    }
}
