use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::era::Era;
use crate::{Calendar, CalendarError, DateTime, EpagomenalDay, Field, MonthDay, Period, Unit, ValueRange, iso};

/// A date in calendar `C`.
///
/// Dates are immutable and always valid: every constructor goes through the
/// calendar's validating factories, and every "mutation" returns a new date.
/// Two dates compare equal when their calendars, years and month-days match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRepr<C>", into = "DateRepr<C>", bound = "C: Calendar")]
pub struct Date<C: Calendar> {
    calendar: C,
    year: i32,
    month_day: MonthDay,
}

/// Serialized form of a date: numeric month and day positions
#[derive(Serialize, Deserialize)]
#[serde(bound = "C: Calendar")]
struct DateRepr<C> {
    calendar: C,
    year: i32,
    month: u8,
    day: u8,
}

impl<C: Calendar> TryFrom<DateRepr<C>> for Date<C> {
    type Error = CalendarError;

    fn try_from(repr: DateRepr<C>) -> Result<Self, Self::Error> {
        repr.calendar.date(repr.year, repr.month, repr.day)
    }
}

impl<C: Calendar> From<Date<C>> for DateRepr<C> {
    fn from(date: Date<C>) -> Self {
        let (month, day) = date.month_day.position();
        Self {
            calendar: date.calendar,
            year: date.year,
            month,
            day,
        }
    }
}

/// Day slots per month when packing a month and day into one number
const PACKED_DAYS: i64 = 256;

fn checked_sub(a: i64, b: i64) -> Result<i64, CalendarError> {
    a.checked_sub(b).ok_or(CalendarError::Overflow)
}

fn checked_mul(a: i64, b: i64) -> Result<i64, CalendarError> {
    a.checked_mul(b).ok_or(CalendarError::Overflow)
}

impl<C: Calendar> Date<C> {
    /// Assembles a date the calendar has already validated
    pub(crate) const fn new_unchecked(calendar: C, year: i32, month_day: MonthDay) -> Self {
        Self {
            calendar,
            year,
            month_day,
        }
    }

    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    /// Returns the proleptic year
    pub const fn year(&self) -> i32 {
        self.year
    }

    pub fn era(&self) -> C::Era {
        C::Era::of_year(self.year)
    }

    pub fn year_of_era(&self) -> i32 {
        C::Era::year_of_era(self.year)
    }

    /// Returns the month number (0 for St. Tib's Day, 13 for Year Day)
    pub const fn month(&self) -> u8 {
        self.month_day.month()
    }

    /// Returns the day number (0 for St. Tib's Day, 29 for Leap/Year Day)
    pub const fn day_of_month(&self) -> u8 {
        self.month_day.day()
    }

    pub const fn month_day(&self) -> MonthDay {
        self.month_day
    }

    pub const fn epagomenal_day(&self) -> Option<EpagomenalDay> {
        self.month_day.epagomenal()
    }

    pub fn to_epoch_day(&self) -> i64 {
        self.calendar.to_epoch_day(self.year, self.month_day)
    }

    pub fn day_of_year(&self) -> u16 {
        let offset = self.to_epoch_day() - self.calendar.year_start(self.year);
        u16::try_from(offset + 1).unwrap_or(u16::MAX)
    }

    /// Day of the calendar's week, 1-based; 0 on days outside the week grid
    pub fn day_of_week(&self) -> u8 {
        if self.month_day.is_epagomenal() {
            return 0;
        }
        self.calendar
            .day_of_week(self.year, self.month_day, self.to_epoch_day())
    }

    pub fn is_leap_year(&self) -> bool {
        self.calendar.is_leap_year(self.year)
    }

    /// Days in this date's month; epagomenal days count with the month they follow
    pub fn length_of_month(&self) -> u8 {
        let (month, _) = self.month_day.anchor();
        self.calendar.length_of_month(self.year, month)
    }

    pub fn length_of_year(&self) -> u16 {
        self.calendar.length_of_year(self.year)
    }

    fn proleptic_month(&self) -> i64 {
        let (month, _) = self.month_day.anchor();
        self.calendar.proleptic_month(self.year, month)
    }

    /// The ordinary day at or before this one
    fn anchor_date(&self) -> Self {
        let (month, day) = self.month_day.anchor();
        Self::new_unchecked(self.calendar.clone(), self.year, MonthDay::ordinary(month, day))
    }

    fn grid_day_of_month(&self) -> Option<i64> {
        (!self.month_day.is_epagomenal())
            .then(|| i64::from(self.calendar.grid_day_of_month(self.year, self.month_day)))
    }

    fn grid_day_of_year(&self) -> Option<i64> {
        (!self.month_day.is_epagomenal())
            .then(|| i64::from(self.calendar.grid_day_of_year(self.year, self.month_day)))
    }

    /// Converts to the standard proleptic Gregorian date.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if the day is beyond chrono's range.
    pub fn to_iso(&self) -> Result<NaiveDate, CalendarError> {
        iso::date_of(self.to_epoch_day())
    }

    /// Converts to the same day in another calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` if the other calendar does not
    /// reach this day.
    pub fn to_calendar<D: Calendar>(&self, calendar: &D) -> Result<Date<D>, CalendarError> {
        calendar.date_from(self)
    }

    /// Combines this date with a time of day
    pub fn at_time(&self, time: NaiveTime) -> DateTime<C> {
        DateTime::new(self.clone(), time)
    }

    pub const fn is_supported_field(&self, field: Field) -> bool {
        field.is_date_based()
    }

    pub const fn is_supported_unit(&self, unit: Unit) -> bool {
        unit.is_date_based()
    }

    /// Reads a field.
    ///
    /// Day-of-week and the aligned fields read 0 on epagomenal days, which sit
    /// outside the week grid.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for time and instant fields.
    pub fn get(&self, field: Field) -> Result<i64, CalendarError> {
        let week = i64::from(self.calendar.days_in_week());
        let value = match field {
            Field::DayOfWeek => i64::from(self.day_of_week()),
            Field::AlignedDayOfWeekInMonth => self.grid_day_of_month().map_or(0, |d| (d - 1) % week + 1),
            Field::AlignedDayOfWeekInYear => self.grid_day_of_year().map_or(0, |d| (d - 1) % week + 1),
            Field::AlignedWeekOfMonth => self.grid_day_of_month().map_or(0, |d| (d - 1) / week + 1),
            Field::AlignedWeekOfYear => self.grid_day_of_year().map_or(0, |d| (d - 1) / week + 1),
            Field::DayOfMonth => i64::from(self.day_of_month()),
            Field::DayOfYear => i64::from(self.day_of_year()),
            Field::EpochDay => self.to_epoch_day(),
            Field::MonthOfYear => i64::from(self.month()),
            Field::ProlepticMonth => self.proleptic_month(),
            Field::YearOfEra => i64::from(self.year_of_era()),
            Field::Year => i64::from(self.year),
            Field::Era => self.era().value(),
            _ => return Err(CalendarError::UnsupportedField(field)),
        };
        Ok(value)
    }

    /// Valid values of a field in the context of this date.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for time and instant fields.
    pub fn range(&self, field: Field) -> Result<ValueRange, CalendarError> {
        let calendar = &self.calendar;
        let week = i64::from(calendar.days_in_week());
        let weeks = |days: u16| (i64::from(days) + week - 1) / week;
        let on_grid = !self.month_day.is_epagomenal();
        let st_tibs = self.epagomenal_day() == Some(EpagomenalDay::StTibsDay);
        let (month, _) = self.month_day.anchor();
        let off_grid = ValueRange::of(0, 0);

        let range = match field {
            Field::DayOfWeek | Field::AlignedDayOfWeekInMonth | Field::AlignedDayOfWeekInYear => {
                if on_grid { ValueRange::of(1, week) } else { off_grid }
            }
            Field::AlignedWeekOfMonth => {
                if on_grid {
                    ValueRange::of(1, weeks(calendar.grid_length_of_month(self.year, month)))
                } else {
                    off_grid
                }
            }
            Field::AlignedWeekOfYear => {
                if on_grid {
                    ValueRange::of(1, weeks(calendar.grid_length_of_year(self.year)))
                } else {
                    off_grid
                }
            }
            Field::DayOfMonth => {
                if st_tibs {
                    off_grid
                } else {
                    ValueRange::of(1, i64::from(calendar.last_day_of_month(self.year, month)))
                }
            }
            Field::DayOfYear => ValueRange::of(1, i64::from(self.length_of_year())),
            Field::EpochDay => calendar.epoch_day_range(),
            Field::MonthOfYear => ValueRange::of(
                i64::from(!st_tibs),
                i64::from(calendar.months_in_year(self.year)),
            ),
            Field::ProlepticMonth => calendar.proleptic_month_range(),
            Field::YearOfEra => calendar.year_of_era_range(),
            Field::Year => calendar.year_range(),
            Field::Era => C::Era::range(),
            _ => return Err(CalendarError::UnsupportedField(field)),
        };
        Ok(range)
    }

    /// Returns a copy with one field set, leniently.
    ///
    /// Values outside the field's usual range are not rejected: the
    /// difference from the current value is added in the field's own unit,
    /// so day-of-month 32 rolls into the next month. Setting a field to its
    /// current value returns the date unchanged. On an epagomenal day the
    /// week, day and month fields count from the ordinary day before it.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedField` for time and instant fields,
    /// `CalendarError::InvalidValue` for an unknown era or a result outside
    /// the supported years, and `CalendarError::Overflow` on overflow.
    pub fn with(&self, field: Field, value: i64) -> Result<Self, CalendarError> {
        let current = self.get(field)?;
        if value == current {
            return Ok(self.clone());
        }
        let base = self.anchor_date();
        let week = i64::from(self.calendar.days_in_week());

        match field {
            Field::DayOfWeek
            | Field::AlignedDayOfWeekInMonth
            | Field::AlignedDayOfWeekInYear
            | Field::DayOfYear => base.plus_days(checked_sub(value, base.get(field)?)?),
            Field::AlignedWeekOfMonth | Field::AlignedWeekOfYear => {
                let weeks = checked_sub(value, base.get(field)?)?;
                base.plus_days(checked_mul(weeks, week)?)
            }
            Field::DayOfMonth => base.with_day_of_month(value),
            Field::EpochDay => self.calendar.date_epoch_day(value),
            Field::MonthOfYear | Field::ProlepticMonth => {
                base.plus_months(checked_sub(value, base.get(field)?)?)
            }
            Field::Year => self.plus_years(checked_sub(value, current)?),
            Field::YearOfEra => {
                let year_of_era = self.calendar.year_of_era_range().check_i32(value, field)?;
                let year = self.era().proleptic_year(year_of_era);
                self.plus_years(i64::from(year) - i64::from(self.year))
            }
            Field::Era => {
                let era = C::Era::of(value)?;
                let year = era.proleptic_year(self.year_of_era());
                self.plus_years(i64::from(year) - i64::from(self.year))
            }
            _ => Err(CalendarError::UnsupportedField(field)),
        }
    }

    /// Day-of-month on an ordinary date: the nearest real day of the month,
    /// then the overflow in days
    fn with_day_of_month(&self, value: i64) -> Result<Self, CalendarError> {
        let (month, _) = self.month_day.anchor();
        let last = self.calendar.last_day_of_month(self.year, month);
        let day = value.clamp(1, i64::from(last));
        let (year, month_day) = self.calendar.resolve(self.year, month, day as u8)?;
        Self::new_unchecked(self.calendar.clone(), year, month_day).plus_days(checked_sub(value, day)?)
    }

    /// Adds an amount of a calendar unit.
    ///
    /// Months and years clamp the day to the end of the target month.
    ///
    /// # Errors
    /// Returns `CalendarError::UnsupportedUnit` for time units and `Forever`,
    /// `CalendarError::InvalidValue` for a result outside the supported
    /// years, and `CalendarError::Overflow` on overflow.
    pub fn plus(&self, amount: i64, unit: Unit) -> Result<Self, CalendarError> {
        match unit {
            Unit::Days => self.plus_days(amount),
            Unit::Weeks => self.plus_weeks(amount),
            Unit::Months => self.plus_months(amount),
            Unit::Eras => {
                if amount == 0 {
                    return Ok(self.clone());
                }
                let era = self.era().value().checked_add(amount).ok_or(CalendarError::Overflow)?;
                self.with(Field::Era, era)
            }
            _ => match unit.years() {
                Some(years) => self.plus_years(checked_mul(amount, years)?),
                None => Err(CalendarError::UnsupportedUnit(unit)),
            },
        }
    }

    /// Subtracts an amount of a calendar unit.
    ///
    /// # Errors
    /// As [`Date::plus`].
    pub fn minus(&self, amount: i64, unit: Unit) -> Result<Self, CalendarError> {
        self.plus(amount.checked_neg().ok_or(CalendarError::Overflow)?, unit)
    }

    /// # Errors
    /// Returns `CalendarError::InvalidValue` for a result outside the supported years.
    pub fn plus_days(&self, days: i64) -> Result<Self, CalendarError> {
        if days == 0 {
            return Ok(self.clone());
        }
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or(CalendarError::Overflow)?;
        self.calendar.date_epoch_day(epoch_day)
    }

    /// Adds whole weeks of the calendar's own week length.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for a result outside the supported years.
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, CalendarError> {
        self.plus_days(checked_mul(weeks, i64::from(self.calendar.days_in_week()))?)
    }

    /// Adds months, clamping the day to the end of the target month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for a result outside the supported years.
    pub fn plus_months(&self, months: i64) -> Result<Self, CalendarError> {
        if months == 0 {
            return Ok(self.clone());
        }
        let calendar = &self.calendar;
        if calendar.has_fixed_month_count() {
            let per_year = i64::from(calendar.months_in_year(self.year));
            if months % per_year == 0 {
                return self.plus_years(months / per_year);
            }
        }
        let (month, day) = self.month_day.anchor();
        let proleptic_month = calendar
            .proleptic_month(self.year, month)
            .checked_add(months)
            .ok_or(CalendarError::Overflow)?;
        calendar
            .proleptic_month_range()
            .check(proleptic_month, Field::ProlepticMonth)?;
        let (year, month) = calendar.from_proleptic_month(proleptic_month);
        self.resolve_previous(year, month, day)
    }

    /// Adds years, keeping month and day and clamping to the end of the month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for a result outside the supported years.
    pub fn plus_years(&self, years: i64) -> Result<Self, CalendarError> {
        if years == 0 {
            return Ok(self.clone());
        }
        let target = i64::from(self.year)
            .checked_add(years)
            .ok_or(CalendarError::Overflow)?;
        let target = self.calendar.year_range().check_i32(target, Field::Year)?;
        match self.calendar.shift_years(self.year, self.month_day, target) {
            MonthDay::Ordinary { month, day } => self.resolve_previous(i64::from(target), month, day),
            epagomenal => Ok(Self::new_unchecked(self.calendar.clone(), target, epagomenal)),
        }
    }

    /// Date for possibly overlong fields, moved back to the last valid month
    /// and day
    fn resolve_previous(&self, year: i64, month: u8, day: u8) -> Result<Self, CalendarError> {
        let calendar = &self.calendar;
        let year = calendar.year_range().check_i32(year, Field::Year)?;
        let month = month.clamp(1, calendar.months_in_year(year));
        let day = day.clamp(1, calendar.last_day_of_month(year, month));
        let (year, month_day) = calendar.resolve(year, month, day)?;
        Ok(Self::new_unchecked(calendar.clone(), year, month_day))
    }

    /// Adds a period: years and months first, then days.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for a result outside the
    /// supported years and `CalendarError::Overflow` on overflow.
    pub fn plus_period(&self, period: Period) -> Result<Self, CalendarError> {
        let calendar = &self.calendar;
        let shifted = if calendar.has_fixed_month_count() {
            self.plus_months(period.total_months(calendar.months_in_year(self.year))?)?
        } else {
            self.plus_years(period.years())?
                .plus_months(period.months())?
        };
        shifted.plus_days(period.days())
    }

    /// Subtracts a period.
    ///
    /// # Errors
    /// As [`Date::plus_period`].
    pub fn minus_period(&self, period: Period) -> Result<Self, CalendarError> {
        self.plus_period(period.negated()?)
    }

    fn check_same_calendar(&self, other: &Self) -> Result<(), CalendarError> {
        if self.calendar == other.calendar {
            Ok(())
        } else {
            Err(CalendarError::CalendarMismatch {
                expected: self.calendar.id().into_owned(),
                found: other.calendar.id().into_owned(),
            })
        }
    }

    fn days_until(&self, end: &Self) -> i64 {
        end.to_epoch_day() - self.to_epoch_day()
    }

    /// Proleptic month and day-of-month packed into one number
    fn packed_month_day(&self) -> i64 {
        self.proleptic_month() * PACKED_DAYS + i64::from(self.day_of_month())
    }

    /// Whole months from `self` to `end`, truncated toward zero: the month
    /// difference, less one when the end day comes before the start day
    fn months_until(&self, end: &Self) -> i64 {
        (end.packed_month_day() - self.packed_month_day()) / PACKED_DAYS
    }

    /// Whole years from `self` to `end`, truncated toward zero
    fn years_until(&self, end: &Self) -> i64 {
        let calendar = &self.calendar;
        if calendar.has_fixed_month_count() {
            return self.months_until(end) / i64::from(calendar.months_in_year(self.year));
        }
        let years = i64::from(end.year) - i64::from(self.year);
        let shifted = calendar.shift_years(self.year, self.month_day, end.year).anchor();
        let end_month_day = end.month_day.anchor();
        if years > 0 && shifted > end_month_day {
            years - 1
        } else if years < 0 && shifted < end_month_day {
            years + 1
        } else {
            years
        }
    }

    /// Whole units from `self` to `end`, negative when `end` is earlier.
    ///
    /// # Errors
    /// Returns `CalendarError::CalendarMismatch` if the calendars differ and
    /// `CalendarError::UnsupportedUnit` for time units and `Forever`.
    pub fn until(&self, end: &Self, unit: Unit) -> Result<i64, CalendarError> {
        self.check_same_calendar(end)?;
        match unit {
            Unit::Days => Ok(self.days_until(end)),
            Unit::Weeks => Ok(self.days_until(end) / i64::from(self.calendar.days_in_week())),
            Unit::Months => Ok(self.months_until(end)),
            Unit::Eras => Ok(end.era().value() - self.era().value()),
            _ => match unit.years() {
                Some(years) => Ok(self.years_until(end) / years),
                None => Err(CalendarError::UnsupportedUnit(unit)),
            },
        }
    }

    /// The period from `self` to `end`.
    ///
    /// `self.plus_period(self.until_period(end)?)` always gives back `end`.
    ///
    /// # Errors
    /// Returns `CalendarError::CalendarMismatch` if the calendars differ.
    pub fn until_period(&self, end: &Self) -> Result<Period, CalendarError> {
        self.check_same_calendar(end)?;
        let calendar = &self.calendar;
        if calendar.has_fixed_month_count() {
            let per_year = i64::from(calendar.months_in_year(self.year));
            let months = self.months_until(end);
            let days = self.plus_months(months)?.days_until(end);
            return Ok(Period::new(months / per_year, months % per_year, days));
        }
        let years = self.years_until(end);
        let shifted = self.plus_years(years)?;
        let months = shifted.months_until(end);
        let days = shifted.plus_months(months)?.days_until(end);
        Ok(Period::new(years, months, days))
    }

    /// Orders two dates of the same calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::CalendarMismatch` if the calendars differ.
    pub fn compare(&self, other: &Self) -> Result<Ordering, CalendarError> {
        self.check_same_calendar(other)?;
        Ok(self.to_epoch_day().cmp(&other.to_epoch_day()))
    }
}

/// Dates of differently configured calendars are unordered.
impl<C: Calendar> PartialOrd for Date<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl<C: Calendar> fmt::Display for Date<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.calendar.id(), self.era(), self.year_of_era())?;
        match self.month_day {
            MonthDay::Ordinary { month, day } => write!(f, "-{month:02}-{day:02}"),
            MonthDay::Epagomenal(kind) => write!(f, " {kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nile::{Coptic, CopticDate};

    fn coptic(year: i32, month: u8, day: u8) -> CopticDate {
        Coptic.date(year, month, day).unwrap()
    }

    #[test]
    fn test_get_fields() {
        let date = coptic(1727, 6, 8);
        assert_eq!(date.get(Field::Year), Ok(1727));
        assert_eq!(date.get(Field::MonthOfYear), Ok(6));
        assert_eq!(date.get(Field::DayOfMonth), Ok(8));
        assert_eq!(date.get(Field::DayOfYear), Ok(158));
        assert_eq!(date.get(Field::AlignedDayOfWeekInMonth), Ok(1));
        assert_eq!(date.get(Field::AlignedWeekOfMonth), Ok(2));
        assert_eq!(date.get(Field::AlignedDayOfWeekInYear), Ok(4));
        assert_eq!(date.get(Field::AlignedWeekOfYear), Ok(23));
        assert_eq!(date.get(Field::ProlepticMonth), Ok(1727 * 13 + 5));
        assert_eq!(date.get(Field::Era), Ok(1));
        // 2011-02-15 was a Tuesday
        assert_eq!(date.get(Field::DayOfWeek), Ok(2));
        assert_eq!(
            date.get(Field::HourOfDay),
            Err(CalendarError::UnsupportedField(Field::HourOfDay))
        );
    }

    #[test]
    fn test_range() {
        let date = coptic(1727, 13, 1);
        assert_eq!(date.range(Field::DayOfMonth), Ok(ValueRange::of(1, 6)));
        assert_eq!(date.range(Field::DayOfYear), Ok(ValueRange::of(1, 366)));
        assert_eq!(date.range(Field::AlignedWeekOfMonth), Ok(ValueRange::of(1, 1)));
        assert_eq!(date.range(Field::AlignedWeekOfYear), Ok(ValueRange::of(1, 53)));
        assert_eq!(coptic(1728, 13, 1).range(Field::DayOfMonth), Ok(ValueRange::of(1, 5)));
        assert_eq!(date.range(Field::MonthOfYear), Ok(ValueRange::of(1, 13)));
        assert_eq!(date.range(Field::Era), Ok(ValueRange::of(0, 1)));
        assert!(date.range(Field::NanoOfDay).is_err());
    }

    #[test]
    fn test_with_lenient_day_of_month() {
        struct TestCase {
            from: (i32, u8, u8),
            field: Field,
            value: i64,
            expected: (i32, u8, u8),
        }

        let cases = [
            TestCase {
                from: (1727, 6, 8),
                field: Field::DayOfMonth,
                value: 30,
                expected: (1727, 6, 30),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::DayOfMonth,
                value: 31,
                expected: (1727, 7, 1),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::DayOfMonth,
                value: 0,
                expected: (1727, 5, 30),
            },
            TestCase {
                from: (1728, 13, 2),
                field: Field::DayOfMonth,
                value: 6,
                expected: (1729, 1, 1),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::MonthOfYear,
                value: 13,
                expected: (1727, 13, 6),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::MonthOfYear,
                value: 14,
                expected: (1728, 1, 8),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::DayOfYear,
                value: 367,
                expected: (1728, 1, 1),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::AlignedWeekOfMonth,
                value: 5,
                expected: (1727, 6, 29),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::DayOfWeek,
                value: 7,
                expected: (1727, 6, 13),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::Year,
                value: 1728,
                expected: (1728, 6, 8),
            },
            TestCase {
                from: (1727, 13, 6),
                field: Field::Year,
                value: 1728,
                expected: (1728, 13, 5),
            },
            TestCase {
                from: (1727, 6, 8),
                field: Field::Era,
                value: 0,
                expected: (-1726, 6, 8),
            },
        ];

        for case in &cases {
            let (y, m, d) = case.from;
            let result = coptic(y, m, d).with(case.field, case.value).unwrap();
            let (y, m, d) = case.expected;
            assert_eq!(result, coptic(y, m, d), "{:?} with {} = {}", case.from, case.field, case.value);
        }
    }

    #[test]
    fn test_with_current_value_is_unchanged() {
        let date = coptic(1727, 6, 8);
        for field in Field::ALL.into_iter().filter(|f| f.is_date_based()) {
            let value = date.get(field).unwrap();
            assert_eq!(date.with(field, value).unwrap(), date, "field {field}");
        }
    }

    #[test]
    fn test_with_rejects_bad_era_and_time_fields() {
        let date = coptic(1727, 6, 8);
        assert!(date.with(Field::Era, 2).is_err());
        assert_eq!(
            date.with(Field::MinuteOfHour, 5),
            Err(CalendarError::UnsupportedField(Field::MinuteOfHour))
        );
    }

    #[test]
    fn test_plus_units() {
        struct TestCase {
            amount: i64,
            unit: Unit,
            expected: (i32, u8, u8),
        }

        let start = coptic(1727, 6, 8);
        let cases = [
            TestCase {
                amount: 0,
                unit: Unit::Days,
                expected: (1727, 6, 8),
            },
            TestCase {
                amount: 8,
                unit: Unit::Days,
                expected: (1727, 6, 16),
            },
            TestCase {
                amount: 3,
                unit: Unit::Weeks,
                expected: (1727, 6, 29),
            },
            TestCase {
                amount: 7,
                unit: Unit::Months,
                expected: (1727, 13, 6),
            },
            TestCase {
                amount: -6,
                unit: Unit::Months,
                expected: (1726, 13, 5),
            },
            TestCase {
                amount: 13,
                unit: Unit::Months,
                expected: (1728, 6, 8),
            },
            TestCase {
                amount: 3,
                unit: Unit::Decades,
                expected: (1757, 6, 8),
            },
            TestCase {
                amount: -1,
                unit: Unit::Centuries,
                expected: (1627, 6, 8),
            },
            TestCase {
                amount: 1,
                unit: Unit::Millennia,
                expected: (2727, 6, 8),
            },
            TestCase {
                amount: -1,
                unit: Unit::Eras,
                expected: (-1726, 6, 8),
            },
        ];

        for case in &cases {
            let (y, m, d) = case.expected;
            assert_eq!(
                start.plus(case.amount, case.unit).unwrap(),
                coptic(y, m, d),
                "plus {} {}",
                case.amount,
                case.unit
            );
        }
    }

    #[test]
    fn test_plus_clamps_to_month_end() {
        // 1727 is a leap year, 1728 is not
        assert_eq!(coptic(1727, 13, 6).plus(1, Unit::Years), Ok(coptic(1728, 13, 5)));
        assert_eq!(coptic(1727, 12, 30).plus(1, Unit::Months), Ok(coptic(1727, 13, 6)));
        assert_eq!(coptic(1728, 12, 30).plus(1, Unit::Months), Ok(coptic(1728, 13, 5)));
    }

    #[test]
    fn test_plus_errors() {
        let date = coptic(1727, 6, 8);
        assert_eq!(
            date.plus(1, Unit::Hours),
            Err(CalendarError::UnsupportedUnit(Unit::Hours))
        );
        assert!(date.plus(1, Unit::Forever).is_err());
        assert!(date.plus(i64::MAX, Unit::Days).is_err());
        assert_eq!(date.minus(i64::MIN, Unit::Days), Err(CalendarError::Overflow));
        assert!(coptic(9999, 1, 1).plus(1, Unit::Years).is_err());
        assert!(date.plus(1, Unit::Eras).is_err());
    }

    #[test]
    fn test_until_units() {
        let start = coptic(1727, 6, 8);
        let end = coptic(1727, 7, 29);
        assert_eq!(start.until(&end, Unit::Days), Ok(51));
        assert_eq!(start.until(&end, Unit::Weeks), Ok(7));
        assert_eq!(start.until(&end, Unit::Months), Ok(1));
        assert_eq!(end.until(&start, Unit::Months), Ok(-1));
        assert_eq!(start.until(&coptic(1728, 6, 7), Unit::Years), Ok(0));
        assert_eq!(start.until(&coptic(1728, 6, 8), Unit::Years), Ok(1));
        assert_eq!(start.until(&coptic(1727, 7, 7), Unit::Months), Ok(0));
        assert_eq!(start.until(&coptic(1727, 5, 9), Unit::Months), Ok(0));
        assert_eq!(start.until(&coptic(1828, 6, 8), Unit::Centuries), Ok(1));
        assert_eq!(start.until(&coptic(1828, 6, 7), Unit::Centuries), Ok(0));

        let month_end = coptic(1727, 12, 30);
        let short_month = coptic(1728, 13, 5);
        assert_eq!(month_end.until(&short_month, Unit::Months), Ok(13));
        assert_eq!(month_end.until(&short_month, Unit::Years), Ok(1));
        assert_eq!(short_month.until(&month_end, Unit::Months), Ok(-13));
        assert_eq!(start.until(&coptic(0, 1, 1), Unit::Eras), Ok(-1));
        assert!(start.until(&end, Unit::Seconds).is_err());
    }

    #[test]
    fn test_until_period_round_trip() {
        struct TestCase {
            start: (i32, u8, u8),
            end: (i32, u8, u8),
            expected: Period,
        }

        let cases = [
            TestCase {
                start: (1727, 6, 8),
                end: (1727, 7, 29),
                expected: Period::new(0, 1, 21),
            },
            TestCase {
                start: (1727, 7, 29),
                end: (1727, 6, 8),
                expected: Period::new(0, -1, -21),
            },
            TestCase {
                start: (1727, 12, 30),
                end: (1728, 13, 5),
                expected: Period::new(1, 0, 5),
            },
            TestCase {
                start: (1726, 13, 5),
                end: (1727, 1, 1),
                expected: Period::new(0, 0, 1),
            },
            TestCase {
                start: (1727, 1, 1),
                end: (1727, 1, 1),
                expected: Period::ZERO,
            },
        ];

        for case in &cases {
            let start = coptic(case.start.0, case.start.1, case.start.2);
            let end = coptic(case.end.0, case.end.1, case.end.2);
            let period = start.until_period(&end).unwrap();
            assert_eq!(period, case.expected, "{start} until {end}");
            assert_eq!(start.plus_period(period).unwrap(), end);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(coptic(1727, 6, 8).to_string(), "Coptic AM 1727-06-08");
        assert_eq!(coptic(-1, 13, 5).to_string(), "Coptic BEFORE_AM 2-13-05");
    }

    #[test]
    fn test_ordering_and_iso() {
        let a = coptic(1727, 6, 8);
        let b = coptic(1727, 7, 29);
        assert!(a < b);
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(a.to_iso(), Ok(NaiveDate::from_ymd_opt(2011, 2, 15).unwrap()));
        assert_eq!(b.to_iso(), Ok(NaiveDate::from_ymd_opt(2011, 4, 7).unwrap()));
    }

    #[test]
    fn test_serde_validates() {
        let date = coptic(1727, 6, 8);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"calendar":null,"year":1727,"month":6,"day":8}"#);
        let parsed: CopticDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let invalid: Result<CopticDate, _> =
            serde_json::from_str(r#"{"calendar":null,"year":1728,"month":13,"day":6}"#);
        assert!(invalid.is_err());
    }
}
