//! The International Fixed calendar.
//!
//! Thirteen months of exactly four weeks. Year Day closes every year after
//! the 28th of month 13, and in ISO leap years Leap Day follows the 28th of
//! month 6. Neither day belongs to a week, so every month starts on day 1 of
//! the week.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::consts::{DAYS_IN_COMMON_YEAR, DAYS_IN_WEEK, DAYS_IN_WEEK_YEAR};
use crate::era::InternationalFixedEra;
use crate::{Calendar, CalendarError, Date, EpagomenalDay, MonthDay, ValueRange, iso};

const MONTHS_IN_YEAR: u8 = 13;
const DAYS_IN_MONTH: u8 = 28;
/// Month followed by Leap Day in leap years
const LEAP_MONTH: u8 = 6;
/// Day of year of Leap Day
const LEAP_DAY_OF_YEAR: u16 = 169;
const YEARS: ValueRange = ValueRange::of(1, 1_000_000);

/// The International Fixed calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InternationalFixed;

pub type InternationalFixedDate = Date<InternationalFixed>;

const fn grid_day_of_year(month: u8, day: u8) -> u16 {
    (month as u16 - 1) * DAYS_IN_MONTH as u16 + day as u16
}

impl Calendar for InternationalFixed {
    type Era = InternationalFixedEra;

    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed("Ifc")
    }

    fn year_range(&self) -> ValueRange {
        YEARS
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        MONTHS_IN_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        iso::is_leap_year(i64::from(year))
    }

    /// Leap Day and Year Day count with the month they follow
    fn length_of_month(&self, year: i32, month: u8) -> u8 {
        if month == MONTHS_IN_YEAR || (month == LEAP_MONTH && self.is_leap_year(year)) {
            DAYS_IN_MONTH + 1
        } else {
            DAYS_IN_MONTH
        }
    }

    fn length_of_year(&self, year: i32) -> u16 {
        iso::length_of_year(i64::from(year))
    }

    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
        let leap = self.is_leap_year(year);
        let day_of_year = match month_day {
            MonthDay::Epagomenal(EpagomenalDay::LeapDay) => LEAP_DAY_OF_YEAR,
            MonthDay::Epagomenal(_) => DAYS_IN_COMMON_YEAR + u16::from(leap),
            MonthDay::Ordinary { month, day } => {
                grid_day_of_year(month, day) + u16::from(leap && month > LEAP_MONTH)
            }
        };
        iso::to_epoch_day(i64::from(year), 1, 1) + i64::from(day_of_year) - 1
    }

    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
        let (year, _, _) = iso::from_epoch_day(epoch_day);
        let mut day_of_year = epoch_day - iso::to_epoch_day(year, 1, 1) + 1;
        let year = year as i32;
        if self.is_leap_year(year) {
            if day_of_year == i64::from(LEAP_DAY_OF_YEAR) {
                return (year, MonthDay::Epagomenal(EpagomenalDay::LeapDay));
            }
            if day_of_year > i64::from(LEAP_DAY_OF_YEAR) {
                day_of_year -= 1;
            }
        }
        if day_of_year == i64::from(DAYS_IN_COMMON_YEAR) {
            return (year, MonthDay::Epagomenal(EpagomenalDay::YearDay));
        }
        let month = (day_of_year - 1) / i64::from(DAYS_IN_MONTH) + 1;
        let day = (day_of_year - 1) % i64::from(DAYS_IN_MONTH) + 1;
        (year, MonthDay::ordinary(month as u8, day as u8))
    }

    /// Day 29 of month 6 or 13 names Leap Day or Year Day
    fn resolve(&self, year: i32, month: u8, day: u8) -> Result<(i32, MonthDay), CalendarError> {
        self.check_ordinary(year, month, day)?;
        let month_day = if (month, day) == EpagomenalDay::LeapDay.position() {
            MonthDay::Epagomenal(EpagomenalDay::LeapDay)
        } else if (month, day) == EpagomenalDay::YearDay.position() {
            MonthDay::Epagomenal(EpagomenalDay::YearDay)
        } else {
            MonthDay::ordinary(month, day)
        };
        Ok((year, month_day))
    }

    fn day_of_week(&self, _year: i32, month_day: MonthDay, _epoch_day: i64) -> u8 {
        (month_day.day() - 1) % DAYS_IN_WEEK + 1
    }

    fn grid_day_of_year(&self, _year: i32, month_day: MonthDay) -> u16 {
        let (month, day) = month_day.position();
        grid_day_of_year(month, day)
    }

    fn grid_length_of_month(&self, _year: i32, _month: u8) -> u16 {
        u16::from(DAYS_IN_MONTH)
    }

    fn grid_length_of_year(&self, _year: i32) -> u16 {
        DAYS_IN_WEEK_YEAR
    }
}
