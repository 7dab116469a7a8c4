//! The proleptic Julian calendar: Gregorian months, a leap year every four
//! years without exception.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::consts::{
    DAYS_BEFORE_MONTH, DAYS_IN_COMMON_YEAR, DAYS_IN_MONTH, DAYS_PER_JULIAN_CYCLE,
    EPOCH_DAY_0000_12_30, FEBRUARY, FEBRUARY_DAYS_LEAP, MAX_MONTH,
};
use crate::era::JulianEra;
use crate::{Calendar, Date, MonthDay, ValueRange};

pub(crate) const YEARS: ValueRange = ValueRange::of(-999_998, 999_999);

pub(crate) const fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0
}

pub(crate) const fn length_of_month(year: i64, month: u8) -> u8 {
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

const fn days_before_month(year: i64, month: u8) -> u16 {
    let leap = if month > FEBRUARY && is_leap_year(year) { 1 } else { 0 };
    DAYS_BEFORE_MONTH[month as usize] + leap
}

pub(crate) const fn to_epoch_day(year: i64, month: u8, day: u8) -> i64 {
    let day_of_year = days_before_month(year, month) as i64 + day as i64;
    (year - 1) * DAYS_IN_COMMON_YEAR as i64 + (year - 1).div_euclid(4) + day_of_year - 1
        + EPOCH_DAY_0000_12_30
}

pub(crate) const fn from_epoch_day(epoch_day: i64) -> (i64, u8, u8) {
    let days = epoch_day - EPOCH_DAY_0000_12_30;
    let cycle = days.div_euclid(DAYS_PER_JULIAN_CYCLE);
    let day_of_cycle = days - cycle * DAYS_PER_JULIAN_CYCLE;
    // the last day of a cycle is day 366 of its leap year
    let (year_of_cycle, day_of_year) = if day_of_cycle == DAYS_PER_JULIAN_CYCLE - 1 {
        (3, 366)
    } else {
        (
            day_of_cycle / DAYS_IN_COMMON_YEAR as i64,
            day_of_cycle % DAYS_IN_COMMON_YEAR as i64 + 1,
        )
    };
    let year = cycle * 4 + year_of_cycle + 1;

    let mut month = MAX_MONTH;
    while month > 1 && day_of_year <= days_before_month(year, month) as i64 {
        month -= 1;
    }
    let day = day_of_year - days_before_month(year, month) as i64;
    (year, month, day as u8)
}

/// The proleptic Julian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Julian;

pub type JulianDate = Date<Julian>;

impl Calendar for Julian {
    type Era = JulianEra;

    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed("Julian")
    }

    fn calendar_type(&self) -> Option<&'static str> {
        Some("julian")
    }

    fn year_range(&self) -> ValueRange {
        YEARS
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        MAX_MONTH
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_leap_year(i64::from(year))
    }

    fn length_of_month(&self, year: i32, month: u8) -> u8 {
        length_of_month(i64::from(year), month)
    }

    fn length_of_year(&self, year: i32) -> u16 {
        DAYS_IN_COMMON_YEAR + u16::from(self.is_leap_year(year))
    }

    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
        let (month, day) = month_day.position();
        to_epoch_day(i64::from(year), month, day)
    }

    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
        let (year, month, day) = from_epoch_day(epoch_day);
        (year as i32, MonthDay::ordinary(month, day))
    }
}
