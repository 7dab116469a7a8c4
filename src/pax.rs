//! The Pax calendar.
//!
//! Thirteen months of four weeks, every year starting on a Sunday. Leap years
//! insert the seven-day month of Pax before the last month, so December is
//! month 13 in common years and month 14 in leap years.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::consts::{DAYS_IN_WEEK, DAYS_IN_WEEK_YEAR, DAYS_PER_GREGORIAN_CYCLE, EPOCH_DAY_0000_12_31};
use crate::era::PaxEra;
use crate::{Calendar, Date, MonthDay, ValueRange};

const YEARS: ValueRange = ValueRange::of(-999_999, 999_999);
const MONTHS_IN_YEAR: u8 = 13;
const DAYS_IN_MONTH: u8 = 28;
/// Month number of Pax in leap years
const PAX_MONTH: u8 = 13;
/// Years in a full cycle of the leap rule
const YEARS_PER_CYCLE: i64 = 400;
/// Months in a full cycle of the leap rule, leap months included
const MONTHS_PER_CYCLE: i64 = 5_271;
/// Days before month 13 in every year
const DAYS_BEFORE_PAX: i64 = 12 * DAYS_IN_MONTH as i64;

/// Leap years end in 99, or in 00 or a multiple of 6 unless divisible by 400.
/// The remainder keeps the sign of the year.
const fn is_leap_year(year: i64) -> bool {
    let last_two = year % 100;
    last_two.abs() == 99 || (year % 400 != 0 && (last_two == 0 || last_two % 6 == 0))
}

/// Leap years in `1..=year`, for `year >= 0`
const fn leap_years_up_to(year: i64) -> i64 {
    let century = year / 100;
    let rest = year % 100;
    let quad_centennial = if century % 4 == 0 { 1 } else { 0 };
    let ninety_nine = if rest == 99 { 1 } else { 0 };
    18 * century - (century + 3) / 4 + rest / 6 + 1 - quad_centennial + ninety_nine
}

/// Leap years between year 1 and `year`, negative before year 1
const fn leap_years_before(year: i64) -> i64 {
    if year >= 1 {
        leap_years_up_to(year - 1)
    } else {
        -leap_years_up_to(-year)
    }
}

const fn year_start(year: i64) -> i64 {
    (year - 1) * DAYS_IN_WEEK_YEAR as i64
        + leap_years_before(year) * DAYS_IN_WEEK as i64
        + EPOCH_DAY_0000_12_31
}

/// Pax year containing an epoch day; a 400-year cycle has as many days as
/// a Gregorian one
const fn year_of_epoch_day(epoch_day: i64) -> i64 {
    let mut year = ((epoch_day - EPOCH_DAY_0000_12_31) * 400).div_euclid(DAYS_PER_GREGORIAN_CYCLE) + 1;
    while year_start(year) > epoch_day {
        year -= 1;
    }
    while year_start(year + 1) <= epoch_day {
        year += 1;
    }
    year
}

const fn proleptic_month_of(year: i64, month: u8) -> i64 {
    year * MONTHS_IN_YEAR as i64 + leap_years_before(year) + month as i64 - 1
}

/// The Pax calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pax;

pub type PaxDate = Date<Pax>;

impl Calendar for Pax {
    type Era = PaxEra;

    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed("Pax")
    }

    fn year_range(&self) -> ValueRange {
        YEARS
    }

    fn months_in_year(&self, year: i32) -> u8 {
        MONTHS_IN_YEAR + u8::from(self.is_leap_year(year))
    }

    fn has_fixed_month_count(&self) -> bool {
        false
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_leap_year(i64::from(year))
    }

    fn length_of_month(&self, year: i32, month: u8) -> u8 {
        if month == PAX_MONTH && self.is_leap_year(year) {
            DAYS_IN_WEEK
        } else {
            DAYS_IN_MONTH
        }
    }

    fn length_of_year(&self, year: i32) -> u16 {
        DAYS_IN_WEEK_YEAR + u16::from(DAYS_IN_WEEK) * u16::from(self.is_leap_year(year))
    }

    fn year_start(&self, year: i32) -> i64 {
        year_start(i64::from(year))
    }

    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
        let (month, day) = month_day.position();
        let days_before_month = if month > PAX_MONTH {
            DAYS_BEFORE_PAX + i64::from(DAYS_IN_WEEK)
        } else {
            i64::from(month - 1) * i64::from(DAYS_IN_MONTH)
        };
        year_start(i64::from(year)) + days_before_month + i64::from(day) - 1
    }

    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
        let year = year_of_epoch_day(epoch_day);
        let day_of_year = epoch_day - year_start(year);
        let (month, day) = if day_of_year < DAYS_BEFORE_PAX {
            (
                day_of_year / i64::from(DAYS_IN_MONTH) + 1,
                day_of_year % i64::from(DAYS_IN_MONTH) + 1,
            )
        } else {
            let rest = day_of_year - DAYS_BEFORE_PAX;
            let week = i64::from(DAYS_IN_WEEK);
            if is_leap_year(year) && rest >= week {
                (i64::from(PAX_MONTH) + 1, rest - week + 1)
            } else {
                (i64::from(PAX_MONTH), rest + 1)
            }
        };
        (year as i32, MonthDay::ordinary(month as u8, day as u8))
    }

    fn proleptic_month(&self, year: i32, month: u8) -> i64 {
        proleptic_month_of(i64::from(year), month)
    }

    fn from_proleptic_month(&self, proleptic_month: i64) -> (i64, u8) {
        let cycles = proleptic_month.div_euclid(MONTHS_PER_CYCLE);
        let rest = proleptic_month.rem_euclid(MONTHS_PER_CYCLE);
        let mut year = cycles * YEARS_PER_CYCLE + rest * YEARS_PER_CYCLE / MONTHS_PER_CYCLE;
        while proleptic_month_of(year, 1) > proleptic_month {
            year -= 1;
        }
        while proleptic_month_of(year + 1, 1) <= proleptic_month {
            year += 1;
        }
        let month = proleptic_month - proleptic_month_of(year, 1) + 1;
        (year, month as u8)
    }

    /// December keeps its name: month 13 in common years, month 14 in leap years
    fn shift_years(&self, from_year: i32, month_day: MonthDay, to_year: i32) -> MonthDay {
        let (from_leap, to_leap) = (self.is_leap_year(from_year), self.is_leap_year(to_year));
        match month_day {
            MonthDay::Ordinary { month, day } if month == MONTHS_IN_YEAR && !from_leap && to_leap => {
                MonthDay::ordinary(month + 1, day)
            }
            MonthDay::Ordinary { month, day } if month > MONTHS_IN_YEAR && !to_leap => {
                MonthDay::ordinary(MONTHS_IN_YEAR, day)
            }
            _ => month_day,
        }
    }
}
