//! The Symmetry010 and Symmetry454 perennial calendars.
//!
//! Both split a 364-day year into four identical 13-week quarters and add a
//! leap week to December in 52 of every 293 years, so every year starts on a
//! Monday. Symmetry010 quarters have months of 30, 31 and 30 days;
//! Symmetry454 quarters have months of 4, 5 and 4 weeks.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::consts::{DAYS_IN_WEEK, DAYS_IN_WEEK_YEAR, DECEMBER, EPOCH_DAY_0001_01_01, MAX_MONTH};
use crate::era::IsoEra;
use crate::{Calendar, Date, MonthDay, ValueRange};

const YEARS: ValueRange = ValueRange::of(-1_000_000, 1_000_000);

/// Leap years per cycle
const LEAP_YEARS_PER_CYCLE: i64 = 52;
/// Years per cycle
const YEARS_PER_CYCLE: i64 = 293;
/// Aligns the leap year pattern with the ISO calendar
const CYCLE_OFFSET: i64 = 146;
/// Days per cycle
const DAYS_PER_CYCLE: i64 = 107_016;

const fn is_leap_year(year: i64) -> bool {
    (LEAP_YEARS_PER_CYCLE * year + CYCLE_OFFSET).rem_euclid(YEARS_PER_CYCLE) < LEAP_YEARS_PER_CYCLE
}

const fn year_start(year: i64) -> i64 {
    let leap_years_before =
        (LEAP_YEARS_PER_CYCLE * (year - 1) + CYCLE_OFFSET).div_euclid(YEARS_PER_CYCLE);
    (year - 1) * DAYS_IN_WEEK_YEAR as i64
        + leap_years_before * DAYS_IN_WEEK as i64
        + EPOCH_DAY_0001_01_01
}

/// Symmetry year containing an epoch day
const fn year_of_epoch_day(epoch_day: i64) -> i64 {
    let mut year =
        ((epoch_day - EPOCH_DAY_0001_01_01) * YEARS_PER_CYCLE).div_euclid(DAYS_PER_CYCLE) + 1;
    while year_start(year) > epoch_day {
        year -= 1;
    }
    while year_start(year + 1) <= epoch_day {
        year += 1;
    }
    year
}

/// Days before the first of a month, `1..=13`
const fn days_before_month_010(month: u8) -> u16 {
    30 * (month as u16 - 1) + month as u16 / 3
}

const fn days_before_month_454(month: u8) -> u16 {
    28 * (month as u16 - 1) + DAYS_IN_WEEK as u16 * (month as u16 / 3)
}

/// Implements the shared kernel for a quarter pattern.
macro_rules! symmetry_calendar {
    ($name:ident, $id:literal, $days_before_month:ident) => {
        impl Calendar for $name {
            type Era = IsoEra;

            fn id(&self) -> Cow<'static, str> {
                Cow::Borrowed($id)
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

            /// December takes the leap week
            fn length_of_month(&self, year: i32, month: u8) -> u8 {
                let days = $days_before_month(month + 1) - $days_before_month(month);
                if month == DECEMBER && self.is_leap_year(year) {
                    days as u8 + DAYS_IN_WEEK
                } else {
                    days as u8
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
                year_start(i64::from(year)) + i64::from($days_before_month(month)) + i64::from(day)
                    - 1
            }

            fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
                let year = year_of_epoch_day(epoch_day);
                let day_of_year = epoch_day - year_start(year);
                let mut month = MAX_MONTH;
                while month > 1 && i64::from($days_before_month(month)) > day_of_year {
                    month -= 1;
                }
                let day = day_of_year - i64::from($days_before_month(month)) + 1;
                (year as i32, MonthDay::ordinary(month, day as u8))
            }
        }
    };
}

/// The Symmetry010 calendar: quarters of 30, 31 and 30 days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symmetry010;

/// The Symmetry454 calendar: quarters of 4, 5 and 4 weeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symmetry454;

symmetry_calendar!(Symmetry010, "Sym010", days_before_month_010);
symmetry_calendar!(Symmetry454, "Sym454", days_before_month_454);

pub type Symmetry010Date = Date<Symmetry010>;
pub type Symmetry454Date = Date<Symmetry454>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Period, Unit};
    use chrono::NaiveDate;

    fn iso(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_leap_years() {
        let leap: Vec<i32> = (1995..2030).filter(|&y| Symmetry010.is_leap_year(y)).collect();
        assert_eq!(leap, [1998, 2004, 2009, 2015, 2021, 2026]);
        let leap: Vec<i32> = (-10..10).filter(|&y| Symmetry454.is_leap_year(y)).collect();
        assert_eq!(leap, [-8, -2, 3, 9]);
        assert_eq!(Symmetry010.length_of_year(2015), 371);
        assert_eq!(Symmetry454.length_of_year(2016), 364);
    }

    #[test]
    fn test_year_starts() {
        struct TestCase {
            year: i32,
            first: NaiveDate,
            last: NaiveDate,
        }

        let cases = [
            TestCase {
                year: 1,
                first: iso(1, 1, 1),
                last: iso(1, 12, 30),
            },
            TestCase {
                year: 2009,
                first: iso(2008, 12, 29),
                last: iso(2010, 1, 3),
            },
            TestCase {
                year: 2012,
                first: iso(2012, 1, 2),
                last: iso(2012, 12, 30),
            },
            TestCase {
                year: 2016,
                first: iso(2016, 1, 4),
                last: iso(2017, 1, 1),
            },
            TestCase {
                year: 0,
                first: iso(0, 1, 3),
                last: iso(0, 12, 31),
            },
        ];

        for case in &cases {
            let first = Symmetry454.date_year_day(case.year, 1).unwrap();
            let length = Symmetry454.length_of_year(case.year);
            let last = Symmetry454.date_year_day(case.year, length).unwrap();
            assert_eq!(first.to_iso(), Ok(case.first), "year {}", case.year);
            assert_eq!(last.to_iso(), Ok(case.last), "year {}", case.year);
            assert_eq!(first.get(Field::DayOfWeek), Ok(1));
            let first = Symmetry010.date(case.year, 1, 1).unwrap();
            assert_eq!(first.to_iso(), Ok(case.first), "year {}", case.year);
        }
    }

    #[test]
    fn test_month_lengths() {
        let sym010: Vec<u8> = (1..=12).map(|m| Symmetry010.length_of_month(2015, m)).collect();
        assert_eq!(sym010, [30, 31, 30, 30, 31, 30, 30, 31, 30, 30, 31, 37]);
        let sym454: Vec<u8> = (1..=12).map(|m| Symmetry454.length_of_month(2015, m)).collect();
        assert_eq!(sym454, [28, 35, 28, 28, 35, 28, 28, 35, 28, 28, 35, 35]);
        assert_eq!(Symmetry010.length_of_month(2016, 12), 30);
        assert_eq!(Symmetry454.length_of_month(2016, 12), 28);
        assert!(Symmetry010.date(2012, 12, 31).is_err());
    }

    #[test]
    fn test_iso_samples() {
        assert_eq!(Symmetry010.date(2012, 6, 15).unwrap().to_iso(), Ok(iso(2012, 6, 16)));
        assert_eq!(Symmetry454.date(2012, 6, 15).unwrap().to_iso(), Ok(iso(2012, 6, 18)));
        assert_eq!(Symmetry010.date_from_iso(iso(2012, 7, 6)), Symmetry010.date(2012, 7, 5));
        assert_eq!(Symmetry454.date_from_iso(iso(2012, 7, 6)), Symmetry454.date(2012, 7, 5));
    }

    #[test]
    fn test_round_trip_over_wide_range() {
        for epoch_day in (-3_000_000..3_000_000).step_by(311) {
            let date = Symmetry010.date_epoch_day(epoch_day).unwrap();
            assert_eq!(date.to_epoch_day(), epoch_day);
            let date = Symmetry454.date_epoch_day(epoch_day).unwrap();
            assert_eq!(date.to_epoch_day(), epoch_day);
        }
    }

    #[test]
    fn test_leap_week_fields() {
        let date = Symmetry454.date(2015, 12, 35).unwrap();
        assert_eq!(date.get(Field::DayOfYear), Ok(371));
        assert_eq!(date.get(Field::AlignedWeekOfYear), Ok(53));
        assert_eq!(date.get(Field::AlignedWeekOfMonth), Ok(5));
        assert_eq!(date.get(Field::DayOfWeek), Ok(7));
        assert_eq!(date.range(Field::DayOfMonth), Ok(ValueRange::of(1, 35)));
        assert_eq!(Symmetry010.date(2012, 12, 30).unwrap().get(Field::DayOfYear), Ok(364));
    }

    #[test]
    fn test_arithmetic_clamps_month_end() {
        let leap_week = Symmetry454.date(2015, 12, 35).unwrap();
        let next = Symmetry454.date(2016, 12, 28).unwrap();
        assert_eq!(leap_week.plus(1, Unit::Years), Ok(next.clone()));
        assert_eq!(leap_week.until_period(&next), Ok(Period::new(0, 11, 28)));
        assert_eq!(leap_week.until(&next, Unit::Years), Ok(0));
        assert_eq!(leap_week.until(&next, Unit::Days), Ok(364));

        assert_eq!(
            Symmetry010.date(2015, 12, 37).unwrap().plus(1, Unit::Months),
            Symmetry010.date(2016, 1, 30)
        );
        assert_eq!(
            Symmetry010.date(2012, 2, 31).unwrap().plus(1, Unit::Months),
            Symmetry010.date(2012, 3, 30)
        );
        assert_eq!(
            Symmetry454.date(2012, 2, 35).unwrap().minus(1, Unit::Months),
            Symmetry454.date(2012, 1, 28)
        );

        let start = Symmetry010.date(2012, 2, 31).unwrap();
        let end = Symmetry010.date(2012, 4, 15).unwrap();
        assert_eq!(start.until_period(&end), Ok(Period::new(0, 1, 15)));
    }

    #[test]
    fn test_identity_and_eras() {
        assert_eq!(Symmetry010.id(), "Sym010");
        assert_eq!(Symmetry454.id(), "Sym454");
        assert_eq!(Symmetry454.calendar_type(), None);
        let date = Symmetry010.date(0, 3, 4).unwrap();
        assert_eq!(date.to_string(), "Sym010 BCE 1-03-04");
        assert_eq!(date.get(Field::Era), Ok(0));
    }
}
