//! The Coptic and Ethiopic calendars.
//!
//! Both have twelve months of 30 days followed by a short thirteenth month of
//! five days, six in leap years. A year is leap when it leaves remainder 3
//! on division by 4, so the leap day falls just before the Julian one. The
//! two calendars differ only in their epoch.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::consts::DAYS_IN_COMMON_YEAR;
use crate::era::{CopticEra, EthiopicEra};
use crate::{Calendar, Date, MonthDay, ValueRange};

/// Days from Coptic 0001-01-01 (ISO 0284-08-29) to 1970-01-01
const COPTIC_EPOCH_OFFSET: i64 = 615_558;
/// Days from Ethiopic 0001-01-01 (ISO 0008-08-27) to 1970-01-01
const ETHIOPIC_EPOCH_OFFSET: i64 = 716_367;

const MONTHS_IN_YEAR: u8 = 13;
const DAYS_IN_MONTH: u8 = 30;
const YEARS: ValueRange = ValueRange::of(-9_999, 9_999);

const fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 3
}

const fn length_of_month(year: i32, month: u8) -> u8 {
    if month < MONTHS_IN_YEAR {
        DAYS_IN_MONTH
    } else if is_leap_year(year) {
        6
    } else {
        5
    }
}

const fn to_epoch_day(offset: i64, year: i32, month_day: MonthDay) -> i64 {
    let (month, day) = month_day.position();
    let year = year as i64;
    let day_of_year = (month as i64 - 1) * DAYS_IN_MONTH as i64 + day as i64;
    (year - 1) * DAYS_IN_COMMON_YEAR as i64 + year.div_euclid(4) + day_of_year - 1 - offset
}

const fn from_epoch_day(offset: i64, epoch_day: i64) -> (i32, MonthDay) {
    let days = epoch_day + offset;
    let year = (4 * days + 1_463).div_euclid(1_461);
    let day_of_year = days - ((year - 1) * DAYS_IN_COMMON_YEAR as i64 + year.div_euclid(4));
    let month = day_of_year / DAYS_IN_MONTH as i64 + 1;
    let day = day_of_year % DAYS_IN_MONTH as i64 + 1;
    (year as i32, MonthDay::ordinary(month as u8, day as u8))
}

/// Implements the shared kernel for a Nile calendar with the given epoch.
macro_rules! nile_calendar {
    ($name:ident, $era:ident, $id:literal, $kind:literal, $offset:expr) => {
        impl Calendar for $name {
            type Era = $era;

            fn id(&self) -> Cow<'static, str> {
                Cow::Borrowed($id)
            }

            fn calendar_type(&self) -> Option<&'static str> {
                Some($kind)
            }

            fn year_range(&self) -> ValueRange {
                YEARS
            }

            fn months_in_year(&self, _year: i32) -> u8 {
                MONTHS_IN_YEAR
            }

            fn is_leap_year(&self, year: i32) -> bool {
                is_leap_year(year)
            }

            fn length_of_month(&self, year: i32, month: u8) -> u8 {
                length_of_month(year, month)
            }

            fn length_of_year(&self, year: i32) -> u16 {
                DAYS_IN_COMMON_YEAR + u16::from(is_leap_year(year))
            }

            fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
                to_epoch_day($offset, year, month_day)
            }

            fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
                from_epoch_day($offset, epoch_day)
            }
        }
    };
}

/// The Coptic calendar, counting years from the Era of the Martyrs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coptic;

/// The Ethiopic calendar, counting years from the Incarnation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ethiopic;

nile_calendar!(Coptic, CopticEra, "Coptic", "coptic", COPTIC_EPOCH_OFFSET);
nile_calendar!(Ethiopic, EthiopicEra, "Ethiopic", "ethiopic", ETHIOPIC_EPOCH_OFFSET);

pub type CopticDate = Date<Coptic>;
pub type EthiopicDate = Date<Ethiopic>;
