//! Proleptic Gregorian arithmetic on the epoch-day axis, and conversion to
//! and from [`chrono::NaiveDate`], the standard date the calendars plug into.

use chrono::{Datelike, NaiveDate};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_MONTH, DAYS_PER_GREGORIAN_CYCLE,
    FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH,
};
use crate::{CalendarError, Field, ValueRange};

/// Days from 0000-03-01 to 1970-01-01
const DAYS_0000_03_01_TO_1970: i64 = 719_468;

/// Days from 0001-01-01 (chrono's day 1) to 1970-01-01
const CHRONO_CE_TO_EPOCH: i64 = 719_163;

pub const fn is_leap_year(year: i64) -> bool {
    let (four, century, cycle) = (
        LEAP_YEAR_CYCLE as i64,
        CENTURY_CYCLE as i64,
        GREGORIAN_CYCLE as i64,
    );
    (year.rem_euclid(four) == 0 && year.rem_euclid(century) != 0) || year.rem_euclid(cycle) == 0
}

pub const fn length_of_month(year: i64, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn length_of_year(year: i64) -> u16 {
    if is_leap_year(year) {
        DAYS_IN_COMMON_YEAR + 1
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// Epoch day of a Gregorian date, counting years from March so the leap day
/// falls at the end of the computational year.
pub const fn to_epoch_day(year: i64, month: u8, day: u8) -> i64 {
    let year = if month <= FEBRUARY { year - 1 } else { year };
    let era = year.div_euclid(GREGORIAN_CYCLE as i64);
    let year_of_era = year - era * GREGORIAN_CYCLE as i64;
    let shifted_month = (month as i64 + 9) % 12;
    let day_of_era_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_era_year;
    era * DAYS_PER_GREGORIAN_CYCLE + day_of_era - DAYS_0000_03_01_TO_1970
}

/// Gregorian `(year, month, day)` of an epoch day.
pub const fn from_epoch_day(epoch_day: i64) -> (i64, u8, u8) {
    let shifted = epoch_day + DAYS_0000_03_01_TO_1970;
    let era = shifted.div_euclid(DAYS_PER_GREGORIAN_CYCLE);
    let day_of_era = shifted - era * DAYS_PER_GREGORIAN_CYCLE;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_era_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_era_year + 2) / 153;
    let day = (day_of_era_year - (153 * shifted_month + 2) / 5 + 1) as u8;
    let month = (if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    }) as u8;
    let year = year_of_era + era * GREGORIAN_CYCLE as i64;
    if month <= FEBRUARY {
        (year + 1, month, day)
    } else {
        (year, month, day)
    }
}

/// Gregorian year containing an epoch day.
pub const fn year_of_epoch_day(epoch_day: i64) -> i64 {
    from_epoch_day(epoch_day).0
}

/// ISO day-of-week (1 = Monday .. 7 = Sunday) of an epoch day.
pub const fn day_of_week(epoch_day: i64) -> u8 {
    ((epoch_day + 3).rem_euclid(7) + 1) as u8
}

/// Epoch day of a standard date.
pub fn epoch_day_of(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - CHRONO_CE_TO_EPOCH
}

/// Standard date of an epoch day.
///
/// # Errors
/// Returns `CalendarError::InvalidValue` for epoch days outside chrono's range.
pub fn date_of(epoch_day: i64) -> Result<NaiveDate, CalendarError> {
    i32::try_from(epoch_day + CHRONO_CE_TO_EPOCH)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| CalendarError::invalid(Field::EpochDay, epoch_day, supported_epoch_days()))
}

/// Epoch days representable as a standard date.
pub fn supported_epoch_days() -> ValueRange {
    ValueRange::of(epoch_day_of(NaiveDate::MIN), epoch_day_of(NaiveDate::MAX))
}
