//! The Discordian calendar.
//!
//! Five seasons of 73 days and a five-day week. Years are ISO years
//! renumbered by 1166, with the ISO leap rule; in leap years St. Tib's Day
//! follows Chaos 59 and belongs to no season and no week.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::consts::DAYS_IN_COMMON_YEAR;
use crate::era::DiscordianEra;
use crate::{Calendar, CalendarError, Date, EpagomenalDay, Field, MonthDay, ValueRange, iso};

/// Years between the Discordian and ISO year numbers
const ISO_YEAR_OFFSET: i64 = 1_166;
const SEASONS: u8 = 5;
const DAYS_IN_SEASON: u8 = 73;
const DAYS_IN_WEEK: u8 = 5;
/// Day of year of St. Tib's Day
const ST_TIBS_DAY_OF_YEAR: u16 = 60;
const YEARS: ValueRange = ValueRange::of(1, 999_999);

const fn iso_year(year: i32) -> i64 {
    year as i64 - ISO_YEAR_OFFSET
}

/// The Discordian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Discordian;

pub type DiscordianDate = Date<Discordian>;

impl Discordian {
    /// Day of year of a date, St. Tib's Day included
    fn day_of_year(year: i32, month_day: MonthDay) -> u16 {
        match month_day {
            MonthDay::Epagomenal(_) => ST_TIBS_DAY_OF_YEAR,
            MonthDay::Ordinary { month, day } => {
                let grid = u16::from(month - 1) * u16::from(DAYS_IN_SEASON) + u16::from(day);
                if grid >= ST_TIBS_DAY_OF_YEAR && iso::is_leap_year(iso_year(year)) {
                    grid + 1
                } else {
                    grid
                }
            }
        }
    }
}

impl Calendar for Discordian {
    type Era = DiscordianEra;

    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed("Discordian")
    }

    fn calendar_type(&self) -> Option<&'static str> {
        Some("discordian")
    }

    fn year_range(&self) -> ValueRange {
        YEARS
    }

    fn days_in_week(&self) -> u8 {
        DAYS_IN_WEEK
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        SEASONS
    }

    fn is_leap_year(&self, year: i32) -> bool {
        iso::is_leap_year(iso_year(year))
    }

    fn length_of_month(&self, _year: i32, _month: u8) -> u8 {
        DAYS_IN_SEASON
    }

    fn length_of_year(&self, year: i32) -> u16 {
        iso::length_of_year(iso_year(year))
    }

    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
        iso::to_epoch_day(iso_year(year), 1, 1) + i64::from(Self::day_of_year(year, month_day)) - 1
    }

    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
        let (iso_year, _, _) = iso::from_epoch_day(epoch_day);
        let year = (iso_year + ISO_YEAR_OFFSET) as i32;
        let mut day_of_year = epoch_day - iso::to_epoch_day(iso_year, 1, 1) + 1;
        if iso::is_leap_year(iso_year) {
            if day_of_year == i64::from(ST_TIBS_DAY_OF_YEAR) {
                return (year, MonthDay::Epagomenal(EpagomenalDay::StTibsDay));
            }
            if day_of_year > i64::from(ST_TIBS_DAY_OF_YEAR) {
                day_of_year -= 1;
            }
        }
        let season = (day_of_year - 1) / i64::from(DAYS_IN_SEASON) + 1;
        let day = (day_of_year - 1) % i64::from(DAYS_IN_SEASON) + 1;
        (year, MonthDay::ordinary(season as u8, day as u8))
    }

    /// Month 0, day 0 names St. Tib's Day
    fn resolve(&self, year: i32, month: u8, day: u8) -> Result<(i32, MonthDay), CalendarError> {
        if (month, day) != EpagomenalDay::StTibsDay.position() {
            self.check_ordinary(year, month, day)?;
            return Ok((year, MonthDay::ordinary(month, day)));
        }
        YEARS.check(i64::from(year), Field::Year)?;
        if !self.is_leap_year(year) {
            return Err(CalendarError::invalid(
                Field::MonthOfYear,
                i64::from(month),
                ValueRange::of(1, i64::from(SEASONS)),
            ));
        }
        Ok((year, MonthDay::Epagomenal(EpagomenalDay::StTibsDay)))
    }

    fn day_of_week(&self, year: i32, month_day: MonthDay, _epoch_day: i64) -> u8 {
        let grid = self.grid_day_of_year(year, month_day);
        ((grid - 1) % u16::from(DAYS_IN_WEEK)) as u8 + 1
    }

    fn grid_day_of_year(&self, _year: i32, month_day: MonthDay) -> u16 {
        let (month, day) = month_day.position();
        u16::from(month - 1) * u16::from(DAYS_IN_SEASON) + u16::from(day)
    }

    fn grid_length_of_year(&self, _year: i32) -> u16 {
        DAYS_IN_COMMON_YEAR
    }
}
