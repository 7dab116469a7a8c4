//! Configurable 52/53-week accounting calendars.
//!
//! An accounting year ends on a fixed weekday: either the last one in a
//! given ISO month, or the one nearest the end of that month. Years are
//! therefore 52 weeks long, or 53 when the extra week is needed to catch up.
//! The year is divided into months of whole weeks following a
//! [`AccountingYearDivision`], and the extra week of a long year goes to a
//! configured month.
//!
//! Calendars are built with [`AccountingChronologyBuilder`]:
//!
//! ```
//! use calendrica::{AccountingChronologyBuilder, AccountingYearDivision, Calendar};
//! use chrono::{Month, Weekday};
//!
//! let retail = AccountingChronologyBuilder::new()
//!     .ends_on(Weekday::Sun)
//!     .nearest_end_of(Month::August)
//!     .with_division(AccountingYearDivision::QuartersOf4_4_5Weeks)
//!     .leap_week_in_month(12)
//!     .to_chronology()
//!     .unwrap();
//! assert!(retail.is_leap_year(2012));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use chrono::{Month, Weekday};
use tracing::debug;

use crate::consts::{DAYS_IN_WEEK, DAYS_IN_WEEK_YEAR, DECEMBER};
use crate::era::AccountingEra;
use crate::{Calendar, CalendarError, Date, Field, MonthDay, ValueRange, iso, prelude::*};

const YEARS: ValueRange = ValueRange::of(-999_999, 999_999);
/// Days a nearest-end year may run past the end of its month
const NEAREST_END_SLACK: i64 = 3;

/// How an accounting year is split into months of whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AccountingYearDivision {
    /// Four quarters of 4, 4 and 5 week months
    #[display(fmt = "4-4-5")]
    QuartersOf4_4_5Weeks,
    /// Four quarters of 4, 5 and 4 week months
    #[display(fmt = "4-5-4")]
    QuartersOf4_5_4Weeks,
    /// Four quarters of 5, 4 and 4 week months
    #[display(fmt = "5-4-4")]
    QuartersOf5_4_4Weeks,
    /// Thirteen months of 4 weeks
    #[display(fmt = "13x4")]
    ThirteenEvenMonthsOf4Weeks,
}

impl AccountingYearDivision {
    const fn weeks(self) -> &'static [u8] {
        match self {
            Self::QuartersOf4_4_5Weeks => &[4, 4, 5, 4, 4, 5, 4, 4, 5, 4, 4, 5],
            Self::QuartersOf4_5_4Weeks => &[4, 5, 4, 4, 5, 4, 4, 5, 4, 4, 5, 4],
            Self::QuartersOf5_4_4Weeks => &[5, 4, 4, 5, 4, 4, 5, 4, 4, 5, 4, 4],
            Self::ThirteenEvenMonthsOf4Weeks => &[4; 13],
        }
    }

    pub const fn months_in_year(self) -> u8 {
        self.weeks().len() as u8
    }

    /// Valid month numbers
    pub const fn month_range(self) -> ValueRange {
        ValueRange::of(1, self.months_in_year() as i64)
    }

    /// Weeks in a month of a 52-week year
    pub fn weeks_in_month(self, month: u8) -> u8 {
        self.weeks()
            .get(usize::from(month).wrapping_sub(1))
            .copied()
            .unwrap_or(0)
    }

    /// Weeks before the first of a month in a 52-week year
    pub fn weeks_before_month(self, month: u8) -> u16 {
        self.weeks()
            .iter()
            .take(usize::from(month.saturating_sub(1)))
            .map(|&weeks| u16::from(weeks))
            .sum()
    }
}

/// Collects the settings of an [`AccountingChronology`].
///
/// Every setting but the year numbering is required; the year is numbered
/// by the ISO year it ends in unless
/// [`accounting_year_starts_in_iso_year`](Self::accounting_year_starts_in_iso_year)
/// is chosen. The builder is also the serialized form of a chronology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingChronologyBuilder {
    ends_on: Option<Weekday>,
    end: Option<Month>,
    #[serde(default)]
    in_last_week: bool,
    division: Option<AccountingYearDivision>,
    leap_week_in_month: Option<u8>,
    #[serde(default)]
    starts_in_iso_year: bool,
}

impl AccountingChronologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The weekday every year ends on
    #[must_use]
    pub const fn ends_on(mut self, weekday: Weekday) -> Self {
        self.ends_on = Some(weekday);
        self
    }

    /// Years end on the weekday nearest the last day of `month`
    #[must_use]
    pub const fn nearest_end_of(mut self, month: Month) -> Self {
        self.end = Some(month);
        self.in_last_week = false;
        self
    }

    /// Years end on the last such weekday in `month`
    #[must_use]
    pub const fn in_last_week_of(mut self, month: Month) -> Self {
        self.end = Some(month);
        self.in_last_week = true;
        self
    }

    #[must_use]
    pub const fn with_division(mut self, division: AccountingYearDivision) -> Self {
        self.division = Some(division);
        self
    }

    /// The month that gets the extra week of a 53-week year
    #[must_use]
    pub const fn leap_week_in_month(mut self, month: u8) -> Self {
        self.leap_week_in_month = Some(month);
        self
    }

    /// Numbers each year by the ISO year it ends in
    #[must_use]
    pub const fn accounting_year_ends_in_iso_year(mut self) -> Self {
        self.starts_in_iso_year = false;
        self
    }

    /// Numbers each year by the ISO year it starts in
    #[must_use]
    pub const fn accounting_year_starts_in_iso_year(mut self) -> Self {
        self.starts_in_iso_year = true;
        self
    }

    /// Builds the chronology.
    ///
    /// # Errors
    /// Returns `CalendarError::MissingConfiguration` naming the first unset
    /// setting, or `CalendarError::InvalidValue` if the leap week month is
    /// not a month of the division.
    pub fn to_chronology(&self) -> Result<AccountingChronology, CalendarError> {
        let ends_on = self.ends_on.ok_or(CalendarError::MissingConfiguration("ends_on"))?;
        let end = self.end.ok_or(CalendarError::MissingConfiguration("end"))?;
        let division = self.division.ok_or(CalendarError::MissingConfiguration("division"))?;
        let leap_week_in_month = self
            .leap_week_in_month
            .ok_or(CalendarError::MissingConfiguration("leap_week_in_month"))?;
        division
            .month_range()
            .check(i64::from(leap_week_in_month), Field::MonthOfYear)?;

        // a year that starts in an ISO year and ends in December ends in the same ISO year
        let year_offset = i32::from(self.starts_in_iso_year && end != Month::December);
        debug!(
            %ends_on,
            ?end,
            in_last_week = self.in_last_week,
            %division,
            leap_week_in_month,
            year_offset,
            "configured accounting calendar"
        );
        Ok(AccountingChronology {
            ends_on,
            end,
            in_last_week: self.in_last_week,
            division,
            leap_week_in_month,
            year_offset,
        })
    }
}

/// A 52/53-week accounting calendar.
///
/// Built with [`AccountingChronologyBuilder`]; two chronologies are equal
/// when all their settings match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AccountingChronologyBuilder", into = "AccountingChronologyBuilder")]
pub struct AccountingChronology {
    ends_on: Weekday,
    end: Month,
    in_last_week: bool,
    division: AccountingYearDivision,
    leap_week_in_month: u8,
    /// ISO year of a year's end minus its accounting year
    year_offset: i32,
}

impl TryFrom<AccountingChronologyBuilder> for AccountingChronology {
    type Error = CalendarError;

    fn try_from(builder: AccountingChronologyBuilder) -> Result<Self, Self::Error> {
        builder.to_chronology()
    }
}

impl From<AccountingChronology> for AccountingChronologyBuilder {
    fn from(chronology: AccountingChronology) -> Self {
        Self {
            ends_on: Some(chronology.ends_on),
            end: Some(chronology.end),
            in_last_week: chronology.in_last_week,
            division: Some(chronology.division),
            leap_week_in_month: Some(chronology.leap_week_in_month),
            starts_in_iso_year: chronology.year_offset == 1,
        }
    }
}

pub type AccountingDate = Date<AccountingChronology>;

impl AccountingChronology {
    pub const fn ends_on(&self) -> Weekday {
        self.ends_on
    }

    /// The ISO month years end in or near
    pub const fn end(&self) -> Month {
        self.end
    }

    pub const fn is_in_last_week(&self) -> bool {
        self.in_last_week
    }

    pub const fn division(&self) -> AccountingYearDivision {
        self.division
    }

    pub const fn leap_week_in_month(&self) -> u8 {
        self.leap_week_in_month
    }

    /// Epoch day of the last day of a year
    fn year_end(&self, year: i64) -> i64 {
        let iso_year = year + i64::from(self.year_offset);
        let month = self.end.number_from_month() as u8;
        let month_end = if month == DECEMBER {
            iso::to_epoch_day(iso_year + 1, 1, 1) - 1
        } else {
            iso::to_epoch_day(iso_year, month + 1, 1) - 1
        };
        let latest = if self.in_last_week {
            month_end
        } else {
            month_end + NEAREST_END_SLACK
        };
        let target = i64::from(self.ends_on.number_from_monday());
        let current = i64::from(iso::day_of_week(latest));
        latest - (current - target).rem_euclid(i64::from(DAYS_IN_WEEK))
    }

    fn is_long_year(&self, year: i64) -> bool {
        self.year_end(year) - self.year_end(year - 1)
            > i64::from(DAYS_IN_WEEK_YEAR)
    }

    fn days_before_month(&self, year: i32, month: u8) -> i64 {
        let weeks = i64::from(self.division.weeks_before_month(month));
        let leap_week = i64::from(month > self.leap_week_in_month && self.is_leap_year(year));
        (weeks + leap_week) * i64::from(DAYS_IN_WEEK)
    }
}

impl Calendar for AccountingChronology {
    type Era = AccountingEra;

    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed("Accounting")
    }

    fn year_range(&self) -> ValueRange {
        YEARS
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        self.division.months_in_year()
    }

    /// Whether the year has 53 weeks
    fn is_leap_year(&self, year: i32) -> bool {
        self.is_long_year(i64::from(year))
    }

    fn length_of_month(&self, year: i32, month: u8) -> u8 {
        let weeks = self.division.weeks_in_month(month)
            + u8::from(month == self.leap_week_in_month && self.is_leap_year(year));
        weeks * DAYS_IN_WEEK
    }

    fn length_of_year(&self, year: i32) -> u16 {
        DAYS_IN_WEEK_YEAR + u16::from(DAYS_IN_WEEK) * u16::from(self.is_leap_year(year))
    }

    fn year_start(&self, year: i32) -> i64 {
        self.year_end(i64::from(year) - 1) + 1
    }

    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
        let (month, day) = month_day.position();
        self.year_start(year) + self.days_before_month(year, month) + i64::from(day) - 1
    }

    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
        let mut year = iso::year_of_epoch_day(epoch_day) - i64::from(self.year_offset);
        while self.year_end(year - 1) >= epoch_day {
            year -= 1;
        }
        while self.year_end(year) < epoch_day {
            year += 1;
        }
        let year = year as i32;
        let mut rest = epoch_day - self.year_start(year);
        let mut month = 1;
        while month < self.months_in_year(year) && rest >= i64::from(self.length_of_month(year, month)) {
            rest -= i64::from(self.length_of_month(year, month));
            month += 1;
        }
        (year, MonthDay::ordinary(month, rest as u8 + 1))
    }
}
