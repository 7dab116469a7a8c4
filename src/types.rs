use crate::{CalendarError, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of temporal fields a date can be asked about.
///
/// Calendars only understand the date-based subset; asking for a time-of-day
/// or instant field fails with [`CalendarError::UnsupportedField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum Field {
    NanoOfDay,
    SecondOfMinute,
    MinuteOfHour,
    HourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
}

impl Field {
    /// Every field, in declaration order
    pub const ALL: [Self; 20] = [
        Self::NanoOfDay,
        Self::SecondOfMinute,
        Self::MinuteOfHour,
        Self::HourOfDay,
        Self::AmPmOfDay,
        Self::DayOfWeek,
        Self::AlignedDayOfWeekInMonth,
        Self::AlignedDayOfWeekInYear,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::EpochDay,
        Self::AlignedWeekOfMonth,
        Self::AlignedWeekOfYear,
        Self::MonthOfYear,
        Self::ProlepticMonth,
        Self::YearOfEra,
        Self::Year,
        Self::Era,
        Self::InstantSeconds,
        Self::OffsetSeconds,
    ];

    /// Whether the field belongs to the date-based subset every calendar supports
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Self::DayOfWeek
                | Self::AlignedDayOfWeekInMonth
                | Self::AlignedDayOfWeekInYear
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::EpochDay
                | Self::AlignedWeekOfMonth
                | Self::AlignedWeekOfYear
                | Self::MonthOfYear
                | Self::ProlepticMonth
                | Self::YearOfEra
                | Self::Year
                | Self::Era
        )
    }
}

/// The closed set of units dates can be moved by or measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum Unit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
    Forever,
}

impl Unit {
    /// Every unit, in declaration order
    pub const ALL: [Self; 16] = [
        Self::Nanos,
        Self::Micros,
        Self::Millis,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::HalfDays,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
        Self::Decades,
        Self::Centuries,
        Self::Millennia,
        Self::Eras,
        Self::Forever,
    ];

    /// Whether the unit is one of the calendar units (days up to eras)
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Self::Days
                | Self::Weeks
                | Self::Months
                | Self::Years
                | Self::Decades
                | Self::Centuries
                | Self::Millennia
                | Self::Eras
        )
    }

    /// Number of years in a year-multiple unit
    pub(crate) const fn years(self) -> Option<i64> {
        match self {
            Self::Years => Some(1),
            Self::Decades => Some(10),
            Self::Centuries => Some(100),
            Self::Millennia => Some(1_000),
            _ => None,
        }
    }
}

/// A day standing outside the regular month grid of its calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum EpagomenalDay {
    /// International Fixed leap day, following June 28 in leap years
    #[display(fmt = "Leap Day")]
    LeapDay,
    /// International Fixed year-end day, following December 28
    #[display(fmt = "Year Day")]
    YearDay,
    /// Discordian leap day, following Chaos 59 in leap years
    #[display(fmt = "St. Tib's Day")]
    StTibsDay,
}

impl EpagomenalDay {
    /// Numeric `(month, day)` reported by field access for this day
    pub const fn position(self) -> (u8, u8) {
        match self {
            Self::LeapDay => (6, 29),
            Self::YearDay => (13, 29),
            Self::StTibsDay => (0, 0),
        }
    }

    /// The ordinary day just before this one, used for month and year arithmetic
    pub const fn anchor(self) -> (u8, u8) {
        match self {
            Self::LeapDay => (6, 28),
            Self::YearDay => (13, 28),
            Self::StTibsDay => (1, 59),
        }
    }
}

/// The month-and-day part of a date.
///
/// Epagomenal days are a separate variant rather than an overloaded month
/// number; [`MonthDay::position`] gives the numeric view used by fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthDay {
    Ordinary { month: u8, day: u8 },
    Epagomenal(EpagomenalDay),
}

impl MonthDay {
    /// Creates an ordinary month-day pair (not validated)
    pub const fn ordinary(month: u8, day: u8) -> Self {
        Self::Ordinary { month, day }
    }

    /// Numeric `(month, day)`; epagomenal days use their sentinel position
    pub const fn position(self) -> (u8, u8) {
        match self {
            Self::Ordinary { month, day } => (month, day),
            Self::Epagomenal(kind) => kind.position(),
        }
    }

    /// Returns the month number (sentinel for epagomenal days)
    pub const fn month(self) -> u8 {
        self.position().0
    }

    /// Returns the day number (sentinel for epagomenal days)
    pub const fn day(self) -> u8 {
        self.position().1
    }

    /// Returns the epagomenal kind, if this is one
    pub const fn epagomenal(self) -> Option<EpagomenalDay> {
        match self {
            Self::Ordinary { .. } => None,
            Self::Epagomenal(kind) => Some(kind),
        }
    }

    pub const fn is_epagomenal(self) -> bool {
        matches!(self, Self::Epagomenal(_))
    }

    /// Numeric `(month, day)` of the nearest ordinary day at or before this one
    pub const fn anchor(self) -> (u8, u8) {
        match self {
            Self::Ordinary { month, day } => (month, day),
            Self::Epagomenal(kind) => kind.anchor(),
        }
    }
}

/// A span of years, months and days, as returned by `Date::until_period`.
///
/// The decomposition is canonical rather than unique: applying it with
/// `Date::plus_period` to the start date gives back the end date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    years: i64,
    months: i64,
    days: i64,
}

impl Period {
    /// The empty period
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(years: i64, months: i64, days: i64) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    pub const fn years(&self) -> i64 {
        self.years
    }

    pub const fn months(&self) -> i64 {
        self.months
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Total months, given a fixed number of months per year
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if the total does not fit in `i64`.
    pub fn total_months(&self, months_in_year: u8) -> Result<i64, CalendarError> {
        self.years
            .checked_mul(i64::from(months_in_year))
            .and_then(|m| m.checked_add(self.months))
            .ok_or(CalendarError::Overflow)
    }

    /// Returns the period with every component negated
    ///
    /// # Errors
    /// Returns `CalendarError::Overflow` if a component is `i64::MIN`.
    pub fn negated(&self) -> Result<Self, CalendarError> {
        match (
            self.years.checked_neg(),
            self.months.checked_neg(),
            self.days.checked_neg(),
        ) {
            (Some(years), Some(months), Some(days)) => Ok(Self::new(years, months, days)),
            _ => Err(CalendarError::Overflow),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}
