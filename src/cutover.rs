//! A Julian calendar that switches to the Gregorian calendar on a cutover day.
//!
//! Days before the cutover are read with Julian rules and days from the
//! cutover on with Gregorian rules. The days skipped by the switch (eleven
//! of them in the British switch of September 1752) do not exist: the month
//! and year containing the switch are shorter, and a date naming a skipped
//! day is moved forward by the length of the gap rather than rejected.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::consts::{BRITISH_CUTOVER, DECEMBER, EPOCH_DAY_0200_03_01, JANUARY, MAX_MONTH};
use crate::era::JulianEra;
use crate::{Calendar, CalendarError, Date, MonthDay, ValueRange, iso, julian};

const BRITISH: NaiveDate = match NaiveDate::from_ymd_opt(
    BRITISH_CUTOVER.0,
    BRITISH_CUTOVER.1 as u32,
    BRITISH_CUTOVER.2 as u32,
) {
    Some(date) => date,
    None => panic!("British cutover is a valid date"),
};

/// A Julian-to-Gregorian calendar with a configurable cutover.
///
/// The cutover is the first Gregorian day. It must be on or after
/// 0200-03-01, from which point the Julian calendar never runs ahead of the
/// Gregorian one and every date reads unambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CutoverConfig", into = "CutoverConfig")]
pub struct CutoverChronology {
    cutover: NaiveDate,
}

/// Configuration form of a cutover chronology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoverConfig {
    /// The first day on the Gregorian calendar
    pub cutover: NaiveDate,
}

impl TryFrom<CutoverConfig> for CutoverChronology {
    type Error = CalendarError;

    fn try_from(config: CutoverConfig) -> Result<Self, Self::Error> {
        Self::new(config.cutover)
    }
}

impl From<CutoverChronology> for CutoverConfig {
    fn from(chronology: CutoverChronology) -> Self {
        Self {
            cutover: chronology.cutover,
        }
    }
}

impl Default for CutoverChronology {
    fn default() -> Self {
        Self::british()
    }
}

pub type CutoverDate = Date<CutoverChronology>;

impl CutoverChronology {
    /// Creates a chronology switching to the Gregorian calendar on `cutover`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidConfiguration` if the cutover is before 0200-03-01.
    pub fn new(cutover: NaiveDate) -> Result<Self, CalendarError> {
        if iso::epoch_day_of(cutover) < EPOCH_DAY_0200_03_01 {
            return Err(CalendarError::InvalidConfiguration(format!(
                "Cutover {cutover} is before 0200-03-01"
            )));
        }
        debug!(%cutover, "configured Julian to Gregorian cutover");
        Ok(Self { cutover })
    }

    /// The British switch: Wednesday 1752-09-02 was followed by Thursday 1752-09-14
    pub const fn british() -> Self {
        Self { cutover: BRITISH }
    }

    /// Returns the first Gregorian day
    pub const fn cutover(&self) -> NaiveDate {
        self.cutover
    }

    pub fn is_british(&self) -> bool {
        self.cutover == BRITISH
    }

    fn cutover_day(&self) -> i64 {
        iso::epoch_day_of(self.cutover)
    }

    /// Epoch day named by `(year, month, day)`: the Gregorian reading when it
    /// is on or after the cutover, else the Julian one (which lands after the
    /// cutover for skipped days)
    fn epoch_day_of(&self, year: i64, month: u8, day: u8) -> i64 {
        if day <= iso::length_of_month(year, month) {
            let gregorian = iso::to_epoch_day(year, month, day);
            if gregorian >= self.cutover_day() {
                return gregorian;
            }
        }
        julian::to_epoch_day(year, month, day)
    }

    fn month_start(&self, year: i64, month: u8) -> i64 {
        let cutover = self.cutover_day();
        let gregorian = iso::to_epoch_day(year, month, 1);
        if gregorian >= cutover {
            gregorian
        } else {
            julian::to_epoch_day(year, month, 1).min(cutover)
        }
    }

    fn next_month_start(&self, year: i64, month: u8) -> i64 {
        if month == DECEMBER {
            self.month_start(year + 1, JANUARY)
        } else {
            self.month_start(year, month + 1)
        }
    }
}

impl Calendar for CutoverChronology {
    type Era = JulianEra;

    fn id(&self) -> Cow<'static, str> {
        if self.is_british() {
            Cow::Borrowed("BritishCutover")
        } else {
            Cow::Owned(format!("Cutover[{}]", self.cutover))
        }
    }

    fn year_range(&self) -> ValueRange {
        julian::YEARS
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        MAX_MONTH
    }

    /// Whether February of the year has a 29th
    fn is_leap_year(&self, year: i32) -> bool {
        self.last_day_of_month(year, 2) == 29
    }

    fn length_of_month(&self, year: i32, month: u8) -> u8 {
        let year = i64::from(year);
        let days = self.next_month_start(year, month) - self.month_start(year, month);
        u8::try_from(days).unwrap_or(0)
    }

    /// Gregorian month length once the Gregorian month end is reached, else Julian
    fn last_day_of_month(&self, year: i32, month: u8) -> u8 {
        let year = i64::from(year);
        let gregorian = iso::length_of_month(year, month);
        if iso::to_epoch_day(year, month, gregorian) >= self.cutover_day() {
            gregorian
        } else {
            julian::length_of_month(year, month)
        }
    }

    fn to_epoch_day(&self, year: i32, month_day: MonthDay) -> i64 {
        let (month, day) = month_day.position();
        self.epoch_day_of(i64::from(year), month, day)
    }

    fn from_epoch_day(&self, epoch_day: i64) -> (i32, MonthDay) {
        let (year, month, day) = if epoch_day >= self.cutover_day() {
            iso::from_epoch_day(epoch_day)
        } else {
            julian::from_epoch_day(epoch_day)
        };
        (year as i32, MonthDay::ordinary(month, day))
    }

    fn year_start(&self, year: i32) -> i64 {
        self.month_start(i64::from(year), JANUARY)
    }

    fn resolve(&self, year: i32, month: u8, day: u8) -> Result<(i32, MonthDay), CalendarError> {
        self.check_ordinary(year, month, day)?;
        let epoch_day = self.epoch_day_of(i64::from(year), month, day);
        let resolved = self.from_epoch_day(epoch_day);
        if resolved != (year, MonthDay::ordinary(month, day)) {
            let (to_year, to) = resolved;
            trace!(
                year,
                month,
                day,
                to_year,
                to_month = to.month(),
                to_day = to.day(),
                "date in cutover gap moved forward"
            );
        }
        Ok(resolved)
    }

    /// Counts only the days the month really has
    fn grid_day_of_month(&self, year: i32, month_day: MonthDay) -> u16 {
        let epoch_day = self.to_epoch_day(year, month_day);
        let offset = epoch_day - self.month_start(i64::from(year), month_day.month());
        u16::try_from(offset + 1).unwrap_or(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Period, Unit};

    fn british(year: i32, month: u8, day: u8) -> CutoverDate {
        CutoverChronology::british().date(year, month, day).unwrap()
    }

    fn iso_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_after_gap() {
        let before = british(1752, 9, 2);
        assert_eq!(before.plus(1, Unit::Days), Ok(british(1752, 9, 14)));
        assert_eq!(british(1752, 9, 14).minus(1, Unit::Days), Ok(before.clone()));
        assert_eq!(before.to_iso(), Ok(iso_date(1752, 9, 13)));
        assert_eq!(british(1752, 9, 14).to_iso(), Ok(iso_date(1752, 9, 14)));
    }

    #[test]
    fn test_gap_days_move_forward() {
        struct TestCase {
            day: u8,
            expected: u8,
        }

        let cases = [
            TestCase { day: 3, expected: 14 },
            TestCase { day: 5, expected: 16 },
            TestCase { day: 13, expected: 24 },
            TestCase { day: 14, expected: 14 },
        ];

        for case in &cases {
            let date = british(1752, 9, case.day);
            assert_eq!(date.day_of_month(), case.expected, "1752-09-{}", case.day);
            assert_eq!(date.month(), 9);
        }
    }

    #[test]
    fn test_cutover_month_and_year_lengths() {
        let chronology = CutoverChronology::british();
        assert_eq!(chronology.length_of_month(1752, 9), 19);
        assert_eq!(chronology.last_day_of_month(1752, 9), 30);
        assert_eq!(chronology.length_of_month(1752, 8), 31);
        assert_eq!(chronology.length_of_year(1752), 355);
        assert_eq!(chronology.length_of_year(1751), 365);
        assert_eq!(chronology.length_of_year(1753), 365);
        assert!(chronology.is_leap_year(1700));
        assert!(!chronology.is_leap_year(1800));
        assert!(chronology.is_leap_year(1752));
        assert!(chronology.date(1700, 2, 29).is_ok());
        assert!(chronology.date(1800, 2, 29).is_err());
    }

    #[test]
    fn test_fields_around_gap() {
        let date = british(1752, 9, 14);
        assert_eq!(date.get(Field::DayOfYear), Ok(247));
        assert_eq!(date.get(Field::AlignedDayOfWeekInMonth), Ok(3));
        assert_eq!(date.get(Field::AlignedWeekOfMonth), Ok(1));
        // Wednesday then Thursday
        assert_eq!(british(1752, 9, 2).get(Field::DayOfWeek), Ok(3));
        assert_eq!(date.get(Field::DayOfWeek), Ok(4));
        assert_eq!(british(1752, 12, 31).get(Field::DayOfYear), Ok(355));
        assert_eq!(date.range(Field::AlignedWeekOfMonth).map(|r| r.max()), Ok(3));
    }

    #[test]
    fn test_lenient_with_across_gap() {
        struct TestCase {
            from: (i32, u8, u8),
            value: i64,
            expected: (i32, u8, u8),
        }

        let cases = [
            TestCase {
                from: (1752, 9, 1),
                value: 3,
                expected: (1752, 9, 14),
            },
            TestCase {
                from: (1752, 9, 1),
                value: 14,
                expected: (1752, 9, 14),
            },
            TestCase {
                from: (1752, 9, 20),
                value: 2,
                expected: (1752, 9, 2),
            },
            TestCase {
                from: (1752, 9, 20),
                value: 31,
                expected: (1752, 10, 1),
            },
            TestCase {
                from: (1752, 9, 20),
                value: 0,
                expected: (1752, 8, 31),
            },
        ];

        for case in &cases {
            let (y, m, d) = case.from;
            let result = british(y, m, d).with(Field::DayOfMonth, case.value).unwrap();
            let (y, m, d) = case.expected;
            assert_eq!(result, british(y, m, d), "{:?} day {}", case.from, case.value);
        }
    }

    #[test]
    fn test_months_across_gap() {
        assert_eq!(british(1752, 8, 31).plus(1, Unit::Months), Ok(british(1752, 9, 30)));
        assert_eq!(british(1752, 8, 5).plus(1, Unit::Months), Ok(british(1752, 9, 16)));
        let start = british(1752, 8, 14);
        let end = british(1752, 9, 14);
        assert_eq!(start.until(&end, Unit::Days), Ok(20));
        assert_eq!(start.until(&end, Unit::Months), Ok(1));
        assert_eq!(start.until_period(&end), Ok(Period::new(0, 1, 0)));
        assert_eq!(british(1752, 9, 2).until_period(&end), Ok(Period::new(0, 0, 1)));
    }

    #[test]
    fn test_until_counts_whole_months() {
        struct TestCase {
            start: (i32, u8, u8),
            end: (i32, u8, u8),
            months: i64,
            period: Period,
        }

        let cases = [
            TestCase {
                start: (1752, 8, 20),
                end: (1752, 9, 14),
                months: 0,
                period: Period::new(0, 0, 14),
            },
            TestCase {
                start: (1752, 8, 5),
                end: (1752, 9, 14),
                months: 1,
                period: Period::new(0, 1, -2),
            },
            TestCase {
                start: (1752, 2, 29),
                end: (1753, 2, 28),
                months: 11,
                period: Period::new(0, 11, 30),
            },
            TestCase {
                start: (1751, 9, 30),
                end: (1752, 9, 20),
                months: 11,
                period: Period::new(0, 11, 10),
            },
        ];

        for case in &cases {
            let (y, m, d) = case.start;
            let start = british(y, m, d);
            let (y, m, d) = case.end;
            let end = british(y, m, d);
            assert_eq!(start.until(&end, Unit::Months), Ok(case.months), "{start} to {end}");
            assert_eq!(start.until(&end, Unit::Years), Ok(0), "{start} to {end}");
            assert_eq!(start.until_period(&end), Ok(case.period), "{start} to {end}");
            assert_eq!(start.plus_period(case.period), Ok(end));
        }
    }

    #[test]
    fn test_leap_day_plus_year_clamps() {
        let leap_day = british(1752, 2, 29);
        assert_eq!(leap_day.plus(1, Unit::Years), Ok(british(1753, 2, 28)));
        assert_eq!(british(1800, 2, 28).plus(4, Unit::Years), Ok(british(1804, 2, 28)));
        assert_eq!(british(1804, 2, 29).plus(1, Unit::Years), Ok(british(1805, 2, 28)));
        assert_eq!(british(1804, 2, 29).until(&british(1805, 2, 28), Unit::Years), Ok(0));
    }

    #[test]
    fn test_period_round_trip_across_gap() {
        let dates = [
            british(1752, 7, 31),
            british(1752, 8, 31),
            british(1752, 9, 1),
            british(1752, 9, 2),
            british(1752, 9, 14),
            british(1752, 9, 30),
            british(1752, 10, 2),
            british(1753, 9, 5),
        ];
        for start in &dates {
            for end in &dates {
                let period = start.until_period(end).unwrap();
                assert_eq!(start.plus_period(period).as_ref(), Ok(end), "{start} + {period}");
            }
        }
    }

    #[test]
    fn test_other_cutovers() {
        let gregorian = CutoverChronology::new(iso_date(1582, 10, 15)).unwrap();
        assert_eq!(gregorian.id(), "Cutover[1582-10-15]");
        assert_eq!(gregorian.length_of_month(1582, 10), 21);
        assert_eq!(gregorian.date(1582, 10, 4).unwrap().plus(1, Unit::Days), gregorian.date(1582, 10, 15));
        assert_ne!(gregorian, CutoverChronology::british());

        assert!(matches!(
            CutoverChronology::new(iso_date(100, 1, 1)),
            Err(CalendarError::InvalidConfiguration(_))
        ));
        assert!(CutoverChronology::new(iso_date(200, 3, 1)).is_ok());
    }

    #[test]
    fn test_mixed_configurations_fail_fast() {
        let gregorian = CutoverChronology::new(iso_date(1582, 10, 15)).unwrap();
        let a = british(1800, 1, 1);
        let b = gregorian.date(1800, 1, 1).unwrap();
        assert_eq!(a.to_epoch_day(), b.to_epoch_day());
        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
        assert!(matches!(
            a.until(&b, Unit::Days),
            Err(CalendarError::CalendarMismatch { .. })
        ));
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(british(1752, 9, 14).to_string(), "BritishCutover AD 1752-09-14");
        let json = serde_json::to_string(&CutoverChronology::british()).unwrap();
        assert_eq!(json, r#"{"cutover":"1752-09-14"}"#);
        let parsed: CutoverChronology = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, CutoverChronology::british());
        let invalid: Result<CutoverChronology, _> = serde_json::from_str(r#"{"cutover":"0100-01-01"}"#);
        assert!(invalid.is_err());
    }
}
