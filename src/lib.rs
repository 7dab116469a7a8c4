//! Alternative civil calendars on a shared epoch-day axis.
//!
//! Each calendar only implements the [`Calendar`] kernel: how to place a
//! year, month and day on the count of days since 1970-01-01 and back, plus
//! the shape of its years and months. [`Date`] builds everything else on
//! top of that for every calendar alike: field access, lenient field
//! setting, unit arithmetic, spans and periods.
//!
//! ```
//! use calendrica::{Calendar, Coptic, Field, Julian, Unit};
//!
//! let date = Coptic.date(1727, 6, 8)?;
//! assert_eq!(date.to_string(), "Coptic AM 1727-06-08");
//! assert_eq!(date.get(Field::DayOfYear)?, 158);
//!
//! let later = date.plus(1, Unit::Months)?;
//! assert_eq!(later.day_of_month(), 8);
//!
//! let julian = date.to_calendar(&Julian)?;
//! assert_eq!(julian.to_string(), "Julian AD 2011-02-02");
//! # Ok::<(), calendrica::CalendarError>(())
//! ```

mod accounting;
mod calendar;
mod consts;
mod cutover;
mod date;
mod datetime;
mod discordian;
mod era;
mod error;
mod fixed;
mod iso;
mod julian;
mod nile;
mod pax;
mod prelude;
mod range;
mod symmetry;
mod types;

pub use accounting::{
    AccountingChronology, AccountingChronologyBuilder, AccountingDate, AccountingYearDivision,
};
pub use calendar::Calendar;
pub use consts::{BRITISH_CUTOVER, DAYS_IN_WEEK};
pub use cutover::{CutoverChronology, CutoverConfig, CutoverDate};
pub use date::Date;
pub use datetime::DateTime;
pub use discordian::{Discordian, DiscordianDate};
pub use era::{
    AccountingEra, AnyEra, CopticEra, DiscordianEra, Era, EthiopicEra, InternationalFixedEra,
    IsoEra, JulianEra, PaxEra,
};
pub use error::CalendarError;
pub use fixed::{InternationalFixed, InternationalFixedDate};
pub use julian::{Julian, JulianDate};
pub use nile::{Coptic, CopticDate, Ethiopic, EthiopicDate};
pub use pax::{Pax, PaxDate};
pub use range::ValueRange;
pub use symmetry::{Symmetry010, Symmetry010Date, Symmetry454, Symmetry454Date};
pub use types::{EpagomenalDay, Field, MonthDay, Period, Unit};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_one_day_in_every_calendar() {
        let iso = NaiveDate::from_ymd_opt(2012, 7, 6).unwrap();
        let coptic = Coptic.date_from_iso(iso).unwrap();
        assert_eq!(coptic, Coptic.date(1728, 10, 29).unwrap());

        assert_eq!(coptic.to_calendar(&Ethiopic), Ethiopic.date(2004, 10, 29));
        assert_eq!(coptic.to_calendar(&Julian), Julian.date(2012, 6, 23));
        assert_eq!(
            coptic.to_calendar(&CutoverChronology::british()),
            CutoverChronology::british().date(2012, 7, 6)
        );
        assert_eq!(coptic.to_calendar(&Discordian), Discordian.date(3178, 3, 41));
        assert_eq!(coptic.to_calendar(&InternationalFixed), InternationalFixed.date(2012, 7, 19));
        assert_eq!(coptic.to_calendar(&Symmetry010), Symmetry010.date(2012, 7, 5));
        assert_eq!(coptic.to_calendar(&Symmetry454), Symmetry454.date(2012, 7, 5));
        assert_eq!(coptic.to_calendar(&Pax), Pax.date(2012, 7, 27));
        assert_eq!(coptic.to_iso(), Ok(iso));
    }

    #[test]
    fn test_out_of_range_conversion() {
        let far = Julian.date(999_999, 1, 1).unwrap();
        assert!(matches!(
            far.to_calendar(&Coptic),
            Err(CalendarError::InvalidValue {
                field: Field::EpochDay,
                ..
            })
        ));
        assert!(far.to_iso().is_err());
    }
}
