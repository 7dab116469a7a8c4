//! Eras: a closed enumeration per calendar family.
//!
//! Each calendar names its own era type through `Calendar::Era`. Calls that
//! accept an era from outside the type system go through [`AnyEra`], and
//! converting an `AnyEra` of the wrong family fails with
//! [`CalendarError::EraMismatch`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use crate::{CalendarError, Field, ValueRange, prelude::*};

/// An era of one calendar family.
pub trait Era:
    Copy
    + fmt::Debug
    + fmt::Display
    + Eq
    + Hash
    + Into<AnyEra>
    + TryFrom<AnyEra, Error = CalendarError>
    + 'static
{
    /// Type name reported in mismatch errors
    const NAME: &'static str;

    /// Every era of the family, oldest first
    const VALUES: &'static [Self];

    /// Numeric value reported by `Field::Era`
    fn value(self) -> i64;

    /// Era containing a proleptic year
    fn of_year(proleptic_year: i32) -> Self;

    /// Converts a year-of-era in this era to a proleptic year
    fn proleptic_year(self, year_of_era: i32) -> i32;

    /// Year-of-era of a proleptic year
    fn year_of_era(proleptic_year: i32) -> i32;

    /// Looks an era up by its numeric value.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidValue` for values no era of the family has.
    fn of(value: i64) -> Result<Self, CalendarError> {
        Self::VALUES
            .iter()
            .copied()
            .find(|era| era.value() == value)
            .ok_or_else(|| CalendarError::invalid(Field::Era, value, Self::range()))
    }

    /// Range of the numeric era values
    fn range() -> ValueRange {
        let values = Self::VALUES.iter().map(|era| era.value());
        let min = values.clone().min().unwrap_or(0);
        let max = values.max().unwrap_or(0);
        ValueRange::of(min, max)
    }
}

/// Implements `Era` for a two-era family (before/after year 1).
macro_rules! two_eras {
    ($name:ident, $before:ident, $current:ident) => {
        impl Era for $name {
            const NAME: &'static str = stringify!($name);
            const VALUES: &'static [Self] = &[Self::$before, Self::$current];

            fn value(self) -> i64 {
                match self {
                    Self::$before => 0,
                    Self::$current => 1,
                }
            }

            fn of_year(proleptic_year: i32) -> Self {
                if proleptic_year >= 1 {
                    Self::$current
                } else {
                    Self::$before
                }
            }

            fn proleptic_year(self, year_of_era: i32) -> i32 {
                match self {
                    Self::$before => 1 - year_of_era,
                    Self::$current => year_of_era,
                }
            }

            fn year_of_era(proleptic_year: i32) -> i32 {
                if proleptic_year >= 1 {
                    proleptic_year
                } else {
                    1 - proleptic_year
                }
            }
        }
    };
}

/// Implements `Era` for a family with one era starting at year 1.
macro_rules! single_era {
    ($name:ident, $only:ident) => {
        impl Era for $name {
            const NAME: &'static str = stringify!($name);
            const VALUES: &'static [Self] = &[Self::$only];

            fn value(self) -> i64 {
                1
            }

            fn of_year(_proleptic_year: i32) -> Self {
                Self::$only
            }

            fn proleptic_year(self, year_of_era: i32) -> i32 {
                year_of_era
            }

            fn year_of_era(proleptic_year: i32) -> i32 {
                proleptic_year
            }
        }
    };
}

/// Wires a family era into `AnyEra` both ways.
macro_rules! any_era_variant {
    ($name:ident, $variant:ident) => {
        impl From<$name> for AnyEra {
            fn from(era: $name) -> Self {
                Self::$variant(era)
            }
        }

        impl TryFrom<AnyEra> for $name {
            type Error = CalendarError;

            fn try_from(era: AnyEra) -> Result<Self, Self::Error> {
                match era {
                    AnyEra::$variant(inner) => Ok(inner),
                    found => Err(CalendarError::EraMismatch {
                        expected: <$name as Era>::NAME,
                        found,
                    }),
                }
            }
        }
    };
}

/// Coptic eras, counted from the Era of the Martyrs (284 CE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum CopticEra {
    #[display(fmt = "BEFORE_AM")]
    BeforeAm,
    #[display(fmt = "AM")]
    Am,
}

/// Ethiopic eras, counted from the Incarnation (8 CE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum EthiopicEra {
    #[display(fmt = "BEFORE_INCARNATION")]
    BeforeIncarnation,
    #[display(fmt = "INCARNATION")]
    Incarnation,
}

/// Julian eras, shared by the Julian and cutover calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum JulianEra {
    #[display(fmt = "BC")]
    Bc,
    #[display(fmt = "AD")]
    Ad,
}

/// The single Discordian era, Year of Our Lady of Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum DiscordianEra {
    #[display(fmt = "YOLD")]
    Yold,
}

/// The single International Fixed era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum InternationalFixedEra {
    #[display(fmt = "CE")]
    Ce,
}

/// ISO eras, used by the Symmetry calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum IsoEra {
    #[display(fmt = "BCE")]
    Bce,
    #[display(fmt = "CE")]
    Ce,
}

/// Pax eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum PaxEra {
    #[display(fmt = "BCE")]
    Bce,
    #[display(fmt = "CE")]
    Ce,
}

/// Accounting calendar eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AccountingEra {
    #[display(fmt = "BCE")]
    Bce,
    #[display(fmt = "CE")]
    Ce,
}

two_eras!(CopticEra, BeforeAm, Am);
two_eras!(EthiopicEra, BeforeIncarnation, Incarnation);
two_eras!(JulianEra, Bc, Ad);
two_eras!(IsoEra, Bce, Ce);
two_eras!(PaxEra, Bce, Ce);
two_eras!(AccountingEra, Bce, Ce);
single_era!(DiscordianEra, Yold);
single_era!(InternationalFixedEra, Ce);

/// An era of any calendar family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AnyEra {
    Coptic(CopticEra),
    Ethiopic(EthiopicEra),
    Julian(JulianEra),
    Discordian(DiscordianEra),
    InternationalFixed(InternationalFixedEra),
    Iso(IsoEra),
    Pax(PaxEra),
    Accounting(AccountingEra),
}

any_era_variant!(CopticEra, Coptic);
any_era_variant!(EthiopicEra, Ethiopic);
any_era_variant!(JulianEra, Julian);
any_era_variant!(DiscordianEra, Discordian);
any_era_variant!(InternationalFixedEra, InternationalFixed);
any_era_variant!(IsoEra, Iso);
any_era_variant!(PaxEra, Pax);
any_era_variant!(AccountingEra, Accounting);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_era_years() {
        assert_eq!(CopticEra::of_year(1), CopticEra::Am);
        assert_eq!(CopticEra::of_year(0), CopticEra::BeforeAm);
        assert_eq!(CopticEra::year_of_era(0), 1);
        assert_eq!(CopticEra::year_of_era(-4), 5);
        assert_eq!(CopticEra::BeforeAm.proleptic_year(5), -4);
        assert_eq!(CopticEra::Am.proleptic_year(5), 5);
    }

    #[test]
    fn test_single_era_years() {
        assert_eq!(DiscordianEra::of_year(3178), DiscordianEra::Yold);
        assert_eq!(DiscordianEra::Yold.proleptic_year(3178), 3178);
        assert_eq!(DiscordianEra::Yold.value(), 1);
        assert_eq!(InternationalFixedEra::range(), ValueRange::of(1, 1));
    }

    #[test]
    fn test_of_value() {
        assert_eq!(JulianEra::of(0), Ok(JulianEra::Bc));
        assert_eq!(JulianEra::of(1), Ok(JulianEra::Ad));
        assert_eq!(
            JulianEra::of(2),
            Err(CalendarError::InvalidValue {
                field: Field::Era,
                value: 2,
                range: ValueRange::of(0, 1),
            })
        );
        assert!(DiscordianEra::of(0).is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CopticEra::BeforeAm.to_string(), "BEFORE_AM");
        assert_eq!(EthiopicEra::Incarnation.to_string(), "INCARNATION");
        assert_eq!(JulianEra::Ad.to_string(), "AD");
        assert_eq!(DiscordianEra::Yold.to_string(), "YOLD");
        assert_eq!(AnyEra::from(IsoEra::Bce).to_string(), "BCE");
    }

    #[test]
    fn test_any_era_round_trip_and_mismatch() {
        let any: AnyEra = CopticEra::Am.into();
        assert_eq!(CopticEra::try_from(any), Ok(CopticEra::Am));
        assert_eq!(
            JulianEra::try_from(any),
            Err(CalendarError::EraMismatch {
                expected: "JulianEra",
                found: AnyEra::Coptic(CopticEra::Am),
            })
        );
        // same names, different families
        assert!(PaxEra::try_from(AnyEra::Iso(IsoEra::Ce)).is_err());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&AnyEra::Julian(JulianEra::Bc)).unwrap();
        assert_eq!(json, r#"{"Julian":"Bc"}"#);
        let parsed: AnyEra = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, AnyEra::Julian(JulianEra::Bc));
    }
}
