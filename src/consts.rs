/// Days in a standard seven-day week
pub const DAYS_IN_WEEK: u8 = 7;

/// Maximum month number in the Gregorian and Julian calendars (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by leap year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days before the first of each month in a non-leap year (index 0 unused)
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a 400-year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i64 = 146_097;
/// Days in a 4-year Julian cycle
pub(crate) const DAYS_PER_JULIAN_CYCLE: i64 = 1_461;

/// Days in a common year of the Gregorian, Julian and Nile calendars
pub(crate) const DAYS_IN_COMMON_YEAR: u16 = 365;
/// Days in a year made of whole weeks (Symmetry, Pax, accounting)
pub(crate) const DAYS_IN_WEEK_YEAR: u16 = 364;

/// Epoch day of 0001-01-01 (ISO)
pub(crate) const EPOCH_DAY_0001_01_01: i64 = -719_162;
/// Epoch day of 0000-12-31 (ISO), the first day of Pax year 1
pub(crate) const EPOCH_DAY_0000_12_31: i64 = -719_163;
/// Epoch day of 0000-12-30 (ISO), the first day of Julian year 1
pub(crate) const EPOCH_DAY_0000_12_30: i64 = -719_164;

/// Epoch day of 0200-03-01 (ISO), the earliest permitted cutover.
/// From here on the Julian calendar never runs ahead of the Gregorian one.
pub(crate) const EPOCH_DAY_0200_03_01: i64 = -646_420;

/// Year-month-day of the British switch to the Gregorian calendar
pub const BRITISH_CUTOVER: (i32, u8, u8) = (1752, 9, 14);
