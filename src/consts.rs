/// Degrees in a full circle
pub const DEGREES_PER_CIRCLE: f64 = 360.0;
/// Degrees in half a circle
pub const DEGREES_HALF: f64 = 180.0;
/// Degrees in a quarter circle
pub const DEGREES_QUARTER: f64 = 90.0;
/// Width of one zodiac sign in degrees
pub const DEGREES_PER_SIGN: f64 = 30.0;

/// Number of zodiac signs
pub const SIGN_COUNT: u8 = 12;
/// Signs between a sign and its opposite
pub const OPPOSITE_SIGN_OFFSET: i32 = 6;

/// Orb cap used for bodies the rule tables do not classify
pub const FALLBACK_ORB_CAP: f64 = 2.0;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for September
pub const SEPTEMBER: u8 = 9;
/// Month number for October
pub const OCTOBER: u8 = 10;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Last day index of each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
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

/// Leap year occurs every 4 years (the only rule in the Julian calendar)
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not Gregorian leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a week
pub(crate) const DAYS_PER_WEEK: i64 = 7;
/// Shift that makes `(day_count + offset) mod 7` zero on Sundays
pub(crate) const WEEKDAY_OFFSET: i64 = 1;

/// Day count 0 is noon-starting Julian day 0, so civil days begin half a day earlier
pub(crate) const JULIAN_DATE_DAY_START: f64 = 0.5;
/// Hours in a day
pub(crate) const HOURS_PER_DAY: f64 = 24.0;

/// Largest distance from day 0 a day count may have when converted to a civil
/// date (about a billion years). Conversions clamp to it.
pub const DAY_COUNT_LIMIT: i64 = 365_000_000_000;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Month-first format separator (legacy US format)
pub const MONTH_FIRST_SEPARATOR: char = '/';
