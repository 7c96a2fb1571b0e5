//! Circle arithmetic, Julian/Gregorian calendar conversion and astrological
//! rule tables for chart calculation.
//!
//! Angles are `f64` degrees unless a function name says radians. Years use
//! astronomical numbering (year 0 is 1 BC). Calendar dates before 15 October
//! 1582 are Julian, dates from then on are Gregorian, and the day count is
//! continuous across the switch; see [`calendar`] for other reform dates.

pub mod calendar;
pub mod circle;
mod consts;
mod prelude;
pub mod rules;
mod types;

pub use calendar::{
    CalendarError, CalendarReform, ReformConfig, add_day_skipping_gap, civil_to_day_count,
    day_count_to_civil, day_of_week, days_in_month, is_leap_year, julian_date,
    julian_date_to_civil, last_day_of_month,
};
pub use circle::{
    degrees_to_packed_dm, midpoint, normalize_degrees, normalize_radians, packed_dm_to_degrees,
    polar_angle, polar_angle_radians, shortest_distance, signed_difference,
};
pub use consts::*;
use consts::{HOURS_PER_DAY, JULIAN_DATE_DAY_START};
pub use rules::{Aspect, Body, BodyRules, Dignity, RuleTables, RuleTablesConfig, RulesError};
pub use types::{Day, Month, Sign, sign_mod12};

use crate::prelude::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: i32 },
    #[display(fmt = "Day {year}-{month:02}-{day:02} was skipped by the calendar reform")]
    SkippedDay { month: u8, day: u8, year: i32 },
    #[display(fmt = "Invalid sign: {} (must be 1-{})", "_0", SIGN_COUNT)]
    InvalidSign(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// A date that exists in the civil calendar of a given reform.
///
/// The date remembers the reform it was validated against, and every day-count
/// operation reads it through that reform. Fields are ordered so the derived
/// ordering is chronological for dates under the same reform.
///
/// The string form (and so serde) carries no reform; parsing always uses
/// [`CalendarReform::GREGORIAN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    year: i32,
    month: Month,
    day: Day,
    reform: CalendarReform,
}

impl CivilDate {
    /// Creates a date validated against the standard 1582 reform.
    ///
    /// # Errors
    /// Returns `ParseError` if the month or day is out of range or the day was
    /// skipped by the reform.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        Self::new_in(year, month, day, &CalendarReform::GREGORIAN)
    }

    /// Creates a date validated against the given reform.
    ///
    /// # Errors
    /// Same as [`CivilDate::new`].
    pub fn new_in(
        year: i32,
        month: u8,
        day: u8,
        reform: &CalendarReform,
    ) -> Result<Self, ParseError> {
        let month_nz = Month::new(month)?;
        let day_nz = Day::new_in(day, year, month, reform)?;
        Ok(Self {
            year,
            month: month_nz,
            day: day_nz,
            reform: *reform,
        })
    }

    pub(crate) const fn from_parts(
        year: i32,
        month: Month,
        day: Day,
        reform: CalendarReform,
    ) -> Self {
        Self {
            year,
            month,
            day,
            reform,
        }
    }

    /// Date of a day count under the standard 1582 reform
    pub const fn from_day_count(day_count: i64) -> Self {
        day_count_to_civil(day_count)
    }

    /// Date of a day count under the given reform
    pub const fn from_day_count_in(day_count: i64, reform: &CalendarReform) -> Self {
        reform.civil(day_count)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Reform the date was validated against
    pub const fn reform(&self) -> CalendarReform {
        self.reform
    }

    /// Components in the order the calendar functions take them
    pub const fn to_mdy(&self) -> (u8, u8, i32) {
        (self.month.get(), self.day.get(), self.year)
    }

    /// Day count of the date under its reform
    pub const fn day_count(&self) -> i64 {
        self.reform.day_count(self.month(), self.day(), self.year)
    }

    /// Day of the week, Sunday = 0
    pub const fn weekday(&self) -> u8 {
        self.reform.day_of_week(self.month(), self.day(), self.year)
    }

    pub const fn is_gregorian(&self) -> bool {
        self.reform.is_gregorian(self.month(), self.day(), self.year)
    }

    /// Moves by whole days, rolling over months, years and the reform gap.
    ///
    /// Results beyond [`DAY_COUNT_LIMIT`] are clamped to it.
    pub const fn add_days(&self, days: i64) -> Self {
        self.reform.civil(self.day_count().saturating_add(days))
    }

    /// Signed number of days from `self` to `other`; the two dates may use
    /// different reforms.
    pub const fn days_until(&self, other: &Self) -> i64 {
        other.day_count() - self.day_count()
    }

    /// Real-valued Julian date at the given UT hour of this day
    #[allow(clippy::cast_precision_loss)]
    pub fn julian_date(&self, hours_ut: f64) -> f64 {
        self.day_count() as f64 - JULIAN_DATE_DAY_START + hours_ut / HOURS_PER_DAY
    }
}

impl FromStr for CivilDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // A leading separator is the sign of an ISO year
        let (negative, body) = match trimmed.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let has_hyphen = body.contains(DATE_SEPARATOR);
        let has_slash = body.contains(MONTH_FIRST_SEPARATOR);

        if has_hyphen && has_slash {
            return Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
            )));
        }

        if has_hyphen {
            // ISO format: YYYY-MM-DD
            let parts: Vec<&str> = body.split(DATE_SEPARATOR).map(str::trim).collect();
            if parts.len() != 3 {
                return Err(ParseError::InvalidFormat(format!(
                    "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} {DATE_SEPARATOR} separators",
                    parts.len() - 1
                )));
            }
            let year = Self::parse_year(parts[0], negative)?;
            let month = Self::parse_u8(parts[1])?;
            let day = Self::parse_u8(parts[2])?;
            Self::new(year, month, day)
        } else if has_slash && !negative {
            // Month-first format: MM/DD/YYYY
            let parts: Vec<&str> = body.split(MONTH_FIRST_SEPARATOR).map(str::trim).collect();
            if parts.len() != 3 {
                return Err(ParseError::InvalidFormat(format!(
                    "Expected MM{MONTH_FIRST_SEPARATOR}DD{MONTH_FIRST_SEPARATOR}YYYY, found {} {MONTH_FIRST_SEPARATOR} separators",
                    parts.len() - 1
                )));
            }
            let month = Self::parse_u8(parts[0])?;
            let day = Self::parse_u8(parts[1])?;
            let year = Self::parse_year(parts[2], false)?;
            Self::new(year, month, day)
        } else {
            Err(ParseError::InvalidFormat(trimmed.to_owned()))
        }
    }
}

impl CivilDate {
    fn parse_year(s: &str, negative: bool) -> Result<i32, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        let year = s
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        Ok(if negative { -year } else { year })
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            f.write_str("-")?;
        }
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.unsigned_abs(),
            self.month.get(),
            self.day.get()
        )
    }
}

impl TryFrom<(i32, u8, u8)> for CivilDate {
    type Error = ParseError;

    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CivilDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CivilDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
