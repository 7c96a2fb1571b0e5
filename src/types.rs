use crate::ParseError;
use crate::calendar::CalendarReform;
use crate::circle::normalize_degrees;
use crate::consts::{DEGREES_PER_SIGN, MAX_MONTH, OPPOSITE_SIGN_OFFSET, SIGN_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Wraps a month the calendar arithmetic produced itself.
    pub(crate) const fn from_computed(value: u8) -> Self {
        Self(non_zero_or_min(value))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of the month that exists in the civil calendar.
///
/// Besides the usual month-length check, days skipped by a calendar reform
/// (5..=14 October 1582 for the standard reform) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validated against the standard 1582 reform.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month,
    /// and `ParseError::SkippedDay` if the day was dropped by the reform.
    pub fn new(value: u8, year: i32, month: u8) -> Result<Self, ParseError> {
        Self::new_in(value, year, month, &CalendarReform::GREGORIAN)
    }

    /// Creates a new Day, validated against the given reform boundary.
    ///
    /// # Errors
    /// Same as [`Day::new`].
    pub fn new_in(
        value: u8,
        year: i32,
        month: u8,
        reform: &CalendarReform,
    ) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let Some(non_zero) = NonZeroU8::new(value) else {
            return Err(invalid);
        };
        if month == 0 || month > MAX_MONTH || value > reform.last_day_of_month(month, year) {
            return Err(invalid);
        }
        if reform.is_skipped(month, value, year) {
            tracing::debug!(year, month, day = value, "rejected day skipped by calendar reform");
            return Err(ParseError::SkippedDay {
                month,
                day: value,
                year,
            });
        }

        Ok(Self(non_zero))
    }

    pub(crate) const fn from_computed(value: u8) -> Self {
        Self(non_zero_or_min(value))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate without year/month context, so just check minimum
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidDay {
            month: 0,
            day: value,
            year: 0,
        })?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A zodiac sign numbered `1..=12`, Aries through Pisces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sign(NonZeroU8);

impl Sign {
    pub const ARIES: Self = Self::from_computed(1);
    pub const TAURUS: Self = Self::from_computed(2);
    pub const GEMINI: Self = Self::from_computed(3);
    pub const CANCER: Self = Self::from_computed(4);
    pub const LEO: Self = Self::from_computed(5);
    pub const VIRGO: Self = Self::from_computed(6);
    pub const LIBRA: Self = Self::from_computed(7);
    pub const SCORPIO: Self = Self::from_computed(8);
    pub const SAGITTARIUS: Self = Self::from_computed(9);
    pub const CAPRICORN: Self = Self::from_computed(10);
    pub const AQUARIUS: Self = Self::from_computed(11);
    pub const PISCES: Self = Self::from_computed(12);

    /// Creates a new Sign from its number.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidSign` if the value is 0 or > 12.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidSign(value))?;
        if value > SIGN_COUNT {
            return Err(ParseError::InvalidSign(value));
        }
        Ok(Self(non_zero))
    }

    /// The sign an arbitrary sign index lands on after wrapping into `1..=12`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn wrapping(index: i32) -> Self {
        Self::from_computed(sign_mod12(index) as u8)
    }

    /// The sign containing a zodiac longitude in degrees.
    #[allow(clippy::cast_possible_truncation)]
    pub fn of_longitude(degrees: f64) -> Self {
        let offset = (normalize_degrees(degrees) / DEGREES_PER_SIGN).floor() as i32;
        Self::wrapping(offset + 1)
    }

    /// The sign six places away.
    pub const fn opposite(self) -> Self {
        Self::wrapping(self.get() as i32 + OPPOSITE_SIGN_OFFSET)
    }

    /// English name of the sign
    pub const fn name(self) -> &'static str {
        match self.get() {
            1 => "Aries",
            2 => "Taurus",
            3 => "Gemini",
            4 => "Cancer",
            5 => "Leo",
            6 => "Virgo",
            7 => "Libra",
            8 => "Scorpio",
            9 => "Sagittarius",
            10 => "Capricorn",
            11 => "Aquarius",
            _ => "Pisces",
        }
    }

    const fn from_computed(value: u8) -> Self {
        Self(non_zero_or_min(value))
    }

    /// Returns the sign number as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Sign {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sign> for u8 {
    fn from(sign: Sign) -> Self {
        sign.0.get()
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wraps an arbitrary sign index into `1..=12` (13 is 1, 0 is 12, -5 is 7).
pub const fn sign_mod12(index: i32) -> i32 {
    let count = SIGN_COUNT as i32;
    match index.rem_euclid(count) {
        0 => count,
        r => r,
    }
}

const fn non_zero_or_min(value: u8) -> NonZeroU8 {
    match NonZeroU8::new(value) {
        Some(v) => v,
        None => NonZeroU8::MIN,
    }
}
