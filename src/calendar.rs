//! Civil dates and continuous day counts across the Julian to Gregorian reform.
//!
//! A day count is the integer Julian day number: day 0 is 1 January 4713 BC
//! (astronomical year -4712) of the proleptic Julian calendar, and the count
//! advances by exactly one per civil day. Nothing jumps at the reform; only
//! the civil representation has a gap. Dates before the reform boundary are
//! read in the Julian calendar, dates from the boundary on in the Gregorian
//! calendar. Years use astronomical numbering: year 0 is 1 BC, -1 is 2 BC.
//!
//! The free functions use [`CalendarReform::GREGORIAN`]; the same operations
//! are available as methods on any other [`CalendarReform`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CivilDate;
use crate::consts::{
    CENTURY_CYCLE, DAY_COUNT_LIMIT, DAYS_IN_MONTH, DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, HOURS_PER_DAY, JULIAN_DATE_DAY_START, LEAP_YEAR_CYCLE, MAX_MONTH, OCTOBER,
    SEPTEMBER, WEEKDAY_OFFSET,
};
use crate::types::{Day, Month};

/// The point at which a jurisdiction left the Julian calendar.
///
/// Days strictly between `last_julian_day` and `first_gregorian_day` of
/// `month`/`year` do not exist in the civil calendar. The two bracket days
/// are consecutive day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "ReformConfig", into = "ReformConfig")]
pub struct CalendarReform {
    year: i32,
    month: u8,
    last_julian_day: u8,
    first_gregorian_day: u8,
}

/// Plain form of a [`CalendarReform`] as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReformConfig {
    pub year: i32,
    pub month: u8,
    pub last_julian_day: u8,
    pub first_gregorian_day: u8,
}

/// Error type for reform boundaries that cannot describe a real transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Reform month outside 1-12.
    #[error("Invalid reform month: {0} (must be 1-12)")]
    InvalidMonth(u8),

    /// Bracket days out of order or past the end of the month.
    #[error(
        "Invalid reform days: need 1 <= last Julian day ({last}) < first Gregorian day ({first}) <= {month_length}"
    )]
    InvalidBracket {
        last: u8,
        first: u8,
        month_length: u8,
    },

    /// The Gregorian side does not start on the day after the Julian side ends.
    #[error(
        "Discontinuous reform: day after the last Julian day is day count {expected}, first Gregorian day is {found}"
    )]
    Discontinuous { expected: i64, found: i64 },
}

impl CalendarReform {
    /// Thursday 4 October 1582 (Julian) was followed by Friday 15 October 1582 (Gregorian).
    pub const GREGORIAN: Self = Self {
        year: 1582,
        month: OCTOBER,
        last_julian_day: 4,
        first_gregorian_day: 15,
    };

    /// Great Britain and its colonies: 2 September 1752 was followed by 14 September 1752.
    pub const BRITISH: Self = Self {
        year: 1752,
        month: SEPTEMBER,
        last_julian_day: 2,
        first_gregorian_day: 14,
    };

    /// Creates a reform boundary, checking that the gap closes up exactly.
    ///
    /// # Errors
    /// Returns `CalendarError` if the month is out of range, the bracket days are
    /// out of order, or the first Gregorian day is not the day count after the
    /// last Julian day.
    pub fn new(
        year: i32,
        month: u8,
        last_julian_day: u8,
        first_gregorian_day: u8,
    ) -> Result<Self, CalendarError> {
        if month == 0 || month > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(month));
        }

        let candidate = Self {
            year,
            month,
            last_julian_day,
            first_gregorian_day,
        };
        let month_length = candidate.last_day_of_month(month, year);
        if last_julian_day == 0
            || first_gregorian_day <= last_julian_day
            || first_gregorian_day > month_length
        {
            return Err(CalendarError::InvalidBracket {
                last: last_julian_day,
                first: first_gregorian_day,
                month_length,
            });
        }

        let expected = julian_day_number(month, last_julian_day, year) + 1;
        let found = gregorian_day_number(month, first_gregorian_day, year);
        if expected != found {
            tracing::debug!(year, month, expected, found, "rejected calendar reform");
            return Err(CalendarError::Discontinuous { expected, found });
        }

        tracing::debug!(
            year,
            month,
            last_julian_day,
            first_gregorian_day,
            "calendar reform accepted"
        );
        Ok(candidate)
    }

    /// Year of the transition
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month of the transition
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Last day of the transition month still in the Julian calendar
    pub const fn last_julian_day(&self) -> u8 {
        self.last_julian_day
    }

    /// First day of the transition month in the Gregorian calendar
    pub const fn first_gregorian_day(&self) -> u8 {
        self.first_gregorian_day
    }

    /// Number of civil days dropped at the transition
    pub const fn skipped_days(&self) -> u8 {
        self.first_gregorian_day - self.last_julian_day - 1
    }

    /// Day count of the first Gregorian day
    pub const fn first_gregorian_day_count(&self) -> i64 {
        gregorian_day_number(self.month, self.first_gregorian_day, self.year)
    }

    /// True if the date is read in the Gregorian calendar.
    pub const fn is_gregorian(&self, month: u8, day: u8, year: i32) -> bool {
        if year != self.year {
            return year > self.year;
        }
        if month != self.month {
            return month > self.month;
        }
        day >= self.first_gregorian_day
    }

    /// True if the date falls in the days dropped by the reform.
    pub const fn is_skipped(&self, month: u8, day: u8, year: i32) -> bool {
        year == self.year
            && month == self.month
            && day > self.last_julian_day
            && day < self.first_gregorian_day
    }

    /// Leap year test: every fourth year while February still falls before the
    /// reform, the Gregorian century rule from the first February after it.
    ///
    /// For a reform in March or later the reform year itself is Julian; for a
    /// reform in January or February it is Gregorian.
    pub const fn is_leap_year(&self, year: i32) -> bool {
        if year < self.year || (year == self.year && self.month > FEBRUARY) {
            year.rem_euclid(LEAP_YEAR_CYCLE) == 0
        } else {
            is_gregorian_leap_year(year)
        }
    }

    /// Index of the last day of the month (31 for October 1582).
    pub const fn last_day_of_month(&self, month: u8, year: i32) -> u8 {
        debug_assert!(month != 0 && month <= MAX_MONTH);

        if month == FEBRUARY && self.is_leap_year(year) {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[month as usize]
        }
    }

    /// Number of days that actually exist in the month (21 for October 1582).
    pub const fn days_in_month(&self, month: u8, year: i32) -> u8 {
        let last = self.last_day_of_month(month, year);
        if year == self.year && month == self.month {
            last - self.skipped_days()
        } else {
            last
        }
    }

    /// Day count of a civil date.
    ///
    /// Dates inside the reform gap are outside the domain.
    pub const fn day_count(&self, month: u8, day: u8, year: i32) -> i64 {
        if self.is_gregorian(month, day, year) {
            gregorian_day_number(month, day, year)
        } else {
            julian_day_number(month, day, year)
        }
    }

    /// Civil date of a day count. Never lands inside the reform gap.
    ///
    /// Counts beyond [`DAY_COUNT_LIMIT`] either side of day 0 are clamped to it.
    pub const fn civil(&self, day_count: i64) -> CivilDate {
        let day_count = clamp_day_count(day_count);
        let (year, month, day) = if day_count >= self.first_gregorian_day_count() {
            gregorian_from_day_number(day_count)
        } else {
            julian_from_day_number(day_count)
        };
        CivilDate::from_parts(year, Month::from_computed(month), Day::from_computed(day), *self)
    }

    /// Day of the week, Sunday = 0 through Saturday = 6.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn day_of_week(&self, month: u8, day: u8, year: i32) -> u8 {
        (self.day_count(month, day, year) + WEEKDAY_OFFSET).rem_euclid(DAYS_PER_WEEK) as u8
    }

    /// Adds `delta` days to the day of the month, jumping over the reform gap
    /// when the sum lands inside it.
    ///
    /// Month and year are not rolled over; a result outside the month is the
    /// caller's to carry.
    pub const fn add_day(&self, month: u8, day: i32, year: i32, delta: i32) -> i32 {
        let d = day + delta;
        if year == self.year
            && month == self.month
            && d > self.last_julian_day as i32
            && d < self.first_gregorian_day as i32
        {
            d + delta.signum() * self.skipped_days() as i32
        } else {
            d
        }
    }
}

impl Default for CalendarReform {
    fn default() -> Self {
        Self::GREGORIAN
    }
}

impl TryFrom<ReformConfig> for CalendarReform {
    type Error = CalendarError;

    fn try_from(config: ReformConfig) -> Result<Self, Self::Error> {
        Self::new(
            config.year,
            config.month,
            config.last_julian_day,
            config.first_gregorian_day,
        )
    }
}

impl From<CalendarReform> for ReformConfig {
    fn from(reform: CalendarReform) -> Self {
        Self {
            year: reform.year,
            month: reform.month,
            last_julian_day: reform.last_julian_day,
            first_gregorian_day: reform.first_gregorian_day,
        }
    }
}

/// Day count of a civil date under the 1582 reform.
pub const fn civil_to_day_count(month: u8, day: u8, year: i32) -> i64 {
    CalendarReform::GREGORIAN.day_count(month, day, year)
}

/// Civil date of a day count under the 1582 reform.
pub const fn day_count_to_civil(day_count: i64) -> CivilDate {
    CalendarReform::GREGORIAN.civil(day_count)
}

/// Civil date on which a real-valued Julian date falls (days start at .5).
#[allow(clippy::cast_possible_truncation)]
pub fn julian_date_to_civil(julian_date: f64) -> CivilDate {
    day_count_to_civil((julian_date + JULIAN_DATE_DAY_START).floor() as i64)
}

/// Real-valued Julian date of a civil date and UT hour of day.
#[allow(clippy::cast_precision_loss)]
pub fn julian_date(month: u8, day: u8, year: i32, hours_ut: f64) -> f64 {
    civil_to_day_count(month, day, year) as f64 - JULIAN_DATE_DAY_START + hours_ut / HOURS_PER_DAY
}

/// Leap year test under the 1582 reform.
pub const fn is_leap_year(year: i32) -> bool {
    CalendarReform::GREGORIAN.is_leap_year(year)
}

/// Index of the last day of the month under the 1582 reform.
pub const fn last_day_of_month(month: u8, year: i32) -> u8 {
    CalendarReform::GREGORIAN.last_day_of_month(month, year)
}

/// Days that exist in the month under the 1582 reform.
pub const fn days_in_month(month: u8, year: i32) -> u8 {
    CalendarReform::GREGORIAN.days_in_month(month, year)
}

/// Day of the week (Sunday = 0) under the 1582 reform.
pub const fn day_of_week(month: u8, day: u8, year: i32) -> u8 {
    CalendarReform::GREGORIAN.day_of_week(month, day, year)
}

/// Day-of-month arithmetic that skips the 1582 gap.
pub const fn add_day_skipping_gap(month: u8, day: i32, year: i32, delta: i32) -> i32 {
    CalendarReform::GREGORIAN.add_day(month, day, year, delta)
}

const fn clamp_day_count(day_count: i64) -> i64 {
    if day_count.unsigned_abs() > DAY_COUNT_LIMIT.unsigned_abs() {
        DAY_COUNT_LIMIT * day_count.signum()
    } else {
        day_count
    }
}

const fn is_gregorian_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

// Day numbers are computed on a year that starts in March, so the leap day is
// the last day of its year. Shifted years are offset by 4800 to keep them
// positive over any historical range; floor division keeps earlier years exact.
const MARCH_YEAR_OFFSET: i64 = 4800;
const JULIAN_EPOCH_SHIFT: i64 = 32_083;
const GREGORIAN_EPOCH_SHIFT: i64 = 32_045;

const fn march_based(month: u8, year: i32) -> (i64, i64) {
    let january_or_february = if month <= FEBRUARY { 1 } else { 0 };
    (
        year as i64 + MARCH_YEAR_OFFSET - january_or_february,
        month as i64 + 12 * january_or_february - 3,
    )
}

const fn days_before_march_month(m: i64) -> i64 {
    (153 * m + 2) / 5
}

const fn julian_day_number(month: u8, day: u8, year: i32) -> i64 {
    let (y, m) = march_based(month, year);
    day as i64 + days_before_march_month(m) + 365 * y + y.div_euclid(4) - JULIAN_EPOCH_SHIFT
}

const fn gregorian_day_number(month: u8, day: u8, year: i32) -> i64 {
    let (y, m) = march_based(month, year);
    day as i64 + days_before_march_month(m) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - GREGORIAN_EPOCH_SHIFT
}

const fn julian_from_day_number(n: i64) -> (i32, u8, u8) {
    civil_from_shifted(n + 1401)
}

const fn gregorian_from_day_number(n: i64) -> (i32, u8, u8) {
    let dropped_leap_days = ((4 * n + 274_277).div_euclid(146_097) * 3).div_euclid(4) - 38;
    civil_from_shifted(n + 1401 + dropped_leap_days)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn civil_from_shifted(f: i64) -> (i32, u8, u8) {
    let e = 4 * f + 3;
    let h = 5 * (e.rem_euclid(1461) / 4) + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e.div_euclid(1461) - 4716 + (14 - month) / 12;
    (year as i32, month as u8, day as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFORM_DAY: i64 = 2_299_161;

    struct KnownDate {
        month: u8,
        day: u8,
        year: i32,
        day_count: i64,
    }

    const KNOWN_DATES: [KnownDate; 9] = [
        // Julian day 0
        KnownDate { month: 1, day: 1, year: -4712, day_count: 0 },
        // Ides of March, 44 BC
        KnownDate { month: 3, day: 15, year: -43, day_count: 1_705_426 },
        KnownDate { month: 1, day: 1, year: 1, day_count: 1_721_424 },
        KnownDate { month: 10, day: 4, year: 1582, day_count: REFORM_DAY - 1 },
        KnownDate { month: 10, day: 15, year: 1582, day_count: REFORM_DAY },
        KnownDate { month: 2, day: 29, year: 1600, day_count: 2_305_507 },
        KnownDate { month: 1, day: 1, year: 1970, day_count: 2_440_588 },
        KnownDate { month: 1, day: 1, year: 2000, day_count: 2_451_545 },
        KnownDate { month: 12, day: 31, year: -4713, day_count: -1 },
    ];

    fn next_civil_day(reform: &CalendarReform, month: u8, day: u8, year: i32) -> (u8, u8, i32) {
        let d = reform.add_day(month, i32::from(day), year, 1);
        if d > i32::from(reform.last_day_of_month(month, year)) {
            if month == 12 { (1, 1, year + 1) } else { (month + 1, 1, year) }
        } else {
            (month, u8::try_from(d).unwrap(), year)
        }
    }

    #[test]
    fn test_known_day_counts() {
        for date in &KNOWN_DATES {
            assert_eq!(
                civil_to_day_count(date.month, date.day, date.year),
                date.day_count,
                "{}-{:02}-{:02}",
                date.year,
                date.month,
                date.day
            );
            let civil = day_count_to_civil(date.day_count);
            assert_eq!(civil.to_mdy(), (date.month, date.day, date.year));
        }
    }

    #[test]
    fn test_round_trip_over_wide_range() {
        let sparse = (-2_000_000..6_000_000).step_by(997);
        let near_epoch = -2_000..2_000;
        let near_reform = REFORM_DAY - 2_000..REFORM_DAY + 2_000;
        for n in sparse.chain(near_epoch).chain(near_reform) {
            let civil = day_count_to_civil(n);
            let (month, day, year) = civil.to_mdy();
            assert_eq!(civil_to_day_count(month, day, year), n, "day count {n}");
            assert!(!CalendarReform::GREGORIAN.is_skipped(month, day, year));
            assert!((1..=last_day_of_month(month, year)).contains(&day));
        }
    }

    #[test]
    fn test_consecutive_day_counts_are_consecutive_dates() {
        let reforms = [
            CalendarReform::GREGORIAN,
            CalendarReform::BRITISH,
            CalendarReform::new(1900, 1, 1, 14).unwrap(),
            CalendarReform::new(1900, 2, 10, 23).unwrap(),
        ];
        for reform in reforms {
            let start = reform.first_gregorian_day_count() - 800;
            let mut expected = reform.civil(start).to_mdy();
            for n in start..start + 1_600 {
                let (month, day, year) = reform.civil(n).to_mdy();
                assert_eq!((month, day, year), expected, "day count {n}");
                expected = next_civil_day(&reform, month, day, year);
            }
        }
    }

    #[test]
    fn test_never_produces_gap_days() {
        for n in REFORM_DAY - 40..REFORM_DAY + 40 {
            let (month, day, year) = day_count_to_civil(n).to_mdy();
            if (year, month) == (1582, 10) {
                assert!(!(5..=14).contains(&day), "day count {n} gave October {day}");
            }
        }
    }

    #[test]
    fn test_leap_year_rules() {
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
        // Before the reform every fourth year is a leap year, centuries included
        assert_eq!(days_in_month(2, 1500), 29);
        assert_eq!(days_in_month(2, 1300), 29);
        assert_eq!(days_in_month(2, 1581), 28);
        assert_eq!(days_in_month(2, 0), 29);
        assert_eq!(days_in_month(2, -4), 29);
        assert_eq!(days_in_month(2, -1), 28);
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(1700));
    }

    #[test]
    fn test_reform_month_lengths() {
        assert_eq!(last_day_of_month(10, 1582), 31);
        assert_eq!(days_in_month(10, 1582), 21);
        assert_eq!(days_in_month(9, 1582), 30);
        assert_eq!(days_in_month(10, 1583), 31);

        let british = CalendarReform::BRITISH;
        assert_eq!(british.days_in_month(9, 1752), 19);
        assert_eq!(british.days_in_month(10, 1582), 31);
    }

    #[test]
    fn test_month_lengths_sum_to_year_length() {
        for year in [-100, 1, 1500, 1581, 1582, 1583, 1700, 1752, 2000, 2100] {
            let total: i64 = (1..=12).map(|m| i64::from(days_in_month(m, year))).sum();
            let span = civil_to_day_count(1, 1, year + 1) - civil_to_day_count(1, 1, year);
            assert_eq!(total, span, "year {year}");
        }
        assert_eq!(
            civil_to_day_count(1, 1, 1583) - civil_to_day_count(1, 1, 1582),
            355
        );
    }

    #[test]
    fn test_day_of_week() {
        // Thursday 4 October 1582, Friday 15 October 1582
        assert_eq!(day_of_week(10, 4, 1582), 4);
        assert_eq!(day_of_week(10, 15, 1582), 5);
        // Saturday 1 January 2000
        assert_eq!(day_of_week(1, 1, 2000), 6);
        // Julian day 0 was a Monday
        assert_eq!(day_of_week(1, 1, -4712), 1);
        // Negative day counts still give 0-6
        assert_eq!(day_of_week(12, 31, -4713), 0);
        assert_eq!(day_of_week(12, 30, -4713), 6);
        for n in -30..30 {
            let (m, d, y) = day_count_to_civil(n).to_mdy();
            assert!(day_of_week(m, d, y) < 7);
        }
    }

    #[test]
    fn test_add_day_skips_gap() {
        // Forward across the boundary lands on the first Gregorian day
        assert_eq!(add_day_skipping_gap(10, 4, 1582, 1), 15);
        assert_eq!(add_day_skipping_gap(10, 3, 1582, 2), 15);
        assert_eq!(add_day_skipping_gap(10, 1, 1582, 12), 23);
        // Backward from the first Gregorian day lands on the last Julian day
        assert_eq!(add_day_skipping_gap(10, 15, 1582, -1), 4);
        // Landing exactly on a bracket day is left alone
        assert_eq!(add_day_skipping_gap(10, 1, 1582, 3), 4);
        assert_eq!(add_day_skipping_gap(10, 20, 1582, -5), 15);
        // Outside the reform month nothing changes
        assert_eq!(add_day_skipping_gap(10, 4, 1583, 1), 5);
        assert_eq!(add_day_skipping_gap(9, 4, 1582, 1), 5);
        // No month rollover
        assert_eq!(add_day_skipping_gap(1, 31, 2000, 1), 32);
    }

    #[test]
    fn test_julian_date_conversions() {
        assert!((julian_date(1, 1, 2000, 12.0) - 2_451_545.0).abs() < 1e-9);
        assert!((julian_date(1, 1, 2000, 0.0) - 2_451_544.5).abs() < 1e-9);
        assert_eq!(julian_date_to_civil(2_451_545.0).to_mdy(), (1, 1, 2000));
        assert_eq!(julian_date_to_civil(2_451_544.5).to_mdy(), (1, 1, 2000));
        assert_eq!(julian_date_to_civil(2_451_544.49).to_mdy(), (12, 31, 1999));
        assert_eq!(julian_date_to_civil(-0.6).to_mdy(), (12, 31, -4713));
    }

    #[test]
    fn test_reform_new_validation() {
        assert_eq!(
            CalendarReform::new(1582, 10, 4, 15).unwrap(),
            CalendarReform::GREGORIAN
        );
        assert_eq!(
            CalendarReform::new(1752, 9, 2, 14).unwrap(),
            CalendarReform::BRITISH
        );
        assert!(matches!(
            CalendarReform::new(1582, 13, 4, 15),
            Err(CalendarError::InvalidMonth(13))
        ));
        assert!(matches!(
            CalendarReform::new(1582, 10, 15, 4),
            Err(CalendarError::InvalidBracket { .. })
        ));
        assert!(matches!(
            CalendarReform::new(1582, 10, 4, 32),
            Err(CalendarError::InvalidBracket { .. })
        ));
        // Ten days were dropped in 1582, not nine
        assert!(matches!(
            CalendarReform::new(1582, 10, 4, 14),
            Err(CalendarError::Discontinuous { .. })
        ));
        // Eleven were needed by 1752
        assert!(matches!(
            CalendarReform::new(1752, 9, 2, 13),
            Err(CalendarError::Discontinuous { .. })
        ));
    }

    #[test]
    fn test_reform_accessors() {
        let reform = CalendarReform::default();
        assert_eq!(reform, CalendarReform::GREGORIAN);
        assert_eq!(reform.year(), 1582);
        assert_eq!(reform.month(), 10);
        assert_eq!(reform.last_julian_day(), 4);
        assert_eq!(reform.first_gregorian_day(), 15);
        assert_eq!(reform.skipped_days(), 10);
        assert_eq!(reform.first_gregorian_day_count(), REFORM_DAY);
        assert_eq!(CalendarReform::BRITISH.skipped_days(), 11);
        assert_eq!(CalendarReform::BRITISH.first_gregorian_day_count(), 2_361_222);
    }

    #[test]
    fn test_british_reform_conversions() {
        let british = CalendarReform::BRITISH;
        assert_eq!(british.day_count(9, 2, 1752), 2_361_221);
        assert_eq!(british.day_count(9, 14, 1752), 2_361_222);
        assert_eq!(british.civil(2_361_221).to_mdy(), (9, 2, 1752));
        assert_eq!(british.civil(2_361_222).to_mdy(), (9, 14, 1752));
        // Between the two reforms the calendars disagree by ten or eleven days
        assert_eq!(british.civil(REFORM_DAY).to_mdy(), (10, 5, 1582));
        assert_eq!(british.add_day(9, 2, 1752, 1), 14);
    }

    #[test]
    fn test_reform_early_in_year_uses_gregorian_february() {
        let january = CalendarReform::new(1900, 1, 1, 14).unwrap();
        assert!(!january.is_leap_year(1900));
        assert!(january.is_leap_year(1896));
        assert!(january.is_leap_year(1800));
        assert_eq!(january.days_in_month(1, 1900), 19);
        assert_eq!(january.days_in_month(2, 1900), 28);
        assert_eq!(
            january.day_count(3, 1, 1900) - january.day_count(2, 28, 1900),
            1
        );
        assert_eq!(january.civil(january.day_count(3, 1, 1900)).to_mdy(), (3, 1, 1900));

        let total: i64 = (1..=12)
            .map(|m| i64::from(january.days_in_month(m, 1900)))
            .sum();
        let span = january.day_count(1, 1, 1901) - january.day_count(1, 1, 1900);
        assert_eq!(total, span);
        assert_eq!(span, 353);

        // The reform month itself is Gregorian February
        let february = CalendarReform::new(1900, 2, 10, 23).unwrap();
        assert_eq!(february.last_day_of_month(2, 1900), 28);
        assert_eq!(february.days_in_month(2, 1900), 16);
        assert_eq!(february.add_day(2, 10, 1900, 1), 23);
        assert!(matches!(
            CalendarReform::new(1900, 2, 20, 30),
            Err(CalendarError::InvalidBracket {
                month_length: 28,
                ..
            })
        ));

        // Reforms after February keep a Julian reform year
        assert!(CalendarReform::GREGORIAN.is_leap_year(1500));
        assert!(CalendarReform::BRITISH.is_leap_year(1700));
    }

    #[test]
    fn test_day_counts_clamp_at_limit() {
        let top = day_count_to_civil(DAY_COUNT_LIMIT);
        assert_eq!(day_count_to_civil(i64::MAX), top);
        assert_eq!(day_count_to_civil(DAY_COUNT_LIMIT + 1), top);
        let (month, day, year) = top.to_mdy();
        assert_eq!(civil_to_day_count(month, day, year), DAY_COUNT_LIMIT);

        let bottom = day_count_to_civil(-DAY_COUNT_LIMIT);
        assert_eq!(day_count_to_civil(i64::MIN), bottom);
        let (month, day, year) = bottom.to_mdy();
        assert_eq!(civil_to_day_count(month, day, year), -DAY_COUNT_LIMIT);

        assert_eq!(julian_date_to_civil(f64::INFINITY), top);
        assert_eq!(julian_date_to_civil(f64::NEG_INFINITY), bottom);
        assert_eq!(CalendarReform::BRITISH.civil(i64::MAX).to_mdy(), top.to_mdy());
    }

    #[test]
    fn test_reform_serde() {
        let json = serde_json::to_string(&CalendarReform::BRITISH).unwrap();
        assert_eq!(
            json,
            r#"{"year":1752,"month":9,"last_julian_day":2,"first_gregorian_day":14}"#
        );
        let parsed: CalendarReform = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, CalendarReform::BRITISH);

        let bad = r#"{"year":1582,"month":10,"last_julian_day":4,"first_gregorian_day":20}"#;
        let result: Result<CalendarReform, _> = serde_json::from_str(bad);
        assert!(result.is_err());
    }
}
