//! `Date` type backed by the Julian Day Number.
//!
//! A [`Date`] stores the Julian Day Number (JDN) of a day: a continuous
//! integer day count that every calendar converter in this crate uses as its
//! common intermediate representation. Field access is proleptic Gregorian.
//!
//! # Range
//! * [`Date::MIN`] = 0001-01-01 (JDN 1 721 426).
//! * [`Date::MAX`] = 9999-12-31 (JDN 5 373 484).
//!
//! All conversions below use integer division on non-negative operands only,
//! so no intermediate year, month or day term can become fractional.

use hl_core::errors::{Error, Result};
use hl_core::{ensure, DayNumber, DayOffset, Year};

use crate::month::Month;
use crate::weekday::Weekday;

/// A calendar date, stored as its Julian Day Number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(DayNumber);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// First supported year.
    pub const MIN_YEAR: Year = 1;

    /// Last supported year.
    pub const MAX_YEAR: Year = 9999;

    /// Minimum valid date: January 1, 0001.
    pub const MIN: Date = Date(1_721_426);

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(5_373_484);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a Julian Day Number.
    pub fn from_jdn(jdn: DayNumber) -> Result<Self> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&jdn) {
            return Err(Error::Date(format!(
                "julian day {jdn} outside [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(jdn))
    }

    /// Create a date from a proleptic Gregorian year, month (1–12) and day.
    pub fn from_ymd(year: Year, month: u8, day: u8) -> Result<Self> {
        check_fields(year, month, day, days_in_month)?;
        Ok(Date(jdn_from_gregorian(year, month, day)))
    }

    /// Create a date from a Julian-calendar year, month (1–12) and day.
    ///
    /// The result is the same day expressed in the proleptic Gregorian
    /// calendar, e.g. Julian 1582-10-04 is Gregorian 1582-10-14.
    pub fn from_julian_ymd(year: Year, month: u8, day: u8) -> Result<Self> {
        check_fields(year, month, day, julian_days_in_month)?;
        Self::from_jdn(jdn_from_julian(year, month, day))
    }

    /// January 1 of `year`.
    pub fn start_of_year(year: Year) -> Result<Self> {
        Self::from_ymd(year, 1, 1)
    }

    /// December 31 of `year`.
    pub fn end_of_year(year: Year) -> Result<Self> {
        Self::from_ymd(year, 12, 31)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the Julian Day Number.
    pub fn jdn(&self) -> DayNumber {
        self.0
    }

    /// Return `(year, month, day)` in the proleptic Gregorian calendar.
    pub fn ymd(&self) -> (Year, u8, u8) {
        gregorian_from_jdn(self.0)
    }

    /// Return `(year, month, day)` in the Julian calendar.
    pub fn julian_ymd(&self) -> (Year, u8, u8) {
        julian_from_jdn(self.0)
    }

    /// Return the year (1–9999).
    pub fn year(&self) -> Year {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the day of the month (1–31).
    pub fn day(&self) -> u8 {
        self.ymd().2
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let (y, _, _) = self.ymd();
        (self.0 - jdn_from_gregorian(y, 1, 1) + 1) as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // JDN 0 was a Monday, so (jdn + 1) mod 7 counts from Sunday.
        let w = (self.0 + 1).rem_euclid(7) as u8;
        Weekday::ALL[w as usize]
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days. Returns an error if the result is out of range.
    pub fn add_days(self, n: DayOffset) -> Result<Self> {
        match self.0.checked_add(n) {
            Some(jdn) => Self::from_jdn(jdn),
            None => Err(Error::Date(format!("date arithmetic overflow: {self} + {n}"))),
        }
    }

    /// Day after `self`, if it is in range.
    pub fn succ(self) -> Option<Self> {
        self.add_days(1).ok()
    }

    /// Day before `self`, if it is in range.
    pub fn pred(self) -> Option<Self> {
        self.add_days(-1).ok()
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> DayOffset {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        Date(jdn_from_gregorian(y, m, days_in_month(y, m)))
    }

    /// Return the *n*-th occurrence of `weekday` in `year`/`month`.
    ///
    /// `nth` in `1..=5` counts from the start of the month; `-1` selects the
    /// last occurrence. `Ok(None)` means the requested occurrence does not
    /// exist that month (for example a fifth Monday); it is not an error.
    ///
    /// # Errors
    /// Returns an error if `month` or `nth` are out of range.
    pub fn nth_weekday_of_month(
        year: Year,
        month: u8,
        weekday: Weekday,
        nth: i8,
    ) -> Result<Option<Self>> {
        ensure!(
            (1..=5).contains(&nth) || nth == -1,
            "nth must be in [1, 5] or -1, got {nth}"
        );
        let first = Self::from_ymd(year, month, 1)?;
        let len = days_in_month(year, month);
        if nth == -1 {
            let last = Date(first.0 + len as i32 - 1);
            let back = weekday.days_until(last.weekday());
            return Ok(Some(Date(last.0 - back as i32)));
        }
        let skip = first.weekday().days_until(weekday);
        let day = 1 + skip as i32 + 7 * (nth as i32 - 1);
        if day > len as i32 {
            return Ok(None);
        }
        Ok(Some(Date(first.0 + day - 1)))
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Sub<Date> for Date {
    type Output = DayOffset;
    fn sub(self, rhs: Date) -> DayOffset {
        self.0 - rhs.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        match Month::from_number(m) {
            Some(mon) => write!(f, "{d} {mon} {y}"),
            None => write!(f, "{y:04}-{m:02}-{d:02}"),
        }
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Whether a given proleptic Gregorian year is a leap year.
pub fn is_leap_year(year: Year) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Whether a given Julian-calendar year is a leap year.
pub fn is_julian_leap_year(year: Year) -> bool {
    year.rem_euclid(4) == 0
}

/// Number of days in a given Gregorian month; 0 for an invalid month.
pub fn days_in_month(year: Year, month: u8) -> u8 {
    Month::from_number(month).map_or(0, |m| m.days_in(year))
}

/// Number of days in a given Julian-calendar month; 0 for an invalid month.
pub fn julian_days_in_month(year: Year, month: u8) -> u8 {
    match Month::from_number(month) {
        Some(Month::February) if is_julian_leap_year(year) => 29,
        Some(Month::February) => 28,
        Some(m) => m.max_days(),
        None => 0,
    }
}

fn check_fields(year: Year, month: u8, day: u8, month_len: fn(Year, u8) -> u8) -> Result<()> {
    if !(Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year) {
        return Err(Error::Date(format!(
            "year {year} out of range [{}, {}]",
            Date::MIN_YEAR,
            Date::MAX_YEAR
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(Error::Date(format!("month {month} out of range [1, 12]")));
    }
    let days_in = month_len(year, month);
    if day == 0 || day > days_in {
        return Err(Error::Date(format!(
            "day {day} out of range [1, {days_in}] for {year}-{month:02}"
        )));
    }
    Ok(())
}

// ── Julian Day Number conversions ─────────────────────────────────────────────
//
// The year is shifted to start in March and offset by 4800 so that every
// operand of `/` is non-negative for years >= -4800.

/// Convert a proleptic Gregorian date to its Julian Day Number.
pub(crate) fn jdn_from_gregorian(year: Year, month: u8, day: u8) -> DayNumber {
    let a = (14 - month as i32) / 12;
    let y = year + 4800 - a;
    let m = month as i32 + 12 * a - 3;
    day as i32 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

/// Convert a Julian-calendar date to its Julian Day Number.
pub(crate) fn jdn_from_julian(year: Year, month: u8, day: u8) -> DayNumber {
    let a = (14 - month as i32) / 12;
    let y = year + 4800 - a;
    let m = month as i32 + 12 * a - 3;
    day as i32 + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083
}

/// Decompose a Julian Day Number into a proleptic Gregorian date.
pub(crate) fn gregorian_from_jdn(jdn: DayNumber) -> (Year, u8, u8) {
    let a = jdn + 32044;
    let b = (4 * a + 3) / 146_097;
    let c = a - 146_097 * b / 4;
    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = 100 * b + d - 4800 + m / 10;
    (year, month as u8, day as u8)
}

/// Decompose a Julian Day Number into a Julian-calendar date.
pub(crate) fn julian_from_jdn(jdn: DayNumber) -> (Year, u8, u8) {
    let c = jdn + 32082;
    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    (year, month as u8, day as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
