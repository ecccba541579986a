//! Tabular Islamic (Hijri) calendar.
//!
//! Arithmetic civil calendar: twelve months alternating 30 and 29 days, with
//! Dhu al-Hijja lengthened to 30 days in the 11 leap years of each 30-year
//! cycle (years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29). 1 Muharram AH 1 is
//! JDN 1 948 440 (16 July 622, Julian).

use hl_core::errors::{Error, Result};
use hl_core::{DayNumber, Year};

/// Julian Day Number of 1 Muharram AH 1.
pub const EPOCH: DayNumber = 1_948_440;

/// Last supported Hijri year.
pub const MAX_YEAR: Year = 10_000;

/// Whether `year` is a leap (355-day) year.
pub fn is_leap_year(year: Year) -> bool {
    (14 + 11 * year).rem_euclid(30) < 11
}

/// Length of `month` in `year`; 0 if `month` is not in 1–12.
pub fn days_in_month(year: Year, month: u8) -> u8 {
    match month {
        12 if is_leap_year(year) => 30,
        1..=12 if month % 2 == 1 => 30,
        1..=12 => 29,
        _ => 0,
    }
}

/// Convert a Hijri date to its Julian Day Number.
pub fn to_jdn(year: Year, month: u8, day: u8) -> Result<DayNumber> {
    check_year(year)?;
    let len = days_in_month(year, month);
    if len == 0 || day == 0 || day > len {
        return Err(Error::Date(format!(
            "islamic date {year}-{month:02}-{day:02} does not exist"
        )));
    }
    Ok(jdn_unchecked(year, month, day))
}

/// Convert a Julian Day Number to a Hijri `(year, month, day)`.
pub fn from_jdn(jdn: DayNumber) -> Result<(Year, u8, u8)> {
    if jdn < EPOCH {
        return Err(Error::UnsupportedYear {
            calendar: "islamic",
            year: 0,
        });
    }
    // First estimate, then settle on the year whose new year precedes `jdn`.
    let mut year = (30 * (jdn - EPOCH) + 10_646) / 10_631;
    while year > 1 && jdn < jdn_unchecked(year, 1, 1) {
        year -= 1;
    }
    while jdn >= jdn_unchecked(year + 1, 1, 1) {
        year += 1;
    }
    check_year(year)?;
    let mut month = 1u8;
    while month < 12 && jdn >= jdn_unchecked(year, month + 1, 1) {
        month += 1;
    }
    let day = jdn - jdn_unchecked(year, month, 1) + 1;
    Ok((year, month, day as u8))
}

fn check_year(year: Year) -> Result<()> {
    if !(1..=MAX_YEAR).contains(&year) {
        return Err(Error::UnsupportedYear {
            calendar: "islamic",
            year,
        });
    }
    Ok(())
}

fn jdn_unchecked(year: Year, month: u8, day: u8) -> DayNumber {
    // (59 * (m - 1) + 1) / 2 is the integer form of ceil(29.5 * (m - 1)).
    let m = month as i32;
    day as i32 + (59 * (m - 1) + 1) / 2 + (year - 1) * 354 + (3 + 11 * year) / 30 + EPOCH - 1
}
