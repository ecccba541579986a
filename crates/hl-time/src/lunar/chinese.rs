//! Chinese lunisolar calendar, table driven.
//!
//! Each entry of [`YEAR_TABLE`] packs one lunar year (1900–2100):
//!
//! * bits 15..4: lengths of regular months 1..12, month 1 in bit 15
//!   (1 = 30 days, 0 = 29 days);
//! * bits 3..0: the regular month the leap month follows, 0 if none;
//! * bit 16: length of the leap month (1 = 30 days).
//!
//! Lunar year 1900 begins on 31 January 1900. The table makes the conversion
//! exact and deterministic within its range; years outside it are rejected.

use hl_core::errors::{Error, Result};
use hl_core::{DayNumber, Year};

/// First lunar year in the table.
pub const MIN_YEAR: Year = 1900;

/// Last lunar year in the table.
pub const MAX_YEAR: Year = 2100;

/// Julian Day Number of the first day of lunar year 1900 (1900-01-31).
const BASE_JDN: DayNumber = 2_415_051;

#[rustfmt::skip]
const YEAR_TABLE: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050-2059
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
    0x0d520, // 2100
];

fn entry(year: Year) -> u32 {
    YEAR_TABLE[(year - MIN_YEAR) as usize]
}

/// The regular month after which `year` inserts its leap month, if any.
pub fn leap_month(year: Year) -> Option<u8> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    match (entry(year) & 0xf) as u8 {
        0 => None,
        m => Some(m),
    }
}

/// Length of a month; 0 if it does not exist in `year`.
///
/// `leap` selects the leap month that follows regular month `month`.
pub fn days_in_month(year: Year, month: u8, leap: bool) -> u8 {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return 0;
    }
    let info = entry(year);
    if leap {
        return match leap_month(year) {
            Some(m) if m == month && info & 0x1_0000 != 0 => 30,
            Some(m) if m == month => 29,
            _ => 0,
        };
    }
    if info & (0x1_0000 >> month) != 0 {
        30
    } else {
        29
    }
}

/// Number of days in lunar `year`; 0 outside the table.
pub fn days_in_year(year: Year) -> u16 {
    let regular: u16 = (1..=12).map(|m| days_in_month(year, m, false) as u16).sum();
    let leap = leap_month(year).map_or(0, |m| days_in_month(year, m, true) as u16);
    regular + leap
}

fn new_year_jdn(year: Year) -> DayNumber {
    BASE_JDN + (MIN_YEAR..year).map(|y| days_in_year(y) as i32).sum::<i32>()
}

/// Convert a Chinese date to its Julian Day Number.
pub fn to_jdn(year: Year, month: u8, day: u8, leap: bool) -> Result<DayNumber> {
    check_year(year)?;
    let len = days_in_month(year, month, leap);
    if len == 0 || day == 0 || day > len {
        let tag = if leap { " (leap)" } else { "" };
        return Err(Error::Date(format!(
            "chinese date {year}-{month:02}{tag}-{day:02} does not exist"
        )));
    }
    let leap_after = leap_month(year);
    let mut jdn = new_year_jdn(year);
    for m in 1..month {
        jdn += days_in_month(year, m, false) as i32;
        if leap_after == Some(m) {
            jdn += days_in_month(year, m, true) as i32;
        }
    }
    if leap {
        jdn += days_in_month(year, month, false) as i32;
    }
    Ok(jdn + day as i32 - 1)
}

/// Convert a Julian Day Number to a Chinese `(year, month, day, leap)`.
pub fn from_jdn(jdn: DayNumber) -> Result<(Year, u8, u8, bool)> {
    if jdn < BASE_JDN {
        return Err(Error::UnsupportedYear {
            calendar: "chinese",
            year: MIN_YEAR - 1,
        });
    }
    let mut year = MIN_YEAR;
    let mut offset = jdn - BASE_JDN;
    while offset >= days_in_year(year) as i32 {
        offset -= days_in_year(year) as i32;
        year += 1;
        check_year(year)?;
    }
    let leap_after = leap_month(year);
    for month in 1..=12u8 {
        let len = days_in_month(year, month, false) as i32;
        if offset < len {
            return Ok((year, month, (offset + 1) as u8, false));
        }
        offset -= len;
        if leap_after == Some(month) {
            let len = days_in_month(year, month, true) as i32;
            if offset < len {
                return Ok((year, month, (offset + 1) as u8, true));
            }
            offset -= len;
        }
    }
    // `offset` was bounded by the year length above.
    Err(Error::Date(format!("julian day {jdn} not covered by chinese year {year}")))
}

fn check_year(year: Year) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::UnsupportedYear {
            calendar: "chinese",
            year,
        });
    }
    Ok(())
}
