//! Persian (Solar Hijri) calendar.
//!
//! Uses Borkowski's arithmetic rule: leap years follow 33-year cycles whose
//! phase is reset at the break years in [`BREAKS`]. The first six months have
//! 31 days, the next five 30, and Esfand 29 (30 in leap years). Supported for
//! Persian years 1 to 3177.
//!
//! The division and remainder operators below truncate toward zero on
//! purpose: the leap-year phase arithmetic is defined that way.

use hl_core::errors::{Error, Result};
use hl_core::{DayNumber, Year};

use crate::date::jdn_from_gregorian;
use crate::date::gregorian_from_jdn;

/// Years at which the 33-year leap cycle is re-anchored.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// Last supported Persian year.
pub const MAX_YEAR: Year = 3177;

/// Leap-cycle facts about one Persian year.
struct YearInfo {
    /// Years since the last leap year; 0 means this year is leap.
    leap: i32,
    /// Gregorian year in which this Persian year starts.
    gregorian_year: i32,
    /// Day of March (Gregorian) on which 1 Farvardin falls.
    march_day: i32,
}

fn year_info(year: Year) -> YearInfo {
    let gregorian_year = year + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;
    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if year < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }
    let mut n = year - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }
    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_j - leap_g;
    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }
    YearInfo {
        leap,
        gregorian_year,
        march_day,
    }
}

/// Whether `year` is a 366-day year.
pub fn is_leap_year(year: Year) -> bool {
    (1..=MAX_YEAR).contains(&year) && year_info(year).leap == 0
}

/// Length of `month` in `year`; 0 if `month` is not in 1–12.
pub fn days_in_month(year: Year, month: u8) -> u8 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if is_leap_year(year) => 30,
        12 => 29,
        _ => 0,
    }
}

/// Convert a Persian date to its Julian Day Number.
pub fn to_jdn(year: Year, month: u8, day: u8) -> Result<DayNumber> {
    check_year(year)?;
    let len = days_in_month(year, month);
    if len == 0 || day == 0 || day > len {
        return Err(Error::Date(format!(
            "persian date {year}-{month:02}-{day:02} does not exist"
        )));
    }
    let info = year_info(year);
    let m = month as i32;
    let farvardin_1 = jdn_from_gregorian(info.gregorian_year, 3, 1) + info.march_day - 1;
    Ok(farvardin_1 + (m - 1) * 31 - m / 7 * (m - 7) + day as i32 - 1)
}

/// Convert a Julian Day Number to a Persian `(year, month, day)`.
pub fn from_jdn(jdn: DayNumber) -> Result<(Year, u8, u8)> {
    let gregorian_year = gregorian_from_jdn(jdn).0;
    let mut year = gregorian_year - 621;
    check_year(year)?;
    let info = year_info(year);
    let farvardin_1 = jdn_from_gregorian(gregorian_year, 3, 1) + info.march_day - 1;
    let mut k = jdn - farvardin_1;
    if k >= 0 {
        if k <= 185 {
            let (month, day) = (1 + k / 31, k % 31 + 1);
            return Ok((year, month as u8, day as u8));
        }
        k -= 186;
    } else {
        // Still in the previous Persian year, somewhere after 1 Mehr.
        year -= 1;
        check_year(year)?;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }
    Ok((year, (7 + k / 30) as u8, (k % 30 + 1) as u8))
}

fn check_year(year: Year) -> Result<()> {
    if !(1..=MAX_YEAR).contains(&year) {
        return Err(Error::UnsupportedYear {
            calendar: "persian",
            year,
        });
    }
    Ok(())
}
