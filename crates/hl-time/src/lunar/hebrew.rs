//! Arithmetic Hebrew calendar.
//!
//! Months are numbered from Nisan = 1 to Adar = 12; Adar II = 13 exists only
//! in leap years (in which month 12 is Adar I). The year starts on 1 Tishri
//! (month 7). New year is the molad of Tishri subject to the postponement
//! rules, computed from the count of months and parts (1/1080 hour) elapsed
//! since the epoch. Intermediate counts run in `i64` because the parts total
//! exceeds `i32` for years after 5000.

use hl_core::errors::{Error, Result};
use hl_core::{DayNumber, Year};

/// Julian Day Number of 1 Tishri AM 1.
pub const EPOCH: i64 = 347_998;

/// Last supported Hebrew year.
pub const MAX_YEAR: Year = 14_000;

const NISAN: u8 = 1;
const ADAR: u8 = 12;
const ADAR_II: u8 = 13;
const TISHRI: u8 = 7;
const MARHESHVAN: u8 = 8;
const KISLEV: u8 = 9;

/// Whether `year` has thirteen months.
pub fn is_leap_year(year: Year) -> bool {
    (7 * year as i64 + 1).rem_euclid(19) < 7
}

/// Number of months in `year` (12 or 13).
pub fn months_in_year(year: Year) -> u8 {
    if is_leap_year(year) {
        ADAR_II
    } else {
        ADAR
    }
}

/// Days from the epoch to the molad-based new year, before the two
/// year-length corrections.
fn elapsed_days(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let days = 29 * months + parts.div_euclid(25_920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

fn year_length_correction(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

fn new_year(year: i64) -> i64 {
    EPOCH + elapsed_days(year) + year_length_correction(year)
}

/// Number of days in `year` (353–355 or 383–385).
pub fn days_in_year(year: Year) -> u16 {
    (new_year(year as i64 + 1) - new_year(year as i64)) as u16
}

/// Length of `month` in `year`; 0 if the month does not exist that year.
pub fn days_in_month(year: Year, month: u8) -> u8 {
    if month == 0 || month > months_in_year(year) {
        return 0;
    }
    let year_len = days_in_year(year);
    match month {
        2 | 4 | 6 | 10 | ADAR_II => 29,
        ADAR if !is_leap_year(year) => 29,
        MARHESHVAN if !matches!(year_len, 355 | 385) => 29,
        KISLEV if matches!(year_len, 353 | 383) => 29,
        _ => 30,
    }
}

/// Convert a Hebrew date to its Julian Day Number.
pub fn to_jdn(year: Year, month: u8, day: u8) -> Result<DayNumber> {
    check_year(year)?;
    let len = days_in_month(year, month);
    if len == 0 || day == 0 || day > len {
        return Err(Error::Date(format!(
            "hebrew date {year}-{month:02}-{day:02} does not exist"
        )));
    }
    Ok(jdn_unchecked(year, month, day) as DayNumber)
}

/// Convert a Julian Day Number to a Hebrew `(year, month, day)`.
pub fn from_jdn(jdn: DayNumber) -> Result<(Year, u8, u8)> {
    let jdn = jdn as i64;
    if jdn < EPOCH {
        return Err(Error::UnsupportedYear {
            calendar: "hebrew",
            year: 0,
        });
    }
    // Mean year is 35975351 / 98496 days; the estimate is at most one short.
    let mut year = (98_496 * (jdn - EPOCH) / 35_975_351).max(1);
    while new_year(year + 1) <= jdn {
        year += 1;
    }
    let year = year as Year;
    check_year(year)?;
    let mut month = if jdn < jdn_unchecked(year, NISAN, 1) {
        TISHRI
    } else {
        NISAN
    };
    while jdn > jdn_unchecked(year, month, days_in_month(year, month)) {
        month += 1;
    }
    let day = jdn - jdn_unchecked(year, month, 1) + 1;
    Ok((year, month, day as u8))
}

fn check_year(year: Year) -> Result<()> {
    if !(1..=MAX_YEAR).contains(&year) {
        return Err(Error::UnsupportedYear {
            calendar: "hebrew",
            year,
        });
    }
    Ok(())
}

fn jdn_unchecked(year: Year, month: u8, day: u8) -> i64 {
    let mut jdn = new_year(year as i64) + day as i64 - 1;
    if month < TISHRI {
        // Tishri .. end of year, then Nisan .. month - 1
        for m in TISHRI..=months_in_year(year) {
            jdn += days_in_month(year, m) as i64;
        }
        for m in NISAN..month {
            jdn += days_in_month(year, m) as i64;
        }
    } else {
        for m in TISHRI..month {
            jdn += days_in_month(year, m) as i64;
        }
    }
    jdn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    fn jdn(y: Year, m: u8, d: u8) -> DayNumber {
        Date::from_ymd(y, m, d).unwrap().jdn()
    }

    #[test]
    fn rosh_hashanah_5784() {
        assert_eq!(to_jdn(5784, 7, 1).unwrap(), jdn(2023, 9, 16));
        assert_eq!(from_jdn(jdn(2023, 9, 16)).unwrap(), (5784, 7, 1));
        assert_eq!(from_jdn(jdn(2023, 9, 15)).unwrap(), (5783, 6, 29));
    }

    #[test]
    fn passover_and_purim_5784() {
        assert!(is_leap_year(5784));
        assert_eq!(to_jdn(5784, 1, 15).unwrap(), jdn(2024, 4, 23));
        assert_eq!(to_jdn(5784, 13, 14).unwrap(), jdn(2024, 3, 24));
    }

    #[test]
    fn year_lengths_are_legal() {
        for y in 5000..5100 {
            let len = days_in_year(y);
            assert!(
                matches!(len, 353..=355 | 383..=385),
                "year {y} has {len} days"
            );
        }
    }

    #[test]
    fn adar_ii_only_in_leap_years() {
        assert!(!is_leap_year(5785));
        assert_eq!(days_in_month(5785, 13), 0);
        assert!(to_jdn(5785, 13, 1).is_err());
        assert_eq!(days_in_month(5784, 13), 29);
    }
}
