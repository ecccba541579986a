//! Easter computus.
//!
//! Both algorithms use integer (floor) division only:
//!
//! * [`gregorian_easter`]: the Meeus/Jones/Butcher algorithm.
//! * [`julian_easter`]: Meeus' Julian algorithm; the resulting Julian-calendar
//!   date is converted through its Julian Day Number so that callers always
//!   receive a proleptic Gregorian [`Date`].
//!
//! Feasts tied to Easter are plain day offsets from Easter Sunday; the
//! [`offsets`] module lists the common ones.

use hl_core::errors::Result;
use hl_core::Year;
use serde::{Deserialize, Serialize};

use crate::date::Date;

/// Which Easter a holiday follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasterStyle {
    /// Western Easter: Gregorian computus from the cutover year on, Julian
    /// computus before it.
    #[default]
    Western,
    /// Orthodox Easter: Julian computus in every year.
    Orthodox,
}

/// Easter Sunday offsets of common movable feasts.
pub mod offsets {
    /// Shrove Tuesday (Mardi Gras).
    pub const SHROVE_TUESDAY: i32 = -47;
    /// Ash Wednesday.
    pub const ASH_WEDNESDAY: i32 = -46;
    /// Palm Sunday.
    pub const PALM_SUNDAY: i32 = -7;
    /// Maundy Thursday.
    pub const MAUNDY_THURSDAY: i32 = -3;
    /// Good Friday.
    pub const GOOD_FRIDAY: i32 = -2;
    /// Holy Saturday.
    pub const HOLY_SATURDAY: i32 = -1;
    /// Easter Sunday.
    pub const EASTER_SUNDAY: i32 = 0;
    /// Easter Monday.
    pub const EASTER_MONDAY: i32 = 1;
    /// Ascension Day.
    pub const ASCENSION: i32 = 39;
    /// Pentecost (Whit Sunday).
    pub const PENTECOST: i32 = 49;
    /// Whit Monday.
    pub const WHIT_MONDAY: i32 = 50;
    /// Corpus Christi.
    pub const CORPUS_CHRISTI: i32 = 60;
}

/// Easter Sunday of `year` in the given style.
///
/// Western Easter switches from the Julian to the Gregorian computus at
/// `gregorian_cutover` (years `< gregorian_cutover` are Julian).
pub fn easter_sunday(year: Year, style: EasterStyle, gregorian_cutover: Year) -> Result<Date> {
    match style {
        EasterStyle::Western if year >= gregorian_cutover => gregorian_easter(year),
        EasterStyle::Western | EasterStyle::Orthodox => julian_easter(year),
    }
}

/// Gregorian Easter Sunday (Meeus/Jones/Butcher).
pub fn gregorian_easter(year: Year) -> Result<Date> {
    // Validates the year range before any arithmetic.
    Date::start_of_year(year)?;
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    Date::from_ymd(year, (n / 31) as u8, (n % 31 + 1) as u8)
}

/// Julian Easter Sunday, expressed in the proleptic Gregorian calendar.
pub fn julian_easter(year: Year) -> Result<Date> {
    Date::start_of_year(year)?;
    let a = year % 4;
    let b = year % 7;
    let c = year % 19;
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34) % 7;
    let n = d + e + 114;
    Date::from_julian_ymd(year, (n / 31) as u8, (n % 31 + 1) as u8)
}
