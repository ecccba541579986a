//! Lunar and lunisolar calendar conversions.
//!
//! Every supported calendar converts to and from the Julian Day Number, so a
//! lunar date always becomes a [`Date`] through one integer day count. The
//! set of calendars is closed: [`LunarCalendar`] is matched exhaustively.

use std::ops::RangeInclusive;

use hl_core::errors::{Error, Result};
use hl_core::Year;
use serde::{Deserialize, Serialize};

use crate::date::Date;

pub mod chinese;
pub mod hebrew;
pub mod islamic;
pub mod persian;

/// A supported non-Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarCalendar {
    /// Tabular (arithmetic) Islamic calendar.
    Islamic,
    /// Chinese lunisolar calendar (table driven, 1900–2100).
    Chinese,
    /// Arithmetic Hebrew calendar; Nisan = 1, Adar II = 13.
    Hebrew,
    /// Persian Solar Hijri calendar.
    Persian,
}

/// A date in one of the [`LunarCalendar`] systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    /// Year in the calendar's own era.
    pub year: Year,
    /// Month in the calendar's own numbering.
    pub month: u8,
    /// Day of the month.
    pub day: u8,
    /// `true` for a Chinese leap month; always `false` elsewhere.
    pub leap_month: bool,
}

impl LunarDate {
    /// A date in a regular (non-leap) month.
    pub fn new(year: Year, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            leap_month: false,
        }
    }
}

impl LunarCalendar {
    /// Every supported calendar.
    pub const ALL: [LunarCalendar; 4] = [
        LunarCalendar::Islamic,
        LunarCalendar::Chinese,
        LunarCalendar::Hebrew,
        LunarCalendar::Persian,
    ];

    /// Lower-case name of the calendar.
    pub fn name(&self) -> &'static str {
        match self {
            LunarCalendar::Islamic => "islamic",
            LunarCalendar::Chinese => "chinese",
            LunarCalendar::Hebrew => "hebrew",
            LunarCalendar::Persian => "persian",
        }
    }

    /// Highest month number the calendar ever uses.
    pub fn max_month(&self) -> u8 {
        match self {
            LunarCalendar::Hebrew => 13,
            _ => 12,
        }
    }

    /// Highest day number any month of the calendar can have.
    pub fn max_day(&self) -> u8 {
        match self {
            LunarCalendar::Persian => 31,
            _ => 30,
        }
    }

    /// Length of a month in a given year; 0 if that month does not exist
    /// that year (Adar II in a common year, a missing Chinese leap month).
    pub fn days_in_month(&self, year: Year, month: u8, leap_month: bool) -> u8 {
        match self {
            LunarCalendar::Chinese => chinese::days_in_month(year, month, leap_month),
            _ if leap_month => 0,
            LunarCalendar::Islamic => islamic::days_in_month(year, month),
            LunarCalendar::Hebrew => hebrew::days_in_month(year, month),
            LunarCalendar::Persian => persian::days_in_month(year, month),
        }
    }

    /// Convert a lunar date to the corresponding Gregorian [`Date`].
    pub fn to_date(&self, date: LunarDate) -> Result<Date> {
        let LunarDate {
            year,
            month,
            day,
            leap_month,
        } = date;
        if leap_month && *self != LunarCalendar::Chinese {
            return Err(Error::Date(format!(
                "{} calendar has no leap-month flag",
                self.name()
            )));
        }
        let jdn = match self {
            LunarCalendar::Islamic => islamic::to_jdn(year, month, day)?,
            LunarCalendar::Chinese => chinese::to_jdn(year, month, day, leap_month)?,
            LunarCalendar::Hebrew => hebrew::to_jdn(year, month, day)?,
            LunarCalendar::Persian => persian::to_jdn(year, month, day)?,
        };
        Date::from_jdn(jdn)
    }

    /// Convert a Gregorian [`Date`] to this calendar.
    pub fn from_date(&self, date: Date) -> Result<LunarDate> {
        let jdn = date.jdn();
        let lunar = match self {
            LunarCalendar::Islamic => {
                let (year, month, day) = islamic::from_jdn(jdn)?;
                LunarDate::new(year, month, day)
            }
            LunarCalendar::Chinese => {
                let (year, month, day, leap_month) = chinese::from_jdn(jdn)?;
                LunarDate {
                    year,
                    month,
                    day,
                    leap_month,
                }
            }
            LunarCalendar::Hebrew => {
                let (year, month, day) = hebrew::from_jdn(jdn)?;
                LunarDate::new(year, month, day)
            }
            LunarCalendar::Persian => {
                let (year, month, day) = persian::from_jdn(jdn)?;
                LunarDate::new(year, month, day)
            }
        };
        debug_assert!(
            lunar.day >= 1 && lunar.day <= self.days_in_month(lunar.year, lunar.month, lunar.leap_month),
            "{} conversion produced invalid {lunar:?}",
            self.name()
        );
        Ok(lunar)
    }

    /// Lunar years the converter supports.
    pub fn supported_years(&self) -> RangeInclusive<Year> {
        match self {
            LunarCalendar::Islamic => 1..=islamic::MAX_YEAR,
            LunarCalendar::Chinese => chinese::MIN_YEAR..=chinese::MAX_YEAR,
            LunarCalendar::Hebrew => 1..=hebrew::MAX_YEAR,
            LunarCalendar::Persian => 1..=persian::MAX_YEAR,
        }
    }

    /// Lunar years that overlap Gregorian `year`.
    ///
    /// A Gregorian year only partly covered by the converter is clamped to
    /// the supported lunar years. A year with no supported lunar year at all
    /// is an [`Error::UnsupportedYear`].
    pub fn years_overlapping(&self, year: Year) -> Result<RangeInclusive<Year>> {
        let supported = self.supported_years();
        let first = match self.from_date(Date::start_of_year(year)?) {
            Ok(lunar) => lunar.year,
            Err(Error::UnsupportedYear { year: y, .. }) if y < *supported.start() => {
                *supported.start()
            }
            Err(e) => return Err(e),
        };
        let last = match self.from_date(Date::end_of_year(year)?) {
            Ok(lunar) => lunar.year,
            Err(Error::UnsupportedYear { year: y, .. }) if y > *supported.end() => {
                *supported.end()
            }
            Err(e) => return Err(e),
        };
        Ok(first..=last)
    }

    /// Every Gregorian date in `year` on which the regular-month lunar date
    /// `month`/`day` falls.
    ///
    /// Lunar years that lack the requested day (day 30 of a 29-day month,
    /// Adar II in a common year) contribute nothing. The result is sorted and
    /// may hold zero, one or two dates.
    pub fn dates_in_gregorian_year(&self, month: u8, day: u8, year: Year) -> Result<Vec<Date>> {
        let mut dates = Vec::new();
        for lunar_year in self.years_overlapping(year)? {
            if day == 0 || day > self.days_in_month(lunar_year, month, false) {
                continue;
            }
            let date = self.to_date(LunarDate::new(lunar_year, month, day))?;
            if date.year() == year {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }
}

impl std::fmt::Display for LunarCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
