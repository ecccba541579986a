//! # hl-time
//!
//! Julian-day dates, weekdays, months, Easter computus and lunar calendar
//! conversions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date`: a proleptic Gregorian day backed by its Julian Day Number.
pub mod date;

/// Western and Orthodox Easter Sunday.
pub mod easter;

/// Islamic, Chinese, Hebrew and Persian calendar converters.
pub mod lunar;

/// `Month`: month of the year.
pub mod month;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use easter::{easter_sunday, EasterStyle};
pub use lunar::{LunarCalendar, LunarDate};
pub use month::Month;
pub use weekday::Weekday;
