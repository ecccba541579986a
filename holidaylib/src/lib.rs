//! # holidaylib
//!
//! Rule-based holiday resolution: fixed dates, nth weekdays, Easter-relative
//! feasts, lunar-calendar holidays and holidays defined relative to other
//! holidays, with weekend observance and a shared resolution cache.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `hl-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! holidaylib = "0.1"
//! ```
//!
//! ```rust
//! use holidaylib::engine::{HolidayEngine, HolidayRule, RuleSet};
//! use holidaylib::time::{Date, LunarCalendar};
//!
//! let rules = RuleSet::from_rules([
//!     HolidayRule::easter("good-friday", "Good Friday", -2),
//!     HolidayRule::lunar("spring", "Spring Festival", LunarCalendar::Chinese, 1, 1),
//! ])?;
//! let engine = HolidayEngine::default();
//!
//! let year = engine.occurrences_for_year(&rules, 2025)?;
//! assert_eq!(year[0].date, Date::from_ymd(2025, 1, 29)?);
//! assert_eq!(year[1].date, Date::from_ymd(2025, 4, 18)?);
//! # Ok::<(), holidaylib::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error type, settings and shared aliases.
pub use hl_core as core;

/// Dates, weekdays, Easter computus and lunar calendars.
pub use hl_time as time;

/// Rules, observance, the resolver and the cached engine.
pub use hl_engine as engine;

pub use hl_core::{EngineSettings, Error, Result};
pub use hl_engine::{HolidayEngine, HolidayOccurrence, HolidayRule, ObservanceRule, RuleSet};
pub use hl_time::Date;
