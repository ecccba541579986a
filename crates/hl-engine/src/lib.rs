//! # hl-engine
//!
//! Holiday rules, the per-variant calculators, observed-date adjustment and
//! the cached resolution engine.
//!
//! ```
//! use hl_engine::{HolidayEngine, HolidayRule, ObservanceRule, RuleSet};
//! use hl_time::{Date, Weekday};
//!
//! let rules = RuleSet::from_rules([
//!     HolidayRule::fixed("independence", "Independence Day", 7, 4)
//!         .with_observance(ObservanceRule::nearest_weekday()),
//!     HolidayRule::nth_weekday("labor", "Labor Day", 9, Weekday::Monday, 1),
//! ])?;
//! let engine = HolidayEngine::default();
//!
//! // 4 July 2026 is a Saturday, observed on Friday the 3rd.
//! let hit = engine.is_holiday(&rules, Date::from_ymd(2026, 7, 3)?)?;
//! assert_eq!(hit.map(|o| o.rule_id), Some("independence".to_string()));
//!
//! let next = engine.next_holiday(&rules, Date::from_ymd(2026, 7, 4)?)?;
//! assert_eq!(next.map(|o| o.date), Some(Date::from_ymd(2026, 9, 7)?));
//! # Ok::<(), hl_core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// LRU resolution cache.
pub mod cache;

/// One calculator per rule variant, and the dispatch table.
pub mod calculators;

/// Serializable rule-set declarations.
pub mod definition;

/// `HolidayEngine`: year, point, range and search queries.
pub mod engine;

/// Observed-date adjustment.
pub mod observance;

/// `HolidayOccurrence`: a computed holiday.
pub mod occurrence;

/// Per-year rule evaluation with cycle detection.
pub mod resolver;

/// `HolidayRule` and its payloads.
pub mod rule;

/// `RuleSet`: registered rules and their fingerprint.
pub mod rule_set;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use cache::{CacheStats, ResolutionCache};
pub use calculators::{Calculator, Calculators};
pub use definition::{KindDefinition, RuleDefinition, RuleSetDefinition};
pub use engine::HolidayEngine;
pub use observance::{BridgeMode, Direction, ObservancePolicy, ObservanceRule, Observed, WeekendDays};
pub use occurrence::HolidayOccurrence;
pub use rule::{HolidayRule, RuleKind, RuleType};
pub use rule_set::{Fingerprint, RuleSet};
