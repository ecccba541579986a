//! Engine settings.
//!
//! [`EngineSettings`] collects the tunables of the resolution engine: the
//! Gregorian cutover used by the Easter computus, the bound on next/previous
//! searches and the capacities of the two cache maps. Settings are plain
//! values handed to the engine at construction time; there is no global
//! instance.
//!
//! Settings deserialize from any `serde` format with per-field defaults, so a
//! partial document such as `{"search_bound_years": 10}` is valid.

use serde::{Deserialize, Serialize};

use crate::ensure;
use crate::errors::Result;

/// First year computed with the Gregorian Easter computus by default.
pub const DEFAULT_GREGORIAN_CUTOVER: i32 = 1583;

/// Default number of years scanned by next/previous holiday searches.
pub const DEFAULT_SEARCH_BOUND_YEARS: u32 = 50;

/// Default capacity of the `(rule set, year)` cache.
pub const DEFAULT_YEAR_CACHE_CAPACITY: usize = 128;

/// Default capacity of the `(rule set, date)` point-lookup cache.
pub const DEFAULT_POINT_CACHE_CAPACITY: usize = 4096;

/// Tunables of the holiday engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Years before this one use the Julian Easter computus.
    pub gregorian_cutover_year: i32,
    /// Maximum number of years scanned by next/previous searches.
    pub search_bound_years: u32,
    /// Maximum number of cached `(rule set, year)` occurrence lists.
    pub year_cache_capacity: usize,
    /// Maximum number of cached point lookups.
    pub point_cache_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gregorian_cutover_year: DEFAULT_GREGORIAN_CUTOVER,
            search_bound_years: DEFAULT_SEARCH_BOUND_YEARS,
            year_cache_capacity: DEFAULT_YEAR_CACHE_CAPACITY,
            point_cache_capacity: DEFAULT_POINT_CACHE_CAPACITY,
        }
    }
}

impl EngineSettings {
    /// Default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first Gregorian Easter year.
    pub fn with_gregorian_cutover(mut self, year: i32) -> Self {
        self.gregorian_cutover_year = year;
        self
    }

    /// Set the next/previous search bound, in years.
    pub fn with_search_bound(mut self, years: u32) -> Self {
        self.search_bound_years = years;
        self
    }

    /// Set the capacity of the year cache.
    pub fn with_year_cache_capacity(mut self, capacity: usize) -> Self {
        self.year_cache_capacity = capacity;
        self
    }

    /// Set the capacity of the point-lookup cache.
    pub fn with_point_cache_capacity(mut self, capacity: usize) -> Self {
        self.point_cache_capacity = capacity;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.search_bound_years > 0,
            "search bound must be at least one year"
        );
        ensure!(
            self.year_cache_capacity > 0,
            "year cache capacity must be positive"
        );
        ensure!(
            self.point_cache_capacity > 0,
            "point cache capacity must be positive"
        );
        ensure!(
            (1..=9999).contains(&self.gregorian_cutover_year),
            "gregorian cutover {} out of range [1, 9999]",
            self.gregorian_cutover_year
        );
        Ok(())
    }
}
