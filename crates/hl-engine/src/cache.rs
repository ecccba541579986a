//! Resolution cache.
//!
//! Two LRU maps keyed by rule-set [`Fingerprint`]:
//!
//! * `(fingerprint, year)` → the sorted occurrence list for that year;
//! * `(fingerprint, date)` → the result of a point lookup.
//!
//! A mutated rule set has a new fingerprint, so its old entries are simply
//! never hit again and age out. The cache only ever holds successful results
//! and can be cleared or dropped at any time.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hl_core::{EngineSettings, Year};
use hl_time::Date;
use lru::LruCache;

use crate::occurrence::HolidayOccurrence;
use crate::rule_set::Fingerprint;

/// Shared occurrence list for one year.
pub type YearOccurrences = Arc<Vec<HolidayOccurrence>>;

/// Counters and sizes at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Cached year lists.
    pub year_entries: usize,
    /// Cached point lookups.
    pub point_entries: usize,
}

impl CacheStats {
    /// Fraction of lookups that hit, in `[0, 1]`; 0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of year and point results, shared between engines via `Arc`.
pub struct ResolutionCache {
    years: Mutex<LruCache<(Fingerprint, Year), YearOccurrences>>,
    points: Mutex<LruCache<(Fingerprint, Date), Option<HolidayOccurrence>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    /// A cache holding at most `year_capacity` year lists and
    /// `point_capacity` point results. Zero capacities are raised to one.
    pub fn new(year_capacity: usize, point_capacity: usize) -> Self {
        Self {
            years: Mutex::new(LruCache::new(capacity(year_capacity))),
            points: Mutex::new(LruCache::new(capacity(point_capacity))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A cache sized by the engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.year_cache_capacity, settings.point_cache_capacity)
    }

    /// Cached occurrences of `year`, if present.
    pub fn get_year(&self, fingerprint: Fingerprint, year: Year) -> Option<YearOccurrences> {
        let found = lock(&self.years).get(&(fingerprint, year)).cloned();
        self.record(found.is_some());
        found
    }

    /// Store the occurrences of `year`.
    pub fn put_year(&self, fingerprint: Fingerprint, year: Year, occurrences: YearOccurrences) {
        lock(&self.years).put((fingerprint, year), occurrences);
    }

    /// Cached point lookup for `date`: `Some(None)` is a cached "not a
    /// holiday", `None` a miss.
    pub fn get_point(
        &self,
        fingerprint: Fingerprint,
        date: Date,
    ) -> Option<Option<HolidayOccurrence>> {
        let found = lock(&self.points).get(&(fingerprint, date)).cloned();
        self.record(found.is_some());
        found
    }

    /// Store a point lookup result.
    pub fn put_point(&self, fingerprint: Fingerprint, date: Date, result: Option<HolidayOccurrence>) {
        lock(&self.points).put((fingerprint, date), result);
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        lock(&self.years).clear();
        lock(&self.points).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Current counters and sizes.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            year_entries: lock(&self.years).len(),
            point_entries: lock(&self.points).len(),
        }
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("stats", &self.stats())
            .finish()
    }
}

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

// Entries are immutable values, so a poisoned map is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
