//! The holiday engine.
//!
//! [`HolidayEngine`] answers year, point, range and next/previous queries for
//! any [`RuleSet`]. It owns the fixed [`Calculators`] table and shares a
//! [`ResolutionCache`] with whoever else holds the same `Arc`.
//!
//! # Occurrence order
//! A year's occurrences are sorted by nominal date; occurrences on the same
//! date keep rule registration order.
//!
//! # Year windows
//! An occurrence computed for year `y` may fall outside `y` (a relative rule
//! stepping over New Year, a multi-day span, a moved observed date). Point and
//! search queries therefore look at the occurrences of `y - 1`, `y` and
//! `y + 1`. A neighbour year that a lunar rule cannot compute is left out of
//! the window; the queried year itself must be computable.

use std::cmp::Reverse;
use std::sync::Arc;

use hl_core::errors::{Error, Result};
use hl_core::{ensure, EngineSettings, Year};
use hl_time::Date;
use tracing::{debug, trace};

use crate::cache::{ResolutionCache, YearOccurrences};
use crate::calculators::Calculators;
use crate::occurrence::HolidayOccurrence;
use crate::resolver::Resolver;
use crate::rule::HolidayRule;
use crate::rule_set::RuleSet;

/// Computes and caches holiday occurrences.
#[derive(Debug)]
pub struct HolidayEngine {
    settings: EngineSettings,
    calculators: Calculators,
    cache: Arc<ResolutionCache>,
}

impl Default for HolidayEngine {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            cache: Arc::new(ResolutionCache::from_settings(&settings)),
            calculators: Calculators::new(),
            settings,
        }
    }
}

impl HolidayEngine {
    /// An engine with its own cache, sized by `settings`.
    pub fn new(settings: EngineSettings) -> Result<Self> {
        let cache = Arc::new(ResolutionCache::from_settings(&settings));
        Self::with_cache(settings, cache)
    }

    /// An engine using a cache supplied by the caller.
    pub fn with_cache(settings: EngineSettings, cache: Arc<ResolutionCache>) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            calculators: Calculators::new(),
            cache,
        })
    }

    /// The engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    // ── Year queries ──────────────────────────────────────────────────────────

    /// Occurrences of every active rule for `year`.
    ///
    /// # Errors
    /// Any rule failure is returned as is and nothing is cached.
    pub fn occurrences_for_year(&self, rules: &RuleSet, year: Year) -> Result<YearOccurrences> {
        Date::start_of_year(year)?;
        let fingerprint = rules.fingerprint();
        if let Some(hit) = self.cache.get_year(fingerprint, year) {
            trace!(fingerprint = fingerprint.value(), year, "year cache hit");
            return Ok(hit);
        }
        debug!(
            fingerprint = fingerprint.value(),
            year,
            rules = rules.len(),
            "computing occurrences"
        );
        let occurrences = Arc::new(self.compute_year(rules, year)?);
        self.cache.put_year(fingerprint, year, Arc::clone(&occurrences));
        Ok(occurrences)
    }

    /// Raw nominal dates of one registered rule for `year`, active or not.
    /// Not cached, and no observance is applied.
    pub fn resolve_rule(&self, rules: &RuleSet, id: &str, year: Year) -> Result<Vec<Date>> {
        Date::start_of_year(year)?;
        Resolver::new(rules, &self.calculators, &self.settings, year).nominal_dates(id)
    }

    fn compute_year(&self, rules: &RuleSet, year: Year) -> Result<Vec<HolidayOccurrence>> {
        let mut resolver = Resolver::new(rules, &self.calculators, &self.settings, year);
        let mut out = Vec::new();
        for rule in rules.active_rules() {
            for date in resolver.nominal_dates(rule.id())? {
                out.push(occurrence(rule, date)?);
            }
        }
        // stable: equal dates stay in registration order
        out.sort_by_key(|o| o.date);
        Ok(out)
    }

    // ── Point queries ─────────────────────────────────────────────────────────

    /// The occurrence that makes `date` a day off, if any.
    ///
    /// A date matches an occurrence if it lies in its nominal span, in its
    /// observed span, or is its bridge day. The queried year is checked
    /// first, then the previous and the next one.
    pub fn is_holiday(&self, rules: &RuleSet, date: Date) -> Result<Option<HolidayOccurrence>> {
        let fingerprint = rules.fingerprint();
        if let Some(hit) = self.cache.get_point(fingerprint, date) {
            trace!(fingerprint = fingerprint.value(), %date, "point cache hit");
            return Ok(hit);
        }
        let year = date.year();
        let mut found = None;
        for y in [year, year - 1, year + 1] {
            let Some(occurrences) = self.window_year(rules, y, y != year)? else {
                continue;
            };
            if let Some(o) = occurrences.iter().find(|o| o.covers(date)) {
                found = Some(o.clone());
                break;
            }
        }
        self.cache.put_point(fingerprint, date, found.clone());
        Ok(found)
    }

    // ── Searches ──────────────────────────────────────────────────────────────

    /// First occurrence whose effective date is strictly after `after`.
    ///
    /// Scans at most `search_bound_years` years; `Ok(None)` if nothing is
    /// found within them.
    pub fn next_holiday(&self, rules: &RuleSet, after: Date) -> Result<Option<HolidayOccurrence>> {
        not_found_is_none(self.search(rules, after, Search::Forward))
    }

    /// Last occurrence whose effective date is strictly before `before`.
    ///
    /// Scans at most `search_bound_years` years; `Ok(None)` if nothing is
    /// found within them.
    pub fn previous_holiday(
        &self,
        rules: &RuleSet,
        before: Date,
    ) -> Result<Option<HolidayOccurrence>> {
        not_found_is_none(self.search(rules, before, Search::Backward))
    }

    /// Bounded year-by-year search.
    ///
    /// # Errors
    /// [`Error::CalculationOverflow`] if the bound is exhausted.
    fn search(&self, rules: &RuleSet, from: Date, way: Search) -> Result<HolidayOccurrence> {
        let start_year = from.year();
        let years = self.settings.search_bound_years;
        for i in 0..years as Year {
            let year = match way {
                Search::Forward => start_year + i,
                Search::Backward => start_year - i,
            };
            if !in_range(year) {
                break;
            }
            let mut candidates = Vec::new();
            for y in [year - 1, year, year + 1] {
                let Some(occurrences) = self.window_year(rules, y, y != year)? else {
                    continue;
                };
                candidates.extend(occurrences.iter().filter(|o| {
                    let effective = o.effective_date();
                    effective.year() == year
                        && match way {
                            Search::Forward => effective > from,
                            Search::Backward => effective < from,
                        }
                }).cloned());
            }
            let best = match way {
                Search::Forward => candidates
                    .into_iter()
                    .min_by_key(|o| (o.effective_date(), o.date)),
                Search::Backward => candidates
                    .into_iter()
                    .min_by_key(|o| (Reverse(o.effective_date()), Reverse(o.date))),
            };
            if let Some(found) = best {
                return Ok(found);
            }
        }
        debug!(%from, years, "holiday search exhausted");
        Err(Error::CalculationOverflow { start_year, years })
    }

    // ── Range queries ─────────────────────────────────────────────────────────

    /// Every occurrence whose effective date lies in `[from, to]`, sorted by
    /// effective date.
    pub fn occurrences_between(
        &self,
        rules: &RuleSet,
        from: Date,
        to: Date,
    ) -> Result<Vec<HolidayOccurrence>> {
        ensure!(from <= to, "empty range: {from} is after {to}");
        let mut out = Vec::new();
        let queried = from.year()..=to.year();
        for y in (from.year() - 1)..=(to.year() + 1) {
            let Some(occurrences) = self.window_year(rules, y, !queried.contains(&y))? else {
                continue;
            };
            out.extend(
                occurrences
                    .iter()
                    .filter(|o| (from..=to).contains(&o.effective_date()))
                    .cloned(),
            );
        }
        out.sort_by_key(|o| (o.effective_date(), o.date));
        Ok(out)
    }

    /// Occurrences of `year` as one year of a query window.
    ///
    /// Years outside the date range are skipped. A `neighbour` year beyond a
    /// lunar converter's coverage is skipped too, since it is only consulted
    /// for spill-over into the queried years.
    fn window_year(
        &self,
        rules: &RuleSet,
        year: Year,
        neighbour: bool,
    ) -> Result<Option<YearOccurrences>> {
        if !in_range(year) {
            return Ok(None);
        }
        match self.occurrences_for_year(rules, year) {
            Ok(occurrences) => Ok(Some(occurrences)),
            Err(Error::UnsupportedYear { calendar, .. }) if neighbour => {
                trace!(year, calendar, "neighbour year outside calendar coverage");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Search {
    Forward,
    Backward,
}

fn in_range(year: Year) -> bool {
    (Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year)
}

fn not_found_is_none(found: Result<HolidayOccurrence>) -> Result<Option<HolidayOccurrence>> {
    match found {
        Ok(o) => Ok(Some(o)),
        Err(Error::CalculationOverflow { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Apply the rule's observance to one nominal date.
fn occurrence(rule: &HolidayRule, date: Date) -> Result<HolidayOccurrence> {
    let (observed_date, bridge_date, is_observed) = match rule.observance() {
        Some(observance) => {
            let observed = observance.adjust(date).map_err(|e| match e {
                Error::Precondition(reason) => Error::invalid_rule(rule.id(), reason),
                other => other,
            })?;
            let moved = Some(observed.date).filter(|d| *d != date);
            (moved, observed.bridge, observed.is_observed)
        }
        None => (None, None, false),
    };
    Ok(HolidayOccurrence {
        rule_id: rule.id().to_owned(),
        name: rule.name().to_owned(),
        date,
        observed_date,
        is_observed,
        duration: rule.duration(),
        bridge_date,
    })
}
