//! Benchmarks for year enumeration, point lookups and searches.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hl_core::EngineSettings;
use hl_engine::{HolidayEngine, HolidayRule, ObservanceRule, ResolutionCache, RuleSet};
use hl_time::easter::offsets;
use hl_time::{Date, LunarCalendar, Weekday};

fn rules() -> RuleSet {
    RuleSet::from_rules([
        HolidayRule::fixed("new-year", "New Year's Day", 1, 1)
            .with_observance(ObservanceRule::substitute()),
        HolidayRule::easter("good-friday", "Good Friday", offsets::GOOD_FRIDAY),
        HolidayRule::easter("easter-monday", "Easter Monday", offsets::EASTER_MONDAY),
        HolidayRule::easter("ascension", "Ascension Day", offsets::ASCENSION),
        HolidayRule::relative("whit-monday", "Whit Monday", "ascension", 11),
        HolidayRule::nth_weekday("memorial", "Memorial Day", 5, Weekday::Monday, -1),
        HolidayRule::nth_weekday("thanksgiving", "Thanksgiving", 11, Weekday::Thursday, 4),
        HolidayRule::lunar("eid", "Eid al-Fitr", LunarCalendar::Islamic, 10, 1),
        HolidayRule::lunar("spring", "Spring Festival", LunarCalendar::Chinese, 1, 1)
            .with_duration(3),
        HolidayRule::lunar("yom-kippur", "Yom Kippur", LunarCalendar::Hebrew, 7, 10),
        HolidayRule::lunar("nowruz", "Nowruz", LunarCalendar::Persian, 1, 1),
        HolidayRule::fixed("christmas", "Christmas Day", 12, 25)
            .with_observance(ObservanceRule::substitute()),
        HolidayRule::relative("boxing", "Boxing Day", "christmas", 1),
    ])
    .unwrap()
}

/// A cache too small to keep anything between iterations.
fn uncached_engine() -> HolidayEngine {
    let settings = EngineSettings::default();
    HolidayEngine::with_cache(settings, std::sync::Arc::new(ResolutionCache::new(1, 1))).unwrap()
}

fn bench_year(c: &mut Criterion) {
    let mut group = c.benchmark_group("occurrences_for_year");
    let rules = rules();

    let engine = HolidayEngine::default();
    group.bench_function("cached", |b| {
        b.iter(|| engine.occurrences_for_year(&rules, black_box(2024)).unwrap())
    });

    for year in [1950, 2024, 2090] {
        group.bench_with_input(BenchmarkId::new("cold", year), &year, |b, &year| {
            b.iter(|| {
                let engine = uncached_engine();
                engine.occurrences_for_year(&rules, black_box(year)).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_holiday");
    let rules = rules();
    let engine = HolidayEngine::default();
    let days: Vec<Date> = (0..365)
        .filter_map(|i| Date::from_ymd(2024, 1, 1).ok()?.add_days(i).ok())
        .collect();

    group.bench_function("whole_year", |b| {
        b.iter(|| {
            days.iter()
                .filter(|d| engine.is_holiday(&rules, **d).unwrap().is_some())
                .count()
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let rules = rules();
    let engine = HolidayEngine::default();
    let from = Date::from_ymd(2024, 6, 1).unwrap();
    c.bench_function("next_holiday", |b| {
        b.iter(|| engine.next_holiday(&rules, black_box(from)).unwrap())
    });
    c.bench_function("previous_holiday", |b| {
        b.iter(|| engine.previous_holiday(&rules, black_box(from)).unwrap())
    });
}

criterion_group!(benches, bench_year, bench_point, bench_search);
criterion_main!(benches);
