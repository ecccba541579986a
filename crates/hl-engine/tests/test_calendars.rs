//! Whole calendars declared as data and checked day by day.

use std::collections::HashSet;

use hl_engine::{HolidayEngine, RuleSet, RuleSetDefinition, WeekendDays};
use hl_time::Date;

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const US_FEDERAL: &str = r#"{ "rules": [
    { "id": "new-year", "name": "New Year's Day", "type": "fixed", "month": 1, "day": 1,
      "observance": { "policy": "nearest_weekday" } },
    { "id": "mlk", "name": "Martin Luther King Jr. Day", "type": "nth_weekday",
      "month": 1, "weekday": "monday", "nth": 3 },
    { "id": "presidents", "name": "Washington's Birthday", "type": "nth_weekday",
      "month": 2, "weekday": "monday", "nth": 3 },
    { "id": "memorial", "name": "Memorial Day", "type": "nth_weekday",
      "month": 5, "weekday": "monday", "nth": -1 },
    { "id": "juneteenth", "name": "Juneteenth", "type": "fixed", "month": 6, "day": 19,
      "observance": { "policy": "nearest_weekday" } },
    { "id": "independence", "name": "Independence Day", "type": "fixed", "month": 7, "day": 4,
      "observance": { "policy": "nearest_weekday" } },
    { "id": "labor", "name": "Labor Day", "type": "nth_weekday",
      "month": 9, "weekday": "monday", "nth": 1 },
    { "id": "columbus", "name": "Columbus Day", "type": "nth_weekday",
      "month": 10, "weekday": "monday", "nth": 2 },
    { "id": "veterans", "name": "Veterans Day", "type": "fixed", "month": 11, "day": 11,
      "observance": { "policy": "nearest_weekday" } },
    { "id": "thanksgiving", "name": "Thanksgiving Day", "type": "nth_weekday",
      "month": 11, "weekday": "thursday", "nth": 4 },
    { "id": "christmas", "name": "Christmas Day", "type": "fixed", "month": 12, "day": 25,
      "observance": { "policy": "nearest_weekday" } }
] }"#;

fn us_federal() -> RuleSet {
    serde_json::from_str::<RuleSetDefinition>(US_FEDERAL)
        .unwrap()
        .into_rule_set()
        .unwrap()
}

/// Every working day in `[from, to]` that the engine reports as a holiday.
fn holiday_list(engine: &HolidayEngine, rules: &RuleSet, from: Date, to: Date) -> Vec<Date> {
    let weekend = WeekendDays::SATURDAY_SUNDAY;
    let mut holidays = Vec::new();
    let mut d = from;
    while d <= to {
        if !weekend.is_weekend(d) && engine.is_holiday(rules, d).unwrap().is_some() {
            holidays.push(d);
        }
        d = d.add_days(1).unwrap();
    }
    holidays
}

/// Assert that the working-day holidays in `[from, to]` are exactly `expected`.
fn check_holidays(engine: &HolidayEngine, rules: &RuleSet, from: Date, to: Date, expected: &[Date]) {
    let calculated = holiday_list(engine, rules, from, to);
    let calc_set: HashSet<_> = calculated.iter().copied().collect();
    let exp_set: HashSet<_> = expected.iter().copied().collect();
    for d in &calculated {
        assert!(exp_set.contains(d), "{d} calculated as holiday but not expected");
    }
    for d in expected {
        assert!(calc_set.contains(d), "{d} expected as holiday but not calculated");
    }
    assert_eq!(calculated.len(), expected.len());
}

#[test]
fn us_federal_2024() {
    init_tracing();
    let engine = HolidayEngine::default();
    let expected = [
        date(2024, 1, 1),
        date(2024, 1, 15),
        date(2024, 2, 19),
        date(2024, 5, 27),
        date(2024, 6, 19),
        date(2024, 7, 4),
        date(2024, 9, 2),
        date(2024, 10, 14),
        date(2024, 11, 11),
        date(2024, 11, 28),
        date(2024, 12, 25),
    ];
    check_holidays(
        &engine,
        &us_federal(),
        date(2024, 1, 1),
        date(2024, 12, 31),
        &expected,
    );
}

#[test]
fn us_federal_2027_observed_days() {
    init_tracing();
    let engine = HolidayEngine::default();
    let rules = us_federal();
    // Juneteenth and Christmas fall on Saturdays, Independence Day on a
    // Sunday, and New Year's Day 2028 is observed on 31 December 2027.
    let expected = [
        date(2027, 1, 1),
        date(2027, 1, 18),
        date(2027, 2, 15),
        date(2027, 5, 31),
        date(2027, 6, 18),
        date(2027, 7, 5),
        date(2027, 9, 6),
        date(2027, 10, 11),
        date(2027, 11, 11),
        date(2027, 11, 25),
        date(2027, 12, 24),
        date(2027, 12, 31),
    ];
    check_holidays(&engine, &rules, date(2027, 1, 1), date(2027, 12, 31), &expected);

    let effective: Vec<Date> = engine
        .occurrences_between(&rules, date(2027, 1, 1), date(2027, 12, 31))
        .unwrap()
        .iter()
        .map(|o| o.effective_date())
        .collect();
    assert_eq!(effective, expected);
}

#[test]
fn gulf_calendar_with_lunar_and_bridge_days() {
    init_tracing();
    let json = r#"{ "rules": [
        { "id": "new-year", "name": "New Year's Day", "type": "fixed", "month": 1, "day": 1,
          "observance": { "policy": "substitute", "weekend": ["friday", "saturday"] } },
        { "id": "eid-al-fitr", "name": "Eid al-Fitr", "type": "lunar",
          "calendar": "islamic", "month": 10, "day": 1, "duration": 3 },
        { "id": "arafat", "name": "Arafat Day", "type": "lunar",
          "calendar": "islamic", "month": 12, "day": 9 },
        { "id": "eid-al-adha", "name": "Eid al-Adha", "type": "relative",
          "relative_to": "arafat", "offset_days": 1, "duration": 3 },
        { "id": "national", "name": "National Day", "type": "fixed", "month": 12, "day": 3,
          "observance": { "policy": "bridge", "weekend": ["friday", "saturday"],
                          "bridge_mode": "gap_day", "direction": "nearest" } }
    ] }"#;
    let rules = serde_json::from_str::<RuleSetDefinition>(json)
        .unwrap()
        .into_rule_set()
        .unwrap();
    let engine = HolidayEngine::default();
    let occ = engine.occurrences_for_year(&rules, 2025).unwrap();

    let arafat = occ.iter().find(|o| o.rule_id == "arafat").unwrap();
    let adha = occ.iter().find(|o| o.rule_id == "eid-al-adha").unwrap();
    assert_eq!(adha.date, arafat.date.add_days(1).unwrap());
    for day in 0..3 {
        let d = adha.date.add_days(day).unwrap();
        let hit = engine.is_holiday(&rules, d).unwrap().unwrap();
        assert!(hit.rule_id == "eid-al-adha" || hit.rule_id == "arafat");
    }

    // 3 December 2025 is a Wednesday; Thursday sits between it and the
    // Friday/Saturday weekend.
    let national = occ.iter().find(|o| o.rule_id == "national").unwrap();
    assert_eq!(national.bridge_date, Some(date(2025, 12, 4)));
    assert!(national.is_observed);
    let hit = engine.is_holiday(&rules, date(2025, 12, 4)).unwrap().unwrap();
    assert_eq!(hit.rule_id, "national");

    // 1 January 2026 is a Thursday, a working day here.
    let ny = engine.occurrences_for_year(&rules, 2026).unwrap();
    assert_eq!(ny[0].rule_id, "new-year");
    assert_eq!(ny[0].effective_date(), date(2026, 1, 1));

    // 1 January 2027 is a Friday: substituted forward to Sunday.
    let ny = engine.occurrences_for_year(&rules, 2027).unwrap();
    assert_eq!(ny[0].observed_date, Some(date(2027, 1, 3)));
}

#[test]
fn declared_calendar_round_trips() {
    let rules = us_federal();
    let def = RuleSetDefinition::from_rule_set(&rules).unwrap();
    let back = def.into_rule_set().unwrap();
    let engine = HolidayEngine::default();
    for year in [2024, 2027] {
        let a = engine.occurrences_for_year(&rules, year).unwrap();
        let b = engine.occurrences_for_year(&back, year).unwrap();
        assert_eq!(*a, *b);
    }
}
