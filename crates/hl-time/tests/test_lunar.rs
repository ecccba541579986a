//! Integration tests for the lunar calendar converters.

use hl_time::lunar::chinese;
use hl_time::{Date, LunarCalendar, LunarDate};
use proptest::prelude::*;

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn jdn_range(from: (i32, u8, u8), to: (i32, u8, u8)) -> std::ops::RangeInclusive<i32> {
    date(from.0, from.1, from.2).jdn()..=date(to.0, to.1, to.2).jdn()
}

// ─── Known dates ──────────────────────────────────────────────────────────────

#[test]
fn chinese_new_year() {
    let cases = [
        (2020, (2020, 1, 25)),
        (2023, (2023, 1, 22)),
        (2024, (2024, 2, 10)),
        (2025, (2025, 1, 29)),
    ];
    for (lunar_year, (y, m, d)) in cases {
        let got = LunarCalendar::Chinese
            .to_date(LunarDate::new(lunar_year, 1, 1))
            .unwrap();
        assert_eq!(got, date(y, m, d), "chinese new year {lunar_year}");
    }
}

#[test]
fn chinese_leap_month_is_addressable() {
    // 2023 has a leap second month starting 22 March 2023.
    assert_eq!(chinese::leap_month(2023), Some(2));
    let leap = LunarDate {
        year: 2023,
        month: 2,
        day: 1,
        leap_month: true,
    };
    let d = LunarCalendar::Chinese.to_date(leap).unwrap();
    assert_eq!(d, date(2023, 3, 22));
    assert_eq!(LunarCalendar::Chinese.from_date(d).unwrap(), leap);
    // A leap flag on a month that has no leap twin is rejected.
    let bogus = LunarDate {
        leap_month: true,
        ..LunarDate::new(2024, 2, 1)
    };
    assert!(LunarCalendar::Chinese.to_date(bogus).is_err());
}

#[test]
fn ramadan_start_moves_through_the_year() {
    let starts: Vec<Date> = (2022..=2025)
        .flat_map(|y| {
            LunarCalendar::Islamic
                .dates_in_gregorian_year(9, 1, y)
                .unwrap()
        })
        .collect();
    assert_eq!(starts.len(), 4);
    for pair in starts.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((354..=355).contains(&gap), "gap {gap} between {pair:?}");
    }
}

#[test]
fn nowruz_every_year() {
    for y in 2000..=2030 {
        let dates = LunarCalendar::Persian.dates_in_gregorian_year(1, 1, y).unwrap();
        assert_eq!(dates.len(), 1, "nowruz {y}");
        let d = dates[0];
        assert_eq!(d.month(), 3);
        assert!((19..=22).contains(&d.day()), "nowruz {y} on {d}");
    }
}

#[test]
fn calendar_names_serialize_lowercase() {
    for cal in LunarCalendar::ALL {
        let json = serde_json::to_string(&cal).unwrap();
        assert_eq!(json, format!("\"{}\"", cal.name()));
        let back: LunarCalendar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cal);
    }
}

// ─── Round trips ──────────────────────────────────────────────────────────────

fn round_trips(cal: LunarCalendar, jdn: i32) -> Result<(), TestCaseError> {
    let d = Date::from_jdn(jdn).unwrap();
    let lunar = cal.from_date(d).unwrap();
    prop_assert!(lunar.day >= 1);
    prop_assert!(lunar.month >= 1 && lunar.month <= cal.max_month());
    prop_assert_eq!(cal.to_date(lunar).unwrap(), d);
    Ok(())
}

proptest! {
    #[test]
    fn islamic_round_trip(jdn in jdn_range((700, 1, 1), (9999, 12, 31))) {
        round_trips(LunarCalendar::Islamic, jdn)?;
    }

    #[test]
    fn hebrew_round_trip(jdn in jdn_range((1, 1, 1), (9999, 12, 31))) {
        round_trips(LunarCalendar::Hebrew, jdn)?;
    }

    #[test]
    fn persian_round_trip(jdn in jdn_range((700, 1, 1), (3700, 12, 31))) {
        round_trips(LunarCalendar::Persian, jdn)?;
    }

    #[test]
    fn chinese_round_trip(jdn in jdn_range((1901, 1, 1), (2100, 12, 31))) {
        round_trips(LunarCalendar::Chinese, jdn)?;
    }

    #[test]
    fn projection_lands_in_requested_year(year in 1950i32..2090, month in 1u8..=12, day in 1u8..=30) {
        for cal in LunarCalendar::ALL {
            for d in cal.dates_in_gregorian_year(month, day, year).unwrap() {
                prop_assert_eq!(d.year(), year);
                let lunar = cal.from_date(d).unwrap();
                prop_assert_eq!((lunar.month, lunar.day, lunar.leap_month), (month, day, false));
            }
        }
    }
}
