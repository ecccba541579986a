//! Holiday rule declarations.
//!
//! A [`HolidayRule`] pairs an id and a display name with exactly one
//! [`RuleKind`] payload. Rules are immutable once built; the builder methods
//! consume and return the rule.

use std::fmt;
use std::sync::Arc;

use hl_core::errors::{BoxError, Result};
use hl_core::{ensure_rule, DayOffset, Year};
use hl_time::month::Month;
use hl_time::{Date, EasterStyle, LunarCalendar, Weekday};

use crate::observance::ObservanceRule;

/// Longest span a single occurrence may cover, in days.
pub const MAX_DURATION: u16 = 366;

// ── Payloads ──────────────────────────────────────────────────────────────────

/// Same month and day every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRule {
    /// Month, 1–12.
    pub month: u8,
    /// Day of the month.
    pub day: u8,
}

/// The *n*-th (or last) given weekday of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthWeekdayRule {
    /// Month, 1–12.
    pub month: u8,
    /// Weekday to look for.
    pub weekday: Weekday,
    /// 1–5 counts from the start of the month; -1 is the last one.
    pub nth: i8,
}

/// A fixed offset from Easter Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EasterRule {
    /// Days after (or, if negative, before) Easter Sunday.
    pub offset_days: DayOffset,
    /// Western or Orthodox Easter.
    pub style: EasterStyle,
}

/// A month and day in a lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarRule {
    /// Source calendar.
    pub calendar: LunarCalendar,
    /// Month in the source calendar's numbering.
    pub month: u8,
    /// Day in the source calendar.
    pub day: u8,
}

/// A fixed offset from another rule's nominal dates in the same year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeRule {
    /// Id of the rule this one follows.
    pub relative_to: String,
    /// Days after (or, if negative, before) the target.
    pub offset_days: DayOffset,
}

/// Signature of a custom rule function.
pub type ComputeFn = dyn Fn(Year) -> std::result::Result<Vec<Date>, BoxError> + Send + Sync;

/// A user-supplied function from year to dates.
#[derive(Clone)]
pub struct CustomRule {
    compute: Arc<ComputeFn>,
}

impl CustomRule {
    /// Wrap a function.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(Year) -> std::result::Result<Vec<Date>, BoxError> + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
        }
    }

    /// Call the function for `year`.
    pub fn compute(&self, year: Year) -> std::result::Result<Vec<Date>, BoxError> {
        (self.compute)(year)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").finish_non_exhaustive()
    }
}

/// The closed set of rule variants.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// See [`FixedRule`].
    Fixed(FixedRule),
    /// See [`NthWeekdayRule`].
    NthWeekday(NthWeekdayRule),
    /// See [`EasterRule`].
    EasterBased(EasterRule),
    /// See [`LunarRule`].
    Lunar(LunarRule),
    /// See [`RelativeRule`].
    Relative(RelativeRule),
    /// See [`CustomRule`].
    Custom(CustomRule),
}

/// Payload-free tag of a [`RuleKind`], used to index the calculator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// [`RuleKind::Fixed`]
    Fixed,
    /// [`RuleKind::NthWeekday`]
    NthWeekday,
    /// [`RuleKind::EasterBased`]
    EasterBased,
    /// [`RuleKind::Lunar`]
    Lunar,
    /// [`RuleKind::Relative`]
    Relative,
    /// [`RuleKind::Custom`]
    Custom,
}

impl RuleType {
    /// Every rule type, in table order.
    pub const ALL: [RuleType; 6] = [
        RuleType::Fixed,
        RuleType::NthWeekday,
        RuleType::EasterBased,
        RuleType::Lunar,
        RuleType::Relative,
        RuleType::Custom,
    ];

    /// Position in [`RuleType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            RuleType::Fixed => "fixed",
            RuleType::NthWeekday => "nth_weekday",
            RuleType::EasterBased => "easter_based",
            RuleType::Lunar => "lunar",
            RuleType::Relative => "relative",
            RuleType::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RuleKind {
    /// Tag of this variant.
    pub fn rule_type(&self) -> RuleType {
        match self {
            RuleKind::Fixed(_) => RuleType::Fixed,
            RuleKind::NthWeekday(_) => RuleType::NthWeekday,
            RuleKind::EasterBased(_) => RuleType::EasterBased,
            RuleKind::Lunar(_) => RuleType::Lunar,
            RuleKind::Relative(_) => RuleType::Relative,
            RuleKind::Custom(_) => RuleType::Custom,
        }
    }
}

// ── HolidayRule ───────────────────────────────────────────────────────────────

/// A declarative holiday rule.
#[derive(Debug, Clone)]
pub struct HolidayRule {
    id: String,
    name: String,
    kind: RuleKind,
    observance: Option<ObservanceRule>,
    duration: u16,
    active: bool,
}

impl HolidayRule {
    /// Build an active, single-day rule without observance.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            observance: None,
            duration: 1,
            active: true,
        }
    }

    /// A [`FixedRule`].
    pub fn fixed(id: impl Into<String>, name: impl Into<String>, month: u8, day: u8) -> Self {
        Self::new(id, name, RuleKind::Fixed(FixedRule { month, day }))
    }

    /// An [`NthWeekdayRule`].
    pub fn nth_weekday(
        id: impl Into<String>,
        name: impl Into<String>,
        month: u8,
        weekday: Weekday,
        nth: i8,
    ) -> Self {
        Self::new(
            id,
            name,
            RuleKind::NthWeekday(NthWeekdayRule {
                month,
                weekday,
                nth,
            }),
        )
    }

    /// A Western [`EasterRule`].
    pub fn easter(id: impl Into<String>, name: impl Into<String>, offset_days: DayOffset) -> Self {
        Self::easter_with_style(id, name, offset_days, EasterStyle::Western)
    }

    /// An [`EasterRule`] in the given style.
    pub fn easter_with_style(
        id: impl Into<String>,
        name: impl Into<String>,
        offset_days: DayOffset,
        style: EasterStyle,
    ) -> Self {
        Self::new(
            id,
            name,
            RuleKind::EasterBased(EasterRule { offset_days, style }),
        )
    }

    /// A [`LunarRule`].
    pub fn lunar(
        id: impl Into<String>,
        name: impl Into<String>,
        calendar: LunarCalendar,
        month: u8,
        day: u8,
    ) -> Self {
        Self::new(
            id,
            name,
            RuleKind::Lunar(LunarRule {
                calendar,
                month,
                day,
            }),
        )
    }

    /// A [`RelativeRule`].
    pub fn relative(
        id: impl Into<String>,
        name: impl Into<String>,
        relative_to: impl Into<String>,
        offset_days: DayOffset,
    ) -> Self {
        Self::new(
            id,
            name,
            RuleKind::Relative(RelativeRule {
                relative_to: relative_to.into(),
                offset_days,
            }),
        )
    }

    /// A [`CustomRule`].
    pub fn custom<F>(id: impl Into<String>, name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(Year) -> std::result::Result<Vec<Date>, BoxError> + Send + Sync + 'static,
    {
        Self::new(id, name, RuleKind::Custom(CustomRule::new(compute)))
    }

    /// Attach an observance rule.
    pub fn with_observance(mut self, observance: ObservanceRule) -> Self {
        self.observance = Some(observance);
        self
    }

    /// Set the number of consecutive days each occurrence covers.
    pub fn with_duration(mut self, days: u16) -> Self {
        self.duration = days;
        self
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Mark the rule inactive.
    pub fn inactive(self) -> Self {
        self.with_active(false)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant payload.
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Variant tag.
    pub fn rule_type(&self) -> RuleType {
        self.kind.rule_type()
    }

    /// Observance rule, if any.
    pub fn observance(&self) -> Option<&ObservanceRule> {
        self.observance.as_ref()
    }

    /// Days covered by each occurrence.
    pub fn duration(&self) -> u16 {
        self.duration
    }

    /// Whether the rule contributes occurrences.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Check the payload, duration and observance for malformed values.
    ///
    /// References between rules are not checked here; they are resolved
    /// lazily when occurrences are computed.
    ///
    /// # Errors
    /// Returns [`hl_core::Error::InvalidRule`] naming this rule.
    pub fn validate(&self) -> Result<()> {
        let id = self.id.as_str();
        ensure_rule!(id, !id.trim().is_empty(), "rule id must not be empty");
        ensure_rule!(
            id,
            (1..=MAX_DURATION).contains(&self.duration),
            "duration {} out of range [1, {MAX_DURATION}]",
            self.duration
        );
        match &self.kind {
            RuleKind::Fixed(FixedRule { month, day }) => {
                let Some(m) = Month::from_number(*month) else {
                    return Err(invalid_month(id, *month));
                };
                ensure_rule!(
                    id,
                    *day >= 1 && *day <= m.max_days(),
                    "{m} never has a day {day}"
                );
            }
            RuleKind::NthWeekday(NthWeekdayRule { month, nth, .. }) => {
                if Month::from_number(*month).is_none() {
                    return Err(invalid_month(id, *month));
                }
                ensure_rule!(
                    id,
                    (1..=5).contains(nth) || *nth == -1,
                    "nth must be in [1, 5] or -1, got {nth}"
                );
            }
            RuleKind::EasterBased(_) | RuleKind::Custom(_) => {}
            RuleKind::Lunar(LunarRule {
                calendar,
                month,
                day,
            }) => {
                ensure_rule!(
                    id,
                    *month >= 1 && *month <= calendar.max_month(),
                    "{calendar} month {month} out of range [1, {}]",
                    calendar.max_month()
                );
                ensure_rule!(
                    id,
                    *day >= 1 && *day <= calendar.max_day(),
                    "{calendar} day {day} out of range [1, {}]",
                    calendar.max_day()
                );
            }
            RuleKind::Relative(RelativeRule { relative_to, .. }) => {
                ensure_rule!(
                    id,
                    !relative_to.trim().is_empty(),
                    "relative rule has an empty target id"
                );
            }
        }
        if let Some(observance) = &self.observance {
            ensure_rule!(
                id,
                observance.weekend.has_working_day(),
                "weekend covers every day of the week"
            );
        }
        Ok(())
    }
}

fn invalid_month(id: &str, month: u8) -> hl_core::Error {
    hl_core::Error::invalid_rule(id, format!("month {month} out of range [1, 12]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observance::WeekendDays;
    use hl_core::Error;

    fn assert_invalid(rule: HolidayRule) {
        match rule.validate() {
            Err(Error::InvalidRule { rule_id, .. }) => assert_eq!(rule_id, rule.id()),
            other => panic!("expected InvalidRule for {rule:?}, got {other:?}"),
        }
    }

    #[test]
    fn builders_set_defaults() {
        let rule = HolidayRule::fixed("xmas", "Christmas Day", 12, 25);
        assert_eq!(rule.id(), "xmas");
        assert_eq!(rule.name(), "Christmas Day");
        assert_eq!(rule.duration(), 1);
        assert!(rule.is_active());
        assert!(rule.observance().is_none());
        assert_eq!(rule.rule_type(), RuleType::Fixed);
        assert!(!rule.inactive().is_active());
    }

    #[test]
    fn fixed_day_must_exist_in_some_year() {
        assert!(HolidayRule::fixed("leap", "Leap Day", 2, 29).validate().is_ok());
        assert_invalid(HolidayRule::fixed("feb30", "Feb 30", 2, 30));
        assert_invalid(HolidayRule::fixed("apr31", "Apr 31", 4, 31));
        assert_invalid(HolidayRule::fixed("m13", "Month 13", 13, 1));
        assert_invalid(HolidayRule::fixed("d0", "Day 0", 1, 0));
    }

    #[test]
    fn nth_range() {
        for nth in [1, 5, -1] {
            assert!(HolidayRule::nth_weekday("ok", "ok", 5, Weekday::Monday, nth)
                .validate()
                .is_ok());
        }
        for nth in [0, 6, -2] {
            assert_invalid(HolidayRule::nth_weekday("bad", "bad", 5, Weekday::Monday, nth));
        }
        assert_invalid(HolidayRule::nth_weekday("bad", "bad", 0, Weekday::Monday, 1));
    }

    #[test]
    fn lunar_ranges_follow_calendar() {
        let adar_ii = HolidayRule::lunar("purim", "Purim", LunarCalendar::Hebrew, 13, 14);
        assert!(adar_ii.validate().is_ok());
        assert_invalid(HolidayRule::lunar("x", "x", LunarCalendar::Islamic, 13, 1));
        assert_invalid(HolidayRule::lunar("x", "x", LunarCalendar::Islamic, 1, 31));
        assert!(HolidayRule::lunar("x", "x", LunarCalendar::Persian, 1, 31)
            .validate()
            .is_ok());
    }

    #[test]
    fn duration_and_id() {
        assert_invalid(HolidayRule::fixed("z", "zero", 1, 1).with_duration(0));
        assert_invalid(HolidayRule::fixed("z", "long", 1, 1).with_duration(367));
        assert!(HolidayRule::fixed("", "no id", 1, 1).validate().is_err());
        assert_invalid(HolidayRule::relative("r", "r", " ", 1));
    }

    #[test]
    fn weekend_must_leave_a_working_day() {
        let all = WeekendDays::from_days(Weekday::ALL);
        let rule = HolidayRule::fixed("x", "x", 1, 1)
            .with_observance(ObservanceRule::substitute().with_weekend(all));
        assert_invalid(rule);
    }

    #[test]
    fn custom_rule_calls_function() {
        let rule = HolidayRule::custom("c", "Custom", |year| {
            Ok(vec![Date::from_ymd(year, 6, 1)?])
        });
        let RuleKind::Custom(custom) = rule.kind() else {
            panic!("expected a custom rule");
        };
        let dates = custom.compute(2024).unwrap();
        assert_eq!(dates, vec![Date::from_ymd(2024, 6, 1).unwrap()]);
        assert!(format!("{custom:?}").starts_with("CustomRule"));
    }
}
