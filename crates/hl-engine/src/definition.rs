//! Serializable rule-set declarations.
//!
//! [`RuleSetDefinition`] is the data form of a [`RuleSet`]: every rule
//! variant except custom rules, which only exist in code. Any `serde` format
//! works; a JSON rule looks like
//!
//! ```json
//! { "id": "memorial", "name": "Memorial Day",
//!   "type": "nth_weekday", "month": 5, "weekday": "monday", "nth": -1 }
//! ```

use hl_core::errors::{Error, Result};
use hl_core::DayOffset;
use hl_time::{EasterStyle, LunarCalendar, Weekday};
use serde::{Deserialize, Serialize};

use crate::observance::ObservanceRule;
use crate::rule::{
    EasterRule, FixedRule, HolidayRule, LunarRule, NthWeekdayRule, RelativeRule, RuleKind,
};
use crate::rule_set::RuleSet;

/// Payload of a declared rule, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindDefinition {
    /// [`FixedRule`]
    Fixed {
        /// Month, 1–12.
        month: u8,
        /// Day of the month.
        day: u8,
    },
    /// [`NthWeekdayRule`]
    NthWeekday {
        /// Month, 1–12.
        month: u8,
        /// Weekday name, lower case.
        weekday: Weekday,
        /// 1–5, or -1 for the last.
        nth: i8,
    },
    /// [`EasterRule`]
    EasterBased {
        /// Days from Easter Sunday.
        offset_days: DayOffset,
        /// `western` (default) or `orthodox`.
        #[serde(default)]
        style: EasterStyle,
    },
    /// [`LunarRule`]
    Lunar {
        /// `islamic`, `chinese`, `hebrew` or `persian`.
        calendar: LunarCalendar,
        /// Month in that calendar.
        month: u8,
        /// Day in that calendar.
        day: u8,
    },
    /// [`RelativeRule`]
    Relative {
        /// Target rule id.
        relative_to: String,
        /// Days from the target.
        offset_days: DayOffset,
    },
}

/// One declared rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Rule id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Variant payload.
    #[serde(flatten)]
    pub kind: KindDefinition,
    /// Weekend handling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observance: Option<ObservanceRule>,
    /// Days covered by each occurrence.
    #[serde(default = "default_duration")]
    pub duration: u16,
    /// Whether the rule contributes occurrences.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_duration() -> u16 {
    1
}

fn default_active() -> bool {
    true
}

/// A declared rule set, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetDefinition {
    /// The rules.
    pub rules: Vec<RuleDefinition>,
}

impl From<RuleDefinition> for HolidayRule {
    fn from(def: RuleDefinition) -> Self {
        let kind = match def.kind {
            KindDefinition::Fixed { month, day } => RuleKind::Fixed(FixedRule { month, day }),
            KindDefinition::NthWeekday {
                month,
                weekday,
                nth,
            } => RuleKind::NthWeekday(NthWeekdayRule {
                month,
                weekday,
                nth,
            }),
            KindDefinition::EasterBased { offset_days, style } => {
                RuleKind::EasterBased(EasterRule { offset_days, style })
            }
            KindDefinition::Lunar {
                calendar,
                month,
                day,
            } => RuleKind::Lunar(LunarRule {
                calendar,
                month,
                day,
            }),
            KindDefinition::Relative {
                relative_to,
                offset_days,
            } => RuleKind::Relative(RelativeRule {
                relative_to,
                offset_days,
            }),
        };
        let rule = HolidayRule::new(def.id, def.name, kind)
            .with_duration(def.duration)
            .with_active(def.active);
        match def.observance {
            Some(observance) => rule.with_observance(observance),
            None => rule,
        }
    }
}

impl TryFrom<&HolidayRule> for RuleDefinition {
    type Error = Error;

    /// Fails for custom rules.
    fn try_from(rule: &HolidayRule) -> Result<Self> {
        let kind = match rule.kind() {
            RuleKind::Fixed(FixedRule { month, day }) => KindDefinition::Fixed {
                month: *month,
                day: *day,
            },
            RuleKind::NthWeekday(r) => KindDefinition::NthWeekday {
                month: r.month,
                weekday: r.weekday,
                nth: r.nth,
            },
            RuleKind::EasterBased(r) => KindDefinition::EasterBased {
                offset_days: r.offset_days,
                style: r.style,
            },
            RuleKind::Lunar(r) => KindDefinition::Lunar {
                calendar: r.calendar,
                month: r.month,
                day: r.day,
            },
            RuleKind::Relative(r) => KindDefinition::Relative {
                relative_to: r.relative_to.clone(),
                offset_days: r.offset_days,
            },
            RuleKind::Custom(_) => {
                return Err(Error::invalid_rule(
                    rule.id(),
                    "custom rules have no data form",
                ))
            }
        };
        Ok(Self {
            id: rule.id().to_owned(),
            name: rule.name().to_owned(),
            kind,
            observance: rule.observance().copied(),
            duration: rule.duration(),
            active: rule.is_active(),
        })
    }
}

impl RuleSetDefinition {
    /// Validate and register every rule, in order.
    pub fn into_rule_set(self) -> Result<RuleSet> {
        RuleSet::from_rules(self.rules.into_iter().map(HolidayRule::from))
    }

    /// The data form of an existing rule set.
    pub fn from_rule_set(rules: &RuleSet) -> Result<Self> {
        let rules = rules
            .iter()
            .map(RuleDefinition::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observance::{Direction, ObservancePolicy};
    use crate::rule::RuleType;

    #[test]
    fn parses_every_variant() {
        let json = r#"{ "rules": [
            { "id": "ny", "name": "New Year", "type": "fixed", "month": 1, "day": 1,
              "observance": { "policy": "substitute", "weekend": ["saturday", "sunday"] } },
            { "id": "mem", "name": "Memorial Day", "type": "nth_weekday",
              "month": 5, "weekday": "monday", "nth": -1 },
            { "id": "gf", "name": "Good Friday", "type": "easter_based", "offset_days": -2 },
            { "id": "eid", "name": "Eid al-Fitr", "type": "lunar",
              "calendar": "islamic", "month": 10, "day": 1, "duration": 3 },
            { "id": "em", "name": "Easter Monday", "type": "relative",
              "relative_to": "gf", "offset_days": 3, "active": false }
        ] }"#;
        let def: RuleSetDefinition = serde_json::from_str(json).unwrap();
        let set = def.into_rule_set().unwrap();
        let types: Vec<RuleType> = set.iter().map(|r| r.rule_type()).collect();
        assert_eq!(
            types,
            [
                RuleType::Fixed,
                RuleType::NthWeekday,
                RuleType::EasterBased,
                RuleType::Lunar,
                RuleType::Relative
            ]
        );
        let ny = set.get("ny").unwrap().observance().unwrap();
        assert_eq!(ny.policy, ObservancePolicy::Substitute);
        assert_eq!(ny.direction(), Direction::Forward);
        assert_eq!(set.get("eid").unwrap().duration(), 3);
        assert!(!set.get("em").unwrap().is_active());
    }

    #[test]
    fn invalid_payload_is_reported_on_build() {
        let json = r#"{ "rules": [
            { "id": "bad", "name": "Bad", "type": "fixed", "month": 2, "day": 30 }
        ] }"#;
        let def: RuleSetDefinition = serde_json::from_str(json).unwrap();
        assert!(matches!(
            def.into_rule_set(),
            Err(Error::InvalidRule { rule_id, .. }) if rule_id == "bad"
        ));
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let json = r#"{ "rules": [ { "id": "x", "name": "X", "type": "solar" } ] }"#;
        assert!(serde_json::from_str::<RuleSetDefinition>(json).is_err());
    }

    #[test]
    fn rule_set_round_trips_through_json() {
        let set = RuleSet::from_rules([
            HolidayRule::fixed("ny", "New Year", 1, 1)
                .with_observance(ObservanceRule::nearest_weekday()),
            HolidayRule::easter_with_style("pascha", "Pascha", 0, EasterStyle::Orthodox),
        ])
        .unwrap();
        let def = RuleSetDefinition::from_rule_set(&set).unwrap();
        let json = serde_json::to_string(&def).unwrap();
        let back: RuleSetDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }

    #[test]
    fn custom_rules_have_no_data_form() {
        let set = RuleSet::from_rules([HolidayRule::custom("c", "C", |_| Ok(Vec::new()))]).unwrap();
        assert!(RuleSetDefinition::from_rule_set(&set).is_err());
    }
}
