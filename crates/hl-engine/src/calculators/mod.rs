//! Per-variant date calculators.
//!
//! Each [`Calculator`] turns one [`RuleKind`](crate::rule::RuleKind) variant
//! into the nominal dates it denotes for a year. [`Calculators`] is the fixed
//! dispatch table, indexed by [`RuleType`]; it is built once when the engine
//! is constructed and never changes afterwards.
//!
//! Relative rules do not call sibling calculators. They ask the
//! [`DependencyResolver`] in their [`CalcContext`] for the target's dates,
//! which lets the resolver track the chain of rules being evaluated.

use std::fmt;

use hl_core::errors::{Error, Result};
use hl_core::{EngineSettings, Year};
use hl_time::Date;

use crate::rule::{HolidayRule, RuleType};

pub mod custom;
pub mod easter_based;
pub mod fixed;
pub mod lunar;
pub mod nth_weekday;
pub mod relative;

pub use custom::CustomCalculator;
pub use easter_based::EasterCalculator;
pub use fixed::FixedCalculator;
pub use lunar::LunarCalculator;
pub use nth_weekday::NthWeekdayCalculator;
pub use relative::RelativeCalculator;

/// Resolves the nominal dates of another rule on behalf of a relative rule.
pub trait DependencyResolver {
    /// Dates of `target` in the current year, requested by rule `rule_id`.
    ///
    /// # Errors
    /// [`Error::UnresolvableReference`] if `target` is not registered and
    /// [`Error::CircularDependency`] if it is already being evaluated.
    fn resolve(&mut self, rule_id: &str, target: &str) -> Result<Vec<Date>>;
}

/// Everything a calculator may consult besides the rule itself.
pub struct CalcContext<'a> {
    /// Gregorian year being computed.
    pub year: Year,
    /// Engine settings (Easter cutover).
    pub settings: &'a EngineSettings,
    /// Access to other rules' dates.
    pub resolver: &'a mut dyn DependencyResolver,
}

/// Computes the nominal dates of one rule variant.
pub trait Calculator: fmt::Debug + Send + Sync {
    /// The variant this calculator handles.
    fn rule_type(&self) -> RuleType;

    /// Nominal dates of `rule` for `ctx.year`, sorted and without duplicates.
    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>>;
}

/// The calculator table, one entry per [`RuleType`].
#[derive(Debug)]
pub struct Calculators {
    table: [Box<dyn Calculator>; 6],
}

impl Default for Calculators {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculators {
    /// The built-in calculators, in [`RuleType::ALL`] order.
    pub fn new() -> Self {
        let table: [Box<dyn Calculator>; 6] = [
            Box::new(FixedCalculator),
            Box::new(NthWeekdayCalculator),
            Box::new(EasterCalculator),
            Box::new(LunarCalculator),
            Box::new(RelativeCalculator),
            Box::new(CustomCalculator),
        ];
        debug_assert!(RuleType::ALL
            .iter()
            .all(|t| table[t.index()].rule_type() == *t));
        Self { table }
    }

    /// The calculator for a rule type.
    pub fn get(&self, rule_type: RuleType) -> &dyn Calculator {
        self.table[rule_type.index()].as_ref()
    }

    /// Dispatch `rule` to its calculator.
    pub fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        self.get(rule.rule_type()).calculate(rule, ctx)
    }
}

/// Error for a rule handed to the wrong calculator.
fn wrong_kind(expected: RuleType, rule: &HolidayRule) -> Error {
    Error::Precondition(format!(
        "{expected} calculator cannot evaluate {} rule `{}`",
        rule.rule_type(),
        rule.id()
    ))
}

/// Attribute argument errors to the rule that caused them.
fn attribute(rule: &HolidayRule, err: Error) -> Error {
    match err {
        Error::Precondition(reason) => Error::invalid_rule(rule.id(), reason),
        other => other,
    }
}

fn sorted(mut dates: Vec<Date>) -> Vec<Date> {
    dates.sort_unstable();
    dates.dedup();
    dates
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_rule_type() {
        let calculators = Calculators::new();
        for t in RuleType::ALL {
            assert_eq!(calculators.get(t).rule_type(), t);
        }
    }

    #[test]
    fn mismatched_rule_is_rejected() {
        let rule = HolidayRule::fixed("x", "x", 1, 1);
        let settings = EngineSettings::default();
        let mut resolver = testing::MapResolver::default();
        let mut ctx = CalcContext {
            year: 2024,
            settings: &settings,
            resolver: &mut resolver,
        };
        let err = EasterCalculator.calculate(&rule, &mut ctx).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }
}
