//! Per-year rule evaluation with dependency tracking.
//!
//! A [`Resolver`] evaluates the rules of one [`RuleSet`] for one year. It
//! keeps an explicit stack of the rule ids currently being evaluated; a
//! relative rule whose target is already on the stack closes a cycle, which
//! is reported with every id on it. Successful evaluations are memoized for
//! the lifetime of the resolver so a target shared by several relative rules
//! is computed once. Failures are never memoized.

use fxhash::FxHashMap;
use hl_core::errors::{Error, Result};
use hl_core::{EngineSettings, Year};
use hl_time::Date;
use tracing::trace;

use crate::calculators::{CalcContext, Calculators, DependencyResolver};
use crate::rule_set::RuleSet;

/// Evaluates rules of one rule set for one year.
pub struct Resolver<'r> {
    rules: &'r RuleSet,
    calculators: &'r Calculators,
    settings: &'r EngineSettings,
    year: Year,
    stack: Vec<String>,
    memo: FxHashMap<String, Vec<Date>>,
}

impl<'r> Resolver<'r> {
    /// A fresh resolver with an empty stack and memo.
    pub fn new(
        rules: &'r RuleSet,
        calculators: &'r Calculators,
        settings: &'r EngineSettings,
        year: Year,
    ) -> Self {
        Self {
            rules,
            calculators,
            settings,
            year,
            stack: Vec::new(),
            memo: FxHashMap::default(),
        }
    }

    /// Year being evaluated.
    pub fn year(&self) -> Year {
        self.year
    }

    /// Nominal dates of the registered rule `id`, active or not.
    ///
    /// # Errors
    /// [`Error::UnknownRule`] if `id` is not registered, otherwise whatever
    /// the rule's calculator or its dependencies report.
    pub fn nominal_dates(&mut self, id: &str) -> Result<Vec<Date>> {
        if let Some(dates) = self.memo.get(id) {
            return Ok(dates.clone());
        }
        if let Some(pos) = self.stack.iter().position(|s| s == id) {
            let mut cycle = self.stack[pos..].to_vec();
            cycle.push(id.to_owned());
            return Err(Error::CircularDependency { cycle });
        }
        let rules = self.rules;
        let rule = rules
            .get(id)
            .ok_or_else(|| Error::UnknownRule(id.to_owned()))?;
        let (calculators, settings, year) = (self.calculators, self.settings, self.year);

        trace!(rule = id, year, kind = %rule.rule_type(), "evaluating rule");
        self.stack.push(id.to_owned());
        let result = {
            let mut ctx = CalcContext {
                year,
                settings,
                resolver: &mut *self,
            };
            calculators.calculate(rule, &mut ctx)
        };
        self.stack.pop();

        let dates = result?;
        self.memo.insert(id.to_owned(), dates.clone());
        Ok(dates)
    }
}

impl DependencyResolver for Resolver<'_> {
    fn resolve(&mut self, rule_id: &str, target: &str) -> Result<Vec<Date>> {
        if !self.rules.contains(target) {
            return Err(Error::UnresolvableReference {
                rule_id: rule_id.to_owned(),
                target: target.to_owned(),
            });
        }
        self.nominal_dates(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::HolidayRule;

    fn date(y: Year, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn resolve(rules: &RuleSet, id: &str, year: Year) -> Result<Vec<Date>> {
        let calculators = Calculators::new();
        let settings = EngineSettings::default();
        Resolver::new(rules, &calculators, &settings, year).nominal_dates(id)
    }

    #[test]
    fn chain_of_relative_rules() {
        let rules = RuleSet::from_rules([
            HolidayRule::easter("easter", "Easter Sunday", 0),
            HolidayRule::relative("ascension", "Ascension Day", "easter", 39),
            HolidayRule::relative("pentecost", "Pentecost", "ascension", 10),
            HolidayRule::relative("whit-monday", "Whit Monday", "pentecost", 1),
        ])
        .unwrap();
        assert_eq!(resolve(&rules, "whit-monday", 2024).unwrap(), vec![date(2024, 5, 20)]);
    }

    #[test]
    fn two_rule_cycle_names_both() {
        let rules = RuleSet::from_rules([
            HolidayRule::relative("a", "A", "b", 1),
            HolidayRule::relative("b", "B", "a", 1),
        ])
        .unwrap();
        match resolve(&rules, "a", 2024) {
            Err(Error::CircularDependency { cycle }) => assert_eq!(cycle, ["a", "b", "a"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let rules = RuleSet::from_rules([HolidayRule::relative("loop", "Loop", "loop", 7)]).unwrap();
        match resolve(&rules, "loop", 2024) {
            Err(Error::CircularDependency { cycle }) => assert_eq!(cycle, ["loop", "loop"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cycle_entered_from_outside() {
        let rules = RuleSet::from_rules([
            HolidayRule::relative("entry", "Entry", "x", 1),
            HolidayRule::relative("x", "X", "y", 1),
            HolidayRule::relative("y", "Y", "z", 1),
            HolidayRule::relative("z", "Z", "x", 1),
        ])
        .unwrap();
        match resolve(&rules, "entry", 2024) {
            Err(Error::CircularDependency { cycle }) => assert_eq!(cycle, ["x", "y", "z", "x"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_target() {
        let rules = RuleSet::from_rules([HolidayRule::relative("r", "R", "ghost", 1)]).unwrap();
        assert!(matches!(
            resolve(&rules, "r", 2024),
            Err(Error::UnresolvableReference { .. })
        ));
    }

    #[test]
    fn inactive_target_still_resolves() {
        let rules = RuleSet::from_rules([
            HolidayRule::fixed("base", "Base", 3, 1).inactive(),
            HolidayRule::relative("next", "Next", "base", 1),
        ])
        .unwrap();
        assert_eq!(resolve(&rules, "next", 2024).unwrap(), vec![date(2024, 3, 2)]);
    }

    #[test]
    fn memo_and_stack_after_failure() {
        let rules = RuleSet::from_rules([
            HolidayRule::fixed("ok", "Ok", 1, 1),
            HolidayRule::relative("bad", "Bad", "ghost", 1),
        ])
        .unwrap();
        let calculators = Calculators::new();
        let settings = EngineSettings::default();
        let mut resolver = Resolver::new(&rules, &calculators, &settings, 2024);
        assert!(resolver.nominal_dates("bad").is_err());
        assert!(resolver.stack.is_empty());
        assert!(!resolver.memo.contains_key("bad"));
        assert_eq!(resolver.nominal_dates("ok").unwrap(), vec![date(2024, 1, 1)]);
        assert!(resolver.memo.contains_key("ok"));
    }
}
