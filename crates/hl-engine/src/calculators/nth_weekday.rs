//! The *n*-th or last weekday of a month.

use hl_core::errors::Result;
use hl_time::Date;

use super::{attribute, wrong_kind, CalcContext, Calculator};
use crate::rule::{HolidayRule, NthWeekdayRule, RuleKind, RuleType};

/// Calculator for [`NthWeekdayRule`]. A missing fifth occurrence yields no
/// date for that year.
#[derive(Debug, Clone, Copy, Default)]
pub struct NthWeekdayCalculator;

impl Calculator for NthWeekdayCalculator {
    fn rule_type(&self) -> RuleType {
        RuleType::NthWeekday
    }

    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        let RuleKind::NthWeekday(NthWeekdayRule {
            month,
            weekday,
            nth,
        }) = *rule.kind()
        else {
            return Err(wrong_kind(RuleType::NthWeekday, rule));
        };
        let found = Date::nth_weekday_of_month(ctx.year, month, weekday, nth)
            .map_err(|e| attribute(rule, e))?;
        Ok(found.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{date, run};
    use super::*;
    use hl_time::Weekday;

    #[test]
    fn thanksgiving() {
        let rule = HolidayRule::nth_weekday("thanksgiving", "Thanksgiving", 11, Weekday::Thursday, 4);
        assert_eq!(run(&rule, 2024).unwrap(), vec![date(2024, 11, 28)]);
        assert_eq!(run(&rule, 2025).unwrap(), vec![date(2025, 11, 27)]);
    }

    #[test]
    fn fifth_monday_of_february_2024_is_absent() {
        let rule = HolidayRule::nth_weekday("m5", "Fifth Monday", 2, Weekday::Monday, 5);
        assert!(run(&rule, 2024).unwrap().is_empty());
    }

    #[test]
    fn last_monday_of_may_2024() {
        let rule = HolidayRule::nth_weekday("memorial", "Memorial Day", 5, Weekday::Monday, -1);
        assert_eq!(run(&rule, 2024).unwrap(), vec![date(2024, 5, 27)]);
    }

    #[test]
    fn bad_nth_names_the_rule() {
        let rule = HolidayRule::nth_weekday("bad", "Bad", 5, Weekday::Monday, 9);
        match run(&rule, 2024) {
            Err(hl_core::Error::InvalidRule { rule_id, .. }) => assert_eq!(rule_id, "bad"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
