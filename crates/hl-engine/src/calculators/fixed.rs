//! Same month and day every year.

use hl_core::errors::Result;
use hl_time::date::days_in_month;
use hl_time::Date;

use super::{wrong_kind, CalcContext, Calculator};
use crate::rule::{FixedRule, HolidayRule, RuleKind, RuleType};

/// Calculator for [`FixedRule`].
///
/// 29 February produces nothing in common years. A day that no year of the
/// month can hold (30 February, 31 April) is rejected by
/// [`HolidayRule::validate`] before a rule gets here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCalculator;

impl Calculator for FixedCalculator {
    fn rule_type(&self) -> RuleType {
        RuleType::Fixed
    }

    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        let RuleKind::Fixed(FixedRule { month, day }) = *rule.kind() else {
            return Err(wrong_kind(RuleType::Fixed, rule));
        };
        if day > days_in_month(ctx.year, month) {
            return Ok(Vec::new());
        }
        Ok(vec![Date::from_ymd(ctx.year, month, day)?])
    }
}
