//! User-supplied date functions.

use hl_core::errors::{Error, Result};
use hl_time::Date;

use super::{sorted, wrong_kind, CalcContext, Calculator};
use crate::rule::{HolidayRule, RuleKind, RuleType};

/// Calculator for [`CustomRule`](crate::rule::CustomRule).
///
/// The function's error is wrapped in [`Error::Custom`] with the original
/// kept as its source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomCalculator;

impl Calculator for CustomCalculator {
    fn rule_type(&self) -> RuleType {
        RuleType::Custom
    }

    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        let RuleKind::Custom(custom) = rule.kind() else {
            return Err(wrong_kind(RuleType::Custom, rule));
        };
        let dates = custom
            .compute(ctx.year)
            .map_err(|e| Error::custom(rule.id(), e))?;
        Ok(sorted(dates))
    }
}
