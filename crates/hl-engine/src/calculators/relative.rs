//! Offsets from another rule's dates.

use hl_core::errors::Result;
use hl_time::Date;

use super::{sorted, wrong_kind, CalcContext, Calculator};
use crate::rule::{HolidayRule, RelativeRule, RuleKind, RuleType};

/// Calculator for [`RelativeRule`].
///
/// The target's nominal dates for the same year come from the context's
/// resolver; each is shifted by the rule's offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeCalculator;

impl Calculator for RelativeCalculator {
    fn rule_type(&self) -> RuleType {
        RuleType::Relative
    }

    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        let RuleKind::Relative(RelativeRule {
            relative_to,
            offset_days,
        }) = rule.kind()
        else {
            return Err(wrong_kind(RuleType::Relative, rule));
        };
        let targets = ctx.resolver.resolve(rule.id(), relative_to)?;
        let dates = targets
            .into_iter()
            .map(|d| d.add_days(*offset_days))
            .collect::<Result<Vec<_>>>()?;
        Ok(sorted(dates))
    }
}
