//! Lunar calendar dates projected onto a Gregorian year.

use hl_core::errors::Result;
use hl_time::Date;

use super::{wrong_kind, CalcContext, Calculator};
use crate::rule::{HolidayRule, LunarRule, RuleKind, RuleType};

/// Calculator for [`LunarRule`].
///
/// Yields every date in the Gregorian year on which the lunar month and day
/// fall: none, one, or (for the Islamic calendar) occasionally two. Lunar
/// years lacking that day contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarCalculator;

impl Calculator for LunarCalculator {
    fn rule_type(&self) -> RuleType {
        RuleType::Lunar
    }

    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        let RuleKind::Lunar(LunarRule {
            calendar,
            month,
            day,
        }) = *rule.kind()
        else {
            return Err(wrong_kind(RuleType::Lunar, rule));
        };
        hl_core::ensure_rule!(
            rule.id(),
            month >= 1 && month <= calendar.max_month(),
            "{calendar} month {month} out of range"
        );
        calendar.dates_in_gregorian_year(month, day, ctx.year)
    }
}
