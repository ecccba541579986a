//! Offsets from Easter Sunday.

use hl_core::errors::Result;
use hl_time::{easter_sunday, Date};

use super::{wrong_kind, CalcContext, Calculator};
use crate::rule::{EasterRule, HolidayRule, RuleKind, RuleType};

/// Calculator for [`EasterRule`].
///
/// Western Easter uses the Julian computus before the configured cutover
/// year. Orthodox Easter always does.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasterCalculator;

impl Calculator for EasterCalculator {
    fn rule_type(&self) -> RuleType {
        RuleType::EasterBased
    }

    fn calculate(&self, rule: &HolidayRule, ctx: &mut CalcContext<'_>) -> Result<Vec<Date>> {
        let RuleKind::EasterBased(EasterRule { offset_days, style }) = *rule.kind() else {
            return Err(wrong_kind(RuleType::EasterBased, rule));
        };
        let easter = easter_sunday(ctx.year, style, ctx.settings.gregorian_cutover_year)?;
        Ok(vec![easter.add_days(offset_days)?])
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{date, run};
    use super::*;
    use hl_time::easter::offsets;
    use hl_time::EasterStyle;

    #[test]
    fn easter_2024() {
        let rule = HolidayRule::easter("easter", "Easter Sunday", offsets::EASTER_SUNDAY);
        assert_eq!(run(&rule, 2024).unwrap(), vec![date(2024, 3, 31)]);
    }

    #[test]
    fn derived_feasts_are_offsets() {
        let good_friday = HolidayRule::easter("gf", "Good Friday", offsets::GOOD_FRIDAY);
        let ash = HolidayRule::easter("ash", "Ash Wednesday", offsets::ASH_WEDNESDAY);
        let pentecost = HolidayRule::easter("pent", "Pentecost", offsets::PENTECOST);
        assert_eq!(run(&good_friday, 2024).unwrap(), vec![date(2024, 3, 29)]);
        assert_eq!(run(&ash, 2024).unwrap(), vec![date(2024, 2, 14)]);
        assert_eq!(run(&pentecost, 2024).unwrap(), vec![date(2024, 5, 19)]);
    }

    #[test]
    fn julian_era_year_is_march_or_april() {
        let rule = HolidayRule::easter("easter", "Easter Sunday", 0);
        let dates = run(&rule, 1500).unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].year(), 1500);
        assert!(matches!(dates[0].month(), 3 | 4));
    }

    #[test]
    fn orthodox_style() {
        let rule = HolidayRule::easter_with_style("pascha", "Pascha", 0, EasterStyle::Orthodox);
        assert_eq!(run(&rule, 2024).unwrap(), vec![date(2024, 5, 5)]);
    }
}
