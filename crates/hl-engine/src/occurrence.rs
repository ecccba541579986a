//! Computed holiday occurrences.

use std::fmt;

use hl_time::Date;

/// One concrete holiday produced by evaluating a rule for a year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HolidayOccurrence {
    /// Id of the rule that produced it.
    pub rule_id: String,
    /// Display name of that rule.
    pub name: String,
    /// Nominal date.
    pub date: Date,
    /// Observed date, when it differs from the nominal one.
    pub observed_date: Option<Date>,
    /// `true` if the observance rule moved the date or added a bridge day.
    pub is_observed: bool,
    /// Number of consecutive days covered, starting at the nominal date.
    pub duration: u16,
    /// Extra bridge day off, if any.
    pub bridge_date: Option<Date>,
}

impl HolidayOccurrence {
    /// The date the holiday is kept on: observed if present, else nominal.
    pub fn effective_date(&self) -> Date {
        self.observed_date.unwrap_or(self.date)
    }

    /// Last day of the nominal span.
    pub fn end_date(&self) -> Date {
        span_end(self.date, self.duration)
    }

    /// Whether `date` is a day off because of this occurrence: inside the
    /// nominal span, inside the observed span, or the bridge day.
    pub fn covers(&self, date: Date) -> bool {
        let in_span = |start: Date| start <= date && date <= span_end(start, self.duration);
        in_span(self.date)
            || self.observed_date.is_some_and(in_span)
            || self.bridge_date == Some(date)
    }
}

fn span_end(start: Date, duration: u16) -> Date {
    start
        .add_days(i32::from(duration.max(1)) - 1)
        .unwrap_or(Date::MAX)
}

impl fmt::Display for HolidayOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date)?;
        if let Some(observed) = self.observed_date {
            write!(f, ", observed {observed}")?;
        }
        if let Some(bridge) = self.bridge_date {
            write!(f, ", bridge {bridge}")?;
        }
        Ok(())
    }
}
