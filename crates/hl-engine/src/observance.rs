//! Observed-date adjustment.
//!
//! An [`ObservanceRule`] turns the nominal date of a holiday into the date on
//! which it is actually kept:
//!
//! * [`ObservancePolicy::Substitute`]: a holiday on a weekend day moves to the
//!   first working day in the configured [`Direction`].
//! * [`ObservancePolicy::NearestWeekday`]: the same search, defaulting to
//!   [`Direction::Nearest`] (Saturday → Friday, Sunday → Monday).
//! * [`ObservancePolicy::Bridge`]: the holiday stays put and an extra bridge
//!   day is marked, chosen by the rule's [`BridgeMode`].
//!
//! With [`Direction::Nearest`] the closer working day wins and ties go
//! backward. A rule without an explicit direction uses its policy's default
//! (see [`ObservanceRule::direction`]).

use std::fmt;

use hl_core::errors::Result;
use hl_core::{ensure, DayOffset};
use hl_time::{Date, Weekday};
use serde::{Deserialize, Serialize};

/// How a holiday's observed date is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservancePolicy {
    /// Move off the weekend.
    Substitute,
    /// Keep the date and mark a bridge day.
    Bridge,
    /// Move to the nearest working day.
    NearestWeekday,
}

/// Which way to search for a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Later dates.
    #[default]
    Forward,
    /// Earlier dates.
    Backward,
    /// Whichever is closer; backward on ties.
    Nearest,
}

/// Which working day a [`ObservancePolicy::Bridge`] rule marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeMode {
    /// A holiday on a weekend day bridges to the first working day in the
    /// rule's direction (Saturday holiday → Monday off).
    #[default]
    WeekendAdjacent,
    /// A holiday on a working day that is one working day away from the
    /// weekend bridges that gap (Tuesday holiday → Monday off).
    GapDay,
}

// ── WeekendDays ───────────────────────────────────────────────────────────────

/// A set of weekdays, stored as a bitmask indexed by [`Weekday::index`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekendDays(u8);

impl WeekendDays {
    /// Saturday and Sunday.
    pub const SATURDAY_SUNDAY: WeekendDays = WeekendDays(0b100_0001);

    /// Friday and Saturday.
    pub const FRIDAY_SATURDAY: WeekendDays = WeekendDays(0b110_0000);

    /// No weekend at all.
    pub const NONE: WeekendDays = WeekendDays(0);

    /// Build from any collection of weekdays.
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter()
            .fold(Self::NONE, |acc, d| WeekendDays(acc.0 | 1 << d.index()))
    }

    /// Whether `day` is a weekend day.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    /// Whether `date` falls on a weekend day.
    pub fn is_weekend(&self, date: Date) -> bool {
        self.contains(date.weekday())
    }

    /// Whether at least one day of the week is a working day.
    pub fn has_working_day(&self) -> bool {
        self.0 & 0x7f != 0x7f
    }

    /// The weekend days, Sunday first.
    pub fn days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|d| self.contains(*d))
            .collect()
    }
}

impl Default for WeekendDays {
    fn default() -> Self {
        Self::SATURDAY_SUNDAY
    }
}

impl From<Vec<Weekday>> for WeekendDays {
    fn from(days: Vec<Weekday>) -> Self {
        Self::from_days(days)
    }
}

impl From<WeekendDays> for Vec<Weekday> {
    fn from(days: WeekendDays) -> Self {
        days.days()
    }
}

impl fmt::Debug for WeekendDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.days()).finish()
    }
}

// ── ObservanceRule ────────────────────────────────────────────────────────────

/// Result of adjusting one nominal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observed {
    /// The date the holiday is kept on.
    pub date: Date,
    /// Extra day off, for bridge policies.
    pub bridge: Option<Date>,
    /// `true` if the date moved or a bridge day was added.
    pub is_observed: bool,
}

impl Observed {
    fn unchanged(date: Date) -> Self {
        Self {
            date,
            bridge: None,
            is_observed: false,
        }
    }
}

/// Weekend handling attached to a holiday rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservanceRule {
    /// Adjustment policy.
    pub policy: ObservancePolicy,
    /// Days that count as weekend.
    #[serde(default)]
    pub weekend: WeekendDays,
    /// Search direction; `None` means the policy's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Bridge-day selection; only read by [`ObservancePolicy::Bridge`].
    #[serde(default)]
    pub bridge_mode: BridgeMode,
}

impl ObservanceRule {
    /// A rule with the given policy, a Saturday/Sunday weekend, and the
    /// policy's default direction.
    pub fn new(policy: ObservancePolicy) -> Self {
        Self {
            policy,
            weekend: WeekendDays::default(),
            direction: None,
            bridge_mode: BridgeMode::default(),
        }
    }

    /// Weekend holidays move forward to the next working day.
    pub fn substitute() -> Self {
        Self::new(ObservancePolicy::Substitute)
    }

    /// Weekend holidays move to the closer working day.
    pub fn nearest_weekday() -> Self {
        Self::new(ObservancePolicy::NearestWeekday)
    }

    /// Mark a bridge day chosen by `mode`.
    pub fn bridge(mode: BridgeMode) -> Self {
        Self {
            bridge_mode: mode,
            ..Self::new(ObservancePolicy::Bridge)
        }
    }

    /// Set the weekend days.
    pub fn with_weekend(mut self, weekend: WeekendDays) -> Self {
        self.weekend = weekend;
        self
    }

    /// Set the search direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// The direction in effect: the configured one, else
    /// [`Direction::Nearest`] for nearest-weekday rules and
    /// [`Direction::Forward`] for the others.
    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or(match self.policy {
            ObservancePolicy::NearestWeekday => Direction::Nearest,
            ObservancePolicy::Substitute | ObservancePolicy::Bridge => Direction::Forward,
        })
    }

    /// Adjust a nominal date.
    ///
    /// # Errors
    /// Fails if the weekend covers the whole week, or if the search leaves
    /// the supported date range.
    pub fn adjust(&self, nominal: Date) -> Result<Observed> {
        ensure!(
            self.weekend.has_working_day(),
            "weekend {:?} leaves no working day",
            self.weekend
        );
        match self.policy {
            ObservancePolicy::Substitute | ObservancePolicy::NearestWeekday => {
                if !self.weekend.is_weekend(nominal) {
                    return Ok(Observed::unchanged(nominal));
                }
                let date = self.working_day(nominal, self.direction())?;
                Ok(Observed {
                    date,
                    bridge: None,
                    is_observed: true,
                })
            }
            ObservancePolicy::Bridge => {
                let bridge = match self.bridge_mode {
                    BridgeMode::WeekendAdjacent if self.weekend.is_weekend(nominal) => {
                        Some(self.working_day(nominal, self.direction())?)
                    }
                    BridgeMode::WeekendAdjacent => None,
                    BridgeMode::GapDay => self.gap_day(nominal)?,
                };
                Ok(Observed {
                    date: nominal,
                    bridge,
                    is_observed: bridge.is_some(),
                })
            }
        }
    }

    /// First working day strictly after (or before) `from`.
    fn step_to_working_day(&self, from: Date, step: DayOffset) -> Result<Date> {
        let mut date = from.add_days(step)?;
        while self.weekend.is_weekend(date) {
            date = date.add_days(step)?;
        }
        Ok(date)
    }

    fn working_day(&self, from: Date, direction: Direction) -> Result<Date> {
        match direction {
            Direction::Forward => self.step_to_working_day(from, 1),
            Direction::Backward => self.step_to_working_day(from, -1),
            Direction::Nearest => {
                let after = self.step_to_working_day(from, 1);
                let before = self.step_to_working_day(from, -1);
                match (before, after) {
                    (Ok(b), Ok(a)) if from - b <= a - from => Ok(b),
                    (_, Ok(a)) => Ok(a),
                    (before, Err(e)) => before.map_err(|_| e),
                }
            }
        }
    }

    /// The single working day between a working-day holiday and the weekend.
    fn gap_day(&self, nominal: Date) -> Result<Option<Date>> {
        if self.weekend.is_weekend(nominal) {
            return Ok(None);
        }
        let sides: &[DayOffset] = match self.direction() {
            Direction::Forward => &[1],
            Direction::Backward => &[-1],
            Direction::Nearest => &[-1, 1],
        };
        for &step in sides {
            let Ok(gap) = nominal.add_days(step) else {
                continue;
            };
            let Ok(beyond) = gap.add_days(step) else {
                continue;
            };
            if !self.weekend.is_weekend(gap) && self.weekend.is_weekend(beyond) {
                return Ok(Some(gap));
            }
        }
        Ok(None)
    }
}
