//! Error types for holidaylib.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single `thiserror`-derived [`Error`] enum below. Rule failures
//! always carry the id of the offending rule so that callers can report which
//! declaration is broken.

use std::sync::Arc;

use thiserror::Error;

/// Boxed error returned by user-supplied custom rule functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The top-level error type used throughout holidaylib.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// Malformed rule payload (month out of 1–12, nth out of range, …).
    #[error("invalid rule `{rule_id}`: {reason}")]
    InvalidRule {
        /// Id of the rule that failed validation.
        rule_id: String,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// A relative rule points at an id that is not in the rule set.
    #[error("rule `{rule_id}` is relative to unknown holiday `{target}`")]
    UnresolvableReference {
        /// Id of the relative rule.
        rule_id: String,
        /// The id it refers to.
        target: String,
    },

    /// Relative rules form a cycle. The first and last ids are equal.
    #[error("circular holiday dependency: {}", .cycle.join(" -> "))]
    CircularDependency {
        /// The rule ids on the cycle, in resolution order.
        cycle: Vec<String>,
    },

    /// A bounded search ran out of years before finding a match.
    #[error("no holiday found within {years} years starting from {start_year}")]
    CalculationOverflow {
        /// Year the search started from.
        start_year: i32,
        /// Number of years scanned.
        years: u32,
    },

    /// A custom rule function failed. The original error is kept as the source.
    #[error("custom rule `{rule_id}` failed: {source}")]
    Custom {
        /// Id of the custom rule.
        rule_id: String,
        /// The error raised by the user function.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Date construction or arithmetic left the supported range.
    #[error("date error: {0}")]
    Date(String),

    /// A calendar converter was asked for a year outside its coverage.
    #[error("{calendar} calendar does not cover year {year}")]
    UnsupportedYear {
        /// Name of the calendar system.
        calendar: &'static str,
        /// The requested year, in that calendar's numbering.
        year: i32,
    },

    /// A rule id was not found in the rule set.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),
}

impl Error {
    /// Build an [`Error::InvalidRule`].
    pub fn invalid_rule(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRule {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Wrap the error raised by a custom rule function.
    pub fn custom(rule_id: impl Into<String>, source: BoxError) -> Self {
        Error::Custom {
            rule_id: rule_id.into(),
            source: Arc::from(source),
        }
    }

    /// Rule ids this error is about, if any.
    pub fn rule_ids(&self) -> Vec<&str> {
        match self {
            Error::InvalidRule { rule_id, .. }
            | Error::Custom { rule_id, .. }
            | Error::UnknownRule(rule_id) => vec![rule_id.as_str()],
            Error::UnresolvableReference { rule_id, target } => {
                vec![rule_id.as_str(), target.as_str()]
            }
            Error::CircularDependency { cycle } => {
                let mut ids: Vec<&str> = cycle.iter().map(String::as_str).collect();
                // the closing id repeats the first one
                if ids.len() > 1 && ids.first() == ids.last() {
                    ids.pop();
                }
                ids
            }
            _ => Vec::new(),
        }
    }
}

/// Shorthand `Result` type used throughout holidaylib.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hl_core::{ensure, errors::Error};
/// fn positive(x: i32) -> hl_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::InvalidRule { .. })` for rule `$id` if `$cond` is false.
///
/// # Example
/// ```
/// use hl_core::{ensure_rule, errors::Error};
/// fn check_month(id: &str, month: u8) -> hl_core::errors::Result<()> {
///     ensure_rule!(id, (1..=12).contains(&month), "month {month} out of range [1, 12]");
///     Ok(())
/// }
/// assert!(check_month("x", 12).is_ok());
/// assert!(matches!(check_month("x", 13), Err(Error::InvalidRule { .. })));
/// ```
#[macro_export]
macro_rules! ensure_rule {
    ($id:expr, $cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::invalid_rule(
                $id,
                format!($($msg)*),
            ));
        }
    };
}
