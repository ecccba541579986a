//! # hl-core
//!
//! Core types and error definitions for holidaylib.
//!
//! This crate provides the foundational building blocks shared across the
//! other crates in the workspace: the error hierarchy, the `ensure!` family of
//! macros, and the [`EngineSettings`] configuration value.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_rule!` macros.
pub mod errors;

/// Engine settings (cutover year, search bound, cache capacities).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Gregorian calendar year.
pub type Year = i32;

/// Julian Day Number: continuous integer day count.
pub type DayNumber = i32;

/// Signed number of calendar days.
pub type DayOffset = i32;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{BoxError, Error, Result};
pub use settings::EngineSettings;
