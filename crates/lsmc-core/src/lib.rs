//! # lsmc-core
//!
//! Core types, error definitions, and small conversion utilities for lsmc-rs.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – the primitive type aliases, the error
//! hierarchy with its `ensure!` macro, and the year-month expiry
//! representation used by the command-line front end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// String parsers for market inputs.
pub mod utilities;

/// Calendar year-month pairs and year-fraction conversion.
pub mod year_month;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use year_month::{time_to_maturity, YearMonth};
