//! # lsmc-math
//!
//! Mathematical utilities: seedable Gaussian random draws, closed-form
//! least-squares line fitting, the normal distribution function (via statrs),
//! and Monte Carlo statistics accumulators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Ordinary least-squares fit of a straight line.
pub mod linear_regression;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::normal_cdf;
pub use linear_regression::{LinearRegression, NormalEquations};
pub use random_numbers::{derive_stream_seed, GaussianRng};
pub use statistics::IncrementalStatistics;
