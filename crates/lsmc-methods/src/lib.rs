//! # lsmc-methods
//!
//! Monte Carlo simulation framework and the Longstaff-Schwartz
//! least-squares backward induction for early exercise.
//!
//! # Modules
//!
//! * [`monte_carlo`]: time grid, path generation (sequential and
//!   parallel), price and payoff matrices
//! * [`monte_carlo::longstaff_schwartz`]: continuation-value regression,
//!   exercise decisions, and price aggregation

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: paths, payoffs, and least-squares exercise.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::longstaff_schwartz::{
    ContinuationModel, ContinuationRule, Discounting, ExerciseStep, LongstaffSchwartz,
    LsmcOutcome, SimulationParameters,
};
pub use monte_carlo::{PathGenerator, PathMatrix, PayoffMatrix, TimeGrid};
