//! `StochasticProcess1D`: base trait for one-factor processes.
//!
//! The path generator only needs the starting value and a one-step
//! transition driven by a standard-normal draw.

use lsmc_core::{Real, Time};

/// A 1-dimensional stochastic process that can be stepped forward in time.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Advance the state `x` at time `t` by `dt` given a standard-normal
    /// draw `dw`.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real;
}
