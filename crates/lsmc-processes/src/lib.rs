//! # lsmc-processes
//!
//! Stochastic processes driving the simulated underlying.
//!
//! The pricer needs a single one: geometric Brownian motion under the
//! risk-neutral measure, stepped with its exact lognormal transition.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod geometric_brownian_motion;
pub mod stochastic_process;

pub use geometric_brownian_motion::GeometricBrownianMotionProcess;
pub use stochastic_process::StochasticProcess1D;
