//! # lsmc
//!
//! American option pricing by least-squares Monte Carlo (Longstaff-Schwartz).
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `lsmc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use lsmc::instruments::{OptionType, VanillaOption};
//! use lsmc::pricingengines::McAmericanEngine;
//!
//! let engine = McAmericanEngine::new(100.0, 0.05, 0.2)
//!     .with_paths(2_000)
//!     .with_steps(20)
//!     .with_seed(7);
//! let put = VanillaOption::american(OptionType::Put, 100.0, 1.0).unwrap();
//! let npv = put.price(&engine).unwrap().npv;
//! assert!(npv > 0.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use lsmc_core as core;

/// Normal distribution, regression, random numbers, statistics.
pub use lsmc_math as math;

/// Stochastic process definitions.
pub use lsmc_processes as processes;

/// Options, payoffs, and the pricing-engine interface.
pub use lsmc_instruments as instruments;

/// Monte Carlo paths and Longstaff-Schwartz backward induction.
pub use lsmc_methods as methods;

/// Analytic and Monte Carlo pricing engines.
pub use lsmc_pricingengines as pricingengines;
