//! # lsmc-pricingengines
//!
//! Pricing engines for vanilla options.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`]: Black-Scholes closed form for European options
//! - [`McAmericanEngine`]: Longstaff-Schwartz least-squares Monte Carlo

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod mc_american_engine;

pub use analytic_european_engine::{black_scholes_price, AnalyticEuropeanEngine};
pub use mc_american_engine::McAmericanEngine;
