//! # lsmc-cli
//!
//! Glue between the command line and the pricing engines: environment
//! configuration, lenient argument conversion, and the two output lines.
//!
//! Binaries:
//!
//! - `lsmc-price SPOT STRIKE VOLATILITY RATE YYYY-MM`
//! - `lsmc-demo` (S = K = 100, r = 5 %, σ = 20 %, T = 1)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod inputs;
pub mod report;

pub use config::AppConfig;
pub use inputs::{MarketInputs, USAGE};
pub use report::{format_general, price_lines};

use lsmc_core::errors::Result;
use lsmc_instruments::{OptionType, PricingResults, VanillaOption};
use lsmc_math::derive_stream_seed;
use tracing::info;

/// American call and put prices for one set of market inputs.
#[derive(Debug, Clone)]
pub struct Quote {
    /// Call results.
    pub call: PricingResults,
    /// Put results.
    pub put: PricingResults,
}

/// Price the American call and put described by `market`.
///
/// The two runs are independent. With a configured seed each run draws
/// from its own stream derived from it.
pub fn run_pricing(market: &MarketInputs, cfg: &AppConfig) -> Result<Quote> {
    info!(
        spot = market.spot,
        strike = market.strike,
        volatility = market.volatility,
        rate = market.rate,
        maturity = market.maturity,
        paths = cfg.paths,
        steps = cfg.steps,
        "pricing american call and put"
    );
    let price = |option_type: OptionType, stream: u64| -> Result<PricingResults> {
        let mut engine = cfg.engine(market.spot, market.rate, market.volatility);
        if let Some(seed) = cfg.seed {
            engine = engine.with_seed(derive_stream_seed(seed, stream));
        }
        VanillaOption::american(option_type, market.strike, market.maturity)?.price(&engine)
    };
    Ok(Quote {
        call: price(OptionType::Call, 0)?,
        put: price(OptionType::Put, 1)?,
    })
}

/// Install the stderr `tracing` subscriber, filtered by `RUST_LOG`
/// (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
