//! Prices the reference American call and put: S = K = 100, r = 5 %,
//! σ = 20 %, T = 1.

use lsmc_cli::{price_lines, run_pricing, AppConfig, MarketInputs};

fn main() {
    lsmc_cli::init_tracing();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    match run_pricing(&MarketInputs::reference(), &cfg) {
        Ok(quote) => print!("{}", price_lines(&quote)),
        Err(e) => {
            tracing::error!("pricing failed: {e}");
            std::process::exit(1);
        }
    }
}
