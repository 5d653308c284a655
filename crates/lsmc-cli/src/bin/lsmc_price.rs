//! `lsmc-price SPOT STRIKE VOLATILITY RATE YYYY-MM`
//!
//! Prints the American call and put prices on stdout.

use lsmc_cli::{price_lines, run_pricing, AppConfig, MarketInputs, USAGE};

fn main() {
    lsmc_cli::init_tracing();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let market = match MarketInputs::from_args(&args, &cfg.reference_date) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    match run_pricing(&market, &cfg) {
        Ok(quote) => print!("{}", price_lines(&quote)),
        Err(e) => {
            tracing::error!("pricing failed: {e}");
            std::process::exit(1);
        }
    }
}
