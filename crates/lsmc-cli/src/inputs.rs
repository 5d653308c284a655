//! Market inputs from positional command-line arguments.
//!
//! Conversion is lenient: a field that does not parse becomes `0.0` and a
//! warning is logged. Only the argument count is checked.

use lsmc_core::errors::{Error, Result};
use lsmc_core::utilities::parse_real;
use lsmc_core::{time_to_maturity, Price, Rate, Time, Volatility, YearMonth};
use tracing::warn;

/// Usage line printed on a wrong argument count.
pub const USAGE: &str = "usage: lsmc-price <spot> <strike> <volatility> <rate> <expiry YYYY-MM>";

/// Inputs of one call/put pricing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketInputs {
    /// Current underlying price.
    pub spot: Price,
    /// Strike.
    pub strike: Price,
    /// Volatility.
    pub volatility: Volatility,
    /// Risk-free rate.
    pub rate: Rate,
    /// Time to maturity in years.
    pub maturity: Time,
}

impl MarketInputs {
    /// S = K = 100, σ = 20 %, r = 5 %, T = 1.
    pub fn reference() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            volatility: 0.2,
            rate: 0.05,
            maturity: 1.0,
        }
    }

    /// Convert `spot strike volatility rate expiry`, the program name
    /// already stripped.
    ///
    /// # Errors
    /// `InvalidArgument` unless exactly five arguments are given.
    pub fn from_args<S: AsRef<str>>(args: &[S], reference: &YearMonth) -> Result<Self> {
        let [spot, strike, volatility, rate, expiry] = args else {
            return Err(Error::InvalidArgument(format!(
                "expected 5 arguments, got {}",
                args.len()
            )));
        };
        Ok(Self {
            spot: real_or_zero("spot", spot.as_ref()),
            strike: real_or_zero("strike", strike.as_ref()),
            volatility: real_or_zero("volatility", volatility.as_ref()),
            rate: real_or_zero("rate", rate.as_ref()),
            maturity: maturity_or_zero(expiry.as_ref(), reference),
        })
    }
}

fn real_or_zero(field: &str, s: &str) -> f64 {
    parse_real(s).unwrap_or_else(|| {
        warn!(field, value = s, "not a number, using 0");
        0.0
    })
}

fn maturity_or_zero(s: &str, reference: &YearMonth) -> Time {
    match s.parse::<YearMonth>() {
        Ok(expiry) => time_to_maturity(reference, &expiry),
        Err(e) => {
            warn!(value = s, error = %e, "unreadable expiry, using maturity 0");
            0.0
        }
    }
}
