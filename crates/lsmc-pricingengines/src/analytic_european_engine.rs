//! Analytic European option engine (Black-Scholes).
//!
//! Used as the reference the Monte Carlo European value and the American
//! early-exercise premium are checked against.

use lsmc_core::{errors::Result, Price, Rate, Real, Time, Volatility};
use lsmc_instruments::{
    ExerciseType, OptionType, PricingEngine, PricingResults, VanillaOptionArguments,
};
use lsmc_math::distributions::normal_cdf;

/// Analytic pricing engine for European vanilla options on a
/// non-dividend-paying underlying with flat rate and volatility.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticEuropeanEngine {
    spot: Price,
    rate: Rate,
    volatility: Volatility,
}

impl AnalyticEuropeanEngine {
    /// Create a new engine for the given market.
    pub fn new(spot: Price, rate: Rate, volatility: Volatility) -> Self {
        Self {
            spot,
            rate,
            volatility,
        }
    }
}

/// Black-Scholes price of a European option.
///
/// At or past expiry the intrinsic value is returned. With zero volatility
/// the option is worth its discounted forward intrinsic value.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let std_dev = volatility * t.sqrt();
    let df = (-rate * t).exp();

    if std_dev <= 1e-15 {
        return (phi * (spot - strike * df)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * t) / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}

impl PricingEngine<VanillaOptionArguments> for AnalyticEuropeanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        lsmc_core::ensure!(
            args.exercise == ExerciseType::European,
            "analytic engine prices European exercise only"
        );
        let price = black_scholes_price(
            args.payoff.option_type,
            self.spot,
            args.payoff.strike,
            self.rate,
            self.volatility,
            args.maturity,
        );
        Ok(PricingResults::from_npv(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lsmc_instruments::VanillaOption;

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let price = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
        assert!((price - 10.4506).abs() < 1e-3, "price = {price}");
    }

    #[test]
    fn bs_put_price() {
        let price = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.05, 0.20, 1.0);
        assert!((price - 5.5735).abs() < 1e-3, "price = {price}");
    }

    #[test]
    fn put_call_parity() {
        let (s, k, r, v, t) = (95.0, 105.0, 0.03, 0.35, 0.75);
        let c = black_scholes_price(OptionType::Call, s, k, r, v, t);
        let p = black_scholes_price(OptionType::Put, s, k, r, v, t);
        assert_relative_eq!(c - p, s - k * (-r * t).exp(), epsilon = 1e-10);
    }

    #[test]
    fn expired_and_zero_vol() {
        assert_eq!(black_scholes_price(OptionType::Put, 90.0, 100.0, 0.05, 0.2, 0.0), 10.0);
        let c = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 1.0);
        assert_relative_eq!(c, 100.0 - 100.0 * (-0.05_f64).exp(), epsilon = 1e-12);
        assert_eq!(black_scholes_price(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 1.0), 0.0);
    }

    #[test]
    fn engine_rejects_american_exercise() {
        let engine = AnalyticEuropeanEngine::new(100.0, 0.05, 0.2);
        let european = VanillaOption::european(OptionType::Call, 100.0, 1.0).unwrap();
        let american = VanillaOption::american(OptionType::Call, 100.0, 1.0).unwrap();
        assert!((european.price(&engine).unwrap().npv - 10.4506).abs() < 1e-3);
        assert!(american.price(&engine).is_err());
    }
}
