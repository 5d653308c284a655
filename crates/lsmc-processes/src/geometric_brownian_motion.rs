//! Geometric Brownian motion.
//!
//! ```text
//! dS/S = μ dt + σ dW
//! ```
//!
//! Under the risk-neutral measure `μ = r`. Paths are advanced with the
//! exact lognormal transition, so the step size introduces no
//! discretisation bias.

use crate::stochastic_process::StochasticProcess1D;
use lsmc_core::{ensure, errors::Result, Rate, Real, Time, Volatility};

/// Geometric Brownian motion with constant drift and volatility.
///
/// `dS = μ·S·dt + σ·S·dW`
///
/// Closed-form solution: `S(t) = S₀ exp((μ − σ²/2)t + σW(t))`
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricBrownianMotionProcess {
    x0: Real,
    mu: Real,
    sigma: Volatility,
}

impl GeometricBrownianMotionProcess {
    /// Create a new GBM process.
    ///
    /// # Arguments
    /// * `x0`: initial asset price
    /// * `mu`: drift (growth rate)
    /// * `sigma`: volatility (must be ≥ 0)
    ///
    /// The initial price is not range-checked: non-positive or non-finite
    /// values propagate through the simulated paths.
    pub fn new(x0: Real, mu: Real, sigma: Volatility) -> Result<Self> {
        ensure!(sigma >= 0.0, "volatility must be non-negative, got {sigma}");
        Ok(Self { x0, mu, sigma })
    }

    /// Risk-neutral GBM, drifting at the risk-free rate.
    pub fn risk_neutral(spot: Real, rate: Rate, sigma: Volatility) -> Result<Self> {
        Self::new(spot, rate, sigma)
    }
}

impl StochasticProcess1D for GeometricBrownianMotionProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    /// Exact lognormal step:
    /// `x · exp((μ − σ²/2)·dt + σ·√dt·dw)`.
    #[inline]
    fn evolve_1d(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        x * ((self.mu - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * dw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lsmc_math::GaussianRng;
    use proptest::prelude::*;

    #[test]
    fn gbm_starts_at_spot() {
        let p = GeometricBrownianMotionProcess::risk_neutral(42.5, 0.05, 0.2).unwrap();
        assert_eq!(p.x0(), 42.5);
    }

    #[test]
    fn gbm_zero_noise_step() {
        let p = GeometricBrownianMotionProcess::new(100.0, 0.05, 0.2).unwrap();
        let x_new = p.evolve_1d(0.0, 100.0, 1.0, 0.0);
        let expected = 100.0 * (0.05_f64 - 0.02).exp();
        assert_relative_eq!(x_new, expected, epsilon = 1e-10);
    }

    #[test]
    fn gbm_zero_vol_is_deterministic_growth() {
        let p = GeometricBrownianMotionProcess::risk_neutral(100.0, 0.05, 0.0).unwrap();
        let x = p.evolve_1d(0.0, 100.0, 0.5, 2.5);
        assert_relative_eq!(x, 100.0 * (0.025_f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn gbm_rejects_negative_vol() {
        assert!(GeometricBrownianMotionProcess::new(100.0, 0.05, -0.1).is_err());
    }

    #[test]
    fn gbm_exact_step_is_unbiased_over_one_large_step() {
        // E[S_T] = S_0 e^{μT} regardless of the number of steps.
        let p = GeometricBrownianMotionProcess::risk_neutral(100.0, 0.05, 0.2).unwrap();
        let mut rng = GaussianRng::standard(2024);
        let n = 200_000;
        let mean = (0..n)
            .map(|_| p.evolve_1d(0.0, 100.0, 1.0, rng.next_real()))
            .sum::<Real>()
            / n as Real;
        let expected = 100.0 * 0.05_f64.exp();
        assert!((mean - expected).abs() < 0.15, "mean {mean}, expected {expected}");
    }

    proptest! {
        #[test]
        fn exact_step_stays_positive(
            x in 0.01..1_000.0_f64,
            sigma in 0.0..1.5_f64,
            dt in 0.001..2.0_f64,
            dw in -8.0..8.0_f64,
        ) {
            let p = GeometricBrownianMotionProcess::risk_neutral(x, 0.05, sigma).unwrap();
            let next = p.evolve_1d(0.0, x, dt, dw);
            prop_assert!(next.is_finite() && next > 0.0);
        }
    }
}
