//! Ordinary least-squares fit of a straight line `y = intercept + slope·x`.
//!
//! Solved in closed form from the normal equations using the running sums
//! `Σx`, `Σy`, `Σxy` and `Σx²`:
//!
//! ```text
//! slope     = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! ```
//!
//! A zero denominator (all `x` identical) is not trapped: the coefficients
//! come out non-finite.

use lsmc_core::{
    errors::{Error, Result},
    Real,
};

/// Running sums for a simple linear regression.
///
/// Observations can be streamed in with [`add`](Self::add) so callers never
/// need to materialise the `x` and `y` vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalEquations {
    n: usize,
    sum_x: Real,
    sum_y: Real,
    sum_xy: Real,
    sum_x2: Real,
}

impl NormalEquations {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    #[inline]
    pub fn add(&mut self, x: Real, y: Real) {
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_x2 += x * x;
    }

    /// `n·Σx² − (Σx)²`; zero when every `x` is identical.
    pub fn denominator(&self) -> Real {
        let n = self.n as Real;
        n * self.sum_x2 - self.sum_x * self.sum_x
    }

    /// Solve for slope and intercept.
    ///
    /// # Errors
    /// Returns `InvalidArgument` with fewer than two observations.
    pub fn solve(&self) -> Result<LinearRegression> {
        if self.n < 2 {
            return Err(Error::InvalidArgument(format!(
                "a line fit needs at least 2 observations, got {}",
                self.n
            )));
        }
        let n = self.n as Real;
        let slope = (n * self.sum_xy - self.sum_x * self.sum_y) / self.denominator();
        let intercept = (self.sum_y - slope * self.sum_x) / n;
        Ok(LinearRegression {
            slope,
            intercept,
            observations: self.n,
        })
    }
}

/// A fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    /// Fitted slope.
    pub slope: Real,
    /// Fitted intercept.
    pub intercept: Real,
    /// Number of observations the fit was built from.
    pub observations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn solve(x: &[Real], y: &[Real]) -> Result<LinearRegression> {
        let mut eq = NormalEquations::new();
        for (&xi, &yi) in x.iter().zip(y) {
            eq.add(xi, yi);
        }
        eq.solve()
    }

    #[test]
    fn exact_line() {
        // y = 2 + 3x
        let x: Vec<Real> = (0..20).map(|i| i as Real).collect();
        let y: Vec<Real> = x.iter().map(|&xi| 2.0 + 3.0 * xi).collect();

        let reg = solve(&x, &y).unwrap();
        assert_relative_eq!(reg.intercept, 2.0, epsilon = 1e-10);
        assert_relative_eq!(reg.slope, 3.0, epsilon = 1e-10);
        assert_eq!(reg.observations, 20);
    }

    #[test]
    fn noisy_line() {
        // y ≈ 1 + 2x with small noise
        let x: Vec<Real> = (0..100).map(|i| i as Real * 0.1).collect();
        let noise = [
            0.01, -0.02, 0.015, -0.005, 0.03, -0.01, 0.02, -0.03, 0.005, 0.01,
        ];
        let y: Vec<Real> = x
            .iter()
            .enumerate()
            .map(|(i, &xi)| 1.0 + 2.0 * xi + noise[i % noise.len()])
            .collect();

        let reg = solve(&x, &y).unwrap();
        assert!((reg.intercept - 1.0).abs() < 0.1, "intercept = {}", reg.intercept);
        assert!((reg.slope - 2.0).abs() < 0.01, "slope = {}", reg.slope);
    }

    #[test]
    fn two_points_define_the_line() {
        let reg = solve(&[1.0, 3.0], &[5.0, 9.0]).unwrap();
        assert_relative_eq!(reg.slope, 2.0);
        assert_relative_eq!(reg.intercept, 3.0);
    }

    #[test]
    fn too_few_observations() {
        assert!(solve(&[1.0], &[2.0]).is_err());
        assert!(solve(&[], &[]).is_err());
    }

    #[test]
    fn identical_x_is_non_finite() {
        let mut eq = NormalEquations::new();
        for y in [1.0, 2.0, 3.0] {
            eq.add(4.0, y);
        }
        assert_eq!(eq.denominator(), 0.0);
        let reg = eq.solve().unwrap();
        assert!(reg.slope.is_nan());
        assert!(reg.intercept.is_nan());
    }

    proptest! {
        #[test]
        fn recovers_any_line(a in -50.0..50.0_f64, b in -5.0..5.0_f64) {
            let x: Vec<Real> = (0..25).map(|i| 80.0 + i as Real).collect();
            let y: Vec<Real> = x.iter().map(|&xi| a + b * xi).collect();
            let reg = solve(&x, &y).unwrap();
            prop_assert!((reg.slope - b).abs() < 1e-8);
            prop_assert!((reg.intercept - a).abs() < 1e-6);
        }
    }
}
