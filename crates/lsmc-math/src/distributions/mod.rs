//! Normal distribution functions, backed by `statrs`.

use lsmc_core::Real;
use statrs::distribution::{ContinuousCDF, Normal};
use std::sync::OnceLock;

fn standard_normal() -> &'static Normal {
    static STANDARD: OnceLock<Normal> = OnceLock::new();
    STANDARD.get_or_init(Normal::standard)
}

/// The standard normal cumulative distribution function Φ(x).
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    standard_normal().cdf(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cdf_reference_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(normal_cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(-1.0), 0.158_655_253_931_457, epsilon = 1e-12);
    }

    #[test]
    fn cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7] {
            assert_relative_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }
}
