//! Incremental statistics accumulator for Monte Carlo estimates.

use lsmc_core::Real;

/// Accumulates samples and reports their mean, variance and the standard
/// error of the mean.
#[derive(Debug, Clone, Default)]
pub struct IncrementalStatistics {
    count: usize,
    sum_x: Real,
    sum_x2: Real,
}

impl IncrementalStatistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum_x += x;
        self.sum_x2 += x * x;
    }

    /// Add every sample of an iterator.
    pub fn add_all<I: IntoIterator<Item = Real>>(&mut self, samples: I) {
        for x in samples {
            self.add(x);
        }
    }

    /// Arithmetic mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_x / self.count as Real)
        }
    }

    /// Unbiased (Bessel-corrected) variance.  Returns `None` for fewer
    /// than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum_x / n;
        let s2 = (self.sum_x2 / n - m * m).max(0.0);
        Some(s2 * n / (n - 1.0))
    }

    /// Standard error of the mean, `σ / √n`.  Returns `None` for fewer
    /// than 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.variance()
            .map(|v| (v / self.count as Real).sqrt())
    }
}
