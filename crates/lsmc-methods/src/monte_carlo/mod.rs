//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`TimeGrid`]: uniform grid of `steps + 1` time points on `[0, T]`
//! * [`PathGenerator`]: generates sample paths of a 1-D process from an
//!   explicit, caller-owned draw source
//! * [`PathMatrix`]: all simulated paths of one run, path-major
//! * [`PayoffMatrix`]: exercise values (and later realised cash flows) of
//!   one run, time-major so each exercise date is a contiguous column
//! * [`longstaff_schwartz`]: the least-squares early-exercise pass

pub mod longstaff_schwartz;

use lsmc_core::{
    ensure,
    errors::{Error, Result},
    Real, Size, Time,
};
use lsmc_instruments::Payoff;
use lsmc_math::random_numbers::{derive_stream_seed, GaussianRng};
use lsmc_processes::StochasticProcess1D;
use rayon::prelude::*;

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A uniform grid of time points `0, Δt, 2Δt, …, T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    maturity: Time,
    steps: Size,
}

impl TimeGrid {
    /// Create a uniform time grid from 0 to `maturity` with `steps` intervals.
    pub fn uniform(maturity: Time, steps: Size) -> Result<Self> {
        ensure!(steps > 0, "steps must be > 0");
        ensure!(maturity > 0.0, "maturity must be positive, got {maturity}");
        Ok(Self { maturity, steps })
    }

    /// Number of intervals.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Interval length `T / steps`.
    pub fn dt(&self) -> Time {
        self.maturity / self.steps as Real
    }

    /// Time at grid index `i`.
    pub fn time(&self, i: Size) -> Time {
        i as Real * self.dt()
    }
}

// ─── PathMatrix ───────────────────────────────────────────────────────────────

/// Every simulated path of a run, stored path-major with stride `steps + 1`.
///
/// Element `(i, 0)` is the initial price of path `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatrix {
    n_paths: Size,
    steps: Size,
    values: Vec<Real>,
}

impl PathMatrix {
    /// Build from explicit trajectories; all must have the same length ≥ 2.
    pub fn from_paths(paths: &[Vec<Real>]) -> Result<Self> {
        ensure!(!paths.is_empty(), "at least one path is required");
        let len = paths[0].len();
        ensure!(len >= 2, "a path needs at least 2 points, got {len}");
        ensure!(
            paths.iter().all(|p| p.len() == len),
            "all paths must have the same length"
        );
        Ok(Self {
            n_paths: paths.len(),
            steps: len - 1,
            values: paths.concat(),
        })
    }

    /// Number of paths.
    pub fn n_paths(&self) -> Size {
        self.n_paths
    }

    /// Number of time steps per path.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Trajectory of path `i`.
    pub fn path(&self, i: Size) -> &[Real] {
        let stride = self.steps + 1;
        &self.values[i * stride..(i + 1) * stride]
    }

    /// Price of path `i` at time index `t`.
    #[inline]
    pub fn get(&self, i: Size, t: Size) -> Real {
        self.values[i * (self.steps + 1) + t]
    }

    /// Iterate over all trajectories.
    pub fn paths(&self) -> std::slice::ChunksExact<'_, Real> {
        self.values.chunks_exact(self.steps + 1)
    }
}

// ─── PayoffMatrix ─────────────────────────────────────────────────────────────

/// Exercise values of every path at every time index, stored time-major.
///
/// Filled with intrinsic values by [`evaluate`](Self::evaluate); the
/// full-maturity Longstaff-Schwartz pass then overwrites entries of the
/// column after an exercise date with the value realised there.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffMatrix {
    n_paths: Size,
    steps: Size,
    values: Vec<Real>,
}

impl PayoffMatrix {
    /// Evaluate `payoff` at every point of every path.
    pub fn evaluate(paths: &PathMatrix, payoff: &dyn Payoff) -> Self {
        let n = paths.n_paths();
        let mut values = vec![0.0; n * (paths.steps() + 1)];
        values
            .chunks_exact_mut(n)
            .enumerate()
            .for_each(|(t, column)| {
                for (i, v) in column.iter_mut().enumerate() {
                    *v = payoff.value(paths.get(i, t));
                }
            });
        Self {
            n_paths: n,
            steps: paths.steps(),
            values,
        }
    }

    /// Same as [`evaluate`](Self::evaluate), one rayon task per time index.
    pub fn evaluate_parallel(paths: &PathMatrix, payoff: &dyn Payoff) -> Self {
        let n = paths.n_paths();
        let mut values = vec![0.0; n * (paths.steps() + 1)];
        values
            .par_chunks_exact_mut(n)
            .enumerate()
            .for_each(|(t, column)| {
                for (i, v) in column.iter_mut().enumerate() {
                    *v = payoff.value(paths.get(i, t));
                }
            });
        Self {
            n_paths: n,
            steps: paths.steps(),
            values,
        }
    }

    /// Number of paths.
    pub fn n_paths(&self) -> Size {
        self.n_paths
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Value of path `i` at time index `t`.
    #[inline]
    pub fn get(&self, i: Size, t: Size) -> Real {
        self.values[t * self.n_paths + i]
    }

    /// Values of every path at time index `t`.
    pub fn column(&self, t: Size) -> &[Real] {
        &self.values[t * self.n_paths..(t + 1) * self.n_paths]
    }

    /// Values at the final time index.
    pub fn terminal(&self) -> &[Real] {
        self.column(self.steps)
    }

    /// Column `t` read-only together with column `t + 1` mutable.
    pub fn column_pair_mut(&mut self, t: Size) -> (&[Real], &mut [Real]) {
        let n = self.n_paths;
        let (head, tail) = self.values.split_at_mut((t + 1) * n);
        (&head[t * n..], &mut tail[..n])
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates sample paths of a 1-D stochastic process on a uniform grid.
///
/// Each path consumes `steps` consecutive draws from the generator, in
/// path order, so a sequential run is fully determined by the draw
/// source's seed.
pub struct PathGenerator<'a> {
    process: &'a dyn StochasticProcess1D,
    grid: TimeGrid,
    rng: GaussianRng,
}

impl<'a> PathGenerator<'a> {
    /// Create a new path generator drawing from `rng`.
    pub fn new(process: &'a dyn StochasticProcess1D, grid: TimeGrid, rng: GaussianRng) -> Self {
        Self { process, grid, rng }
    }

    /// Generate `n_paths` paths into a [`PathMatrix`].
    pub fn generate(&mut self, n_paths: Size) -> Result<PathMatrix> {
        ensure!(n_paths > 0, "path count must be > 0");
        let stride = self.grid.steps() + 1;
        let mut values = vec![0.0; matrix_len(n_paths, stride)?];
        for path in values.chunks_exact_mut(stride) {
            fill_path(self.process, &self.grid, &mut self.rng, path);
        }
        Ok(PathMatrix {
            n_paths,
            steps: self.grid.steps(),
            values,
        })
    }
}

/// Generate `n_paths` paths in parallel.
///
/// Paths are split into blocks of `chunk_paths`; block `c` draws from its
/// own Mersenne Twister seeded with `derive_stream_seed(seed, c)`. The
/// result depends on `seed` and `chunk_paths` but not on the number of
/// worker threads. A `chunk_paths` of at least `n_paths` puts every path in
/// block 0.
pub fn generate_paths_parallel(
    process: &dyn StochasticProcess1D,
    grid: TimeGrid,
    n_paths: Size,
    seed: u64,
    chunk_paths: Size,
) -> Result<PathMatrix> {
    ensure!(n_paths > 0, "path count must be > 0");
    ensure!(chunk_paths > 0, "chunk size must be > 0");
    let stride = grid.steps() + 1;
    let mut values = vec![0.0; matrix_len(n_paths, stride)?];
    // Bounded by the checked product above.
    let block_len = chunk_paths.min(n_paths) * stride;
    values
        .par_chunks_mut(block_len)
        .enumerate()
        .for_each(|(c, block)| {
            let mut rng = GaussianRng::standard(derive_stream_seed(seed, c as u64));
            for path in block.chunks_exact_mut(stride) {
                fill_path(process, &grid, &mut rng, path);
            }
        });
    Ok(PathMatrix {
        n_paths,
        steps: grid.steps(),
        values,
    })
}

/// Element count of an `n_paths × stride` matrix.
fn matrix_len(n_paths: Size, stride: Size) -> Result<Size> {
    n_paths.checked_mul(stride).ok_or_else(|| {
        Error::Precondition(format!(
            "{n_paths} paths of {stride} points overflow the path matrix"
        ))
    })
}

#[inline]
fn fill_path(
    process: &dyn StochasticProcess1D,
    grid: &TimeGrid,
    rng: &mut GaussianRng,
    out: &mut [Real],
) {
    let dt = grid.dt();
    let mut x = process.x0();
    out[0] = x;
    for (i, slot) in out.iter_mut().enumerate().skip(1) {
        let t = (i - 1) as Real * dt;
        x = process.evolve_1d(t, x, dt, rng.next_real());
        *slot = x;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lsmc_instruments::{OptionType, PlainVanillaPayoff};
    use lsmc_processes::GeometricBrownianMotionProcess;
    use proptest::prelude::*;

    fn gbm(spot: Real) -> GeometricBrownianMotionProcess {
        GeometricBrownianMotionProcess::risk_neutral(spot, 0.05, 0.20).unwrap()
    }

    #[test]
    fn time_grid_uniform() {
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let times: Vec<Time> = (0..=grid.steps()).map(|i| grid.time(i)).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!((grid.dt() - 0.25).abs() < 1e-15);
        assert!(TimeGrid::uniform(1.0, 0).is_err());
        assert!(TimeGrid::uniform(0.0, 10).is_err());
    }

    #[test]
    fn path_generator_produces_positive_gbm() {
        let process = gbm(100.0);
        let grid = TimeGrid::uniform(1.0, 252).unwrap();
        let m = PathGenerator::new(&process, grid, GaussianRng::standard(12345))
            .generate(100)
            .unwrap();
        assert_eq!(m.n_paths(), 100);
        for path in m.paths() {
            assert_eq!(path.len(), 253);
            assert_eq!(path[0], 100.0);
            for &v in path {
                assert!(v > 0.0, "GBM path went non-positive: {v}");
            }
        }
    }

    #[test]
    fn paths_consume_draws_in_order() {
        let process = gbm(100.0);
        let grid = TimeGrid::uniform(1.0, 10).unwrap();
        let m = PathGenerator::new(&process, grid, GaussianRng::standard(9))
            .generate(5)
            .unwrap();
        let mut gen = PathGenerator::new(&process, grid, GaussianRng::standard(9));
        let head = gen.generate(3).unwrap();
        let tail = gen.generate(2).unwrap();
        for i in 0..3 {
            assert_eq!(m.path(i), head.path(i));
        }
        for i in 0..2 {
            assert_eq!(m.path(3 + i), tail.path(i));
        }
    }

    #[test]
    fn oversized_matrix_is_rejected() {
        let process = gbm(100.0);
        let grid = TimeGrid::uniform(1.0, 1).unwrap();
        let mut gen = PathGenerator::new(&process, grid, GaussianRng::standard(1));
        assert!(matches!(gen.generate(usize::MAX), Err(Error::Precondition(_))));
        assert!(matches!(
            generate_paths_parallel(&process, grid, usize::MAX, 1, 64),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn chunk_larger_than_run_is_one_block() {
        let process = gbm(100.0);
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let whole = generate_paths_parallel(&process, grid, 10, 1, 10).unwrap();
        let huge = generate_paths_parallel(&process, grid, 10, 1, usize::MAX).unwrap();
        assert_eq!(whole, huge);
    }

    #[test]
    fn same_seed_same_paths() {
        let process = gbm(100.0);
        let grid = TimeGrid::uniform(0.5, 20).unwrap();
        let a = PathGenerator::new(&process, grid, GaussianRng::standard(77))
            .generate(50)
            .unwrap();
        let b = PathGenerator::new(&process, grid, GaussianRng::standard(77))
            .generate(50)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_generation_is_reproducible() {
        let process = gbm(100.0);
        let grid = TimeGrid::uniform(1.0, 12).unwrap();
        let a = generate_paths_parallel(&process, grid, 1_003, 5, 64).unwrap();
        let b = generate_paths_parallel(&process, grid, 1_003, 5, 64).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.n_paths(), 1_003);
        assert!(a.paths().all(|p| p[0] == 100.0));
        // Different blocks draw from different streams.
        assert_ne!(a.path(0), a.path(64));
    }

    #[test]
    fn payoff_matrix_is_time_major() {
        let paths = PathMatrix::from_paths(&[vec![100.0, 90.0, 80.0], vec![100.0, 110.0, 95.0]])
            .unwrap();
        let put = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        let m = PayoffMatrix::evaluate(&paths, &put);
        assert_eq!(m.column(0), &[0.0, 0.0]);
        assert_eq!(m.column(1), &[10.0, 0.0]);
        assert_eq!(m.terminal(), &[20.0, 5.0]);
        assert_eq!(m.get(1, 2), 5.0);
        assert_eq!(PayoffMatrix::evaluate_parallel(&paths, &put), m);
    }

    #[test]
    fn column_pair_splits_adjacent_columns() {
        let paths = PathMatrix::from_paths(&[vec![100.0, 90.0, 80.0]]).unwrap();
        let put = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        let mut m = PayoffMatrix::evaluate(&paths, &put);
        let (now, next) = m.column_pair_mut(1);
        assert_eq!(now, &[10.0]);
        next[0] = now[0];
        assert_eq!(m.terminal(), &[10.0]);
    }

    #[test]
    fn from_paths_validates_shape() {
        assert!(PathMatrix::from_paths(&[]).is_err());
        assert!(PathMatrix::from_paths(&[vec![100.0]]).is_err());
        assert!(PathMatrix::from_paths(&[vec![100.0, 1.0], vec![100.0]]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn every_path_starts_at_spot(spot in 1.0..500.0_f64, seed in any::<u64>(), steps in 1usize..30) {
            let process = gbm(spot);
            let grid = TimeGrid::uniform(1.0, steps).unwrap();
            let m = PathGenerator::new(&process, grid, GaussianRng::standard(seed))
                .generate(20)
                .unwrap();
            for p in m.paths() {
                prop_assert_eq!(p[0], spot);
                prop_assert_eq!(p.len(), steps + 1);
            }
        }
    }
}
