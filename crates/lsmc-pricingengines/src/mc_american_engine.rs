//! Monte Carlo engine for American vanilla options (Longstaff-Schwartz).
//!
//! Simulates risk-neutral GBM paths on a uniform grid, prices early
//! exercise by least-squares backward induction, and reports the European
//! value of the same paths alongside the American one.

use lsmc_core::{errors::Result, Price, Rate, Size, Volatility};
use lsmc_instruments::{ExerciseType, PricingEngine, PricingResults, VanillaOptionArguments};
use lsmc_math::GaussianRng;
use lsmc_methods::{LongstaffSchwartz, LsmcOutcome, SimulationParameters};
use tracing::debug;

/// Least-squares Monte Carlo engine.
///
/// Additional results: `european_npv`, `early_exercise_premium`,
/// `degenerate_steps`. A European-exercise option is priced from the
/// terminal column only and carries the same additional results.
///
/// ```
/// use lsmc_instruments::{OptionType, VanillaOption};
/// use lsmc_pricingengines::McAmericanEngine;
///
/// let engine = McAmericanEngine::new(100.0, 0.05, 0.2)
///     .with_paths(2_000)
///     .with_steps(10)
///     .with_seed(42);
/// let put = VanillaOption::american(OptionType::Put, 100.0, 1.0).unwrap();
/// let results = put.price(&engine).unwrap();
/// assert!(results.npv > 0.0);
/// assert!(results.result("european_npv").is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McAmericanEngine {
    spot: Price,
    rate: Rate,
    volatility: Volatility,
    paths: Size,
    steps: Size,
    seed: Option<u64>,
    parallel_chunks: Option<Size>,
    lsmc: LongstaffSchwartz,
}

impl McAmericanEngine {
    /// Default number of simulated paths.
    pub const DEFAULT_PATHS: Size = 100_000;
    /// Default number of time steps.
    pub const DEFAULT_STEPS: Size = 100;

    /// Engine for the given market with default simulation settings and
    /// an entropy-seeded generator.
    pub fn new(spot: Price, rate: Rate, volatility: Volatility) -> Self {
        Self {
            spot,
            rate,
            volatility,
            paths: Self::DEFAULT_PATHS,
            steps: Self::DEFAULT_STEPS,
            seed: None,
            parallel_chunks: None,
            lsmc: LongstaffSchwartz::new(),
        }
    }

    /// Set the number of simulated paths.
    pub fn with_paths(mut self, paths: Size) -> Self {
        self.paths = paths;
        self
    }

    /// Set the number of time steps.
    pub fn with_steps(mut self, steps: Size) -> Self {
        self.steps = steps;
        self
    }

    /// Fix the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate paths in parallel blocks of `chunk_paths`.
    pub fn with_parallel_chunks(mut self, chunk_paths: Size) -> Self {
        self.parallel_chunks = Some(chunk_paths);
        self
    }

    /// Replace the backward-induction settings.
    pub fn with_lsmc(mut self, lsmc: LongstaffSchwartz) -> Self {
        self.lsmc = lsmc;
        self
    }

    /// The backward-induction settings.
    pub fn lsmc(&self) -> &LongstaffSchwartz {
        &self.lsmc
    }

    /// Full Longstaff-Schwartz outcome, diagnostics included.
    pub fn outcome(&self, args: &VanillaOptionArguments) -> Result<LsmcOutcome> {
        let params = SimulationParameters::new(
            self.spot,
            args.payoff.strike,
            self.rate,
            self.volatility,
            args.maturity,
            self.paths,
            self.steps,
            args.payoff.option_type,
        )?;
        let rng = match self.seed {
            Some(seed) => GaussianRng::standard(seed),
            None => GaussianRng::from_entropy(),
        };
        match self.parallel_chunks {
            Some(chunk_paths) => self.lsmc.price_parallel(&params, rng.seed(), chunk_paths),
            None => self.lsmc.price(&params, rng),
        }
    }
}

impl PricingEngine<VanillaOptionArguments> for McAmericanEngine {
    fn calculate(&self, args: &VanillaOptionArguments) -> Result<PricingResults> {
        let outcome = self.outcome(args)?;
        let (npv, error) = match args.exercise {
            ExerciseType::American => (outcome.price, outcome.std_error),
            ExerciseType::European => (outcome.european_price, outcome.european_std_error),
        };
        debug!(exercise = %args.exercise, npv, error, "monte carlo engine finished");
        Ok(PricingResults::from_npv(npv)
            .with_error_estimate(error)
            .with_result("european_npv", outcome.european_price)
            .with_result("early_exercise_premium", outcome.early_exercise_premium())
            .with_result("degenerate_steps", outcome.degenerate_steps() as f64))
    }
}
