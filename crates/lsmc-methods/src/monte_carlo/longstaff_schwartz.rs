//! Longstaff-Schwartz least-squares Monte Carlo for American exercise.
//!
//! Walks the time grid backward from `steps − 1` to `1`. At each step the
//! in-the-money paths are regressed (price against the discounted value of
//! continuing) and every path whose intrinsic value beats the fitted
//! continuation value exercises. Steps with fewer than two in-the-money
//! paths make no decision.
//!
//! Two choices are left open and exposed as options, both defaulting to
//! the classic behaviour of this pricer:
//!
//! * [`ContinuationRule`]: a single scalar continuation value (the fitted
//!   intercept) for every path, or the fitted line evaluated per path.
//! * [`Discounting`]: exercised values rolled into the next column of the
//!   [`PayoffMatrix`] and discounted once from maturity, or each path's
//!   realised cash flow discounted from its own exercise date.

use super::{generate_paths_parallel, PathGenerator, PathMatrix, PayoffMatrix, TimeGrid};
use lsmc_core::{
    ensure,
    errors::{Error, Result},
    Price, Rate, Real, Size, Time, Volatility,
};
use lsmc_instruments::{OptionType, PlainVanillaPayoff};
use lsmc_math::linear_regression::NormalEquations;
use lsmc_math::{GaussianRng, IncrementalStatistics};
use lsmc_processes::GeometricBrownianMotionProcess;
use tracing::{debug, info, warn};

// ─── SimulationParameters ─────────────────────────────────────────────────────

/// Market, contract, and simulation inputs of one pricing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Initial underlying price S₀.
    pub spot: Price,
    /// Strike K.
    pub strike: Price,
    /// Continuously compounded risk-free rate r.
    pub rate: Rate,
    /// Volatility σ.
    pub volatility: Volatility,
    /// Time to maturity T in years.
    pub maturity: Time,
    /// Number of simulated paths.
    pub n_simulations: Size,
    /// Number of time steps.
    pub n_time_steps: Size,
    /// Call or put.
    pub option_type: OptionType,
}

impl SimulationParameters {
    /// Validate and build.
    ///
    /// # Errors
    /// `Precondition` unless `n_simulations > 0`, `n_time_steps ≥ 1`,
    /// `maturity > 0` and `volatility ≥ 0`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: Price,
        strike: Price,
        rate: Rate,
        volatility: Volatility,
        maturity: Time,
        n_simulations: Size,
        n_time_steps: Size,
        option_type: OptionType,
    ) -> Result<Self> {
        ensure!(n_simulations > 0, "simulation count must be > 0");
        ensure!(n_time_steps >= 1, "time-step count must be at least 1");
        ensure!(maturity > 0.0, "time to maturity must be positive, got {maturity}");
        ensure!(volatility >= 0.0, "volatility must be non-negative, got {volatility}");
        Ok(Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
            n_simulations,
            n_time_steps,
            option_type,
        })
    }

    /// The same run with the other option type.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// The same run with a different initial price.
    pub fn with_spot(self, spot: Price) -> Self {
        Self { spot, ..self }
    }

    /// Step length Δt = T / n_time_steps.
    pub fn dt(&self) -> Time {
        self.maturity / self.n_time_steps as Real
    }

    /// The simulation grid.
    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::uniform(self.maturity, self.n_time_steps)
    }

    /// The vanilla payoff.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }

    /// Risk-neutral GBM for the underlying.
    pub fn process(&self) -> Result<GeometricBrownianMotionProcess> {
        GeometricBrownianMotionProcess::risk_neutral(self.spot, self.rate, self.volatility)
    }
}

// ─── Options ──────────────────────────────────────────────────────────────────

/// How the fitted regression turns into a continuation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContinuationRule {
    /// The fitted intercept, applied uniformly to every path. Every path,
    /// in the money or not, exercises when its intrinsic value exceeds it.
    #[default]
    Intercept,
    /// `slope · S + intercept` evaluated at each path's own price; only
    /// in-the-money paths are eligible to exercise.
    Regression,
}

/// How exercised cash flows are carried back to time 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Discounting {
    /// Exercise at step `t` replaces the cash-flow record at `t + 1`; the
    /// terminal column is discounted by `exp(−r·T)` whatever step its
    /// value came from.
    #[default]
    FullMaturity,
    /// Each path keeps its realised cash flow and exercise step; the
    /// regression target and the final price discount from that step.
    PerStep,
}

// ─── ContinuationModel ────────────────────────────────────────────────────────

/// Straight-line fit of discounted continuation values against price at
/// one exercise date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuationModel {
    /// Fitted slope.
    pub slope: Real,
    /// Fitted intercept.
    pub intercept: Real,
    /// Number of in-the-money paths in the fit.
    pub itm_paths: Size,
}

impl ContinuationModel {
    /// Fit over the paths whose intrinsic value is strictly positive.
    ///
    /// `prices`, `exercise` and `continued` are aligned by path. Returns
    /// `None` with fewer than two in-the-money paths.
    pub fn fit(prices: &[Real], exercise: &[Real], continued: &[Real]) -> Option<Self> {
        let mut eq = NormalEquations::new();
        for ((&s, &now), &later) in prices.iter().zip(exercise).zip(continued) {
            if now > 0.0 {
                eq.add(s, later);
            }
        }
        let line = eq.solve().ok()?;
        Some(Self {
            slope: line.slope,
            intercept: line.intercept,
            itm_paths: line.observations,
        })
    }

    /// Continuation value of a path at `price` under `rule`.
    #[inline]
    pub fn value(&self, rule: ContinuationRule, price: Real) -> Real {
        match rule {
            ContinuationRule::Intercept => self.intercept,
            ContinuationRule::Regression => self.intercept + self.slope * price,
        }
    }

    /// Whether both coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

// ─── Diagnostics ──────────────────────────────────────────────────────────────

/// What happened at one exercise date of the backward pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseStep {
    /// Time index.
    pub step: Size,
    /// Time in years.
    pub time: Time,
    /// Paths with strictly positive intrinsic value.
    pub itm_paths: Size,
    /// Fitted model; `None` when fewer than two paths were in the money.
    pub model: Option<ContinuationModel>,
    /// Paths that exercised here.
    pub exercised_paths: Size,
}

impl ExerciseStep {
    /// No decision was made, or the fit was not finite.
    pub fn is_degenerate(&self) -> bool {
        self.model.map_or(true, |m| !m.is_finite())
    }
}

/// Result of one Longstaff-Schwartz run.
#[derive(Debug, Clone, PartialEq)]
pub struct LsmcOutcome {
    /// American option price.
    pub price: Price,
    /// Standard error of the discounted per-path cash flows.
    pub std_error: Real,
    /// European price from the same paths: terminal intrinsic values
    /// discounted from maturity.
    pub european_price: Price,
    /// Standard error of the European price.
    pub european_std_error: Real,
    /// One entry per exercise date, in backward order.
    pub steps: Vec<ExerciseStep>,
}

impl LsmcOutcome {
    /// `price − european_price`.
    pub fn early_exercise_premium(&self) -> Real {
        self.price - self.european_price
    }

    /// Exercise dates where no (finite) continuation value was available.
    pub fn degenerate_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_degenerate()).count()
    }
}

// ─── Realised cash flows ──────────────────────────────────────────────────────

/// Per-path cash flow and the time index it is received at.
#[derive(Debug, Clone)]
struct RealizedCashFlows {
    amount: Vec<Real>,
    step: Vec<Size>,
}

impl RealizedCashFlows {
    fn at_maturity(payoffs: &PayoffMatrix) -> Self {
        Self {
            amount: payoffs.terminal().to_vec(),
            step: vec![payoffs.steps(); payoffs.n_paths()],
        }
    }
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Least-squares Monte Carlo backward induction.
///
/// ```
/// use lsmc_instruments::OptionType;
/// use lsmc_math::GaussianRng;
/// use lsmc_methods::{LongstaffSchwartz, SimulationParameters};
///
/// let params =
///     SimulationParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, 2_000, 10, OptionType::Put).unwrap();
/// let outcome = LongstaffSchwartz::new()
///     .price(&params, GaussianRng::standard(42))
///     .unwrap();
/// assert!(outcome.price > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LongstaffSchwartz {
    rule: ContinuationRule,
    discounting: Discounting,
    strict: bool,
}

impl LongstaffSchwartz {
    /// Intercept continuation value, full-maturity discounting, lenient.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the continuation rule.
    pub fn with_continuation_rule(mut self, rule: ContinuationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the discounting convention.
    pub fn with_discounting(mut self, discounting: Discounting) -> Self {
        self.discounting = discounting;
        self
    }

    /// Fail with [`Error::NonFinite`] instead of propagating a non-finite
    /// continuation value or price.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The continuation rule.
    pub fn continuation_rule(&self) -> ContinuationRule {
        self.rule
    }

    /// The discounting convention.
    pub fn discounting(&self) -> Discounting {
        self.discounting
    }

    /// Simulate sequentially from `rng` and price.
    pub fn price(&self, params: &SimulationParameters, rng: GaussianRng) -> Result<LsmcOutcome> {
        let process = params.process()?;
        let grid = params.time_grid()?;
        debug!(
            seed = rng.seed(),
            paths = params.n_simulations,
            steps = params.n_time_steps,
            "simulating paths"
        );
        let paths = PathGenerator::new(&process, grid, rng).generate(params.n_simulations)?;
        let payoffs = PayoffMatrix::evaluate(&paths, &params.payoff());
        self.run(params, &paths, payoffs)
    }

    /// Simulate in parallel blocks of `chunk_paths` paths and price.
    pub fn price_parallel(
        &self,
        params: &SimulationParameters,
        seed: u64,
        chunk_paths: Size,
    ) -> Result<LsmcOutcome> {
        let process = params.process()?;
        let grid = params.time_grid()?;
        debug!(
            seed,
            chunk_paths,
            paths = params.n_simulations,
            steps = params.n_time_steps,
            "simulating paths in parallel"
        );
        let paths =
            generate_paths_parallel(&process, grid, params.n_simulations, seed, chunk_paths)?;
        let payoffs = PayoffMatrix::evaluate_parallel(&paths, &params.payoff());
        self.run(params, &paths, payoffs)
    }

    /// Backward induction and aggregation over pre-simulated paths.
    ///
    /// `payoffs` must hold the intrinsic values of `paths`; it is consumed
    /// as the cash-flow record.
    pub fn run(
        &self,
        params: &SimulationParameters,
        paths: &PathMatrix,
        mut payoffs: PayoffMatrix,
    ) -> Result<LsmcOutcome> {
        ensure!(
            paths.n_paths() == payoffs.n_paths() && paths.steps() == payoffs.steps(),
            "path matrix ({}×{}) and payoff matrix ({}×{}) disagree",
            paths.n_paths(),
            paths.steps(),
            payoffs.n_paths(),
            payoffs.steps()
        );
        let n = paths.n_paths();
        let steps = paths.steps();
        let dt = params.maturity / steps as Real;
        let r = params.rate;
        let maturity_df = (-r * params.maturity).exp();

        let mut european = IncrementalStatistics::new();
        european.add_all(payoffs.terminal().iter().map(|&v| v * maturity_df));
        let european_price = european.mean().unwrap_or(Real::NAN);
        let european_std_error = european.error_estimate().unwrap_or(0.0);

        let mut realized = match self.discounting {
            Discounting::FullMaturity => None,
            Discounting::PerStep => Some(RealizedCashFlows::at_maturity(&payoffs)),
        };

        let mut prices = vec![0.0; n];
        let mut continued = vec![0.0; n];
        let mut diagnostics = Vec::with_capacity(steps.saturating_sub(1));

        debug!(steps, rule = ?self.rule, discounting = ?self.discounting, "backward induction");
        for t in (1..steps).rev() {
            for (i, s) in prices.iter_mut().enumerate() {
                *s = paths.get(i, t);
            }
            // Value if continued, discounted to t. Snapshot taken before
            // any exercise at t touches the record.
            match &realized {
                None => {
                    let df = (-r * dt).exp();
                    for (c, &v) in continued.iter_mut().zip(payoffs.column(t + 1)) {
                        *c = v * df;
                    }
                }
                Some(cf) => {
                    for ((c, &v), &k) in continued.iter_mut().zip(&cf.amount).zip(&cf.step) {
                        *c = v * (-r * dt * (k - t) as Real).exp();
                    }
                }
            }

            let (exercise, next) = payoffs.column_pair_mut(t);
            let itm_paths = exercise.iter().filter(|&&v| v > 0.0).count();
            let model = ContinuationModel::fit(&prices, exercise, &continued);

            let mut step = ExerciseStep {
                step: t,
                time: t as Real * dt,
                itm_paths,
                model,
                exercised_paths: 0,
            };

            let Some(model) = model else {
                debug!(step = t, itm_paths, "fewer than two in-the-money paths, no decision");
                diagnostics.push(step);
                continue;
            };
            if !model.is_finite() {
                warn!(
                    step = t,
                    itm_paths,
                    intercept = model.intercept,
                    slope = model.slope,
                    "non-finite continuation value"
                );
                if self.strict {
                    return Err(Error::NonFinite {
                        quantity: "continuation value",
                        step: t,
                        value: model.intercept,
                    });
                }
            }

            for (i, &now) in exercise.iter().enumerate() {
                let eligible = match self.rule {
                    ContinuationRule::Intercept => true,
                    ContinuationRule::Regression => now > 0.0,
                };
                if eligible && now > model.value(self.rule, prices[i]) {
                    match realized.as_mut() {
                        None => next[i] = now,
                        Some(cf) => {
                            cf.amount[i] = now;
                            cf.step[i] = t;
                        }
                    }
                    step.exercised_paths += 1;
                }
            }
            diagnostics.push(step);
        }

        let mut stats = IncrementalStatistics::new();
        match &realized {
            None => stats.add_all(payoffs.terminal().iter().map(|&v| v * maturity_df)),
            Some(cf) => stats.add_all(
                cf.amount
                    .iter()
                    .zip(&cf.step)
                    .map(|(&v, &k)| v * (-r * dt * k as Real).exp()),
            ),
        }
        let price = stats.mean().unwrap_or(Real::NAN);
        let std_error = stats.error_estimate().unwrap_or(0.0);

        if self.strict && !price.is_finite() {
            return Err(Error::NonFinite {
                quantity: "option price",
                step: 0,
                value: price,
            });
        }

        let outcome = LsmcOutcome {
            price,
            std_error,
            european_price,
            european_std_error,
            steps: diagnostics,
        };
        info!(
            option_type = %params.option_type,
            price,
            std_error,
            european_price,
            degenerate_steps = outcome.degenerate_steps(),
            "american option priced"
        );
        Ok(outcome)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
