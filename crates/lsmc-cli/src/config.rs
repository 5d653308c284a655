//! Runtime configuration from environment variables and `.env`.
//!
//! | Variable              | Default         |
//! |-----------------------|-----------------|
//! | `LSMC_PATHS`          | `100000`        |
//! | `LSMC_STEPS`          | `100`           |
//! | `LSMC_SEED`           | OS entropy      |
//! | `LSMC_REFERENCE_DATE` | `2024-10`       |
//! | `LSMC_CONTINUATION`   | `intercept`     |
//! | `LSMC_DISCOUNTING`    | `full-maturity` |
//! | `LSMC_PARALLEL`       | `false`         |
//! | `LSMC_CHUNK_PATHS`    | `4096`          |
//! | `LSMC_STRICT`         | `false`         |

use lsmc_core::errors::{Error, Result};
use lsmc_core::{Price, Rate, Size, Volatility, YearMonth};
use lsmc_methods::{ContinuationRule, Discounting, LongstaffSchwartz};
use lsmc_pricingengines::McAmericanEngine;

/// Simulation and engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Simulated paths per run.
    pub paths: Size,
    /// Time steps per path.
    pub steps: Size,
    /// Generator seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Month the expiry argument is measured from.
    pub reference_date: YearMonth,
    /// Continuation-value rule.
    pub continuation: ContinuationRule,
    /// Discounting convention.
    pub discounting: Discounting,
    /// Generate paths on the rayon pool.
    pub parallel: bool,
    /// Paths per parallel block.
    pub chunk_paths: Size,
    /// Fail on non-finite continuation values or prices.
    pub strict: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: McAmericanEngine::DEFAULT_PATHS,
            steps: McAmericanEngine::DEFAULT_STEPS,
            seed: None,
            reference_date: YearMonth::DEFAULT_REFERENCE,
            continuation: ContinuationRule::Intercept,
            discounting: Discounting::FullMaturity,
            parallel: false,
            chunk_paths: 4_096,
            strict: false,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let d = Self::default();
        let var_or = |key: &str, default: String| lookup(key).unwrap_or(default);

        let paths = parse_count("LSMC_PATHS", lookup("LSMC_PATHS"), d.paths)?;
        let steps = parse_count("LSMC_STEPS", lookup("LSMC_STEPS"), d.steps)?;

        let seed = lookup("LSMC_SEED")
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .map_err(|e| Error::Config(format!("LSMC_SEED: {e}")))
            })
            .transpose()?;

        let reference_date = var_or("LSMC_REFERENCE_DATE", d.reference_date.to_string())
            .trim()
            .parse::<YearMonth>()
            .map_err(|e| Error::Config(format!("LSMC_REFERENCE_DATE: {e}")))?;

        let continuation = match var_or("LSMC_CONTINUATION", "intercept".into()).trim() {
            "intercept" => ContinuationRule::Intercept,
            "regression" => ContinuationRule::Regression,
            other => {
                return Err(Error::Config(format!(
                    "LSMC_CONTINUATION: expected intercept or regression, got {other:?}"
                )))
            }
        };

        let discounting = match var_or("LSMC_DISCOUNTING", "full-maturity".into()).trim() {
            "full-maturity" => Discounting::FullMaturity,
            "per-step" => Discounting::PerStep,
            other => {
                return Err(Error::Config(format!(
                    "LSMC_DISCOUNTING: expected full-maturity or per-step, got {other:?}"
                )))
            }
        };

        let parallel = parse_bool("LSMC_PARALLEL", lookup("LSMC_PARALLEL"))?;

        let chunk_paths =
            parse_count("LSMC_CHUNK_PATHS", lookup("LSMC_CHUNK_PATHS"), d.chunk_paths)?;

        let strict = parse_bool("LSMC_STRICT", lookup("LSMC_STRICT"))?;

        Ok(Self {
            paths,
            steps,
            seed,
            reference_date,
            continuation,
            discounting,
            parallel,
            chunk_paths,
            strict,
        })
    }

    /// Backward-induction settings.
    pub fn lsmc(&self) -> LongstaffSchwartz {
        LongstaffSchwartz::new()
            .with_continuation_rule(self.continuation)
            .with_discounting(self.discounting)
            .strict(self.strict)
    }

    /// A Monte Carlo engine for the given market, without a seed.
    pub fn engine(&self, spot: Price, rate: Rate, volatility: Volatility) -> McAmericanEngine {
        let engine = McAmericanEngine::new(spot, rate, volatility)
            .with_paths(self.paths)
            .with_steps(self.steps)
            .with_lsmc(self.lsmc());
        if self.parallel {
            engine.with_parallel_chunks(self.chunk_paths)
        } else {
            engine
        }
    }
}

/// A strictly positive count; unset takes `default`.
fn parse_count(key: &str, value: Option<String>, default: Size) -> Result<Size> {
    let Some(raw) = value else {
        return Ok(default);
    };
    let n = raw
        .trim()
        .parse::<Size>()
        .map_err(|e| Error::Config(format!("{key}: {e}")))?;
    if n == 0 {
        return Err(Error::Config(format!("{key}: must be at least 1")));
    }
    Ok(n)
}

fn parse_bool(key: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(Error::Config(format!("{key}: expected a boolean, got {v:?}"))),
    }
}
