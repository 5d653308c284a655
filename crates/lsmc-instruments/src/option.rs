//! Vanilla options on a single underlying.

use crate::exercise::ExerciseType;
use crate::instrument::{PricingEngine, PricingResults};
use crate::payoff::{OptionType, PlainVanillaPayoff};
use lsmc_core::{ensure, errors::Result, Real, Time};

/// Arguments passed to a pricing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOptionArguments {
    /// The payoff.
    pub payoff: PlainVanillaPayoff,
    /// The exercise style.
    pub exercise: ExerciseType,
    /// Time to maturity in years.
    pub maturity: Time,
}

/// A plain vanilla option with maturity expressed as a year fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOption {
    payoff: PlainVanillaPayoff,
    exercise: ExerciseType,
    maturity: Time,
}

impl VanillaOption {
    /// Create a new vanilla option.
    ///
    /// # Errors
    /// Returns `Precondition` unless `maturity > 0`.
    pub fn new(payoff: PlainVanillaPayoff, exercise: ExerciseType, maturity: Time) -> Result<Self> {
        ensure!(maturity > 0.0, "time to maturity must be positive, got {maturity}");
        Ok(Self {
            payoff,
            exercise,
            maturity,
        })
    }

    /// American option of the given type and strike.
    pub fn american(option_type: OptionType, strike: Real, maturity: Time) -> Result<Self> {
        Self::new(
            PlainVanillaPayoff::new(option_type, strike),
            ExerciseType::American,
            maturity,
        )
    }

    /// European option of the given type and strike.
    pub fn european(option_type: OptionType, strike: Real, maturity: Time) -> Result<Self> {
        Self::new(
            PlainVanillaPayoff::new(option_type, strike),
            ExerciseType::European,
            maturity,
        )
    }

    /// The payoff.
    pub fn payoff(&self) -> &PlainVanillaPayoff {
        &self.payoff
    }

    /// The exercise style.
    pub fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Time to maturity in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Build the engine arguments.
    pub fn arguments(&self) -> VanillaOptionArguments {
        VanillaOptionArguments {
            payoff: self.payoff,
            exercise: self.exercise,
            maturity: self.maturity,
        }
    }

    /// Price this option using the given engine.
    pub fn price(
        &self,
        engine: &dyn PricingEngine<VanillaOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}
