//! Error types for lsmc-rs.
//!
//! A single `thiserror`-derived enum covers every failure the pricer can
//! report. Precondition checks go through the `ensure!` macro.

use thiserror::Error;

/// The top-level error type used throughout lsmc-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A quantity that must be finite came out as NaN or ±∞.
    #[error("non-finite {quantity} at time step {step}: {value}")]
    NonFinite {
        /// What was being computed.
        quantity: &'static str,
        /// The time step at which it was computed.
        step: usize,
        /// The offending value.
        value: f64,
    },

    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Shorthand `Result` type used throughout lsmc-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use lsmc_core::{ensure, errors::Error};
/// fn positive(x: f64) -> lsmc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_steps(n: usize) -> Result<usize> {
        ensure!(n >= 1, "time-step count must be at least 1, got {n}");
        Ok(n)
    }

    #[test]
    fn ensure_maps_to_precondition() {
        assert_eq!(checked_steps(3), Ok(3));
        assert_eq!(
            checked_steps(0),
            Err(Error::Precondition(
                "time-step count must be at least 1, got 0".into()
            ))
        );
    }

    #[test]
    fn non_finite_message() {
        let e = Error::NonFinite {
            quantity: "continuation value",
            step: 42,
            value: f64::NAN,
        };
        assert_eq!(e.to_string(), "non-finite continuation value at time step 42: NaN");
    }
}
