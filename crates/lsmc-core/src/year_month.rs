//! Calendar year-month pairs.
//!
//! Option expiries on the command line are given to month precision
//! (`YYYY-MM`). Time to maturity is measured in whole months from a
//! reference year-month and expressed as a year fraction.

use crate::errors::{Error, Result};
use crate::utilities::parse_year_month;
use crate::Time;
use std::fmt;
use std::str::FromStr;

/// A calendar month of a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Reference month expiries are measured from when none is configured.
    pub const DEFAULT_REFERENCE: YearMonth = YearMonth {
        year: 2024,
        month: 10,
    };

    /// Create a year-month; `month` must lie in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        crate::ensure!(
            (1..=12).contains(&month),
            "month {month} out of range [1, 12]"
        );
        Ok(Self { year, month })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month (1–12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Signed number of months from `self` to `later`.
    pub fn months_until(&self, later: &YearMonth) -> i64 {
        (i64::from(later.year) - i64::from(self.year)) * 12
            + (i64::from(later.month) - i64::from(self.month))
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = parse_year_month(s)
            .ok_or_else(|| Error::InvalidArgument(format!("expected YYYY-MM, got {s:?}")))?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Year fraction between a reference month and an expiry month.
///
/// `(Δyears · 12 + Δmonths) / 12`. An expiry before the reference yields a
/// negative time.
pub fn time_to_maturity(reference: &YearMonth, expiry: &YearMonth) -> Time {
    reference.months_until(expiry) as Time / 12.0
}
