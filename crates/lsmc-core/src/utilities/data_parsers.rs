//! Data parsing helpers for market inputs given as strings.
//!
//! Both parsers return `None` on malformed input; falling back to a
//! default is left to the caller.

use crate::Real;

/// Parse a decimal number such as `"100"`, `"0.2"` or `"5e-2"`.
///
/// Surrounding whitespace is ignored. Returns `None` if the string cannot
/// be parsed.
pub fn parse_real(s: &str) -> Option<Real> {
    s.trim().parse::<Real>().ok()
}

/// Parse a year-month string in `YYYY-MM` format.
///
/// Returns `(year, month)` on success. The month must lie in `1..=12`.
pub fn parse_year_month(s: &str) -> Option<(i32, u32)> {
    let (year, month) = s.trim().split_once('-')?;
    if year.is_empty() || month.is_empty() {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}
