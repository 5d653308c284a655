//! Console output.

use crate::Quote;
use lsmc_core::Real;

const SIGNIFICANT_DIGITS: usize = 6;

/// The two result lines, each newline-terminated.
pub fn price_lines(quote: &Quote) -> String {
    format!(
        "American Call Option Price: {}\nAmerican Put Option Price: {}\n",
        format_general(quote.call.npv),
        format_general(quote.put.npv)
    )
}

/// Six significant digits, trailing zeros dropped, switching to exponent
/// notation outside `[1e-4, 1e6)`: `10.3759`, `0.000123457`, `1.5e+07`.
pub fn format_general(x: Real) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    // Rounding to the target precision can carry into the next decade, so
    // the exponent is read back from the rounded scientific form.
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
