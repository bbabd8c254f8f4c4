//! printf-style number formatting.
//!
//! The scene markup and raw files are consumed by tools that expect the
//! C conventions for `%g`, `%f` and `%.Nf`, so these helpers reproduce them
//! exactly instead of relying on Rust's shortest-round-trip `Display`.

use std::fmt;

/// Significant digits of `%g`.
const G_PRECISION: i32 = 6;

/// `%g`: six significant digits, trailing zeros removed, exponent form for
/// very small or very large magnitudes.
pub fn general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the target precision may bump the exponent (999999.7 -> 1e+06),
    // so take the exponent from the rounded scientific form.
    let sci = format!("{:.*e}", (G_PRECISION - 1) as usize, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= G_PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (G_PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// `%.Nf`
#[inline]
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Display adapter for `%g`, usable directly in `write!`.
#[derive(Clone, Copy, Debug)]
pub struct G(pub f64);

impl fmt::Display for G {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&general(self.0))
    }
}
