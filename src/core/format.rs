//! Numeric label formatting.
//!
//! Labels follow the compact conventions of C/Go `printf`: `%g` for whole
//! numbers and measures, `%.1f` for scales stepping by fractional increments.

/// Formats `value` the way `%g` does with the shortest representation:
/// plain decimal notation when the decimal exponent lies in `[-4, 6)`,
/// otherwise exponent notation with a signed, two-digit exponent
/// (`1e+06`, `2.5e-05`).
#[must_use]
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-5" or "3e2".
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..6).contains(&exponent) {
        format!("{value}")
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

/// Formats `value` with exactly one decimal place.
#[must_use]
pub fn format_one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Returns the fractional part of `value`, truncated toward zero.
#[must_use]
pub fn fraction(value: f64) -> f64 {
    value - value.trunc()
}

/// Chooses the tick label formatter for a scale stepping by `increment`.
#[must_use]
pub fn tick_formatter(increment: f64) -> fn(f64) -> String {
    if fraction(increment) != 0.0 {
        format_one_decimal
    } else {
        format_general
    }
}
