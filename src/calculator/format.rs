//! Result formatting for the calculator display.

/// Significant digits shown for results unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 10;

/// Magnitude from which unary results switch to the plain representation.
const PLAIN_THRESHOLD: f64 = 1e10;

/// Format a value with `precision` significant digits, `%g` style.
///
/// Trailing zeros are dropped. Exponent notation is used when the decimal
/// exponent is below -4 or at least `precision`.
pub fn format_result(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Format the result of a unary operation.
///
/// Large magnitudes are shown in full rather than in exponent notation.
pub fn format_unary_result(value: f64, precision: usize) -> String {
    if value.abs() < PLAIN_THRESHOLD {
        format_result(value, precision)
    } else {
        value.to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
