// File: crates/trend-core/src/text.rs
// Summary: Text helpers for labels: trimmed decimals, superscript exponents, axis ticks.

/// Round to at most `max_fraction_digits` decimals and drop trailing zeros
/// (`2.50 → "2.5"`, `3.0 → "3"`). Never yields `-0`.
pub fn format_decimal(v: f64, max_fraction_digits: usize) -> String {
    let mut s = format!("{v:.max_fraction_digits$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Unicode superscript rendering of a non-negative integer (`12 → "¹²"`).
pub fn superscript(n: usize) -> String {
    n.to_string().chars().filter_map(to_superscript).collect()
}

fn to_superscript(c: char) -> Option<char> {
    match c {
        '0' => Some('⁰'),
        '1' => Some('¹'),
        '2' => Some('²'),
        '3' => Some('³'),
        '4' => Some('⁴'),
        '5' => Some('⁵'),
        '6' => Some('⁶'),
        '7' => Some('⁷'),
        '8' => Some('⁸'),
        '9' => Some('⁹'),
        _ => None,
    }
}

/// Axis tick label: magnitudes above 1000 in scientific notation with up to
/// two mantissa decimals (`12345 → "1.23E4"`), otherwise up to two decimals.
pub fn format_tick(v: f64) -> String {
    if !v.is_finite() || v.abs() <= 1e3 {
        return format_decimal(v, 2);
    }
    let mut exponent = v.abs().log10().floor() as i32;
    let mut mantissa = (v / 10f64.powi(exponent) * 100.0).round() / 100.0;
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    format!("{}E{}", format_decimal(mantissa, 2), exponent)
}
