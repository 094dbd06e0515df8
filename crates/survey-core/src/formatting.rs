//! Display-layer formatting helpers.
//!
//! The pipeline's output collections carry plain numbers; everything here is
//! presentation only and must never leak back into core outputs.

/// Round a value to two decimal places.
///
/// This is the exposure-boundary rounding: aggregation keeps full precision
/// and calls this exactly once, when a mean leaves the pipeline.
///
/// # Examples
///
/// ```
/// use survey_core::formatting::round2;
///
/// assert_eq!(round2(150.0), 150.0);
/// assert_eq!(round2(33.333333), 33.33);
/// assert_eq!(round2(2.675), 2.68);
/// ```
pub fn round2(value: f64) -> f64 {
    // Nudge by one ULP at the scaled magnitude so binary representation of
    // exact midpoints (2.675 → 267.49999…) rounds the expected way.
    let scaled = value * 100.0;
    let epsilon = f64::EPSILON * scaled.abs();
    (scaled + epsilon.copysign(scaled)).round() / 100.0
}

/// Calculate `(part / whole) * 100`, rounded to `decimals` places.
///
/// Returns `0.0` when `whole` is zero; the spending-share view divides by
/// the sum of a cohort's non-zero entries, which may legitimately be empty.
///
/// # Examples
///
/// ```
/// use survey_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(10.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimals: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimals as i32);
    ((part / whole) * 100.0 * factor).round() / factor
}

/// Format an amount as Colombian pesos in the es-CO convention:
/// `$` prefix, `.`-grouped thousands, `,` decimal separator, two decimals.
///
/// # Examples
///
/// ```
/// use survey_core::formatting::format_cop;
///
/// assert_eq!(format_cop(1234567.89), "$ 1.234.567,89");
/// assert_eq!(format_cop(0.0), "$ 0,00");
/// assert_eq!(format_cop(-9876.5), "$ -9.876,50");
/// ```
pub fn format_cop(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = round2(amount.abs());

    let integer_part = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let grouped = group_thousands(&integer_part.to_string());
    let sign = if negative { "-" } else { "" };
    format!("$ {sign}{grouped},{fraction:02}")
}

/// Insert `.` thousands separators into a plain digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
