use regex::Regex;
use tracing::warn;

use crate::models::FieldValue;

// ── ValueCoercer ──────────────────────────────────────────────────────────────

/// Dynamic typing for raw CSV cells.
///
/// Survey exports deliver everything as text; the pipeline contract requires
/// numeric-looking fields to arrive numeric-typed and presence flags to be
/// truthy/falsy-evaluable. The coercer bridges that gap once, at the loading
/// boundary, so no downstream stage re-parses strings.
pub struct ValueCoercer {
    /// Matches currency-decorated numbers in the es-CO convention:
    /// optional `$` prefix, `.`-grouped thousands, `,` decimal separator.
    currency_re: Regex,
}

impl Default for ValueCoercer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueCoercer {
    pub fn new() -> Self {
        let currency_re =
            Regex::new(r"^\$?\s*(-?\d{1,3}(?:\.\d{3})+(?:,\d+)?|-?\d+(?:,\d+)?)$")
                .expect("regex is valid");
        Self { currency_re }
    }

    /// Coerce one raw cell into a [`FieldValue`].
    ///
    /// Rules, in order:
    /// 1. Blank (after trimming) → `Null`.
    /// 2. Plain numeric text → `Number`.
    /// 3. Currency-decorated numeric text (`"$ 1.200.000"`, `"12,5"`) →
    ///    `Number` with grouping stripped.
    /// 4. `true` / `false` (case-insensitive) → `Bool`.
    /// 5. Anything else → `Text`, verbatim.
    ///
    /// Coercion never fails; unparseable cells stay textual.
    pub fn coerce(&self, raw: &str) -> FieldValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Null;
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return FieldValue::Number(n);
            }
            // "inf" / "NaN" strings parse but are useless as survey values.
            warn!("non-finite numeric cell \"{trimmed}\" kept as text");
            return FieldValue::Text(trimmed.to_string());
        }

        if let Some(n) = self.parse_currency(trimmed) {
            return FieldValue::Number(n);
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return FieldValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return FieldValue::Bool(false);
        }

        FieldValue::Text(trimmed.to_string())
    }

    /// Parse an es-CO formatted amount, e.g. `"$ 1.234.567,89"` → 1234567.89.
    fn parse_currency(&self, value: &str) -> Option<f64> {
        let captures = self.currency_re.captures(value)?;
        let normalized = captures[1].replace('.', "").replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn coercer() -> ValueCoercer {
        ValueCoercer::new()
    }

    #[test]
    fn test_blank_cells_become_null() {
        assert_eq!(coercer().coerce(""), FieldValue::Null);
        assert_eq!(coercer().coerce("   "), FieldValue::Null);
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(coercer().coerce("25"), FieldValue::Number(25.0));
        assert_eq!(coercer().coerce("-3.5"), FieldValue::Number(-3.5));
        assert_eq!(coercer().coerce(" 120000 "), FieldValue::Number(120000.0));
    }

    #[test]
    fn test_dot_grouped_number_is_plain_decimal() {
        // "1.200" is a valid plain float, so it wins over the grouped reading.
        assert_eq!(coercer().coerce("1.200"), FieldValue::Number(1.2));
    }

    #[test]
    fn test_currency_with_thousands_groups() {
        assert_eq!(
            coercer().coerce("$ 1.200.000"),
            FieldValue::Number(1_200_000.0)
        );
        assert_eq!(
            coercer().coerce("1.234.567,89"),
            FieldValue::Number(1_234_567.89)
        );
    }

    #[test]
    fn test_currency_decimal_comma() {
        assert_eq!(coercer().coerce("12,5"), FieldValue::Number(12.5));
        assert_eq!(coercer().coerce("$350,75"), FieldValue::Number(350.75));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(coercer().coerce("true"), FieldValue::Bool(true));
        assert_eq!(coercer().coerce("FALSE"), FieldValue::Bool(false));
    }

    #[test]
    fn test_text_passthrough() {
        assert_eq!(
            coercer().coerce("Ecoturismo"),
            FieldValue::Text("Ecoturismo".to_string())
        );
    }

    #[test]
    fn test_non_finite_numeric_strings_stay_text() {
        assert_eq!(
            coercer().coerce("NaN"),
            FieldValue::Text("NaN".to_string())
        );
        assert_eq!(
            coercer().coerce("inf"),
            FieldValue::Text("inf".to_string())
        );
    }

    #[test]
    fn test_ambiguous_text_with_digits_stays_text() {
        assert_eq!(
            coercer().coerce("Zona 10 norte"),
            FieldValue::Text("Zona 10 norte".to_string())
        );
    }
}
