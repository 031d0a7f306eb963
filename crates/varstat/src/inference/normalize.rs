//! Locale-aware numeric normalization.
//!
//! Rewrites decimal-comma notation (`"1,75"`, `"1.000,50"`) into canonical
//! numbers. Values that look numeric but fit no rule are kept as malformed
//! cells, absent for every statistic; they never abort an analysis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{CleanedColumn, RawColumn, RawValue, Value};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// Optional sign, digits with at most one dot, optional exponent.
static CANONICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());

/// One comma followed by one or two digits, no dot.
static DECIMAL_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+,\d{1,2}$").unwrap());

/// Dot-grouped thousands with a decimal comma: `1.000,50`.
static GROUPED_DECIMAL_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d{1,3}(?:\.\d{3})+,\d{1,2}$").unwrap());

/// Digits mixed with separators only.
static NUMERIC_LOOKING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[\d.,]*\d[\d.,]*$").unwrap());

/// Notation a numeric value was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    /// Decimal point, no grouping.
    Canonical,
    /// Decimal comma: `1,75`.
    DecimalComma,
    /// Dot thousands separators with a decimal comma: `1.000,50`.
    GroupedDecimalComma,
}

/// Outcome of normalizing one raw text value.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// A number, with the notation it was written in.
    Number { value: f64, notation: Notation },
    /// Numeric-looking but ambiguous or invalid (`"1,2,3"`, `"1,234"`).
    Malformed(String),
    /// Plain text.
    Text(String),
}

impl Normalized {
    /// The numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Normalized::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// Converts raw cells into canonical numbers where the notation allows it.
#[derive(Debug, Clone)]
pub struct NumericNormalizer {
    /// Accept decimal-comma notations.
    decimal_comma: bool,
}

impl NumericNormalizer {
    /// Create a normalizer accepting decimal-comma notation.
    pub fn new() -> Self {
        Self {
            decimal_comma: true,
        }
    }

    /// Enable or disable decimal-comma notation.
    pub fn with_decimal_comma(mut self, enable: bool) -> Self {
        self.decimal_comma = enable;
        self
    }

    /// Normalize a single raw text value.
    pub fn normalize(&self, raw: &str) -> Normalized {
        let trimmed = raw.trim();

        if CANONICAL.is_match(trimmed) {
            return number(trimmed, Notation::Canonical, raw);
        }

        if self.decimal_comma {
            if DECIMAL_COMMA.is_match(trimmed) {
                return number(&trimmed.replace(',', "."), Notation::DecimalComma, raw);
            }
            if GROUPED_DECIMAL_COMMA.is_match(trimmed) {
                let rewritten = trimmed.replace('.', "").replace(',', ".");
                return number(&rewritten, Notation::GroupedDecimalComma, raw);
            }
        }

        if NUMERIC_LOOKING.is_match(trimmed) {
            Normalized::Malformed(raw.to_string())
        } else {
            Normalized::Text(raw.to_string())
        }
    }

    /// Normalize every cell of a column, preserving row alignment.
    pub fn clean(&self, column: &RawColumn) -> CleanedColumn {
        let mut cleaned = CleanedColumn::new(column.name.clone(), Vec::with_capacity(column.len()));

        for cell in &column.cells {
            let value = match cell {
                RawValue::Missing => Value::Missing,
                RawValue::Number(n) if n.is_finite() => Value::Number(*n),
                RawValue::Number(n) => {
                    cleaned.malformed_count += 1;
                    Value::Malformed(n.to_string())
                }
                RawValue::Text(text) => match self.normalize(text) {
                    Normalized::Number { value, notation } => {
                        if notation != Notation::Canonical {
                            cleaned.converted_count += 1;
                        }
                        Value::Number(value)
                    }
                    Normalized::Malformed(text) => {
                        cleaned.malformed_count += 1;
                        Value::Malformed(text)
                    }
                    Normalized::Text(text) => Value::Text(text),
                },
            };
            cleaned.values.push(value);
        }

        cleaned
    }
}

impl Default for NumericNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a canonical string; overflow to infinity counts as malformed.
fn number(canonical: &str, notation: Notation, raw: &str) -> Normalized {
    match canonical.parse::<f64>() {
        Ok(value) if value.is_finite() => Normalized::Number { value, notation },
        _ => Normalized::Malformed(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> Normalized {
        NumericNormalizer::new().normalize(raw)
    }

    #[test]
    fn test_canonical_passes_through() {
        assert_eq!(normalize("1.75").as_number(), Some(1.75));
        assert_eq!(normalize(" -3 ").as_number(), Some(-3.0));
        assert_eq!(normalize("+0.5").as_number(), Some(0.5));
        assert_eq!(normalize("1e3").as_number(), Some(1000.0));
        assert!(matches!(
            normalize("42"),
            Normalized::Number { notation: Notation::Canonical, .. }
        ));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(
            normalize("1,75"),
            Normalized::Number {
                value: 1.75,
                notation: Notation::DecimalComma
            }
        );
        assert_eq!(normalize("-0,5").as_number(), Some(-0.5));
        assert_eq!(normalize("70,5").as_number(), Some(70.5));
    }

    #[test]
    fn test_grouped_decimal_comma() {
        assert_eq!(
            normalize("1.000,50"),
            Normalized::Number {
                value: 1000.5,
                notation: Notation::GroupedDecimalComma
            }
        );
        assert_eq!(normalize("12.345.678,9").as_number(), Some(12345678.9));
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(normalize("1,2,3"), Normalized::Malformed(_)));
        assert!(matches!(normalize("1,234"), Normalized::Malformed(_)));
        assert!(matches!(normalize("1.00.0"), Normalized::Malformed(_)));
        assert!(matches!(normalize("1.0000,5"), Normalized::Malformed(_)));
    }

    #[test]
    fn test_text_values() {
        assert_eq!(normalize("sim"), Normalized::Text("sim".to_string()));
        assert!(matches!(normalize("inf"), Normalized::Text(_)));
        assert!(matches!(normalize("NaN"), Normalized::Text(_)));
        assert!(matches!(normalize(""), Normalized::Text(_)));
    }

    #[test]
    fn test_decimal_comma_can_be_disabled() {
        let normalizer = NumericNormalizer::new().with_decimal_comma(false);
        assert!(matches!(normalizer.normalize("1,75"), Normalized::Malformed(_)));
        assert_eq!(normalizer.normalize("1.75").as_number(), Some(1.75));
    }

    #[test]
    fn test_clean_column_counts() {
        let column = RawColumn::new(
            "height",
            vec![
                "1,75".into(),
                "1.80".into(),
                RawValue::Missing,
                "1,2,3".into(),
                RawValue::Number(1.6),
                RawValue::Number(f64::NAN),
            ],
        );
        let cleaned = NumericNormalizer::new().clean(&column);
        assert_eq!(cleaned.len(), column.len());
        assert_eq!(cleaned.values[0], Value::Number(1.75));
        assert_eq!(cleaned.values[2], Value::Missing);
        assert_eq!(cleaned.values[3], Value::Malformed("1,2,3".to_string()));
        assert_eq!(cleaned.values[5], Value::Malformed("NaN".to_string()));
        assert_eq!(cleaned.converted_count, 1);
        assert_eq!(cleaned.malformed_count, 2);
        assert_eq!(cleaned.numeric_count(), 3);
    }
}
