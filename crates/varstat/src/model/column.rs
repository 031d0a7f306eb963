//! Raw and cleaned column representations.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A cell as delivered by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    /// Explicit missing marker.
    Missing,
    /// Textual cell, possibly numeric-looking (`"1,75"`).
    Text(String),
    /// Cell already typed as a number by the reader.
    Number(f64),
}

impl RawValue {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }

    /// Returns true for the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Missing)
    }
}

/// A named column of raw cells, in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<RawValue>,
}

impl RawColumn {
    /// Create a new raw column.
    pub fn new(name: impl Into<String>, cells: Vec<RawValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An in-memory tabular dataset: ordered, named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub columns: Vec<RawColumn>,
}

impl Dataset {
    /// Create a dataset from its columns.
    pub fn new(name: impl Into<String>, columns: Vec<RawColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (length of the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(RawColumn::len).max().unwrap_or(0)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A cell after numeric normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absent. Distinct from zero and from empty text.
    Missing,
    /// Canonical numeric value.
    Number(f64),
    /// Non-numeric text.
    Text(String),
    /// Numeric-looking text that fits no notation. Absent for statistics.
    Malformed(String),
}

/// Hashable identity of a non-missing value, used for distinct counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Number(u64),
    Text(String),
}

impl Value {
    /// Returns true for the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns true for a malformed cell.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Value::Malformed(_))
    }

    /// The numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Category label for frequency tables. Numbers render in shortest form.
    pub fn label(&self) -> Option<String> {
        match self {
            Value::Missing | Value::Malformed(_) => None,
            Value::Number(n) => Some(format_number(*n)),
            Value::Text(s) => Some(s.clone()),
        }
    }

    /// Distinct-value identity. `-0.0` and `0.0` share a key.
    pub fn key(&self) -> Option<ValueKey> {
        match self {
            Value::Missing | Value::Malformed(_) => None,
            Value::Number(n) => Some(ValueKey::Number(number_key(*n))),
            Value::Text(s) => Some(ValueKey::Text(s.clone())),
        }
    }
}

/// Bit pattern used to key a number, with negative zero folded into zero.
pub(crate) fn number_key(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

/// Render a number the way category labels show it (`25`, `1.75`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// A column after numeric normalization. Row-aligned with its raw column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedColumn {
    pub name: String,
    pub values: Vec<Value>,
    /// Cells rewritten from a non-canonical decimal notation.
    pub converted_count: usize,
    /// Numeric-looking cells that matched no notation rule.
    pub malformed_count: usize,
}

impl CleanedColumn {
    /// Create a cleaned column with no conversion bookkeeping.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
            converted_count: 0,
            malformed_count: 0,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Number of malformed cells.
    pub fn malformed_cells(&self) -> usize {
        self.values.iter().filter(|v| v.is_malformed()).count()
    }

    /// Number of cells holding a usable value: neither missing nor malformed.
    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count() - self.malformed_cells()
    }

    /// Number of cells holding a number.
    pub fn numeric_count(&self) -> usize {
        self.values.iter().filter(|v| v.as_number().is_some()).count()
    }

    /// Numeric cells in row order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(Value::as_number)
    }

    /// Distinct present values, in first-appearance order.
    pub fn distinct_keys(&self) -> IndexSet<ValueKey> {
        self.values.iter().filter_map(Value::key).collect()
    }

    /// Number of distinct present values.
    pub fn distinct_count(&self) -> usize {
        self.distinct_keys().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_distinct_from_zero_and_empty_text() {
        let column = CleanedColumn::new(
            "x",
            vec![Value::Missing, Value::Number(0.0), Value::Text(String::new())],
        );
        assert_eq!(column.missing_count(), 1);
        assert_eq!(column.present_count(), 2);
        assert_eq!(column.distinct_count(), 2);
    }

    #[test]
    fn test_malformed_cells_are_not_present() {
        let column = CleanedColumn::new(
            "x",
            vec![
                Value::Number(1.0),
                Value::Malformed("1,2,3".to_string()),
                Value::Number(1.0),
            ],
        );
        assert_eq!(column.missing_count(), 0);
        assert_eq!(column.malformed_cells(), 1);
        assert_eq!(column.present_count(), 2);
        assert_eq!(column.distinct_count(), 1);
        assert_eq!(column.values[1].label(), None);
    }

    #[test]
    fn test_negative_zero_shares_key() {
        assert_eq!(Value::Number(-0.0).key(), Value::Number(0.0).key());
        assert_eq!(Value::Number(-0.0).label().as_deref(), Some("0"));
    }

    #[test]
    fn test_number_labels() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(1.75), "1.75");
        assert_eq!(format_number(-3.5), "-3.5");
    }

    #[test]
    fn test_dataset_row_count() {
        let dataset = Dataset::new(
            "d",
            vec![
                RawColumn::new("a", vec!["1".into(), "2".into()]),
                RawColumn::new("b", vec![RawValue::Missing]),
            ],
        );
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_count(), 2);
        assert!(dataset.column("b").is_some());
        assert!(dataset.column("c").is_none());
    }

    #[test]
    fn test_raw_value_from_option() {
        assert_eq!(RawValue::from(None::<&str>), RawValue::Missing);
        assert_eq!(RawValue::from(Some(2.5)), RawValue::Number(2.5));
    }
}
