//! Variable type classification heuristics.

use serde::{Deserialize, Serialize};

use crate::engine::AnalysisConfig;
use crate::error::{Result, VarstatError};
use crate::model::{CleanedColumn, Value, VariableType};

/// Default share of numeric values a column needs to be treated as numeric.
pub const DEFAULT_NUMERIC_MAJORITY: f64 = 0.5;

/// Default distinct-value count from which integral columns are continuous.
pub const DEFAULT_CARDINALITY_THRESHOLD: usize = 30;

/// Outcome of classifying a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub variable_type: VariableType,
    /// Distinct non-missing values.
    pub distinct_count: usize,
    /// Values that are neither missing nor malformed.
    pub present_count: usize,
    /// Share of present values that parsed as numbers (0.0-1.0).
    pub numeric_ratio: f64,
}

/// Assigns one of the five variable types to a cleaned column.
///
/// Rules, first match wins:
/// 1. exactly two distinct values: Binary
/// 2. numeric share below the majority threshold: Ordinal with an ordering
///    hint, otherwise Nominal
/// 3. all numbers integral and fewer distinct numbers than the cardinality
///    threshold: Discrete
/// 4. otherwise Continuous
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    numeric_majority_threshold: f64,
    cardinality_threshold: usize,
}

impl TypeClassifier {
    /// Create a classifier with default thresholds.
    pub fn new() -> Self {
        Self {
            numeric_majority_threshold: DEFAULT_NUMERIC_MAJORITY,
            cardinality_threshold: DEFAULT_CARDINALITY_THRESHOLD,
        }
    }

    /// Create a classifier using the thresholds of a configuration.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            numeric_majority_threshold: config.numeric_majority_threshold,
            cardinality_threshold: config.cardinality_threshold,
        }
    }

    /// Set the numeric-majority threshold (0.0-1.0).
    pub fn numeric_majority_threshold(mut self, threshold: f64) -> Self {
        self.numeric_majority_threshold = threshold;
        self
    }

    /// Set the discrete/continuous cardinality threshold.
    pub fn cardinality_threshold(mut self, threshold: usize) -> Self {
        self.cardinality_threshold = threshold;
        self
    }

    /// Classify a column. Fails only for a column without rows.
    pub fn classify(
        &self,
        column: &CleanedColumn,
        ordering_hint: Option<&[String]>,
    ) -> Result<Classification> {
        if column.is_empty() {
            return Err(VarstatError::Unclassifiable {
                column: column.name.clone(),
                reason: "column has no rows".to_string(),
            });
        }

        let present_count = column.present_count();
        let distinct_count = column.distinct_count();
        let numeric_count = column.numeric_count();
        let numeric_ratio = if present_count == 0 {
            0.0
        } else {
            numeric_count as f64 / present_count as f64
        };

        let variable_type = if present_count == 0 {
            VariableType::Nominal
        } else if distinct_count == 2 {
            VariableType::Binary
        } else if numeric_ratio < self.numeric_majority_threshold {
            match ordering_hint {
                Some(order) if !order.is_empty() => VariableType::Ordinal,
                _ => VariableType::Nominal,
            }
        } else {
            self.numeric_type(column)
        };

        Ok(Classification {
            variable_type,
            distinct_count,
            present_count,
            numeric_ratio,
        })
    }

    /// Discrete or Continuous, judged on the numeric cells only.
    fn numeric_type(&self, column: &CleanedColumn) -> VariableType {
        let integral = column.numbers().all(|n| n.fract() == 0.0);
        let numeric_distinct = column
            .values
            .iter()
            .filter(|v| matches!(v, Value::Number(_)))
            .filter_map(Value::key)
            .collect::<std::collections::HashSet<_>>()
            .len();

        if integral && numeric_distinct < self.cardinality_threshold {
            VariableType::Discrete
        } else {
            VariableType::Continuous
        }
    }
}

impl Default for TypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
