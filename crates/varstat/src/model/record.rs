//! Per-column analysis record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::VariableType;
use crate::stats::{
    CentralTendency, DispersionSummary, FrequencyTable, Interpretation, SeparatrixSet,
};

/// Everything computed for one column in one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAnalysis {
    /// Column name.
    pub name: String,
    /// Zero-based position in the dataset.
    pub position: usize,
    /// Inferred type. Absent only for failed columns.
    pub variable_type: Option<VariableType>,
    /// Total number of cells.
    pub total_count: usize,
    /// Cells that took part in the statistics.
    pub value_count: usize,
    /// Absent cells plus cells rejected by the variable type.
    pub missing_count: usize,
    /// Present cells rejected by the variable type; counted in `missing_count`.
    pub malformed_count: usize,
    /// Cells rewritten from a non-canonical decimal notation.
    pub converted_count: usize,
    /// Distinct non-missing values seen by the classifier.
    pub distinct_count: usize,
    pub frequency: FrequencyTable,
    pub central: CentralTendency,
    /// Binary proportions in percent, in frequency-table order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportions: Option<IndexMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separatrices: Option<SeparatrixSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispersion: Option<DispersionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Interpretation>,
    /// Numeric values in row order, for histogram renderers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f64>,
    /// Reason the column could not be analysed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl VariableAnalysis {
    /// Create an empty record for a column of the given type.
    pub fn new(
        name: impl Into<String>,
        position: usize,
        variable_type: VariableType,
        total_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            variable_type: Some(variable_type),
            total_count,
            value_count: 0,
            missing_count: total_count,
            malformed_count: 0,
            converted_count: 0,
            distinct_count: 0,
            frequency: FrequencyTable::default(),
            central: CentralTendency::default(),
            proportions: None,
            separatrices: None,
            dispersion: None,
            interpretation: None,
            values: Vec::new(),
            failure: None,
        }
    }

    /// A record for a column whose analysis failed.
    pub fn failed(
        name: impl Into<String>,
        position: usize,
        total_count: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            variable_type: None,
            failure: Some(reason.into()),
            ..Self::new(name, position, VariableType::Nominal, total_count)
        }
    }

    /// Returns true if the analysis failed.
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Percentage of missing cells.
    pub fn missing_percentage(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            (self.missing_count as f64 / self.total_count as f64) * 100.0
        }
    }
}
