//! Dataset-level summary.

use serde::{Deserialize, Serialize};

use super::record::VariableAnalysis;
use super::types::VariableType;

/// Compact per-column overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub variable_type: Option<VariableType>,
    pub total_count: usize,
    pub missing_count: usize,
    pub distinct_count: usize,
}

/// Analysis records for every column, in original column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Dataset name.
    pub name: String,
    /// Number of rows.
    pub row_count: usize,
    /// One record per column.
    pub variables: Vec<VariableAnalysis>,
}

impl DatasetSummary {
    /// Get a record by column name.
    pub fn get(&self, name: &str) -> Option<&VariableAnalysis> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.variables.len()
    }

    /// Records whose analysis failed.
    pub fn failed(&self) -> impl Iterator<Item = &VariableAnalysis> {
        self.variables.iter().filter(|v| v.is_failed())
    }

    /// Records of a given variable type.
    pub fn of_type(&self, variable_type: VariableType) -> impl Iterator<Item = &VariableAnalysis> {
        self.variables
            .iter()
            .filter(move |v| v.variable_type == Some(variable_type))
    }

    /// Name, type and counts for every column.
    pub fn overview(&self) -> Vec<ColumnOverview> {
        self.variables
            .iter()
            .map(|v| ColumnOverview {
                name: v.name.clone(),
                variable_type: v.variable_type,
                total_count: v.total_count,
                missing_count: v.missing_count,
                distinct_count: v.distinct_count,
            })
            .collect()
    }
}
