//! Variable type enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic variable type assigned to a column.
///
/// Assigned once per column per analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    /// Unordered categories.
    Nominal,
    /// Categories with a caller-supplied order.
    Ordinal,
    /// Exactly two distinct values.
    Binary,
    /// Integral numeric values with low cardinality.
    Discrete,
    /// Fractional or high-cardinality numeric values.
    Continuous,
}

impl VariableType {
    /// All variable types, in declaration order.
    pub const ALL: [VariableType; 5] = [
        VariableType::Nominal,
        VariableType::Ordinal,
        VariableType::Binary,
        VariableType::Discrete,
        VariableType::Continuous,
    ];

    /// Returns true if this type is analysed numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(self, VariableType::Discrete | VariableType::Continuous)
    }

    /// Returns true if this type is categorical.
    pub fn is_categorical(&self) -> bool {
        !self.is_numeric()
    }

    /// Returns true if quartiles, deciles and percentiles are defined.
    pub fn has_separatrices(&self) -> bool {
        matches!(
            self,
            VariableType::Ordinal | VariableType::Discrete | VariableType::Continuous
        )
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            VariableType::Nominal => "Nominal",
            VariableType::Ordinal => "Ordinal",
            VariableType::Binary => "Binary",
            VariableType::Discrete => "Discrete",
            VariableType::Continuous => "Continuous",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
