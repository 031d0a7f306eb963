//! varstat: variable type inference and descriptive statistics for tabular data.
//!
//! For every column of a dataset, varstat normalizes locale-dependent numeric
//! notation, classifies the column into one of five variable types, and runs
//! the statistics that apply to that type.
//!
//! # Pipeline
//!
//! - **Normalize**: `"1,75"` and `"1.000,50"` become `1.75` and `1000.5`
//! - **Classify**: Nominal, Ordinal, Binary, Discrete or Continuous
//! - **Dispatch**: frequency tables, central tendency, separatrices,
//!   dispersion and interpretation, selected per type
//!
//! # Example
//!
//! ```
//! use varstat::{Dataset, RawColumn, RawValue, Varstat, VariableType};
//!
//! let dataset = Dataset::new(
//!     "people",
//!     vec![RawColumn::new(
//!         "age",
//!         vec![RawValue::text("25"), RawValue::text("30"), RawValue::text("25")],
//!     )],
//! );
//!
//! let summary = Varstat::new().analyze_dataset(&dataset).unwrap();
//! let age = summary.get("age").unwrap();
//!
//! assert_eq!(age.variable_type, Some(VariableType::Discrete));
//! assert_eq!(age.central.median, Some(25.0));
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod model;
pub mod report;
pub mod stats;

mod engine;

pub use crate::engine::{AnalysisConfig, FileAnalysis, Varstat};
pub use error::{Result, VarstatError};
pub use inference::{Normalized, Notation, NumericNormalizer, TypeClassifier};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use model::{
    CleanedColumn, ColumnOverview, Dataset, DatasetSummary, RawColumn, RawValue, Value,
    VariableAnalysis, VariableType,
};
pub use report::MarkdownReport;
pub use stats::{
    CentralTendency, ClassInterval, DispersionClass, DispersionSummary, FrequencyEntry,
    FrequencyTable, Interpretation, Mode, SeparatrixSet, Shape, VarianceKind,
};
