//! Data model: raw and cleaned columns, variable types, analysis records.

mod column;
mod record;
mod summary;
mod types;

pub use column::{CleanedColumn, Dataset, RawColumn, RawValue, Value, ValueKey, format_number};
pub(crate) use column::number_key;
pub use record::VariableAnalysis;
pub use summary::{ColumnOverview, DatasetSummary};
pub use types::VariableType;
