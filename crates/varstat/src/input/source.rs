//! Parsed tables and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Dataset, RawColumn, RawValue};

/// Cell contents treated as absent, compared case-insensitively.
const NULL_TOKENS: &[&str] = &["na", "n/a", "null", "none", "nil", ".", "-", "nan"];

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// Parsed tabular data, row-major.
#[derive(Debug, Clone)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All values of a column by index; short rows read as empty.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    /// A specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(String::as_str))
    }

    /// Check if a value represents a missing value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || NULL_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
    }

    /// Convert into a column-major dataset. Null tokens become missing cells.
    pub fn to_dataset(&self, name: impl Into<String>) -> Dataset {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let cells = self
                    .column_values(index)
                    .map(|value| {
                        if Self::is_null_value(value) {
                            RawValue::Missing
                        } else {
                            RawValue::text(value.trim())
                        }
                    })
                    .collect();
                RawColumn::new(header.clone(), cells)
            })
            .collect();

        Dataset::new(name, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_value() {
        for token in ["", "  ", "NA", "na", "N/A", "null", "NULL", "None", "nil", ".", "-", "NaN"] {
            assert!(DataTable::is_null_value(token), "{:?}", token);
        }
        for value in ["value", "0", "-1", "n"] {
            assert!(!DataTable::is_null_value(value), "{:?}", value);
        }
    }

    #[test]
    fn test_to_dataset() {
        let table = DataTable::new(
            vec!["name".to_string(), "age".to_string()],
            vec![
                vec!["Ana".to_string(), "25".to_string()],
                vec!["Bruno".to_string(), "NA".to_string()],
            ],
            b',',
        );
        let dataset = table.to_dataset("people");
        assert_eq!(dataset.name, "people");
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.row_count(), 2);

        let age = dataset.column("age").unwrap();
        assert_eq!(age.cells[0], RawValue::text("25"));
        assert_eq!(age.cells[1], RawValue::Missing);
    }

    #[test]
    fn test_metadata_file_name() {
        let metadata = SourceMetadata::new(
            PathBuf::from("/data/survey.csv"),
            "sha256:00".to_string(),
            10,
            "csv".to_string(),
            2,
            3,
        );
        assert_eq!(metadata.file, "survey.csv");
    }
}
