//! Delimited text parser with delimiter detection.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, VarstatError};

/// Delimiters tried when auto-detecting, in order of preference.
const DELIMITERS: &[u8] = &[b';', b',', b'\t', b'|'];

/// Lines inspected by delimiter detection.
const DETECTION_LINES: usize = 10;

/// Spreadsheet and columnar formats that are not delimited text.
const BINARY_EXTENSIONS: &[&str] = &["xlsx", "xls", "ods", "parquet"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the first row holds column names.
    pub has_header: bool,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads delimited text files into a [`DataTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
                return Err(VarstatError::UnsupportedFormat(format!(
                    "{} (export the sheet as CSV first)",
                    ext
                )));
            }
        }

        let contents = fs::read(path).map_err(|e| VarstatError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.delimiter_for(&contents)?;
        let table = self.read_table(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            path = %path.display(),
            delimiter = %(delimiter as char).escape_default(),
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed file"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse in-memory bytes.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let delimiter = self.delimiter_for(bytes)?;
        self.read_table(bytes, delimiter)
    }

    fn delimiter_for(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => Ok(d),
            None => detect_delimiter(bytes),
        }
    }

    fn read_table(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();
        let first = match records.next() {
            Some(record) => record?,
            None => return Err(VarstatError::EmptyData("No data rows found".to_string())),
        };

        let (headers, mut rows): (Vec<String>, Vec<Vec<String>>) = if self.config.has_header {
            (first.iter().map(|s| s.trim().to_string()).collect(), Vec::new())
        } else {
            (
                (0..first.len()).map(|i| format!("column_{}", i + 1)).collect(),
                vec![first.iter().map(str::to_string).collect()],
            )
        };

        if headers.is_empty() {
            return Err(VarstatError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        for result in records {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        rows.truncate(self.config.max_rows.unwrap_or(usize::MAX));

        for row in &mut rows {
            row.resize(expected_cols, String::new());
        }

        if rows.is_empty() {
            return Err(VarstatError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the delimiter whose count is most consistent over the first lines.
///
/// A delimiter absent from the first line is never chosen, so a header such
/// as `name;height` keeps decimal commas in the data from winning.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(DETECTION_LINES)
        .collect();

    if lines.is_empty() {
        return Err(VarstatError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance =
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64;

        let score = if consistent {
            first_count * 1000
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        // Strictly greater: earlier delimiters win ties.
        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, outside double quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
