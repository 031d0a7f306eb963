//! Main Varstat struct and public API.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{Result, VarstatError};
use crate::inference::{
    DEFAULT_CARDINALITY_THRESHOLD, DEFAULT_NUMERIC_MAJORITY, NumericNormalizer, TypeClassifier,
    VariableStrategy,
};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::model::{Dataset, DatasetSummary, RawColumn, VariableAnalysis};
use crate::stats::{MAX_CLASS_COUNT, VarianceKind};
use crate::stats::interpret::DEFAULT_SYMMETRY_TOLERANCE;

/// Configuration for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Share of numeric values from which a column is numeric (0.0-1.0).
    pub numeric_majority_threshold: f64,
    /// Distinct-value count from which integral columns are continuous.
    pub cardinality_threshold: usize,
    /// Number of classes for continuous columns, at most 1000 (None = Sturges' rule).
    pub bin_count: Option<usize>,
    /// Relative tolerance for mean ≈ median.
    pub symmetry_tolerance: f64,
    /// Variance denominator.
    pub variance: VarianceKind,
    /// Accept decimal-comma notations.
    pub decimal_comma: bool,
    /// Ordered categories per column name.
    pub ordinal_hints: IndexMap<String, Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            numeric_majority_threshold: DEFAULT_NUMERIC_MAJORITY,
            cardinality_threshold: DEFAULT_CARDINALITY_THRESHOLD,
            bin_count: None,
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
            variance: VarianceKind::default(),
            decimal_comma: true,
            ordinal_hints: IndexMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| VarstatError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Add an ordering hint for a column.
    pub fn with_ordinal_hint<S: Into<String>>(
        mut self,
        column: impl Into<String>,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        self.ordinal_hints.insert(
            column.into(),
            categories.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.numeric_majority_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(VarstatError::Config(format!(
                "numeric_majority_threshold must be between 0 and 1, got {}",
                threshold
            )));
        }
        if self.cardinality_threshold == 0 {
            return Err(VarstatError::Config(
                "cardinality_threshold must be at least 1".to_string(),
            ));
        }
        if let Some(bins) = self.bin_count {
            if bins == 0 || bins > MAX_CLASS_COUNT {
                return Err(VarstatError::Config(format!(
                    "bin_count must be between 1 and {}, got {}",
                    MAX_CLASS_COUNT, bins
                )));
            }
        }
        if !self.symmetry_tolerance.is_finite() || self.symmetry_tolerance < 0.0 {
            return Err(VarstatError::Config(format!(
                "symmetry_tolerance must be a non-negative number, got {}",
                self.symmetry_tolerance
            )));
        }
        for (column, categories) in &self.ordinal_hints {
            if categories.is_empty() {
                return Err(VarstatError::Config(format!(
                    "ordering hint for '{}' has no categories",
                    column
                )));
            }
            let mut seen = HashSet::new();
            if let Some(duplicate) = categories.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(VarstatError::Config(format!(
                    "ordering hint for '{}' repeats category '{}'",
                    column, duplicate
                )));
            }
        }
        Ok(())
    }
}

/// Source metadata together with the analysis of a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Per-column analysis.
    pub summary: DatasetSummary,
}

/// The main analysis engine.
pub struct Varstat {
    config: AnalysisConfig,
    parser: Parser,
}

impl Varstat {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            parser: Parser::new(),
        }
    }

    /// Use a custom parser configuration for file analysis.
    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every column of a dataset.
    ///
    /// Fails only for an invalid configuration. A column that cannot be
    /// analysed yields a failed record and the remaining columns continue.
    #[instrument(skip(self, dataset), fields(dataset = %dataset.name, columns = dataset.column_count()))]
    pub fn analyze_dataset(&self, dataset: &Dataset) -> Result<DatasetSummary> {
        self.config.validate()?;

        let variables = dataset
            .columns
            .iter()
            .enumerate()
            .map(|(position, column)| {
                self.analyze_column(column, position).unwrap_or_else(|e| {
                    warn!(column = %column.name, error = %e, "column analysis failed");
                    VariableAnalysis::failed(&column.name, position, column.len(), e.to_string())
                })
            })
            .collect();

        Ok(DatasetSummary {
            name: dataset.name.clone(),
            row_count: dataset.row_count(),
            variables,
        })
    }

    /// Analyze a single column: normalize, classify, dispatch.
    pub fn analyze_column(&self, column: &RawColumn, position: usize) -> Result<VariableAnalysis> {
        let cleaned = NumericNormalizer::new()
            .with_decimal_comma(self.config.decimal_comma)
            .clean(column);
        let hint = self
            .config
            .ordinal_hints
            .get(&column.name)
            .map(Vec::as_slice);

        let classification = TypeClassifier::from_config(&self.config).classify(&cleaned, hint)?;
        let record = VariableStrategy::new(&self.config).analyze(
            &cleaned,
            position,
            &classification,
            hint,
        )?;

        debug!(
            column = %record.name,
            variable_type = ?classification.variable_type,
            values = record.value_count,
            missing = record.missing_count,
            "analysed column"
        );
        Ok(record)
    }

    /// Parse a delimited file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<FileAnalysis> {
        let path = path.as_ref();
        let (table, source) = self.parser.parse_file(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.file.clone());
        let summary = self.analyze_dataset(&table.to_dataset(name))?;
        Ok(FileAnalysis { source, summary })
    }
}

impl Default for Varstat {
    fn default() -> Self {
        Self::new()
    }
}
