//! Per-type selection of statistics.
//!
//! | type       | statistics                                                        |
//! |------------|-------------------------------------------------------------------|
//! | Nominal    | frequency, mode                                                   |
//! | Ordinal    | frequency in category order, mode, median category, separatrices  |
//! | Binary     | frequency, mode, proportions                                      |
//! | Discrete   | frequency, mean/median/mode, separatrices, dispersion             |
//! | Continuous | class frequency, mean/median/grouped mode, separatrices, dispersion, interpretation |

use std::collections::HashSet;

use tracing::{trace, warn};

use super::heuristics::Classification;
use crate::engine::AnalysisConfig;
use crate::error::{Result, VarstatError};
use crate::model::{CleanedColumn, Value, VariableAnalysis, VariableType, number_key};
use crate::stats::{
    CentralTendency, DispersionSummary, FrequencyTable, Interpretation, Mode, SeparatrixSet,
    central, sturges_class_count,
};

/// Runs the statistics that apply to a classified column.
pub struct VariableStrategy<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> VariableStrategy<'a> {
    /// Create a strategy dispatcher bound to a configuration.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Build the analysis record for a column.
    ///
    /// Fails when a statistic overflows the finite `f64` range.
    pub fn analyze(
        &self,
        column: &CleanedColumn,
        position: usize,
        classification: &Classification,
        ordering_hint: Option<&[String]>,
    ) -> Result<VariableAnalysis> {
        let variable_type = classification.variable_type;
        let mut record = VariableAnalysis::new(&column.name, position, variable_type, column.len());
        record.distinct_count = classification.distinct_count;
        record.converted_count = column.converted_count;

        match variable_type {
            VariableType::Nominal => self.nominal(column, &mut record),
            VariableType::Binary => self.binary(column, &mut record),
            VariableType::Ordinal => self.ordinal(column, ordering_hint.unwrap_or(&[]), &mut record),
            VariableType::Discrete => self.discrete(column, &mut record),
            VariableType::Continuous => self.continuous(column, &mut record),
        }

        ensure_finite(&record)?;
        record.missing_count = record.total_count - record.value_count;
        Ok(record)
    }

    fn nominal(&self, column: &CleanedColumn, record: &mut VariableAnalysis) {
        let labels = labels(column);
        record.value_count = labels.len();
        record.malformed_count = column.malformed_cells();
        record.frequency = FrequencyTable::categorical(&labels);
        record.central = CentralTendency::categorical(&labels);
    }

    fn binary(&self, column: &CleanedColumn, record: &mut VariableAnalysis) {
        self.nominal(column, record);
        record.proportions = Some(record.frequency.percentages());
    }

    fn ordinal(&self, column: &CleanedColumn, order: &[String], record: &mut VariableAnalysis) {
        let (known, unknown): (Vec<String>, Vec<String>) = labels(column)
            .into_iter()
            .partition(|label| order.contains(label));

        if !unknown.is_empty() {
            warn!(
                column = %column.name,
                count = unknown.len(),
                "values outside the ordering hint treated as missing"
            );
        }

        record.value_count = known.len();
        record.malformed_count = unknown.len() + column.malformed_cells();
        record.frequency = FrequencyTable::ordered(&known, order);

        // 1-based category ranks drive the median and the separatrices.
        let ranks: Vec<f64> = known
            .iter()
            .filter_map(|label| order.iter().position(|c| c == label))
            .map(|rank| (rank + 1) as f64)
            .collect();

        record.central = CentralTendency {
            mode: central::mode_label(&known).map(Mode::Category),
            median_category: central::median(&ranks)
                .and_then(|median| order.get(median.floor() as usize - 1).cloned()),
            ..CentralTendency::default()
        };

        if distinct_numbers(&ranks) >= 2 {
            record.separatrices = SeparatrixSet::compute(&ranks);
        }
    }

    fn discrete(&self, column: &CleanedColumn, record: &mut VariableAnalysis) {
        let values = numbers(column, record);
        record.frequency = FrequencyTable::discrete(&values);
        record.central = CentralTendency::numeric(&values);
        self.spread(&values, record);
        record.values = values;
    }

    fn continuous(&self, column: &CleanedColumn, record: &mut VariableAnalysis) {
        let values = numbers(column, record);
        let class_count = self
            .config
            .bin_count
            .unwrap_or_else(|| sturges_class_count(values.len()));

        record.frequency = FrequencyTable::grouped(&values, class_count);
        record.central = CentralTendency::grouped(&values, &record.frequency);
        self.spread(&values, record);

        if let (Some(dispersion), Some(mean), Some(median)) = (
            &record.dispersion,
            record.central.mean,
            record.central.median,
        ) {
            record.interpretation = Some(Interpretation::new(
                dispersion.cv,
                mean,
                median,
                self.config.symmetry_tolerance,
            ));
        }
        record.values = values;
    }

    /// Separatrices and dispersion; both need at least two distinct values.
    fn spread(&self, values: &[f64], record: &mut VariableAnalysis) {
        if distinct_numbers(values) < 2 {
            return;
        }
        record.separatrices = SeparatrixSet::compute(values);
        record.dispersion = DispersionSummary::compute(values, self.config.variance);
    }
}

/// Category labels of present cells, in row order.
fn labels(column: &CleanedColumn) -> Vec<String> {
    column.values.iter().filter_map(Value::label).collect()
}

/// Numeric cells in row order. Other present cells are rejected as malformed.
fn numbers(column: &CleanedColumn, record: &mut VariableAnalysis) -> Vec<f64> {
    let mut values = Vec::with_capacity(column.len());
    for (row, value) in column.values.iter().enumerate() {
        match value {
            Value::Number(n) => values.push(*n),
            Value::Text(text) | Value::Malformed(text) => {
                trace!(column = %column.name, row, value = %text, "malformed numeric cell");
                record.malformed_count += 1;
            }
            Value::Missing => {}
        }
    }
    record.value_count = values.len();
    values
}

/// Reject records holding NaN or infinite statistics.
fn ensure_finite(record: &VariableAnalysis) -> Result<()> {
    let central = &record.central;
    let mut checks: Vec<(&str, f64)> = Vec::new();
    checks.extend(central.mean.map(|v| ("mean", v)));
    checks.extend(central.median.map(|v| ("median", v)));
    checks.extend(central.mode.as_ref().and_then(Mode::as_value).map(|v| ("mode", v)));

    for class in record.frequency.iter().filter_map(|e| e.class) {
        checks.push(("class bound", class.lower));
        checks.push(("class bound", class.upper));
    }
    if let Some(separatrices) = &record.separatrices {
        let all = separatrices
            .quartiles
            .values()
            .chain(separatrices.deciles.values())
            .chain(separatrices.percentiles.values());
        checks.extend(all.map(|v| ("separatrix", *v)));
    }
    if let Some(dispersion) = &record.dispersion {
        checks.push(("range", dispersion.range));
        checks.push(("variance", dispersion.variance));
        checks.push(("standard deviation", dispersion.std_dev));
        checks.push(("interquartile range", dispersion.iqr));
        checks.extend(dispersion.cv.map(|v| ("coefficient of variation", v)));
    }

    match checks.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((statistic, _)) => Err(VarstatError::NonFinite {
            column: record.name.clone(),
            statistic: statistic.to_string(),
        }),
        None => Ok(()),
    }
}

fn distinct_numbers(values: &[f64]) -> usize {
    values.iter().map(|v| number_key(*v)).collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{NumericNormalizer, TypeClassifier};
    use crate::model::{RawColumn, RawValue};

    fn run(cells: &[&str], hint: Option<&[String]>) -> VariableAnalysis {
        run_with(&AnalysisConfig::default(), cells, hint)
    }

    fn run_with(config: &AnalysisConfig, cells: &[&str], hint: Option<&[String]>) -> VariableAnalysis {
        let raw = RawColumn::new(
            "col",
            cells
                .iter()
                .map(|c| if c.is_empty() { RawValue::Missing } else { RawValue::text(*c) })
                .collect(),
        );
        let column = NumericNormalizer::new().clean(&raw);
        let classification = TypeClassifier::from_config(config)
            .classify(&column, hint)
            .unwrap();
        VariableStrategy::new(config)
            .analyze(&column, 0, &classification, hint)
            .unwrap()
    }

    #[test]
    fn test_nominal_has_frequency_and_mode_only() {
        let record = run(&["a", "b", "c", "a"], None);
        assert_eq!(record.variable_type, Some(VariableType::Nominal));
        assert_eq!(record.frequency.len(), 3);
        assert_eq!(record.central.mode, Some(Mode::Category("a".to_string())));
        assert!(record.central.mean.is_none());
        assert!(record.proportions.is_none());
        assert!(record.separatrices.is_none());
        assert!(record.dispersion.is_none());
        assert!(record.interpretation.is_none());
        assert!(record.values.is_empty());
    }

    #[test]
    fn test_binary_proportions() {
        let record = run(&["sim", "sim", "não"], None);
        assert_eq!(record.variable_type, Some(VariableType::Binary));
        let proportions = record.proportions.unwrap();
        assert!((proportions["sim"] - 66.666_666_666_666_67).abs() < 1e-9);
        assert!((proportions["não"] - 33.333_333_333_333_33).abs() < 1e-9);
        assert!(record.separatrices.is_none());
        assert!(record.dispersion.is_none());
    }

    #[test]
    fn test_ordinal_median_category_and_unknown_values() {
        let order: Vec<String> = ["low", "mid", "high"].iter().map(|s| s.to_string()).collect();
        let record = run(&["low", "high", "mid", "mid", "huge", ""], Some(&order));
        assert_eq!(record.variable_type, Some(VariableType::Ordinal));
        assert_eq!(record.value_count, 4);
        assert_eq!(record.malformed_count, 1);
        assert_eq!(record.missing_count, 2);
        assert_eq!(record.central.median_category.as_deref(), Some("mid"));
        assert_eq!(record.central.mode, Some(Mode::Category("mid".to_string())));
        let labels: Vec<&str> = record.frequency.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["low", "mid", "high"]);
        assert_eq!(record.separatrices.unwrap().quartile(2), Some(2.0));
        assert!(record.dispersion.is_none());
    }

    #[test]
    fn test_discrete_full_battery() {
        let record = run(&["25", "30", "25", "40"], None);
        assert_eq!(record.variable_type, Some(VariableType::Discrete));
        assert_eq!(record.central.mean, Some(30.0));
        assert_eq!(record.central.median, Some(27.5));
        assert_eq!(record.central.mode, Some(Mode::Value(25.0)));
        assert!(record.separatrices.is_some());
        assert!(record.dispersion.is_some());
        assert!(record.interpretation.is_none());
        assert_eq!(record.values, vec![25.0, 30.0, 25.0, 40.0]);
    }

    #[test]
    fn test_continuous_full_battery() {
        let cells: Vec<String> = (0..20).map(|i| format!("{},5", i)).collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        let record = run(&cells, None);
        assert_eq!(record.variable_type, Some(VariableType::Continuous));
        assert_eq!(record.converted_count, 20);
        // ceil(log2(20) + 1) = 6
        assert_eq!(record.frequency.len(), 6);
        assert!(record.frequency.iter().all(|e| e.class.is_some()));
        assert!(record.central.mode.as_ref().and_then(Mode::as_value).is_some());
        assert!(record.separatrices.is_some());
        assert!(record.dispersion.is_some());
        let interpretation = record.interpretation.unwrap();
        assert_eq!(interpretation.shape, crate::stats::Shape::Symmetric);
    }

    #[test]
    fn test_bin_count_override() {
        let config = AnalysisConfig {
            bin_count: Some(3),
            ..AnalysisConfig::default()
        };
        let cells: Vec<String> = (0..20).map(|i| format!("{}.25", i)).collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        let record = run_with(&config, &cells, None);
        assert_eq!(record.frequency.len(), 3);
    }

    #[test]
    fn test_malformed_cells_count_as_missing_in_numeric_columns() {
        let record = run(&["1", "2", "3", "1,2,3", ""], None);
        assert_eq!(record.variable_type, Some(VariableType::Discrete));
        assert_eq!(record.value_count, 3);
        assert_eq!(record.malformed_count, 1);
        assert_eq!(record.missing_count, 2);
        assert_eq!(record.frequency.total, 3);
    }

    #[test]
    fn test_malformed_cell_absent_from_categories() {
        let record = run(&["5", "5", "5", "1,2,3"], None);
        assert_eq!(record.variable_type, Some(VariableType::Discrete));
        assert_eq!(record.frequency.len(), 1);
        assert!(record.frequency.get("1,2,3").is_none());
        assert_eq!(record.malformed_count, 1);
        assert_eq!(record.missing_count, 1);

        let record = run(&["0", "1", "0", "1", "1,234"], None);
        assert_eq!(record.variable_type, Some(VariableType::Binary));
        assert_eq!(record.frequency.len(), 2);
        assert_eq!(record.value_count, 4);
        assert_eq!(record.malformed_count, 1);
        assert_eq!(record.missing_count, 1);
    }

    #[test]
    fn test_overflowing_statistics_rejected() {
        let mut cells: Vec<String> = (0..40).map(|i| format!("{}e306", i)).collect();
        cells.push("-1.7e308".to_string());
        cells.push("1.7e308".to_string());
        let raw = RawColumn::new("huge", cells.iter().map(RawValue::text).collect());

        let config = AnalysisConfig::default();
        let column = NumericNormalizer::new().clean(&raw);
        let classification = TypeClassifier::from_config(&config)
            .classify(&column, None)
            .unwrap();
        assert_eq!(classification.variable_type, VariableType::Continuous);

        let err = VariableStrategy::new(&config)
            .analyze(&column, 0, &classification, None)
            .unwrap_err();
        assert!(matches!(err, VarstatError::NonFinite { ref column, .. } if column == "huge"));
    }

    #[test]
    fn test_single_distinct_value_has_no_spread() {
        let record = run(&["7", "7", "7"], None);
        assert_eq!(record.variable_type, Some(VariableType::Discrete));
        assert_eq!(record.central.mean, Some(7.0));
        assert!(record.separatrices.is_none());
        assert!(record.dispersion.is_none());
    }

    #[test]
    fn test_all_missing_column() {
        let record = run(&["", "", ""], None);
        assert_eq!(record.variable_type, Some(VariableType::Nominal));
        assert!(record.frequency.is_empty());
        assert_eq!(record.missing_count, 3);
        assert!(record.central.mode.is_none());
    }
}
