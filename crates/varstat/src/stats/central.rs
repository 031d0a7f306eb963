//! Measures of central tendency.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frequency::FrequencyTable;
use super::separatrix::quantile;
use crate::model::number_key;

/// The most frequent value of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mode {
    /// Numeric mode, ungrouped or interpolated.
    Value(f64),
    /// Category mode.
    Category(String),
}

impl Mode {
    /// The numeric mode, if this is one.
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Mode::Value(v) => Some(*v),
            Mode::Category(_) => None,
        }
    }

    /// The category mode, if this is one.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Mode::Value(_) => None,
            Mode::Category(c) => Some(c),
        }
    }
}

/// Mean, median and mode. Absent entries do not apply to the variable type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralTendency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Median category of ordered categorical data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_category: Option<String>,
}

impl CentralTendency {
    /// Mode only, for categorical data.
    pub fn categorical<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            mode: mode_label(labels).map(Mode::Category),
            ..Self::default()
        }
    }

    /// Mean, median and ungrouped mode.
    pub fn numeric(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
            mode: mode_value(values).map(Mode::Value),
            median_category: None,
        }
    }

    /// Mean, median and the interpolated mode of grouped data.
    pub fn grouped(values: &[f64], table: &FrequencyTable) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
            mode: grouped_mode(table).map(Mode::Value),
            median_category: None,
        }
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Most frequent label. Ties go to the label seen first.
pub fn mode_label<S: AsRef<str>>(labels: &[S]) -> Option<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }
    first_max(counts).map(str::to_string)
}

/// Most frequent value. Ties go to the value seen first.
pub fn mode_value(values: &[f64]) -> Option<f64> {
    let mut counts: IndexMap<u64, (f64, usize)> = IndexMap::new();
    for &value in values {
        counts.entry(number_key(value)).or_insert((value, 0)).1 += 1;
    }
    first_max(counts.into_values())
}

/// Interpolated mode of grouped data: `L + h * d1 / (d1 + d2)`.
///
/// Uses the first class with the highest count. `d1` and `d2` are the count
/// differences to the preceding and following class; a missing neighbour
/// counts as zero. A flat neighbourhood (`d1 + d2 == 0`) yields the midpoint.
pub fn grouped_mode(table: &FrequencyTable) -> Option<f64> {
    let counts: Vec<usize> = table.iter().map(|e| e.absolute).collect();
    let index = first_max(counts.iter().copied().enumerate())?;
    let modal = counts[index];
    if modal == 0 {
        return None;
    }
    let class = table.entries[index].class?;

    let before = if index > 0 { counts[index - 1] } else { 0 };
    let after = counts.get(index + 1).copied().unwrap_or(0);
    let d1 = modal as f64 - before as f64;
    let d2 = modal as f64 - after as f64;

    if d1 + d2 == 0.0 {
        return Some(class.midpoint());
    }
    Some(class.lower + class.width() * (d1 / (d1 + d2)))
}

/// Key with the highest count; the earliest one wins ties.
fn first_max<K>(counts: impl IntoIterator<Item = (K, usize)>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        if best.as_ref().is_none_or(|(_, b)| count > *b) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}
