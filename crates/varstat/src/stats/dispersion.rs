//! Measures of dispersion.

use serde::{Deserialize, Serialize};

use super::central::mean;
use super::frequency::min_max;
use super::separatrix::{quantile_sorted, sorted_copy};

/// Denominator convention for variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceKind {
    /// Mean of squared deviations (divide by n).
    #[default]
    Population,
    /// Unbiased estimator (divide by n - 1).
    Sample,
}

/// Range, variance, standard deviation, IQR and coefficient of variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionSummary {
    pub range: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub iqr: f64,
    /// Coefficient of variation in percent. Absent when the mean is zero.
    pub cv: Option<f64>,
    pub variance_kind: VarianceKind,
}

impl DispersionSummary {
    /// Compute dispersion of the values. `None` with fewer than two values.
    pub fn compute(values: &[f64], kind: VarianceKind) -> Option<Self> {
        let variance = variance(values, kind)?;
        let std_dev = variance.sqrt();
        let sorted = sorted_copy(values);
        let iqr = quantile_sorted(&sorted, 0.75)? - quantile_sorted(&sorted, 0.25)?;

        Some(Self {
            range: range(values)?,
            variance,
            std_dev,
            iqr,
            cv: coefficient_of_variation(std_dev, mean(values)?),
            variance_kind: kind,
        })
    }
}

/// Variance with the given denominator. `None` with fewer than two values.
pub fn variance(values: &[f64], kind: VarianceKind) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let denominator = match kind {
        VarianceKind::Population => values.len(),
        VarianceKind::Sample => values.len() - 1,
    };
    Some(squared / denominator as f64)
}

/// Standard deviation with the given denominator.
pub fn std_dev(values: &[f64], kind: VarianceKind) -> Option<f64> {
    variance(values, kind).map(f64::sqrt)
}

/// Maximum minus minimum.
pub fn range(values: &[f64]) -> Option<f64> {
    min_max(values).map(|(min, max)| max - min)
}

/// `(std_dev / mean) * 100`. Not applicable when the mean is zero.
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> Option<f64> {
    if mean == 0.0 {
        None
    } else {
        Some(std_dev / mean * 100.0)
    }
}
