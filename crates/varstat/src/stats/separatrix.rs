//! Separatrices: quartiles, deciles and percentiles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value at fraction `p` (0.0-1.0) of sorted data.
///
/// Linear interpolation between the order statistics around rank `p * (n - 1)`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * fraction)
}

/// Value at fraction `p` of unsorted data.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    quantile_sorted(&sorted_copy(values), p)
}

pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quartiles Q1-Q3, deciles D1-D9 and percentiles P1-P99.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparatrixSet {
    pub quartiles: IndexMap<String, f64>,
    pub deciles: IndexMap<String, f64>,
    pub percentiles: IndexMap<String, f64>,
}

impl SeparatrixSet {
    /// Compute every separatrix of the given values. `None` when empty.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);

        Some(Self {
            quartiles: dividers(&sorted, "Q", 4),
            deciles: dividers(&sorted, "D", 10),
            percentiles: dividers(&sorted, "P", 100),
        })
    }

    /// Quartile `k` (1-3).
    pub fn quartile(&self, k: usize) -> Option<f64> {
        self.quartiles.get(&format!("Q{}", k)).copied()
    }

    /// Decile `k` (1-9).
    pub fn decile(&self, k: usize) -> Option<f64> {
        self.deciles.get(&format!("D{}", k)).copied()
    }

    /// Percentile `k` (1-99).
    pub fn percentile(&self, k: usize) -> Option<f64> {
        self.percentiles.get(&format!("P{}", k)).copied()
    }

    /// Interquartile range, Q3 - Q1.
    pub fn iqr(&self) -> Option<f64> {
        Some(self.quartile(3)? - self.quartile(1)?)
    }
}

/// The `parts - 1` dividers splitting sorted data into `parts` groups.
fn dividers(sorted: &[f64], prefix: &str, parts: usize) -> IndexMap<String, f64> {
    (1..parts)
        .filter_map(|k| {
            let p = k as f64 / parts as f64;
            quantile_sorted(sorted, p).map(|v| (format!("{}{}", prefix, k), v))
        })
        .collect()
}
