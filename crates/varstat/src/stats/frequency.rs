//! Frequency tables: absolute, relative and cumulative counts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::format_number;

/// Upper bound on the number of classes of a grouped table.
pub const MAX_CLASS_COUNT: usize = 1000;

/// A class interval of grouped continuous data.
///
/// Every class is closed at its lower bound. Only the last class of a table
/// is also closed at its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassInterval {
    pub lower: f64,
    pub upper: f64,
    pub closed_upper: bool,
}

impl ClassInterval {
    /// Class width.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Class midpoint.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Check whether a value falls in this class.
    pub fn contains(&self, value: f64) -> bool {
        if self.closed_upper {
            value >= self.lower && value <= self.upper
        } else {
            value >= self.lower && value < self.upper
        }
    }

    /// Interval notation, e.g. `[1.50, 2.25)`.
    pub fn label(&self) -> String {
        let close = if self.closed_upper { ']' } else { ')' };
        format!("[{:.2}, {:.2}{}", self.lower, self.upper, close)
    }
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// Category, value, or class label.
    pub label: String,
    /// Class bounds for grouped data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassInterval>,
    /// Absolute count.
    pub absolute: usize,
    /// Proportion of non-missing observations (0.0-1.0).
    pub relative: f64,
    /// Running proportion in table order (0.0-1.0).
    pub cumulative: f64,
}

/// Frequency distribution over non-missing observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub entries: Vec<FrequencyEntry>,
    /// Number of observations counted.
    pub total: usize,
}

impl FrequencyTable {
    /// Build a table from rows already in their final order.
    fn from_counts(rows: Vec<(String, Option<ClassInterval>, usize)>) -> Self {
        let total: usize = rows.iter().map(|(_, _, count)| count).sum();
        let mut running = 0usize;

        let entries = rows
            .into_iter()
            .map(|(label, class, absolute)| {
                running += absolute;
                let (relative, cumulative) = if total == 0 {
                    (0.0, 0.0)
                } else {
                    (
                        absolute as f64 / total as f64,
                        running as f64 / total as f64,
                    )
                };
                FrequencyEntry {
                    label,
                    class,
                    absolute,
                    relative,
                    cumulative,
                }
            })
            .collect();

        Self { entries, total }
    }

    /// Unordered categories: descending count, ties by first appearance.
    pub fn categorical<S: AsRef<str>>(labels: &[S]) -> Self {
        let counts = count_in_appearance_order(labels);
        let mut rows: Vec<(String, Option<ClassInterval>, usize)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), None, count))
            .collect();
        // Stable sort keeps first-appearance order among equal counts.
        rows.sort_by(|a, b| b.2.cmp(&a.2));
        Self::from_counts(rows)
    }

    /// Ordered categories in the given order, zero-count categories included.
    ///
    /// Labels not present in `order` are ignored; callers count them separately.
    pub fn ordered<S: AsRef<str>>(labels: &[S], order: &[String]) -> Self {
        let counts = count_in_appearance_order(labels);
        let rows = order
            .iter()
            .map(|category| {
                let count = counts.get(category.as_str()).copied().unwrap_or(0);
                (category.clone(), None, count)
            })
            .collect();
        Self::from_counts(rows)
    }

    /// Ungrouped numeric values in ascending value order.
    pub fn discrete(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut rows: Vec<(String, Option<ClassInterval>, usize)> = Vec::new();
        let mut previous: Option<f64> = None;
        for value in sorted {
            if let Some(last) = rows.last_mut().filter(|_| previous == Some(value)) {
                last.2 += 1;
            } else {
                rows.push((format_number(value), None, 1));
            }
            previous = Some(value);
        }

        Self::from_counts(rows)
    }

    /// Numeric values grouped into `class_count` equal-width classes.
    ///
    /// `class_count` is capped at [`MAX_CLASS_COUNT`].
    pub fn grouped(values: &[f64], class_count: usize) -> Self {
        let classes = match (min_max(values), class_count.min(MAX_CLASS_COUNT)) {
            (Some((min, max)), k) if k > 0 => class_intervals(min, max, k),
            _ => return Self::default(),
        };

        let mut counts = vec![0usize; classes.len()];
        for &value in values {
            counts[class_index(&classes, value)] += 1;
        }

        let rows = classes
            .into_iter()
            .zip(counts)
            .map(|(class, count)| (class.label(), Some(class), count))
            .collect();
        Self::from_counts(rows)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }

    /// Look up a row by label.
    pub fn get(&self, label: &str) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Sum of relative proportions; 1.0 for any non-empty table.
    pub fn relative_sum(&self) -> f64 {
        self.entries.iter().map(|e| e.relative).sum()
    }

    /// Relative proportions as percentages, keyed by label in table order.
    pub fn percentages(&self) -> IndexMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.label.clone(), e.relative * 100.0))
            .collect()
    }
}

/// Class count from Sturges' rule: `ceil(log2(n) + 1)`.
pub fn sturges_class_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    ((n as f64).log2() + 1.0).ceil() as usize
}

/// Split `[min, max]` into `k` equal-width classes.
///
/// A zero range yields a single closed class `[min, max]`.
pub fn class_intervals(min: f64, max: f64, k: usize) -> Vec<ClassInterval> {
    let range = max - min;
    if k <= 1 || range <= 0.0 {
        return vec![ClassInterval {
            lower: min,
            upper: max,
            closed_upper: true,
        }];
    }

    let width = range / k as f64;
    (0..k)
        .map(|i| {
            let last = i == k - 1;
            ClassInterval {
                lower: min + width * i as f64,
                upper: if last { max } else { min + width * (i + 1) as f64 },
                closed_upper: last,
            }
        })
        .collect()
}

/// Index of the class holding `value`. Values past the last bound land in it.
fn class_index(classes: &[ClassInterval], value: f64) -> usize {
    let last = classes.len() - 1;
    classes[..last]
        .iter()
        .position(|c| value < c.upper)
        .unwrap_or(last)
}

/// Minimum and maximum of a slice.
pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn count_in_appearance_order<S: AsRef<str>>(labels: &[S]) -> IndexMap<&str, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }
    counts
}
