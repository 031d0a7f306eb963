//! Automatic interpretation of dispersion and distribution shape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// CV below this percentage reads as homogeneous.
pub const HOMOGENEOUS_CV_LIMIT: f64 = 15.0;

/// CV at or above this percentage reads as heterogeneous.
pub const HETEROGENEOUS_CV_LIMIT: f64 = 30.0;

/// Default relative tolerance for treating mean and median as equal.
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 0.01;

/// Dispersion class from the coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispersionClass {
    Homogeneous,
    ModerateDispersion,
    Heterogeneous,
}

impl DispersionClass {
    /// Classify a CV given in percent.
    pub fn from_cv(cv: f64) -> Self {
        if cv < HOMOGENEOUS_CV_LIMIT {
            DispersionClass::Homogeneous
        } else if cv < HETEROGENEOUS_CV_LIMIT {
            DispersionClass::ModerateDispersion
        } else {
            DispersionClass::Heterogeneous
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DispersionClass::Homogeneous => "homogeneous",
            DispersionClass::ModerateDispersion => "moderate dispersion",
            DispersionClass::Heterogeneous => "heterogeneous",
        }
    }
}

impl fmt::Display for DispersionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distribution shape from comparing mean and median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Symmetric,
    PositiveSkew,
    NegativeSkew,
}

impl Shape {
    /// Compare mean and median within a relative tolerance.
    pub fn from_mean_median(mean: f64, median: f64, tolerance: f64) -> Self {
        let scale = mean.abs().max(median.abs());
        if (mean - median).abs() <= tolerance * scale {
            Shape::Symmetric
        } else if mean > median {
            Shape::PositiveSkew
        } else {
            Shape::NegativeSkew
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Symmetric => "symmetric",
            Shape::PositiveSkew => "positive skew",
            Shape::NegativeSkew => "negative skew",
        }
    }

    fn relation(&self) -> &'static str {
        match self {
            Shape::Symmetric => "mean ≈ median",
            Shape::PositiveSkew => "mean > median",
            Shape::NegativeSkew => "mean < median",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Textual reading of a numeric distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Absent when the CV is not applicable.
    pub dispersion: Option<DispersionClass>,
    pub shape: Shape,
    pub text: String,
}

impl Interpretation {
    /// Interpret a CV (percent) and the mean/median relation.
    pub fn new(cv: Option<f64>, mean: f64, median: f64, tolerance: f64) -> Self {
        let dispersion = cv.map(DispersionClass::from_cv);
        let shape = Shape::from_mean_median(mean, median, tolerance);

        let dispersion_text = match (cv, dispersion) {
            (Some(cv), Some(class)) => format!("CV = {:.2}%: {}", cv, class),
            _ => "CV not applicable (mean = 0)".to_string(),
        };
        let text = format!("{}; {}: {}", dispersion_text, shape.relation(), shape);

        Self {
            dispersion,
            shape,
            text,
        }
    }
}
