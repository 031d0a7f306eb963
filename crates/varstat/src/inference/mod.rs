//! Cleaning, classification and per-type dispatch of columns.

mod heuristics;
mod normalize;
mod strategy;

pub use heuristics::{
    Classification, DEFAULT_CARDINALITY_THRESHOLD, DEFAULT_NUMERIC_MAJORITY, TypeClassifier,
};
pub use normalize::{Normalized, Notation, NumericNormalizer};
pub use strategy::VariableStrategy;
