//! Statistical function library.
//!
//! Stateless routines over non-missing values. Every function returns an
//! absent result instead of failing when its prerequisites are not met.

pub mod central;
pub mod dispersion;
pub mod frequency;
pub mod interpret;
pub mod separatrix;

pub use central::{CentralTendency, Mode};
pub use dispersion::{DispersionSummary, VarianceKind};
pub use frequency::{
    ClassInterval, FrequencyEntry, FrequencyTable, MAX_CLASS_COUNT, sturges_class_count,
};
pub use interpret::{DispersionClass, Interpretation, Shape};
pub use separatrix::SeparatrixSet;
