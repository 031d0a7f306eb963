//! Human-readable reports.

mod markdown;

pub use markdown::{DEFAULT_MAX_FREQUENCY_ROWS, MarkdownReport};
