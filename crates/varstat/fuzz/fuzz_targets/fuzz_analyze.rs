//! Fuzz target for the full analysis pipeline.
//!
//! Feeds arbitrary cell text through normalization, classification and
//! every statistic. Analysis of a parsed table must always succeed with
//! the default configuration.

#![no_main]

use libfuzzer_sys::fuzz_target;
use varstat::{Dataset, RawColumn, RawValue, Varstat};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let cells: Vec<RawValue> = content
            .split(['\n', ';'])
            .map(|cell| {
                if cell.is_empty() {
                    RawValue::Missing
                } else {
                    RawValue::text(cell)
                }
            })
            .collect();

        let dataset = Dataset::new("fuzz", vec![RawColumn::new("col", cells)]);
        let summary = Varstat::new()
            .analyze_dataset(&dataset)
            .expect("default configuration is valid");

        for record in &summary.variables {
            if !record.frequency.is_empty() {
                assert!((record.frequency.relative_sum() - 1.0).abs() < 1e-9);
            }
        }
    }
});
