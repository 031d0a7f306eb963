//! Fuzz target for numeric normalization.
//!
//! Checks that the normalizer never panics and that every number it
//! produces is finite.

#![no_main]

use libfuzzer_sys::fuzz_target;
use varstat::{Normalized, NumericNormalizer};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(raw) = std::str::from_utf8(data) {
        for normalizer in [
            NumericNormalizer::new(),
            NumericNormalizer::new().with_decimal_comma(false),
        ] {
            if let Normalized::Number { value, .. } = normalizer.normalize(raw) {
                assert!(value.is_finite());
            }
        }
    }
});
