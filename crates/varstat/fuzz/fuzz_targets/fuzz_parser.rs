//! Fuzz target for the delimited text parser.
//!
//! The parser must never panic on malformed input, whatever delimiter
//! detection decides.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;
use varstat::Parser;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes(data) {
        let _ = table.to_dataset("fuzz");
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let _ = parser.parse_file(temp_file.path());
        }
    }
});
