//! Fuzz target for region extraction.
//!
//! Goal: extraction should **never panic**, whatever the file content and
//! coordinates. Out-of-range regions must come back as errors, and a
//! single-line result is never longer than the columns it spans.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_region_resolver
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RegionInput {
    content: String,
    start_line: u32,
    end_line: u32,
    start_column: u32,
    end_column: u32,
}

fuzz_target!(|input: RegionInput| {
    let result = sarifmatch_repo::fuzz::resolve_region(
        &input.content,
        input.start_line,
        input.end_line,
        input.start_column,
        input.end_column,
    );

    if let Ok(text) = result {
        if input.start_line == input.end_line {
            let span = input.end_column.saturating_sub(input.start_column.saturating_sub(1));
            assert!(text.chars().count() <= span as usize);
        }
    }
});
