//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Single-line and multi-line region arithmetic
//! - Out-of-range lines and columns always failing
//! - The leading-whitespace rule
//! - Traversal order and parallel/sequential agreement

use crate::engine::correlate_with;
use crate::error::CorrelationError;
use crate::model::{CodeFlow, Region, SarifReport, SarifResult, SarifRun, SourceLocation, ThreadFlow};
use crate::policy::Execution;
use crate::region::extract_region;
use crate::test_support::{MemoryTree, location};
use crate::validate::starts_with_whitespace;
use proptest::prelude::*;
use sarifmatch_types::RepoPath;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Lines of a source file, each ending with `\n`.
fn arb_lines(min: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ a-zA-Z0-9_(){};.=\"\té]{0,30}", min..12)
        .prop_map(|ls| ls.into_iter().map(|l| format!("{l}\n")).collect())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn region(sl: usize, el: usize, sc: usize, ec: usize) -> Region {
    Region::new(sl as u32, el as u32, sc as u32, ec as u32).expect("valid region")
}

/// A file plus a single-line region that fits inside it.
fn arb_single_line_case() -> impl Strategy<Value = (Vec<String>, Region)> {
    arb_lines(1)
        .prop_flat_map(|lines| {
            let n = lines.len();
            (Just(lines), 0..n)
        })
        .prop_flat_map(|(lines, idx)| {
            let len = char_len(&lines[idx]);
            (Just(lines), Just(idx), 1..=len)
        })
        .prop_flat_map(|(lines, idx, ec)| (Just(lines), Just(idx), Just(ec), 1..=ec))
        .prop_map(|(lines, idx, ec, sc)| (lines, region(idx + 1, idx + 1, sc, ec)))
}

/// A file plus a multi-line region that fits inside it.
fn arb_multi_line_case() -> impl Strategy<Value = (Vec<String>, Region)> {
    arb_lines(2)
        .prop_flat_map(|lines| {
            let n = lines.len();
            (Just(lines), 0..n - 1)
        })
        .prop_flat_map(|(lines, first)| {
            let n = lines.len();
            (Just(lines), Just(first), first + 1..n)
        })
        .prop_flat_map(|(lines, first, last)| {
            let first_len = char_len(&lines[first]);
            let last_len = char_len(&lines[last]);
            (
                Just(lines),
                Just(first),
                Just(last),
                1..=first_len,
                1..=last_len,
            )
        })
        .prop_map(|(lines, first, last, sc, ec)| (lines, region(first + 1, last + 1, sc, ec)))
}

fn arb_region() -> impl Strategy<Value = Region> {
    (1u32..15, 0u32..3, 1u32..40, 1u32..40)
        .prop_map(|(sl, extra, sc, ec)| Region::new(sl, sl + extra, sc, ec).expect("valid region"))
}

/// Locations over `src/F0.java`..`src/F3.java`; `F3` is never present in the tree.
fn arb_location() -> impl Strategy<Value = SourceLocation> {
    (0usize..4, arb_region())
        .prop_map(|(file, region)| SourceLocation::new(RepoPath::new(format!("src/F{file}.java")), region))
}

fn arb_report() -> impl Strategy<Value = SarifReport> {
    let result = (
        prop::collection::vec(arb_location(), 0..4),
        prop::collection::vec(prop::collection::vec(arb_location(), 0..4), 0..3),
    )
        .prop_map(|(direct, flows)| {
            let flows = flows
                .into_iter()
                .map(|locs| CodeFlow::new(vec![ThreadFlow::new(locs)]))
                .collect();
            SarifResult::new(direct, flows)
        });
    prop::collection::vec(prop::collection::vec(result, 0..4), 0..3)
        .prop_map(|runs| SarifReport::new(runs.into_iter().map(SarifRun::new).collect()))
}

fn arb_tree() -> impl Strategy<Value = MemoryTree> {
    prop::collection::vec(arb_lines(1), 3).prop_map(|files| {
        files
            .iter()
            .enumerate()
            .fold(MemoryTree::default(), |tree, (i, lines)| {
                tree.with_file(&format!("src/F{i}.java"), &lines.concat())
            })
    })
}

fn path() -> RepoPath {
    RepoPath::new("src/Gen.java")
}

// ============================================================================
// Region arithmetic
// ============================================================================

proptest! {
    /// A single-line region yields exactly `endColumn - (startColumn - 1)` characters.
    #[test]
    fn single_line_length_matches_columns((lines, region) in arb_single_line_case()) {
        let text = extract_region(&path(), &lines, region).expect("in range");
        let expected = (region.end_column() - (region.start_column() - 1)) as usize;
        prop_assert_eq!(char_len(&text), expected);
    }

    /// A multi-line region is the whole intermediate lines plus the head of the
    /// last line, minus the first `startColumn - 1` characters.
    #[test]
    fn multi_line_concatenates_whole_lines((lines, region) in arb_multi_line_case()) {
        let first = region.start_line() as usize - 1;
        let last = region.end_line() as usize - 1;

        let mut flat: String = lines[first..last].concat();
        flat.extend(lines[last].chars().take(region.end_column() as usize));
        let expected: String = flat.chars().skip(region.start_column() as usize - 1).collect();

        let text = extract_region(&path(), &lines, region).expect("in range");
        prop_assert_eq!(text, expected);
    }

    /// End lines past the file always fail with a line range error.
    #[test]
    fn end_line_past_file_always_fails(
        lines in arb_lines(1),
        extra in 1u32..5,
        back in 0u32..3,
        sc in 1u32..10,
        ec in 1u32..10,
    ) {
        let end_line = lines.len() as u32 + extra;
        let start_line = end_line.saturating_sub(back).max(1);
        let region = Region::new(start_line, end_line, sc, ec).expect("valid region");

        let is_line_range = matches!(
            extract_region(&path(), &lines, region),
            Err(CorrelationError::LineRange { .. })
        );
        prop_assert!(is_line_range);
    }

    /// End columns past the last line always fail with a column range error.
    #[test]
    fn end_column_past_line_always_fails(
        (lines, region) in prop_oneof![arb_single_line_case(), arb_multi_line_case()],
        overshoot in 1u32..20,
    ) {
        let last = &lines[region.end_line() as usize - 1];
        let too_far = char_len(last) as u32 + overshoot;
        let region = Region::new(
            region.start_line(),
            region.end_line(),
            region.start_column(),
            too_far,
        )
        .expect("valid region");

        let is_column_range = matches!(
            extract_region(&path(), &lines, region),
            Err(CorrelationError::ColumnRange { .. })
        );
        prop_assert!(is_column_range);
    }
}

// ============================================================================
// Validator
// ============================================================================

proptest! {
    #[test]
    fn leading_whitespace_is_rejected(
        lead in prop_oneof![
            Just(' '),
            Just('\t'),
            Just('\n'),
            Just('\r'),
            Just('\u{a0}'),
            Just('\u{1c}'),
            Just('\u{1f}'),
        ],
        rest in "[a-zA-Z0-9 ();]{0,20}",
    ) {
        let text = format!("{lead}{rest}");
        prop_assert!(starts_with_whitespace(&text));
    }

    #[test]
    fn token_start_is_accepted(
        lead in "[a-zA-Z0-9_(\"@]",
        rest in "[a-zA-Z0-9 ();]{0,20}",
    ) {
        let text = format!("{lead}{rest}");
        prop_assert!(!starts_with_whitespace(&text));
    }
}

// ============================================================================
// Correlation driver
// ============================================================================

proptest! {
    /// Locations come out run by run, result by result, direct before traced.
    #[test]
    fn traversal_preserves_document_order(
        shape in prop::collection::vec(
            prop::collection::vec((0usize..4, prop::collection::vec(0usize..4, 0..3)), 0..4),
            0..3,
        ),
    ) {
        let mut next = 0u32;
        let mut take = || {
            next += 1;
            location("src/Order.java", next, next, 1, 1)
        };

        let runs = shape
            .iter()
            .map(|results| {
                SarifRun::new(
                    results
                        .iter()
                        .map(|(direct, flows)| {
                            let direct = (0..*direct).map(|_| take()).collect();
                            let flows = flows
                                .iter()
                                .map(|n| CodeFlow::new(vec![ThreadFlow::new((0..*n).map(|_| take()).collect())]))
                                .collect();
                            SarifResult::new(direct, flows)
                        })
                        .collect(),
                )
            })
            .collect();
        let report = SarifReport::new(runs);

        let lines: Vec<u32> = report.locations().map(|l| l.region().start_line()).collect();
        let expected: Vec<u32> = (1..=next).collect();
        prop_assert_eq!(lines, expected);
    }

    /// Parallel execution reaches the same snippets or the same first error.
    #[test]
    fn parallel_matches_sequential(tree in arb_tree(), report in arb_report()) {
        let sequential = correlate_with(&tree, &report, Execution::Sequential)
            .map_err(|e| e.to_string());
        let parallel = correlate_with(&tree, &report, Execution::Parallel)
            .map_err(|e| e.to_string());
        prop_assert_eq!(sequential, parallel);
    }
}
