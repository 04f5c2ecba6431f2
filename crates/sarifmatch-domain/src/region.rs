//! Region-to-text extraction.
//!
//! Lines keep their terminators, and every length below is a character count
//! of the line *including* its terminator. For multi-line regions the lines
//! are concatenated and the end offset is carried forward line by line: full
//! lengths for every line before the last, then `endColumn` for the last one.

use crate::error::CorrelationError;
use crate::model::Region;
use sarifmatch_types::RepoPath;

/// Return the exact text `region` denotes inside `lines`.
///
/// Fails with [`CorrelationError::LineRange`] when the file is shorter than
/// `endLine`, and with [`CorrelationError::ColumnRange`] when the final line is
/// shorter than `endColumn`. Never returns partial text.
pub fn extract_region(
    path: &RepoPath,
    lines: &[String],
    region: Region,
) -> Result<String, CorrelationError> {
    let end_line = region.end_line() as usize;
    if lines.len() < end_line {
        return Err(CorrelationError::LineRange {
            path: path.clone(),
            available_lines: lines.len(),
            requested_end_line: region.end_line(),
        });
    }

    let first = region.start_line() as usize - 1;
    let last = end_line - 1;
    let skip = region.start_column() as usize - 1;

    if region.is_single_line() {
        let line = &lines[first];
        check_line_length(path, first, line, region.end_column())?;
        return Ok(slice_chars(line, skip, region.end_column() as usize));
    }

    let mut buffer = String::new();
    let mut end = 0usize;
    for (index, line) in lines.iter().enumerate().take(end_line).skip(first) {
        buffer.push_str(line);
        if index == last {
            check_line_length(path, index, line, region.end_column())?;
            end += region.end_column() as usize;
            break;
        }
        end += line.chars().count();
    }

    Ok(slice_chars(&buffer, skip, end))
}

fn check_line_length(
    path: &RepoPath,
    line_index: usize,
    line: &str,
    end_column: u32,
) -> Result<(), CorrelationError> {
    let line_length = line.chars().count();
    if line_length < end_column as usize {
        return Err(CorrelationError::ColumnRange {
            path: path.clone(),
            line_index,
            line_length,
            requested_end_column: end_column,
        });
    }
    Ok(())
}

/// Characters `[start, end)` of `text`, clamped: empty when `start >= end`.
pub fn slice_chars(text: &str, start: usize, end: usize) -> String {
    if start >= end {
        return String::new();
    }
    text.chars().skip(start).take(end - start).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{lines, startup_listener_lines};

    fn region(sl: u32, el: u32, sc: u32, ec: u32) -> Region {
        Region::new(sl, el, sc, ec).expect("valid region")
    }

    fn path() -> RepoPath {
        RepoPath::new("src/StartupListener.java")
    }

    #[test]
    fn single_line_region_is_inclusive_of_end_column() {
        let text = extract_region(&path(), &startup_listener_lines(), region(13, 13, 17, 35))
            .expect("resolve");
        assert_eq!(text, "contextInitialized(");
    }

    #[test]
    fn multi_line_region_keeps_intermediate_lines_whole() {
        let text = extract_region(&path(), &startup_listener_lines(), region(13, 15, 17, 74))
            .expect("resolve");
        assert_eq!(
            text,
            "contextInitialized(ServletContextEvent sce) {\n        try {\n            ServletUtil.initializeAppProperties(sce.getServletContext());\n"
        );
    }

    #[test]
    fn end_line_past_file_is_line_range_error() {
        let lines = startup_listener_lines();
        for r in [region(1000, 1000, 17, 35), region(1000, 1100, 17, 74)] {
            match extract_region(&path(), &lines, r) {
                Err(CorrelationError::LineRange {
                    available_lines,
                    requested_end_line,
                    ..
                }) => {
                    assert_eq!(available_lines, lines.len());
                    assert_eq!(requested_end_line, r.end_line());
                }
                other => panic!("expected line range error, got {other:?}"),
            }
        }
    }

    #[test]
    fn end_column_past_line_is_column_range_error() {
        let lines = startup_listener_lines();
        match extract_region(&path(), &lines, region(13, 13, 1000, 1100)) {
            Err(CorrelationError::ColumnRange {
                line_index,
                line_length,
                requested_end_column,
                ..
            }) => {
                assert_eq!(line_index, 12);
                assert_eq!(line_length, lines[12].chars().count());
                assert_eq!(requested_end_column, 1100);
            }
            other => panic!("expected column range error, got {other:?}"),
        }

        match extract_region(&path(), &lines, region(13, 15, 1000, 1100)) {
            Err(CorrelationError::ColumnRange { line_index, .. }) => assert_eq!(line_index, 14),
            other => panic!("expected column range error, got {other:?}"),
        }
    }

    #[test]
    fn equal_columns_yield_one_character() {
        let text = extract_region(&path(), &lines(&["abcdef\n"]), region(1, 1, 3, 3))
            .expect("resolve");
        assert_eq!(text, "c");
    }

    #[test]
    fn start_past_end_yields_empty_text() {
        let text = extract_region(&path(), &lines(&["abcdef\n"]), region(1, 1, 5, 2))
            .expect("resolve");
        assert_eq!(text, "");
    }

    #[test]
    fn end_column_may_cover_the_terminator() {
        let text = extract_region(&path(), &lines(&["ab\n", "cd\n"]), region(1, 1, 1, 3))
            .expect("resolve");
        assert_eq!(text, "ab\n");
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let text = extract_region(&path(), &lines(&["// é café\n"]), region(1, 1, 6, 9))
            .expect("resolve");
        assert_eq!(text, "café");
    }

    #[test]
    fn multi_line_start_column_may_reach_into_later_lines() {
        // start column beyond line one still indexes the concatenated buffer
        let text = extract_region(&path(), &lines(&["ab\n", "cdef\n"]), region(1, 2, 5, 3))
            .expect("resolve");
        assert_eq!(text, "de");
    }

    #[test]
    fn slice_chars_clamps() {
        assert_eq!(slice_chars("abc", 1, 10), "bc");
        assert_eq!(slice_chars("abc", 3, 3), "");
        assert_eq!(slice_chars("abc", 7, 2), "");
    }
}
