//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_INPUT_ARGUMENTS: &str = "input.arguments";
pub const CHECK_REPO_CHECKOUT: &str = "repo.checkout";
pub const CHECK_REPORT_STRUCTURE: &str = "report.structure";
pub const CHECK_REGION_BOUNDS: &str = "region.bounds";
pub const CHECK_SPAN_CONTENT: &str = "span.content";
pub const CHECK_SOURCE_FILES: &str = "source.files";

// Codes: input.arguments
pub const CODE_REPORT_NOT_FOUND: &str = "report_not_found";
pub const CODE_UNSUPPORTED_REPO_URL: &str = "unsupported_repo_url";
pub const CODE_PROJECT_DIR_NOT_FOUND: &str = "project_dir_not_found";

// Codes: repo.checkout
pub const CODE_CLONE_FAILED: &str = "clone_failed";
pub const CODE_CHECKOUT_FAILED: &str = "checkout_failed";

// Codes: report.structure
pub const CODE_UNREADABLE_REPORT: &str = "unreadable_report";
pub const CODE_MALFORMED_REPORT: &str = "malformed_report";

// Codes: region.bounds
pub const CODE_LINE_OUT_OF_RANGE: &str = "line_out_of_range";
pub const CODE_COLUMN_OUT_OF_RANGE: &str = "column_out_of_range";

// Codes: span.content
pub const CODE_LEADING_WHITESPACE: &str = "leading_whitespace";

// Codes: source.files
pub const CODE_FILE_UNREADABLE: &str = "file_unreadable";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

/// Every code, grouped under the check that raises it.
pub const CODES_BY_CHECK: &[(&str, &[&str])] = &[
    (
        CHECK_INPUT_ARGUMENTS,
        &[
            CODE_REPORT_NOT_FOUND,
            CODE_UNSUPPORTED_REPO_URL,
            CODE_PROJECT_DIR_NOT_FOUND,
        ],
    ),
    (CHECK_REPO_CHECKOUT, &[CODE_CLONE_FAILED, CODE_CHECKOUT_FAILED]),
    (
        CHECK_REPORT_STRUCTURE,
        &[CODE_UNREADABLE_REPORT, CODE_MALFORMED_REPORT],
    ),
    (
        CHECK_REGION_BOUNDS,
        &[CODE_LINE_OUT_OF_RANGE, CODE_COLUMN_OUT_OF_RANGE],
    ),
    (CHECK_SPAN_CONTENT, &[CODE_LEADING_WHITESPACE]),
    (CHECK_SOURCE_FILES, &[CODE_FILE_UNREADABLE]),
    (CHECK_TOOL_RUNTIME, &[CODE_RUNTIME_ERROR]),
];

/// Codes raised under `check_id`; empty for an unknown check.
pub fn codes_for_check(check_id: &str) -> &'static [&'static str] {
    CODES_BY_CHECK
        .iter()
        .find(|(check, _)| *check == check_id)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}

/// The check that raises `code`.
pub fn check_for_code(code: &str) -> Option<&'static str> {
    CODES_BY_CHECK
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|(check, _)| *check)
}
