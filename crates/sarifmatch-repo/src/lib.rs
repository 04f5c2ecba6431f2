//! Repository adapters: read source lines, load reports, clone and check out repositories.
//!
//! This crate is allowed to do filesystem IO and to spawn `git`. Everything it
//! hands to the domain crate goes through [`sarifmatch_domain::SourceTree`] or a
//! parsed [`sarifmatch_domain::SarifReport`].

#![forbid(unsafe_code)]

mod checkout;
mod lines;
mod report;
mod tree;

pub use checkout::{
    CheckoutError, CloneOutcome, checkout_commit, clone_repository, project_dir_for,
    validate_repo_url,
};
pub use lines::{read_lines_from_file, split_lines};
pub use report::{ReportLoadError, load_report, read_report_json};
pub use tree::FsSourceTree;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use sarifmatch_domain::{Region, SarifReport, region::extract_region};
    use sarifmatch_types::RepoPath;

    /// Parse arbitrary text as a SARIF report and walk every location.
    ///
    /// Returns `Ok(location_count)` when the text is a well-formed report,
    /// `Err(...)` otherwise. **Never panics** on any input.
    pub fn parse_report(text: &str) -> anyhow::Result<usize> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let report = SarifReport::from_value(&value)?;
        Ok(report.locations().count())
    }

    /// Resolve a region against arbitrary file content.
    ///
    /// Returns `Err(...)` for invalid regions and out-of-range coordinates.
    /// **Never panics** on any input.
    pub fn resolve_region(
        content: &str,
        start_line: u32,
        end_line: u32,
        start_column: u32,
        end_column: u32,
    ) -> anyhow::Result<String> {
        let region = Region::new(start_line, end_line, start_column, end_column)?;
        let lines = super::split_lines(content);
        Ok(extract_region(&RepoPath::new("fuzz.txt"), &lines, region)?)
    }
}
