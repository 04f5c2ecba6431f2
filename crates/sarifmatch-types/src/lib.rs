//! Stable DTOs and IDs used across the sarifmatch workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted receipt
//! - stable string IDs and codes
//! - canonical repo-relative path handling
//! - the one-line snippet format
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;
pub mod snippet;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    Finding, Location, MatchData, MatchReceipt, RunGit, RunMeta, SCHEMA_RECEIPT_V1,
    SnippetRecord, ToolMeta, Verdict,
};
pub use snippet::format_snippet_line;
