//! Use case orchestration for sarifmatch.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod failure;
mod receipt;
mod render;
mod verify;

pub use explain::{
    ExplainOutput, ExplainedIdentifier, IdentifierKind, format_explanation, format_not_found,
    run_explain,
};
pub use failure::{VerifyFailure, fingerprint};
pub use receipt::{parse_receipt_json, runtime_error_receipt, serialize_receipt, to_renderable};
pub use render::{render_annotations, render_markdown, render_snippet_lines};
pub use verify::{
    LocalInput, VerifyInput, VerifyOutput, run_local, run_verify, verdict_exit_code,
};
