//! Pure report-to-source correlation (no IO).
//!
//! Input: a parsed report and a [`SourceTree`] that hands out file lines.
//! Output: the ordered resolved snippets, or the first mismatch.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod policy;
pub mod region;
pub mod snippet;
pub mod validate;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{LocationOutcome, SourceTree, audit, correlate, correlate_with, resolve};
pub use error::{CorrelationError, StructuralError};
pub use model::{CodeFlow, Region, SarifReport, SarifResult, SarifRun, SourceLocation, ThreadFlow};
pub use snippet::ResolvedSnippet;
