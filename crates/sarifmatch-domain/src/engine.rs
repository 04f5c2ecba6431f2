use crate::error::CorrelationError;
use crate::model::{SarifReport, SourceLocation};
use crate::policy::Execution;
use crate::region::extract_region;
use crate::snippet::ResolvedSnippet;
use crate::validate::validate;
use rayon::prelude::*;
use sarifmatch_types::RepoPath;
use std::sync::Arc;

/// Hands out the lines of files under a project root.
///
/// Lines keep their terminators. Implementations may cache; callers never
/// mutate what they get back.
pub trait SourceTree {
    fn read_lines(&self, path: &RepoPath) -> std::io::Result<Arc<[String]>>;
}

impl<T: SourceTree + ?Sized> SourceTree for &T {
    fn read_lines(&self, path: &RepoPath) -> std::io::Result<Arc<[String]>> {
        (**self).read_lines(path)
    }
}

/// What happened to one location when every location is resolved.
#[derive(Debug)]
pub struct LocationOutcome {
    pub location: SourceLocation,
    pub result: Result<ResolvedSnippet, CorrelationError>,
}

/// Read, extract and validate a single location.
pub fn resolve<T: SourceTree + ?Sized>(
    tree: &T,
    location: &SourceLocation,
) -> Result<ResolvedSnippet, CorrelationError> {
    let path = location.path();
    let lines = tree
        .read_lines(path)
        .map_err(|source| CorrelationError::Io {
            path: path.clone(),
            source,
        })?;
    let text = extract_region(path, &lines, location.region())?;
    let snippet = ResolvedSnippet::new(path.clone(), location.region(), text);
    validate(&snippet)?;
    Ok(snippet)
}

/// Resolve every location in traversal order, stopping at the first error.
pub fn correlate<T: SourceTree + ?Sized>(
    tree: &T,
    report: &SarifReport,
) -> Result<Vec<ResolvedSnippet>, CorrelationError> {
    report.locations().map(|l| resolve(tree, l)).collect()
}

/// Like [`correlate`], optionally on the rayon pool.
///
/// In parallel mode every location is resolved and the earliest error in
/// traversal order is returned, so both modes agree on the outcome.
pub fn correlate_with<T: SourceTree + Sync + ?Sized>(
    tree: &T,
    report: &SarifReport,
    execution: Execution,
) -> Result<Vec<ResolvedSnippet>, CorrelationError> {
    match execution {
        Execution::Sequential => correlate(tree, report),
        Execution::Parallel => {
            let locations: Vec<&SourceLocation> = report.locations().collect();
            let outcomes: Vec<Result<ResolvedSnippet, CorrelationError>> = locations
                .par_iter()
                .map(|l| resolve(tree, *l))
                .collect();
            outcomes.into_iter().collect()
        }
    }
}

/// Resolve every location and keep each outcome, in traversal order.
pub fn audit<T: SourceTree + Sync + ?Sized>(
    tree: &T,
    report: &SarifReport,
    execution: Execution,
) -> Vec<LocationOutcome> {
    let outcome = |location: &SourceLocation| LocationOutcome {
        location: location.clone(),
        result: resolve(tree, location),
    };

    match execution {
        Execution::Sequential => report.locations().map(outcome).collect(),
        Execution::Parallel => {
            let locations: Vec<&SourceLocation> = report.locations().collect();
            locations.par_iter().map(|l| outcome(*l)).collect()
        }
    }
}
