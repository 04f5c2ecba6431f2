//! Read-only view over the nested SARIF report shape.
//!
//! Only the keys correlation needs are modeled; everything else in the report
//! (tool metadata, messages, fingerprints, properties) is ignored on parse.
//! Both location flavors (a result's direct `locations[]` and the
//! `threadFlows[].locations[].location` entries of a code flow) normalize to
//! [`SourceLocation`] here, so nothing downstream knows which one it came from.

use crate::error::StructuralError;
use sarifmatch_types::RepoPath;
use serde::Deserialize;
use serde_json::Value;

/// A 1-indexed line/column span. Both column bounds are inclusive and
/// relative to their own line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct Region {
    start_line: u32,
    end_line: u32,
    start_column: u32,
    end_column: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegion {
    start_line: u32,
    end_line: u32,
    start_column: u32,
    end_column: u32,
}

impl TryFrom<RawRegion> for Region {
    type Error = String;

    fn try_from(raw: RawRegion) -> Result<Self, Self::Error> {
        Region::new(raw.start_line, raw.end_line, raw.start_column, raw.end_column)
            .map_err(|err| err.message)
    }
}

impl Region {
    pub fn new(
        start_line: u32,
        end_line: u32,
        start_column: u32,
        end_column: u32,
    ) -> Result<Self, StructuralError> {
        if start_line == 0 || end_line == 0 || start_column == 0 || end_column == 0 {
            return Err(StructuralError::new(format!(
                "region coordinates are 1-indexed, got {start_line}:{start_column}-{end_line}:{end_column}"
            )));
        }
        if start_line > end_line {
            return Err(StructuralError::new(format!(
                "region start line {start_line} is after end line {end_line}"
            )));
        }
        Ok(Self {
            start_line,
            end_line,
            start_column,
            end_column,
        })
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    pub fn start_column(&self) -> u32 {
        self.start_column
    }

    pub fn end_column(&self) -> u32 {
        self.end_column
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }
}

/// A file (relative to the project root, as written in the report) plus a region.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawLocation")]
pub struct SourceLocation {
    path: RepoPath,
    region: Region,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    physical_location: RawPhysicalLocation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPhysicalLocation {
    artifact_location: RawArtifactLocation,
    region: Region,
}

#[derive(Deserialize)]
struct RawArtifactLocation {
    uri: String,
}

impl From<RawLocation> for SourceLocation {
    fn from(raw: RawLocation) -> Self {
        SourceLocation::new(
            RepoPath::new(raw.physical_location.artifact_location.uri),
            raw.physical_location.region,
        )
    }
}

impl SourceLocation {
    pub fn new(path: RepoPath, region: Region) -> Self {
        Self { path, region }
    }

    pub fn path(&self) -> &RepoPath {
        &self.path
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

/// One ordered trace of locations inside a code flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawThreadFlow")]
pub struct ThreadFlow {
    locations: Vec<SourceLocation>,
}

#[derive(Deserialize)]
struct RawThreadFlow {
    #[serde(default)]
    locations: Vec<RawThreadFlowLocation>,
}

#[derive(Deserialize)]
struct RawThreadFlowLocation {
    location: SourceLocation,
}

impl From<RawThreadFlow> for ThreadFlow {
    fn from(raw: RawThreadFlow) -> Self {
        ThreadFlow::new(raw.locations.into_iter().map(|l| l.location).collect())
    }
}

impl ThreadFlow {
    pub fn new(locations: Vec<SourceLocation>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFlow {
    #[serde(default)]
    thread_flows: Vec<ThreadFlow>,
}

impl CodeFlow {
    pub fn new(thread_flows: Vec<ThreadFlow>) -> Self {
        Self { thread_flows }
    }

    pub fn thread_flows(&self) -> &[ThreadFlow] {
        &self.thread_flows
    }
}

/// One finding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(default)]
    locations: Vec<SourceLocation>,
    #[serde(default)]
    code_flows: Vec<CodeFlow>,
}

impl SarifResult {
    pub fn new(locations: Vec<SourceLocation>, code_flows: Vec<CodeFlow>) -> Self {
        Self {
            locations,
            code_flows,
        }
    }

    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }

    pub fn code_flows(&self) -> &[CodeFlow] {
        &self.code_flows
    }

    /// Direct locations first, then every thread-flow location in order.
    pub fn all_locations(&self) -> impl Iterator<Item = &SourceLocation> + '_ {
        self.locations.iter().chain(
            self.code_flows
                .iter()
                .flat_map(|cf| cf.thread_flows.iter())
                .flat_map(|tf| tf.locations.iter()),
        )
    }
}

/// `results` is required on every run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SarifRun {
    results: Vec<SarifResult>,
}

impl SarifRun {
    pub fn new(results: Vec<SarifResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[SarifResult] {
        &self.results
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SarifReport {
    #[serde(default)]
    runs: Vec<SarifRun>,
}

impl SarifReport {
    pub fn new(runs: Vec<SarifRun>) -> Self {
        Self { runs }
    }

    /// Project a parsed JSON document onto the report model.
    pub fn from_value(value: &Value) -> Result<Self, StructuralError> {
        Ok(SarifReport::deserialize(value)?)
    }

    pub fn runs(&self) -> &[SarifRun] {
        &self.runs
    }

    pub fn result_count(&self) -> usize {
        self.runs.iter().map(|r| r.results.len()).sum()
    }

    /// Every referenced location in traversal order: run, result, then the
    /// result's direct locations followed by its code-flow locations.
    pub fn locations(&self) -> impl Iterator<Item = &SourceLocation> + '_ {
        self.runs
            .iter()
            .flat_map(|run| run.results.iter())
            .flat_map(|result| result.all_locations())
    }
}
