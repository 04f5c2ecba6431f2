use camino::{Utf8Path, Utf8PathBuf};
use sarifmatch_domain::{SarifReport, StructuralError};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ReportLoadError {
    #[error("read report {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse report {path}: {source}")]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Read and parse a report file into a generic JSON value.
pub fn read_report_json(path: &Utf8Path) -> Result<Value, ReportLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ReportLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a report file and project it onto the report model.
pub fn load_report(path: &Utf8Path) -> Result<SarifReport, ReportLoadError> {
    let value = read_report_json(path)?;
    let report = SarifReport::from_value(&value)?;
    debug!(
        %path,
        runs = report.runs().len(),
        results = report.result_count(),
        "loaded report"
    );
    Ok(report)
}
