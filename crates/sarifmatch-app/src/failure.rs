use camino::Utf8PathBuf;
use sarifmatch_domain::CorrelationError;
use sarifmatch_repo::{CheckoutError, ReportLoadError};
use sarifmatch_types::{Finding, Location, RepoPath, ids};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

/// Everything that turns a run into a "no match".
#[derive(Debug, thiserror::Error)]
pub enum VerifyFailure {
    #[error("The provided report: '{path}' does not exist.")]
    ReportNotFound { path: Utf8PathBuf },

    #[error("The project directory: '{path}' does not exist.")]
    ProjectDirNotFound { path: Utf8PathBuf },

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Report(#[from] ReportLoadError),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

impl VerifyFailure {
    pub fn check_id(&self) -> &'static str {
        match self {
            VerifyFailure::ReportNotFound { .. } | VerifyFailure::ProjectDirNotFound { .. } => {
                ids::CHECK_INPUT_ARGUMENTS
            }
            VerifyFailure::Checkout(CheckoutError::InvalidRepoUrl { .. }) => {
                ids::CHECK_INPUT_ARGUMENTS
            }
            VerifyFailure::Checkout(_) => ids::CHECK_REPO_CHECKOUT,
            VerifyFailure::Report(_) => ids::CHECK_REPORT_STRUCTURE,
            VerifyFailure::Correlation(err) => err.check_id(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VerifyFailure::ReportNotFound { .. } => ids::CODE_REPORT_NOT_FOUND,
            VerifyFailure::ProjectDirNotFound { .. } => ids::CODE_PROJECT_DIR_NOT_FOUND,
            VerifyFailure::Checkout(CheckoutError::InvalidRepoUrl { .. }) => {
                ids::CODE_UNSUPPORTED_REPO_URL
            }
            VerifyFailure::Checkout(CheckoutError::CloneFailed { .. }) => ids::CODE_CLONE_FAILED,
            VerifyFailure::Checkout(CheckoutError::CheckoutFailed { .. }) => {
                ids::CODE_CHECKOUT_FAILED
            }
            VerifyFailure::Report(ReportLoadError::Structural(_)) => ids::CODE_MALFORMED_REPORT,
            VerifyFailure::Report(_) => ids::CODE_UNREADABLE_REPORT,
            VerifyFailure::Correlation(err) => err.code(),
        }
    }

    fn location(&self) -> Option<Location> {
        let at = |path: &str, line: Option<u32>, col: Option<u32>| Location {
            path: RepoPath::new(path),
            line,
            col,
        };

        match self {
            VerifyFailure::ReportNotFound { path } | VerifyFailure::ProjectDirNotFound { path } => {
                Some(at(path.as_str(), None, None))
            }
            VerifyFailure::Report(
                ReportLoadError::Read { path, .. } | ReportLoadError::Json { path, .. },
            ) => Some(at(path.as_str(), None, None)),
            VerifyFailure::Correlation(err) => match err {
                CorrelationError::LineRange {
                    path,
                    requested_end_line,
                    ..
                } => Some(at(path.as_str(), Some(*requested_end_line), None)),
                CorrelationError::ColumnRange {
                    path,
                    line_index,
                    requested_end_column,
                    ..
                } => Some(at(
                    path.as_str(),
                    u32::try_from(line_index + 1).ok(),
                    Some(*requested_end_column),
                )),
                CorrelationError::InvalidContent { path, region, .. } => Some(at(
                    path.as_str(),
                    Some(region.start_line()),
                    Some(region.start_column()),
                )),
                CorrelationError::Io { path, .. } => Some(at(path.as_str(), None, None)),
                CorrelationError::Structural(_) => None,
            },
            VerifyFailure::Report(ReportLoadError::Structural(_)) | VerifyFailure::Checkout(_) => {
                None
            }
        }
    }

    fn data(&self) -> Value {
        match self {
            VerifyFailure::Checkout(CheckoutError::InvalidRepoUrl { url, .. })
            | VerifyFailure::Checkout(CheckoutError::CloneFailed { url, .. }) => {
                json!({ "repo_url": url })
            }
            VerifyFailure::Checkout(CheckoutError::CheckoutFailed { commit, .. }) => {
                json!({ "commit": commit })
            }
            VerifyFailure::Correlation(CorrelationError::LineRange {
                available_lines,
                requested_end_line,
                ..
            }) => json!({
                "available_lines": available_lines,
                "requested_end_line": requested_end_line,
            }),
            VerifyFailure::Correlation(CorrelationError::ColumnRange {
                line_index,
                line_length,
                requested_end_column,
                ..
            }) => json!({
                "line_index": line_index,
                "line_length": line_length,
                "requested_end_column": requested_end_column,
            }),
            VerifyFailure::Correlation(CorrelationError::InvalidContent { region, text, .. }) => {
                json!({
                    "region": {
                        "start_line": region.start_line(),
                        "end_line": region.end_line(),
                        "start_column": region.start_column(),
                        "end_column": region.end_column(),
                    },
                    "text": text,
                })
            }
            VerifyFailure::Correlation(CorrelationError::Io { source, .. }) => {
                json!({ "io_kind": source.kind().to_string() })
            }
            _ => Value::Null,
        }
    }

    pub fn to_finding(&self) -> Finding {
        let location = self.location();
        let check_id = self.check_id();
        let code = self.code();
        let fingerprint = fingerprint(
            check_id,
            code,
            location.as_ref().map(|l| l.path.as_str()),
            location.as_ref().and_then(|l| l.line),
        );

        Finding {
            check_id: check_id.to_string(),
            code: code.to_string(),
            message: self.to_string(),
            location,
            fingerprint: Some(fingerprint),
            data: self.data(),
        }
    }
}

/// SHA-256 over `check_id|code|path|line`; absent parts hash as empty strings.
pub fn fingerprint(check_id: &str, code: &str, path: Option<&str>, line: Option<u32>) -> String {
    let line = line.map(|l| l.to_string()).unwrap_or_default();
    let canonical = [check_id, code, path.unwrap_or_default(), line.as_str()].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
