use crate::model::Region;
use sarifmatch_types::{RepoPath, ids};

/// The report does not have the nesting the correlation needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed report: {message}")]
pub struct StructuralError {
    pub message: String,
}

impl StructuralError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for StructuralError {
    fn from(err: serde_json::Error) -> Self {
        StructuralError::new(err.to_string())
    }
}

/// Why a report does not correlate with a source tree.
#[derive(Debug, thiserror::Error)]
pub enum CorrelationError {
    #[error(
        "Invalid number of lines. File: {path}, file lines: {available_lines}, line end: {requested_end_line}"
    )]
    LineRange {
        path: RepoPath,
        available_lines: usize,
        requested_end_line: u32,
    },

    /// `line_index` is 0-based.
    #[error(
        "Invalid line length. File: {path}, line number: {line_index}, line length: {line_length}, end column: {requested_end_column}"
    )]
    ColumnRange {
        path: RepoPath,
        line_index: usize,
        line_length: usize,
        requested_end_column: u32,
    },

    #[error("Invalid line content: {text}")]
    InvalidContent {
        path: RepoPath,
        region: Region,
        text: String,
    },

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("read {path}: {source}")]
    Io {
        path: RepoPath,
        #[source]
        source: std::io::Error,
    },
}

impl CorrelationError {
    pub fn check_id(&self) -> &'static str {
        match self {
            CorrelationError::LineRange { .. } | CorrelationError::ColumnRange { .. } => {
                ids::CHECK_REGION_BOUNDS
            }
            CorrelationError::InvalidContent { .. } => ids::CHECK_SPAN_CONTENT,
            CorrelationError::Structural(_) => ids::CHECK_REPORT_STRUCTURE,
            CorrelationError::Io { .. } => ids::CHECK_SOURCE_FILES,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CorrelationError::LineRange { .. } => ids::CODE_LINE_OUT_OF_RANGE,
            CorrelationError::ColumnRange { .. } => ids::CODE_COLUMN_OUT_OF_RANGE,
            CorrelationError::InvalidContent { .. } => ids::CODE_LEADING_WHITESPACE,
            CorrelationError::Structural(_) => ids::CODE_MALFORMED_REPORT,
            CorrelationError::Io { .. } => ids::CODE_FILE_UNREADABLE,
        }
    }

    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&RepoPath> {
        match self {
            CorrelationError::LineRange { path, .. }
            | CorrelationError::ColumnRange { path, .. }
            | CorrelationError::InvalidContent { path, .. }
            | CorrelationError::Io { path, .. } => Some(path),
            CorrelationError::Structural(_) => None,
        }
    }
}
