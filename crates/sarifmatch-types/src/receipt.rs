use crate::RepoPath;
use crate::snippet::format_snippet_line;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for sarifmatch receipts.
pub const SCHEMA_RECEIPT_V1: &str = "sarifmatch.receipt.v1";

/// The program-level answer: was the report produced against this tree?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Match,
    Mismatch,
}

impl Verdict {
    pub fn is_match(self) -> bool {
        self == Verdict::Match
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub path: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub check_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Stable identifier intended for dedup: a hash of
    /// `check_id + code + path + line`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Code-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

/// One resolved span as recorded in a receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SnippetRecord {
    pub path: RepoPath,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
    pub text: String,
}

impl std::fmt::Display for SnippetRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_snippet_line(
            self.path.as_str(),
            self.start_line,
            self.end_line,
            self.start_column,
            self.end_column,
            &self.text,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunGit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Directory the report was correlated against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<RunGit>,
}

/// Sarifmatch-specific summary payload for the receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct MatchData {
    pub runs: u32,
    pub results: u32,
    pub locations_total: u32,
    pub snippets_resolved: u32,

    pub findings_total: u32,
    pub findings_emitted: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
}

/// The receipt written by `--report-out`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchReceipt {
    /// Versioned schema identifier for the receipt shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub snippets: Vec<SnippetRecord>,
    pub data: MatchData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> MatchReceipt {
        MatchReceipt {
            schema: SCHEMA_RECEIPT_V1.to_string(),
            tool: ToolMeta {
                name: "sarifmatch".to_string(),
                version: "0.1.0".to_string(),
            },
            run: RunMeta {
                started_at: datetime!(2025-01-01 00:00:00 UTC),
                ended_at: None,
                duration_ms: None,
                project_dir: None,
                git: None,
            },
            verdict: Verdict::Mismatch,
            findings: vec![Finding {
                check_id: crate::ids::CHECK_SPAN_CONTENT.to_string(),
                code: crate::ids::CODE_LEADING_WHITESPACE.to_string(),
                message: "Invalid line content:  x".to_string(),
                location: Some(Location {
                    path: RepoPath::new("src/A.java"),
                    line: Some(3),
                    col: Some(1),
                }),
                fingerprint: None,
                data: JsonValue::Null,
            }],
            snippets: Vec::new(),
            data: MatchData::default(),
        }
    }

    #[test]
    fn verdict_serializes_lowercase() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["verdict"], "mismatch");
        assert_eq!(json["findings"][0]["location"]["path"], "src/A.java");
        assert!(json["run"].get("ended_at").is_none());
        assert!(json["findings"][0].get("data").is_none());
    }

    #[test]
    fn receipt_roundtrips_through_json() {
        let receipt = sample();
        let text = serde_json::to_string(&receipt).expect("serialize");
        let back: MatchReceipt = serde_json::from_str(&text).expect("parse");
        assert_eq!(back, receipt);
    }

    #[test]
    fn snippet_record_displays_in_line_format() {
        let record = SnippetRecord {
            path: RepoPath::new("src/A.java"),
            start_line: 1,
            end_line: 2,
            start_column: 1,
            end_column: 4,
            text: "ab\ncd".to_string(),
        };
        assert_eq!(record.to_string(), "src/A.java::1::2 0->4 = ab\ncd");
    }
}
