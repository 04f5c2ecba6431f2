use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "sarifmatch.config.v1";

/// `sarifmatch.toml` schema v1.
///
/// Every key is optional; unset keys fall back to the selected profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SarifmatchConfigV1 {
    /// Optional schema string for tooling (`sarifmatch.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `default`, `audit`, or `fast`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Directory remote repositories are cloned under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects_dir: Option<String>,

    /// Hosts a repository URL may point at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_hosts: Option<Vec<String>>,

    /// `sequential` or `parallel`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,

    /// `fail_fast` or `collect_all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_mode: Option<String>,

    /// Keep each file's lines in memory for the duration of one run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_files: Option<bool>,

    /// How many findings to write to the receipt before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,
}
