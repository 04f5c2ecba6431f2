use crate::resolve::ResolvedConfig;
use sarifmatch_domain::policy::{CorrelationPolicy, Execution, FailureMode};

pub const PROFILES: &[&str] = &["default", "audit", "fast"];

/// Preset profiles are opinionated defaults.
///
/// `default` mirrors the one-shot behavior: sequential, first error wins.
pub fn preset(profile: &str) -> anyhow::Result<ResolvedConfig> {
    let (execution, failure_mode, cache_files) = match profile {
        "default" => (Execution::Sequential, FailureMode::FailFast, false),
        "audit" => (Execution::Sequential, FailureMode::CollectAll, true),
        "fast" => (Execution::Parallel, FailureMode::FailFast, true),
        other => anyhow::bail!(
            "unknown profile: {other} (expected one of {})",
            PROFILES.join("|")
        ),
    };

    Ok(ResolvedConfig {
        profile: profile.to_string(),
        policy: CorrelationPolicy {
            execution,
            failure_mode,
            ..CorrelationPolicy::default()
        },
        cache_files,
        projects_dir: "projects".to_string(),
        allowed_hosts: vec!["github.com".to_string()],
    })
}
