use crate::{model::SarifmatchConfigV1, presets};
use sarifmatch_domain::policy::{CorrelationPolicy, Execution, FailureMode};

/// Values supplied on the command line; they win over config keys.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub projects_dir: Option<String>,
    pub execution: Option<String>,
    pub failure_mode: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub profile: String,
    pub policy: CorrelationPolicy,
    pub cache_files: bool,
    pub projects_dir: String,
    pub allowed_hosts: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            policy: CorrelationPolicy::default(),
            cache_files: false,
            projects_dir: "projects".to_string(),
            allowed_hosts: vec!["github.com".to_string()],
        }
    }
}

pub fn resolve_config(
    cfg: SarifmatchConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut resolved = presets::preset(&profile)?;

    if let Some(execution) = overrides.execution.or(cfg.execution) {
        resolved.policy.execution = parse_execution(&execution)?;
    }
    if let Some(mode) = overrides.failure_mode.or(cfg.failure_mode) {
        resolved.policy.failure_mode = parse_failure_mode(&mode)?;
    }
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        resolved.policy.max_findings = mf as usize;
    }
    if let Some(cache) = cfg.cache_files {
        resolved.cache_files = cache;
    }
    if let Some(dir) = overrides.projects_dir.or(cfg.projects_dir) {
        if dir.trim().is_empty() {
            anyhow::bail!("projects_dir must not be empty");
        }
        resolved.projects_dir = dir;
    }
    if let Some(hosts) = cfg.allowed_hosts {
        if hosts.is_empty() {
            anyhow::bail!("allowed_hosts must name at least one host");
        }
        resolved.allowed_hosts = hosts;
    }

    Ok(resolved)
}

fn parse_execution(v: &str) -> anyhow::Result<Execution> {
    match v {
        "sequential" => Ok(Execution::Sequential),
        "parallel" => Ok(Execution::Parallel),
        other => anyhow::bail!("unknown execution: {other} (expected sequential|parallel)"),
    }
}

fn parse_failure_mode(v: &str) -> anyhow::Result<FailureMode> {
    match v {
        "fail_fast" => Ok(FailureMode::FailFast),
        "collect_all" => Ok(FailureMode::CollectAll),
        other => anyhow::bail!("unknown failure_mode: {other} (expected fail_fast|collect_all)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn empty_config_resolves_to_default_profile() {
        let resolved =
            resolve_config(SarifmatchConfigV1::default(), Overrides::default()).expect("resolve");
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn presets_set_execution_and_failure_mode() {
        let audit = presets::preset("audit").expect("audit");
        assert_eq!(audit.policy.failure_mode, FailureMode::CollectAll);
        assert!(audit.cache_files);

        let fast = presets::preset("fast").expect("fast");
        assert_eq!(fast.policy.execution, Execution::Parallel);
        assert_eq!(fast.policy.failure_mode, FailureMode::FailFast);
    }

    #[test]
    fn config_keys_override_preset_and_cli_overrides_config() {
        let cfg = parse_config_toml(
            r#"
profile = "audit"
projects_dir = "checkouts"
allowed_hosts = ["github.com", "git.example.org"]
execution = "parallel"
cache_files = false
max_findings = 10
"#,
        )
        .expect("parse");

        let resolved = resolve_config(
            cfg,
            Overrides {
                failure_mode: Some("fail_fast".to_string()),
                projects_dir: Some("elsewhere".to_string()),
                ..Overrides::default()
            },
        )
        .expect("resolve");

        assert_eq!(resolved.profile, "audit");
        assert_eq!(resolved.policy.execution, Execution::Parallel);
        assert_eq!(resolved.policy.failure_mode, FailureMode::FailFast);
        assert_eq!(resolved.policy.max_findings, 10);
        assert!(!resolved.cache_files);
        assert_eq!(resolved.projects_dir, "elsewhere");
        assert_eq!(resolved.allowed_hosts.len(), 2);
    }

    #[test]
    fn unknown_enum_strings_are_errors() {
        let err = resolve_config(
            SarifmatchConfigV1 {
                execution: Some("eventually".to_string()),
                ..SarifmatchConfigV1::default()
            },
            Overrides::default(),
        )
        .expect_err("invalid execution");
        assert!(err.to_string().contains("unknown execution"), "{err}");

        let err = resolve_config(
            SarifmatchConfigV1::default(),
            Overrides {
                profile: Some("strict".to_string()),
                ..Overrides::default()
            },
        )
        .expect_err("invalid profile");
        assert!(err.to_string().contains("unknown profile"), "{err}");
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(parse_config_toml("max_findings = \"many\"").is_err());
    }
}
