//! The `verify` and `local` use cases: correlate a report with a source tree and build a receipt.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use sarifmatch_domain::policy::FailureMode;
use sarifmatch_domain::{ResolvedSnippet, audit, correlate_with};
use sarifmatch_repo::{FsSourceTree, checkout_commit, clone_repository, load_report};
use sarifmatch_settings::{Overrides, ResolvedConfig, SarifmatchConfigV1};
use sarifmatch_types::{
    MatchData, MatchReceipt, RunGit, RunMeta, SCHEMA_RECEIPT_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::failure::VerifyFailure;

/// Input for the remote verify use case.
#[derive(Clone, Debug)]
pub struct VerifyInput<'a> {
    /// Repository URL to clone (`https` on an allowed host).
    pub repo_url: &'a str,
    /// Commit the report claims to describe.
    pub commit: &'a str,
    /// SARIF report on disk.
    pub report_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Input for correlating against a tree that is already checked out.
#[derive(Clone, Debug)]
pub struct LocalInput<'a> {
    pub project_dir: &'a Utf8Path,
    pub report_path: &'a Utf8Path,
    pub config_text: &'a str,
    pub overrides: Overrides,
}

/// Output from the verify and local use cases.
#[derive(Debug)]
pub struct VerifyOutput {
    pub receipt: MatchReceipt,
    /// Every snippet that resolved and passed validation, in traversal order.
    pub snippets: Vec<ResolvedSnippet>,
    /// Every failure, untruncated, in the order it was found.
    pub failures: Vec<VerifyFailure>,
    pub resolved_config: ResolvedConfig,
}

impl VerifyOutput {
    pub fn verdict(&self) -> Verdict {
        self.receipt.verdict
    }
}

#[derive(Debug, Default)]
struct Correlated {
    runs: u32,
    results: u32,
    locations_total: u32,
    snippets: Vec<ResolvedSnippet>,
    failures: Vec<VerifyFailure>,
}

impl Correlated {
    fn failed(failure: VerifyFailure) -> Self {
        Self {
            failures: vec![failure],
            ..Self::default()
        }
    }
}

/// Clone (when needed), check out `commit`, then correlate the report with the checkout.
pub fn run_verify(input: VerifyInput<'_>) -> anyhow::Result<VerifyOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = resolve(input.config_text, input.overrides.clone())?;

    let (project_dir, correlated) = match prepare_checkout(&input, &resolved) {
        Ok(dir) => {
            let correlated = correlate_project(&dir, input.report_path, &resolved);
            (Some(dir), correlated)
        }
        Err(failure) => {
            info!(error = %failure, "verify stopped before correlation");
            (None, Correlated::failed(failure))
        }
    };

    let git = RunGit {
        repo: Some(input.repo_url.to_string()),
        commit: Some(input.commit.to_string()),
    };
    Ok(finish(
        started_at,
        resolved,
        project_dir.as_deref(),
        Some(git),
        correlated,
    ))
}

/// Correlate the report with `project_dir` as it is on disk.
pub fn run_local(input: LocalInput<'_>) -> anyhow::Result<VerifyOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = resolve(input.config_text, input.overrides.clone())?;

    let checked = check_report_exists(input.report_path)
        .and_then(|()| check_project_dir_exists(input.project_dir));
    let correlated = match checked {
        Ok(()) => correlate_project(input.project_dir, input.report_path, &resolved),
        Err(failure) => {
            info!(error = %failure, "local run stopped before correlation");
            Correlated::failed(failure)
        }
    };

    Ok(finish(
        started_at,
        resolved,
        Some(input.project_dir),
        None,
        correlated,
    ))
}

/// Map verdict to exit code: 0 = match, 2 = mismatch.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Match => 0,
        Verdict::Mismatch => 2,
    }
}

fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty is allowed, defaults apply.
    let cfg = if config_text.trim().is_empty() {
        SarifmatchConfigV1::default()
    } else {
        sarifmatch_settings::parse_config_toml(config_text).context("parse config")?
    };
    let resolved = sarifmatch_settings::resolve_config(cfg, overrides).context("resolve config")?;
    debug!(
        profile = %resolved.profile,
        execution = ?resolved.policy.execution,
        failure_mode = ?resolved.policy.failure_mode,
        cache_files = resolved.cache_files,
        "resolved config"
    );
    Ok(resolved)
}

fn check_project_dir_exists(project_dir: &Utf8Path) -> Result<(), VerifyFailure> {
    if project_dir.is_dir() {
        Ok(())
    } else {
        Err(VerifyFailure::ProjectDirNotFound {
            path: project_dir.to_path_buf(),
        })
    }
}

fn check_report_exists(report_path: &Utf8Path) -> Result<(), VerifyFailure> {
    if report_path.is_file() {
        Ok(())
    } else {
        Err(VerifyFailure::ReportNotFound {
            path: report_path.to_path_buf(),
        })
    }
}

fn prepare_checkout(
    input: &VerifyInput<'_>,
    resolved: &ResolvedConfig,
) -> Result<Utf8PathBuf, VerifyFailure> {
    check_report_exists(input.report_path)?;
    let url = sarifmatch_repo::validate_repo_url(input.repo_url, &resolved.allowed_hosts)?;
    debug!(%url, report = %input.report_path, "arguments validated");

    let project_dir =
        sarifmatch_repo::project_dir_for(Utf8Path::new(&resolved.projects_dir), &url);
    let outcome = clone_repository(&url, &project_dir)?;
    info!(%project_dir, ?outcome, "repository ready");

    checkout_commit(&project_dir, input.commit)?;
    info!(commit = input.commit, "checked out");
    Ok(project_dir)
}

fn correlate_project(
    project_dir: &Utf8Path,
    report_path: &Utf8Path,
    resolved: &ResolvedConfig,
) -> Correlated {
    let report = match load_report(report_path) {
        Ok(report) => report,
        Err(err) => {
            info!(error = %err, "report could not be loaded");
            return Correlated::failed(err.into());
        }
    };

    let tree = if resolved.cache_files {
        FsSourceTree::cached(project_dir)
    } else {
        FsSourceTree::new(project_dir)
    };

    let mut correlated = Correlated {
        runs: count(report.runs().len()),
        results: count(report.result_count()),
        locations_total: count(report.locations().count()),
        ..Correlated::default()
    };

    let policy = resolved.policy;
    match policy.failure_mode {
        FailureMode::FailFast => match correlate_with(&tree, &report, policy.execution) {
            Ok(snippets) => correlated.snippets = snippets,
            Err(err) => correlated.failures.push(err.into()),
        },
        FailureMode::CollectAll => {
            for outcome in audit(&tree, &report, policy.execution) {
                match outcome.result {
                    Ok(snippet) => correlated.snippets.push(snippet),
                    Err(err) => correlated.failures.push(err.into()),
                }
            }
        }
    }

    info!(
        locations = correlated.locations_total,
        resolved = correlated.snippets.len(),
        failures = correlated.failures.len(),
        files_cached = tree.cached_files(),
        "correlation finished"
    );
    correlated
}

fn finish(
    started_at: OffsetDateTime,
    resolved: ResolvedConfig,
    project_dir: Option<&Utf8Path>,
    git: Option<RunGit>,
    correlated: Correlated,
) -> VerifyOutput {
    let Correlated {
        runs,
        results,
        locations_total,
        snippets,
        failures,
    } = correlated;

    let verdict = if failures.is_empty() {
        Verdict::Match
    } else {
        Verdict::Mismatch
    };

    let max_findings = resolved.policy.max_findings;
    let findings_total = failures.len();
    let findings: Vec<_> = failures
        .iter()
        .take(max_findings)
        .map(VerifyFailure::to_finding)
        .collect();
    let truncated_reason = (findings_total > findings.len())
        .then(|| format!("findings truncated to max_findings={max_findings}"));

    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    let receipt = MatchReceipt {
        schema: SCHEMA_RECEIPT_V1.to_string(),
        tool: ToolMeta {
            name: "sarifmatch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
            project_dir: project_dir.map(|d| d.to_string()),
            git,
        },
        verdict,
        data: MatchData {
            runs,
            results,
            locations_total,
            snippets_resolved: count(snippets.len()),
            findings_total: count(findings_total),
            findings_emitted: count(findings.len()),
            truncated_reason,
        },
        findings,
        snippets: snippets.iter().map(ResolvedSnippet::to_record).collect(),
    };

    VerifyOutput {
        receipt,
        snippets,
        failures,
        resolved_config: resolved,
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
