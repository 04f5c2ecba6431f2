use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("The provided repository '{url}' is not valid: {reason}")]
    InvalidRepoUrl { url: String, reason: String },

    #[error("Failed to clone repository {url}: {detail}")]
    CloneFailed { url: String, detail: String },

    #[error("Failed to checkout to commit: {commit}: {detail}")]
    CheckoutFailed { commit: String, detail: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    /// The destination directory already existed; nothing was fetched.
    AlreadyPresent,
}

/// Accept only `https` URLs on one of `allowed_hosts` that name a repository path.
pub fn validate_repo_url(raw: &str, allowed_hosts: &[String]) -> Result<Url, CheckoutError> {
    let invalid = |reason: String| CheckoutError::InvalidRepoUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "https" {
        return Err(invalid(format!("scheme must be https, got {}", url.scheme())));
    }
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?;
    if !allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
        return Err(invalid(format!("host {host} is not an allowed host")));
    }
    if url.path().trim_matches('/').is_empty() {
        return Err(invalid("missing repository path".to_string()));
    }

    Ok(url)
}

/// `<projects_dir>/<url path>`, e.g. `projects/example/repo`.
pub fn project_dir_for(projects_dir: &Utf8Path, url: &Url) -> Utf8PathBuf {
    let path = url.path();
    projects_dir.join(path.strip_prefix('/').unwrap_or(path))
}

/// Clone `url` into `destination` unless the directory already exists.
pub fn clone_repository(url: &Url, destination: &Utf8Path) -> Result<CloneOutcome, CheckoutError> {
    if destination.is_dir() {
        debug!(%destination, "project directory exists; skipping clone");
        return Ok(CloneOutcome::AlreadyPresent);
    }

    let failed = |detail: String| CheckoutError::CloneFailed {
        url: url.to_string(),
        detail,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| failed(format!("create {parent}: {e}")))?;
    }

    info!(%url, %destination, "cloning repository");
    run_git(
        None,
        &["clone", "--quiet", "--", url.as_str(), destination.as_str()],
    )
    .map_err(failed)?;

    Ok(CloneOutcome::Cloned)
}

/// Check out `commit` in the repository at `repo`.
pub fn checkout_commit(repo: &Utf8Path, commit: &str) -> Result<(), CheckoutError> {
    let failed = |detail: String| CheckoutError::CheckoutFailed {
        commit: commit.to_string(),
        detail,
    };

    if commit.is_empty() || commit.starts_with('-') {
        return Err(failed("not a revision".to_string()));
    }

    info!(%repo, commit, "checking out commit");
    run_git(Some(repo), &["checkout", "--quiet", commit, "--"]).map_err(failed)
}

fn run_git(cwd: Option<&Utf8Path>, args: &[&str]) -> Result<(), String> {
    let mut cmd = Command::new("git");
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    debug!(?args, cwd = ?cwd, "spawn git");

    let output = cmd
        .args(args)
        .output()
        .map_err(|e| format!("spawn git: {e}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("git exited with {}: {}", output.status, stderr.trim()));
    }
    Ok(())
}
