//! Input boundary: turn raw caller configuration into validated [`SyncSettings`].
//!
//! Nothing past this module reads the process environment for configuration.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::color::log_debug_stderr;
use crate::errors::SyncError;
use crate::settings::{SyncSettings, DEFAULT_SERVER_HOST};

/// Unvalidated configuration as supplied by the CLI (flags or their env fallbacks).
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub workspace: Option<PathBuf>,
    /// `owner/name`
    pub repository: Option<String>,
    /// Relative to the workspace; defaults to the workspace itself.
    pub path: Option<String>,
    /// Fully qualified ref, e.g. `refs/heads/main` or `refs/pull/7/merge`.
    pub git_ref: Option<String>,
    /// Explicit commit; wins over the event payload.
    pub commit: Option<String>,
    pub event_path: Option<PathBuf>,
    pub actor: Option<String>,
    pub token: Option<String>,
    pub server_host: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    #[serde(default)]
    head: Option<PullRequestHead>,
}

#[derive(Debug, Deserialize)]
struct PullRequestHead {
    #[serde(default)]
    sha: Option<String>,
}

/// Commit named by a webhook event payload: `after` for pushes, else the PR head sha.
pub fn after_sha_from_event(path: &Path) -> anyhow::Result<Option<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read event payload {}", path.display()))?;
    let event: EventPayload = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse event payload {}", path.display()))?;
    let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
    Ok(non_empty(event.after).or_else(|| {
        non_empty(
            event
                .pull_request
                .and_then(|pr| pr.head)
                .and_then(|head| head.sha),
        )
    }))
}

/// `refs/heads/main` -> `heads/main`, `refs/pull/7/merge` -> `pull/7/head`.
pub fn normalize_ref(git_ref: &str) -> String {
    git_ref.replacen("refs/", "", 1).replacen("/merge", "/head", 1)
}

/// Split `owner/name`, rejecting anything else.
pub fn split_repository(qualified: &str) -> Result<(String, String), SyncError> {
    let parts: Vec<&str> = qualified.split('/').collect();
    match parts.as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(SyncError::Input(format!(
            "Invalid repository '{qualified}'. Expected format {{owner}}/{{repo}}."
        ))),
    }
}

/// Resolve `.` and `..` without touching the filesystem (the target may not exist yet).
fn normalize_lexically(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in p.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `workspace`; the result must be the workspace or nested under it.
pub fn resolve_repository_path(workspace: &Path, path: &str) -> Result<PathBuf, SyncError> {
    let joined = normalize_lexically(&workspace.join(path));
    if !joined.starts_with(workspace) {
        return Err(SyncError::Input(format!(
            "Repository path '{}' is not under '{}'",
            joined.display(),
            workspace.display()
        )));
    }
    Ok(joined)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn resolve(raw: RawInputs) -> Result<SyncSettings, SyncError> {
    let workspace = raw
        .workspace
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| SyncError::Environment("GITHUB_WORKSPACE not defined".to_string()))?;
    if !crate::util::fs::directory_exists(&workspace) {
        return Err(SyncError::Environment(format!(
            "Directory '{}' does not exist",
            workspace.display()
        )));
    }
    let workspace = fs::canonicalize(&workspace)?;
    log_debug_stderr(&format!("GITHUB_WORKSPACE = '{}'", workspace.display()));

    let qualified = non_empty(raw.repository).ok_or_else(|| {
        SyncError::Input("Repository not defined. Expected format {owner}/{repo}.".to_string())
    })?;
    log_debug_stderr(&format!("qualified repository = '{qualified}'"));
    let (repository_owner, repository_name) = split_repository(&qualified)?;

    let path = non_empty(raw.path).unwrap_or_else(|| ".".to_string());
    let repository_path = resolve_repository_path(&workspace, &path)?;

    let git_ref = non_empty(raw.git_ref)
        .map(|r| normalize_ref(&r))
        .filter(|r| !r.is_empty())
        .ok_or_else(|| SyncError::Input("Ref not defined".to_string()))?;

    let commit = match non_empty(raw.commit) {
        Some(c) => c,
        None => match raw.event_path.as_deref() {
            Some(p) => match after_sha_from_event(p) {
                Ok(sha) => sha.unwrap_or_default(),
                Err(e) => {
                    log_debug_stderr(&format!("Unable to load after SHA from event payload: {e:#}"));
                    String::new()
                }
            },
            None => {
                log_debug_stderr("event payload path is not defined");
                String::new()
            }
        },
    };

    let server_host = non_empty(raw.server_host).unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
    crate::remote::validate_server_host(&server_host)?;

    let actor = raw.actor.unwrap_or_default();
    let token = raw.token.unwrap_or_default();
    if token.is_empty() {
        crate::ui::warn_print("no token provided; the ~/.netrc entry will carry an empty password");
    }

    Ok(SyncSettings {
        repository_path,
        repository_owner,
        repository_name,
        git_ref,
        commit,
        actor,
        token,
        server_host,
    })
}
