//! Resolve which PR a run is about from flags, environment and the
//! GitHub Actions event payload.

use std::path::{Path, PathBuf};

use clap::Args;
use prgate_host_client::{HostError, RunContext};
use serde::Deserialize;
use thiserror::Error;

/// Flags naming the repository, PR and ref. Under GitHub Actions every one of
/// them has an environment fallback.
#[derive(Clone, Debug, Default, Args)]
pub struct ContextArgs {
    /// Repository in owner/repo form.
    #[arg(long = "repo", env = "GITHUB_REPOSITORY")]
    pub repo: Option<String>,

    /// Pull request number; read from the event payload when omitted.
    #[arg(long = "pr")]
    pub pr: Option<u64>,

    /// Commit to read configuration from.
    #[arg(long = "ref", env = "GITHUB_SHA")]
    pub git_ref: Option<String>,

    /// API token, sent as a bearer token.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Webhook event payload to take the PR number from.
    #[arg(long = "event-path", env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no repository given; pass --repo or set GITHUB_REPOSITORY")]
    MissingRepository,

    #[error("Failed to read event payload {path}: {source}")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event payload {path}: {source}")]
    EventParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Host(#[from] HostError),
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Deserialize)]
struct PullRequestRef {
    number: u64,
}

fn pr_number_from_event(path: &Path) -> Result<Option<u64>, ContextError> {
    let text = std::fs::read_to_string(path).map_err(|source| ContextError::EventRead {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: EventPayload =
        serde_json::from_str(&text).map_err(|source| ContextError::EventParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(payload.pull_request.map(|pr| pr.number))
}

impl ContextArgs {
    /// `Ok(None)` when no PR number can be found; the run is then
    /// inapplicable rather than failed.
    pub fn resolve(&self) -> Result<Option<RunContext>, ContextError> {
        let pr_number = match (self.pr, &self.event_path) {
            (Some(number), _) => Some(number),
            (None, Some(path)) => pr_number_from_event(path)?,
            (None, None) => None,
        };
        let Some(pr_number) = pr_number else {
            return Ok(None);
        };

        let slug = self
            .repo
            .as_deref()
            .filter(|slug| !slug.trim().is_empty())
            .ok_or(ContextError::MissingRepository)?;
        let mut ctx = RunContext::from_slug(slug, pr_number)?;
        if let Some(git_ref) = self.git_ref.as_deref().filter(|r| !r.is_empty()) {
            ctx = ctx.with_ref(git_ref);
        }
        Ok(Some(ctx))
    }
}
