//! Repository host collaborator for the PR gate.
//!
//! The gate never talks to a host directly; it goes through
//! [`RepositoryHost`], with every call scoped by an explicit [`RunContext`].
//! [`GitHubClient`] implements the trait against the GitHub REST API.

mod context;
mod error;
mod github;

pub use context::RunContext;
pub use error::{HostError, Result};
pub use github::{DEFAULT_API_URL, GitHubClient, GitHubConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// PR fields the gate reads from the pull request itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrMetadata {
    pub labels: Vec<String>,
    /// Changed-file count as reported by the host.
    pub reported_changed_file_count: u64,
}

/// Read and write operations the gate and the labeler need from a host.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Read a text file at `ctx.git_ref`. `Ok(None)` when it does not exist.
    async fn fetch_policy_document(&self, ctx: &RunContext, path: &str) -> Result<Option<String>>;

    /// Every file path changed by the PR, in host order.
    async fn fetch_changed_files(&self, ctx: &RunContext) -> Result<Vec<String>>;

    /// Number of submitted reviews, regardless of review state.
    async fn fetch_review_count(&self, ctx: &RunContext) -> Result<u64>;

    async fn fetch_pr_metadata(&self, ctx: &RunContext) -> Result<PrMetadata>;

    async fn add_labels(&self, ctx: &RunContext, labels: &[String]) -> Result<()>;

    async fn remove_label(&self, ctx: &RunContext, label: &str) -> Result<()>;
}
