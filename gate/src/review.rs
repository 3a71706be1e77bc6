//! Decision orchestrator for the `require-reviews` tool.

use prgate_host_client::{RepositoryHost, RunContext};
use prgate_policy::{PrSnapshot, ReviewPolicy, Verdict};
use serde::Serialize;

use crate::error::Result;

/// Result of one review-gate run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Nothing to check, e.g. no policy document in the repository.
    Inapplicable { reason: String },
    Evaluated(Verdict),
}

impl GateOutcome {
    fn inapplicable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::info!("{reason}; nothing to check");
        GateOutcome::Inapplicable { reason }
    }

    /// True unless the PR was evaluated and came up short.
    pub fn is_success(&self) -> bool {
        match self {
            GateOutcome::Inapplicable { .. } => true,
            GateOutcome::Evaluated(verdict) => verdict.satisfied,
        }
    }
}

/// Load the review policy at `config_path`, gather the PR's state and
/// produce a verdict.
///
/// A missing or empty policy is [`GateOutcome::Inapplicable`]. A malformed
/// policy fails the run before any PR state is read.
pub async fn evaluate<H>(host: &H, ctx: &RunContext, config_path: &str) -> Result<GateOutcome>
where
    H: RepositoryHost + ?Sized,
{
    let Some(document) = host.fetch_policy_document(ctx, config_path).await? else {
        return Ok(GateOutcome::inapplicable(format!(
            "no review policy at {config_path}"
        )));
    };
    let Some(policy) = ReviewPolicy::from_yaml(&document)? else {
        return Ok(GateOutcome::inapplicable(format!(
            "review policy at {config_path} is empty"
        )));
    };
    tracing::info!(
        "policy: {} label rule(s), {} file-count rule(s), {} ignore path(s)",
        policy.label_rules.len(),
        policy.file_count_rules.len(),
        policy.ignore_paths.len()
    );

    let metadata = host.fetch_pr_metadata(ctx).await?;
    tracing::info!("{ctx} labels: {:?}", metadata.labels);

    let (changed_files, current_review_count) = tokio::try_join!(
        host.fetch_changed_files(ctx),
        host.fetch_review_count(ctx)
    )?;
    tracing::debug!(
        "{} changed file(s) listed, {} reported, {current_review_count} review(s)",
        changed_files.len(),
        metadata.reported_changed_file_count
    );

    let snapshot = PrSnapshot {
        labels: metadata.labels,
        changed_files,
        reported_changed_file_count: metadata.reported_changed_file_count,
        current_review_count,
    };
    let verdict = policy.evaluate(&snapshot);

    match &verdict.deficit_message {
        None => tracing::info!(
            "{ctx} has {} of {} required review(s)",
            verdict.current,
            verdict.required
        ),
        Some(message) => tracing::info!("{ctx}: {message}"),
    }
    Ok(GateOutcome::Evaluated(verdict))
}
