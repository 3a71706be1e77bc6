//! Label orchestrator for the `label` tool.

use futures::future::try_join_all;
use prgate_host_client::{RepositoryHost, RunContext};
use prgate_policy::{LabelPlan, LabelerConfig, plan_labels};
use serde::Serialize;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LabelOutcome {
    Inapplicable { reason: String },
    /// Labels that were added and removed on the PR.
    Applied(LabelPlan),
}

/// Apply the labeler rules at `config_path` to the PR in `ctx`.
///
/// Matched labels are added in one call. Labels the PR carries whose rules
/// no longer match are removed only when `sync_labels` is set.
pub async fn apply_labels<H>(
    host: &H,
    ctx: &RunContext,
    config_path: &str,
    sync_labels: bool,
) -> Result<LabelOutcome>
where
    H: RepositoryHost + ?Sized,
{
    let (document, changed_files) = tokio::try_join!(
        host.fetch_policy_document(ctx, config_path),
        host.fetch_changed_files(ctx)
    )?;
    let Some(document) = document else {
        let reason = format!("no labeler configuration at {config_path}");
        tracing::info!("{reason}; nothing to label");
        return Ok(LabelOutcome::Inapplicable { reason });
    };
    let config = LabelerConfig::from_yaml(&document)?;
    let metadata = host.fetch_pr_metadata(ctx).await?;

    let mut plan = plan_labels(&config, &changed_files, &metadata.labels);
    tracing::debug!("label plan for {ctx}: {plan:?}");

    if !plan.to_add.is_empty() {
        host.add_labels(ctx, &plan.to_add).await?;
    }

    if !sync_labels {
        plan.to_remove.clear();
    } else if !plan.to_remove.is_empty() {
        try_join_all(
            plan.to_remove
                .iter()
                .map(|label| host.remove_label(ctx, label)),
        )
        .await?;
    }

    Ok(LabelOutcome::Applied(plan))
}
