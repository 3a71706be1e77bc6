//! `prgate label`: label a PR from the globs its changed files match.

use clap::Args;
use prgate_gate::LabelOutcome;
use prgate_host_client::GitHubClient;

use crate::Exit;
use crate::context::ContextArgs;
use crate::report;
use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Path of the labeler configuration inside the repository.
    #[arg(long = "config-path")]
    pub config_path: String,

    /// Remove configured labels whose globs no longer match.
    #[arg(long = "sync-labels")]
    pub sync_labels: bool,

    /// Print the outcome as JSON on stdout.
    #[arg(long = "json", short = 'j')]
    pub json: bool,

    #[command(flatten)]
    pub context: ContextArgs,
}

impl LabelArgs {
    pub async fn run(self, settings: &Settings) -> anyhow::Result<Exit> {
        let Some(ctx) = self.context.resolve()? else {
            report::inapplicable("no pull request in this run", self.json)?;
            return Ok(Exit::Success);
        };
        let client = GitHubClient::new(settings.github_config(self.context.token.clone()))?;

        tracing::info!("applying labeler rules {} to {ctx}", self.config_path);
        let outcome =
            prgate_gate::apply_labels(&client, &ctx, &self.config_path, self.sync_labels).await?;

        if self.json {
            report::json(&outcome)?;
            return Ok(Exit::Success);
        }
        match outcome {
            LabelOutcome::Inapplicable { reason } => report::inapplicable(&reason, false)?,
            LabelOutcome::Applied(plan) => {
                tracing::info!(
                    "labels added: {:?}; labels removed: {:?}",
                    plan.to_add,
                    plan.to_remove
                );
            }
        }
        Ok(Exit::Success)
    }
}
