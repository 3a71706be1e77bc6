//! `prgate require-reviews`: fail the check until a PR has enough reviews.

use clap::Args;
use prgate_gate::GateOutcome;
use prgate_host_client::{GitHubClient, RunContext};

use crate::Exit;
use crate::context::ContextArgs;
use crate::report;
use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct RequireReviewsArgs {
    /// Path of the review policy inside the repository.
    #[arg(long = "config-path")]
    pub config_path: String,

    /// Print the outcome as JSON on stdout.
    #[arg(long = "json", short = 'j')]
    pub json: bool,

    #[command(flatten)]
    pub context: ContextArgs,
}

impl RequireReviewsArgs {
    pub async fn run(self, settings: &Settings) -> anyhow::Result<Exit> {
        let Some(ctx) = self.context.resolve()? else {
            report::inapplicable("no pull request in this run", self.json)?;
            return Ok(Exit::Success);
        };
        let client = GitHubClient::new(settings.github_config(self.context.token.clone()))?;
        self.evaluate(&client, &ctx).await
    }

    async fn evaluate(&self, client: &GitHubClient, ctx: &RunContext) -> anyhow::Result<Exit> {
        tracing::info!("evaluating review policy {} for {ctx}", self.config_path);
        let outcome = prgate_gate::evaluate(client, ctx, &self.config_path).await?;

        if self.json {
            report::json(&outcome)?;
        }
        match outcome {
            GateOutcome::Inapplicable { reason } => {
                if !self.json {
                    report::inapplicable(&reason, false)?;
                }
                Ok(Exit::Success)
            }
            GateOutcome::Evaluated(verdict) => match verdict.deficit_message {
                None => Ok(Exit::Success),
                Some(message) => {
                    report::failure(&message, self.json);
                    Ok(Exit::Unsatisfied)
                }
            },
        }
    }
}
