//! `prgate` command line.
//!
//! ## Commands
//!
//! - `prgate require-reviews --config-path <PATH> [--json]`
//! - `prgate label --config-path <PATH> [--sync-labels] [--json]`
//!
//! ## Exit codes
//!
//! - 0: satisfied, labels applied, or nothing to check
//! - 1: review threshold not met
//! - 2: malformed policy or labeler configuration
//! - 3: host, transport or setup error

pub mod actions;
pub mod context;
pub mod label_cmd;
pub mod logging;
mod report;
pub mod review_cmd;
pub mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use prgate_gate::GateError;

use crate::label_cmd::LabelArgs;
use crate::review_cmd::RequireReviewsArgs;
use crate::settings::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "prgate", version, about = "Pull request review gate and labeler")]
pub struct Cli {
    /// TOML settings file for the host client and logging.
    #[arg(long = "settings", global = true)]
    pub settings: Option<PathBuf>,

    /// Log output format; overrides `log.format` from settings.
    #[arg(long = "log-format", global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that a PR has the reviews its policy requires.
    RequireReviews(RequireReviewsArgs),
    /// Add (and optionally remove) labels based on changed files.
    Label(LabelArgs),
}

/// Process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    Unsatisfied = 1,
    InvalidConfig = 2,
    Failure = 3,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

impl Exit {
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<GateError>() {
            Some(GateError::Policy(_)) => Exit::InvalidConfig,
            _ => Exit::Failure,
        }
    }
}

pub async fn run(cli: Cli) -> Exit {
    let loaded = settings::load(cli.settings.as_deref());
    let format = cli
        .log_format
        .or_else(|| loaded.as_ref().ok().map(|settings| settings.log.format))
        .unwrap_or_default();
    logging::init(format);

    let result = match loaded {
        Ok(settings) => match cli.command {
            Command::RequireReviews(args) => args.run(&settings).await,
            Command::Label(args) => args.run(&settings).await,
        },
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(exit) => exit,
        Err(err) => {
            let exit = Exit::for_error(&err);
            tracing::debug!("run failed: {err:?}");
            report::failure(&format!("{err:#}"), false);
            exit
        }
    }
}
