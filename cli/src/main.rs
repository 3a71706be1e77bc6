use std::process::ExitCode;

use clap::Parser;
use prgate_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    prgate_cli::run(Cli::parse()).await.into()
}
