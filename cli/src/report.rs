//! What the user sees on stdout and stderr.

use serde::Serialize;

use crate::actions;

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Nothing to check; a successful run.
pub fn inapplicable(reason: &str, as_json: bool) -> anyhow::Result<()> {
    tracing::info!("{reason}; exiting");
    if as_json {
        json(&serde_json::json!({ "status": "inapplicable", "reason": reason }))?;
    }
    Ok(())
}

/// Report a failed run, as a workflow command too when under Actions.
///
/// With `as_json` stdout carries only the JSON document, so the workflow
/// command is left out.
pub fn failure(message: &str, as_json: bool) {
    eprintln!("{message}");
    if !as_json && actions::running_in_actions() {
        println!("{}", actions::error_command(message));
    }
}
