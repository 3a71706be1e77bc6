//! GitHub Actions workflow commands.

/// True when running inside a GitHub Actions job.
pub fn running_in_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true")
}

/// `::error::` command marking the step failed with `message`.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_command_escapes_newlines_and_percent() {
        assert_eq!(
            error_command("Need to add 2 more reviews"),
            "::error::Need to add 2 more reviews"
        );
        assert_eq!(error_command("50% done\nretry"), "::error::50%25 done%0Aretry");
    }
}
