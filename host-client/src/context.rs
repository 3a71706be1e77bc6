use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Which PR a run is about. Built once at the process boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
    /// Commit or branch to read configuration from; the default branch when
    /// unset.
    pub git_ref: Option<String>,
}

impl RunContext {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, pr_number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            pr_number,
            git_ref: None,
        }
    }

    /// Build from an `owner/repo` slug such as `GITHUB_REPOSITORY`.
    pub fn from_slug(slug: &str, pr_number: u64) -> Result<Self, HostError> {
        match slug.trim().split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(owner, repo, pr_number))
            }
            _ => Err(HostError::InvalidContext(format!(
                "repository must be in owner/repo form, got {slug:?}"
            ))),
        }
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }
}

impl fmt::Display for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.pr_number)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slug_splits_owner_and_repo() {
        let ctx = RunContext::from_slug("acme/widgets", 7).unwrap().with_ref("abc123");
        assert_eq!(ctx.owner, "acme");
        assert_eq!(ctx.repo, "widgets");
        assert_eq!(ctx.git_ref.as_deref(), Some("abc123"));
        assert_eq!(ctx.to_string(), "acme/widgets#7");
    }

    #[test]
    fn malformed_slugs_are_rejected() {
        for slug in ["widgets", "/widgets", "acme/", "acme/widgets/extra"] {
            assert!(RunContext::from_slug(slug, 1).is_err(), "{slug} accepted");
        }
    }
}
