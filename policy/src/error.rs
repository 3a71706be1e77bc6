//! Error types for policy and labeler configuration parsing.

use thiserror::Error;

/// Policy result type alias
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Failures turning a configuration document into a typed policy.
///
/// Threshold evaluation itself cannot fail; only parsing and validation
/// produce these.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to parse configuration YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid rule in {section}: {reason}")]
    InvalidRule {
        section: &'static str,
        reason: String,
    },

    #[error("found unexpected type for label {label} (should be string or array of globs)")]
    UnexpectedLabelType { label: String },

    #[error("Invalid match spec for label {label}: {reason}")]
    InvalidMatchSpec { label: String, reason: String },
}

impl PolicyError {
    pub(crate) fn invalid_rule(section: &'static str, reason: impl Into<String>) -> Self {
        PolicyError::InvalidRule {
            section,
            reason: reason.into(),
        }
    }
}
