use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

/// Errors from repository host operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// Network request failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Host returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    /// Owner/repo/PR could not be determined or is malformed.
    #[error("Invalid run context: {0}")]
    InvalidContext(String),
}

impl HostError {
    pub(crate) fn decode(what: &'static str, reason: impl ToString) -> Self {
        HostError::Decode {
            what,
            reason: reason.to_string(),
        }
    }
}
