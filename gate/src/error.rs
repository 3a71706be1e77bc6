use prgate_host_client::HostError;
use prgate_policy::PolicyError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration document was present but malformed.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Host call or transport failure while gathering PR state.
    #[error(transparent)]
    Host(#[from] HostError),
}
