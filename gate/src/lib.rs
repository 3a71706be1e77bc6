//! Orchestration for the `require-reviews` and `label` tools.
//!
//! Both entry points take a [`RepositoryHost`] and an explicit
//! [`RunContext`], gather what they need from the host, and hand the
//! gathered state to the pure code in `prgate_policy`.
//!
//! [`RepositoryHost`]: prgate_host_client::RepositoryHost
//! [`RunContext`]: prgate_host_client::RunContext

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod error;
mod labeler;
mod review;

pub use error::{GateError, Result};
pub use labeler::{LabelOutcome, apply_labels};
pub use review::{GateOutcome, evaluate};
