//! Review-requirement policy evaluation for pull requests.
//!
//! Pure, synchronous building blocks shared by the `require-reviews` and
//! `label` tools:
//!
//! - [`glob`]: a single (optionally negated) glob pattern as a predicate
//! - [`classifier`]: any/all glob groups evaluated over a changed-file set
//! - [`policy`]: the typed review policy parsed from YAML
//! - [`evaluator`]: label and file-count thresholds reduced to one number
//! - [`verdict`]: required vs. current reviews
//! - [`labeler`]: label → glob rules and the add/remove plan they produce
//!
//! Nothing here performs I/O; the host client and orchestration live in
//! sibling crates.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod classifier;
pub mod error;
pub mod evaluator;
pub mod glob;
pub mod labeler;
pub mod policy;
pub mod verdict;

pub use classifier::{MatchSpec, is_ignored, matches_all, matches_any, matches_any_spec, matches_spec};
pub use error::{PolicyError, Result};
pub use evaluator::{compute_max_reviews_required, effective_file_count};
pub use glob::GlobMatcher;
pub use labeler::{LabelPlan, LabelerConfig, plan_labels};
pub use policy::{FileCountRule, LabelRule, ReviewPolicy};
pub use verdict::{PrSnapshot, Verdict};
