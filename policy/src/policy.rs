//! Typed review policy and its YAML grammar.
//!
//! ```yaml
//! require_reviews_for_labels:
//!   - label: sensitive
//!     reviews: 2
//! require_reviews_for_num_of_files_changed:
//!   - num: 10
//!     reviews: 2
//! ignore_paths:
//!   - "**/*.snap"
//! ```
//!
//! Every key is optional. Parsing validates the whole document up front so
//! the evaluator never sees a partially valid policy.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{PolicyError, Result};

const LABELS_KEY: &str = "require_reviews_for_labels";
const FILE_COUNT_KEY: &str = "require_reviews_for_num_of_files_changed";
const IGNORE_PATHS_KEY: &str = "ignore_paths";

/// Only whitespace, comments and document markers.
pub(crate) fn is_blank_document(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}

/// Reviews required when the PR carries `label`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelRule {
    pub label: String,
    pub reviews: u32,
}

/// Reviews required once the effective changed-file count reaches
/// `threshold`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileCountRule {
    #[serde(rename = "num")]
    pub threshold: u64,
    pub reviews: u32,
}

/// Review policy for one evaluation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPolicy {
    #[serde(rename = "require_reviews_for_labels", default)]
    pub label_rules: Vec<LabelRule>,
    #[serde(rename = "require_reviews_for_num_of_files_changed", default)]
    pub file_count_rules: Vec<FileCountRule>,
    #[serde(default)]
    pub ignore_paths: Vec<String>,
}

/// Wire shape; `null` sections are accepted and mean "no rules".
#[derive(Debug, Deserialize)]
struct RawPolicy {
    #[serde(rename = "require_reviews_for_labels", default)]
    label_rules: Option<Vec<LabelRule>>,
    #[serde(rename = "require_reviews_for_num_of_files_changed", default)]
    file_count_rules: Option<Vec<FileCountRule>>,
    #[serde(default)]
    ignore_paths: Option<Vec<String>>,
}

impl ReviewPolicy {
    /// Parse and validate a policy document.
    ///
    /// Returns `Ok(None)` for an empty document (blank, comments only, or
    /// `null`): there is nothing to evaluate.
    pub fn from_yaml(text: &str) -> Result<Option<Self>> {
        if is_blank_document(text) {
            return Ok(None);
        }

        let value: Value = serde_yaml::from_str(text)?;
        if value.is_null() {
            return Ok(None);
        }

        if let Value::Mapping(mapping) = &value {
            for key in mapping.keys() {
                let known = key
                    .as_str()
                    .is_some_and(|k| [LABELS_KEY, FILE_COUNT_KEY, IGNORE_PATHS_KEY].contains(&k));
                if !known {
                    tracing::debug!("ignoring unknown policy key {key:?}");
                }
            }
        }

        let raw: RawPolicy = serde_yaml::from_value(value)?;
        let policy = Self {
            label_rules: raw.label_rules.unwrap_or_default(),
            file_count_rules: raw.file_count_rules.unwrap_or_default(),
            ignore_paths: raw.ignore_paths.unwrap_or_default(),
        };
        policy.validate()?;
        Ok(Some(policy))
    }

    fn validate(&self) -> Result<()> {
        for (index, rule) in self.label_rules.iter().enumerate() {
            if rule.label.trim().is_empty() {
                return Err(PolicyError::invalid_rule(
                    LABELS_KEY,
                    format!("entry {index} has an empty label"),
                ));
            }
            let first = self
                .label_rules
                .iter()
                .position(|other| other.label == rule.label);
            if first != Some(index) {
                tracing::warn!(
                    "duplicate rule for label {:?} in {LABELS_KEY}; the first entry is used",
                    rule.label
                );
            }
        }

        for (index, pattern) in self.ignore_paths.iter().enumerate() {
            if pattern.is_empty() {
                return Err(PolicyError::invalid_rule(
                    IGNORE_PATHS_KEY,
                    format!("entry {index} is an empty pattern"),
                ));
            }
        }

        Ok(())
    }

    /// No rules on either threshold axis.
    pub fn has_no_rules(&self) -> bool {
        self.label_rules.is_empty() && self.file_count_rules.is_empty()
    }

    /// First rule for `label`, if any.
    pub fn label_rule(&self, label: &str) -> Option<&LabelRule> {
        self.label_rules.iter().find(|rule| rule.label == label)
    }
}
