//! Label → glob rules for the labeler tool.
//!
//! ```yaml
//! docs: "docs/**"
//! frontend:
//!   - "apps/web/**"
//!   - any: ["libs/ui/**"]
//!     all: ["!**/*.spec.ts"]
//! docs-only:
//!   - all: ["**/*.md"]
//! ```
//!
//! A label applies when any of its entries matches the changed files.

use serde::Serialize;
use serde_yaml::Value;

use crate::classifier::{MatchSpec, matches_any_spec};
use crate::error::{PolicyError, Result};
use crate::policy::is_blank_document;

/// Ordered label rules, in the order they appear in the document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelerConfig {
    rules: Vec<(String, Vec<MatchSpec>)>,
}

impl LabelerConfig {
    pub fn new(rules: Vec<(String, Vec<MatchSpec>)>) -> Self {
        Self { rules }
    }

    /// Parse a labeler document. Blank or `null` documents have no rules.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if is_blank_document(text) {
            return Ok(Self::default());
        }

        let mapping = match serde_yaml::from_str::<Value>(text)? {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(PolicyError::invalid_rule(
                    "labeler configuration",
                    "expected a mapping of label names to globs",
                ));
            }
        };

        let mut rules = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let label = label_name(&key)?;
            let specs = match value {
                Value::String(glob) => vec![MatchSpec::glob(glob)],
                Value::Sequence(entries) => entries
                    .into_iter()
                    .map(|entry| match_spec(&label, entry))
                    .collect::<Result<Vec<_>>>()?,
                _ => return Err(PolicyError::UnexpectedLabelType { label }),
            };
            rules.push((label, specs));
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &[MatchSpec])> {
        self.rules
            .iter()
            .map(|(label, specs)| (label.as_str(), specs.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn label_name(key: &Value) -> Result<String> {
    match key {
        Value::String(label) => Ok(label.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(PolicyError::invalid_rule(
            "labeler configuration",
            format!("label names must be scalars, found {other:?}"),
        )),
    }
}

fn match_spec(label: &str, entry: Value) -> Result<MatchSpec> {
    match entry {
        Value::String(glob) => Ok(MatchSpec::glob(glob)),
        Value::Mapping(_) => {
            serde_yaml::from_value(entry).map_err(|err| PolicyError::InvalidMatchSpec {
                label: label.to_string(),
                reason: err.to_string(),
            })
        }
        other => Err(PolicyError::InvalidMatchSpec {
            label: label.to_string(),
            reason: format!("expected a glob or an any/all mapping, found {other:?}"),
        }),
    }
}

/// Labels to add and labels to take off a PR.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LabelPlan {
    pub to_add: Vec<String>,
    /// Configured labels the PR carries whose rules no longer match.
    pub to_remove: Vec<String>,
}

/// Decide which configured labels apply to `changed_files`.
pub fn plan_labels<F, L>(config: &LabelerConfig, changed_files: &[F], current_labels: &[L]) -> LabelPlan
where
    F: AsRef<str>,
    L: AsRef<str>,
{
    let mut plan = LabelPlan::default();
    for (label, specs) in config.rules() {
        tracing::debug!("processing {label}");
        if matches_any_spec(changed_files, specs) {
            plan.to_add.push(label.to_string());
        } else if current_labels.iter().any(|current| current.as_ref() == label) {
            plan.to_remove.push(label.to_string());
        }
    }
    plan
}
