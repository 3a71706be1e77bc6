//! PR snapshot in, pass/fail verdict out.

use serde::{Deserialize, Serialize};

use crate::evaluator::{compute_max_reviews_required, effective_file_count};
use crate::policy::ReviewPolicy;

/// Observed state of a PR at evaluation time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSnapshot {
    pub labels: Vec<String>,
    pub changed_files: Vec<String>,
    /// Count reported by the host; may differ from `changed_files.len()`.
    pub reported_changed_file_count: u64,
    /// Submitted reviews in any state.
    pub current_review_count: u64,
}

/// Outcome of comparing required reviews against current reviews.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub required: u32,
    pub current: u64,
    pub satisfied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deficit_message: Option<String>,
}

impl Verdict {
    pub fn new(required: u32, current: u64) -> Self {
        let required_reviews = u64::from(required);
        let satisfied = current >= required_reviews;
        let deficit_message = (!satisfied).then(|| {
            format!(
                "Need to add {} more reviews",
                required_reviews - current
            )
        });
        Self {
            required,
            current,
            satisfied,
            deficit_message,
        }
    }

    /// Reviews still missing; zero when satisfied.
    pub fn deficit(&self) -> u64 {
        u64::from(self.required).saturating_sub(self.current)
    }
}

impl ReviewPolicy {
    /// Apply ignore paths, thresholds and the satisfaction check to one PR.
    pub fn evaluate(&self, snapshot: &PrSnapshot) -> Verdict {
        let effective = effective_file_count(
            snapshot.reported_changed_file_count,
            &snapshot.changed_files,
            &self.ignore_paths,
        );
        tracing::debug!(
            "effective changed-file count {effective} (reported {})",
            snapshot.reported_changed_file_count
        );

        let required = compute_max_reviews_required(self, &snapshot.labels, effective);

        Verdict::new(required, snapshot.current_review_count)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::policy::{FileCountRule, LabelRule};
    use pretty_assertions::assert_eq;

    fn brackets() -> Vec<FileCountRule> {
        [(3, 30), (2, 20), (1, 10)]
            .into_iter()
            .map(|(threshold, reviews)| FileCountRule { threshold, reviews })
            .collect()
    }

    fn snapshot(labels: &[&str], files: &[&str], reviews: u64) -> PrSnapshot {
        PrSnapshot {
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
            changed_files: files.iter().map(|f| (*f).to_string()).collect(),
            reported_changed_file_count: files.len() as u64,
            current_review_count: reviews,
        }
    }

    const FILES: &[&str] = &[
        "apps/web/src/containers/class/class.ts",
        "apps/web-e2e-nightwatch/src/utils/apiUtils.ts",
    ];

    #[test]
    fn unsatisfied_verdict_reports_the_deficit() {
        let verdict = Verdict::new(2, 0);
        assert!(!verdict.satisfied);
        assert_eq!(verdict.deficit(), 2);
        assert_eq!(
            verdict.deficit_message.as_deref(),
            Some("Need to add 2 more reviews")
        );
    }

    #[test]
    fn satisfied_verdict_has_no_message() {
        let verdict = Verdict::new(2, 3);
        assert!(verdict.satisfied);
        assert_eq!(verdict.deficit(), 0);
        assert_eq!(verdict.deficit_message, None);
    }

    #[test]
    fn ignore_paths_feed_the_bracket_selection() {
        let policy = ReviewPolicy {
            file_count_rules: brackets(),
            ignore_paths: vec!["apps/web-e2e-nightwatch/**/*".into()],
            ..Default::default()
        };
        let verdict = policy.evaluate(&snapshot(&["nightwatch"], FILES, 10));
        assert_eq!(verdict.required, 10);
        assert!(verdict.satisfied);
    }

    #[test]
    fn empty_pr_requires_nothing_without_a_zero_bracket() {
        let policy = ReviewPolicy {
            label_rules: vec![LabelRule {
                label: "sensitive".into(),
                reviews: 2,
            }],
            file_count_rules: brackets(),
            ..Default::default()
        };
        let verdict = policy.evaluate(&snapshot(&[], &[], 0));
        assert_eq!(verdict, Verdict::new(0, 0));
    }

    #[test]
    fn zero_file_bracket_applies_to_an_empty_pr() {
        let policy = ReviewPolicy {
            label_rules: vec![LabelRule {
                label: "sensitive".into(),
                reviews: 2,
            }],
            file_count_rules: vec![FileCountRule {
                threshold: 0,
                reviews: 5,
            }],
            ..Default::default()
        };
        let verdict = policy.evaluate(&snapshot(&[], &[], 0));
        assert_eq!(verdict.required, 5);
        assert!(!verdict.satisfied);
        assert_eq!(
            verdict.required,
            compute_max_reviews_required::<&str>(&policy, &[], 0)
        );
    }

    #[test]
    fn verdict_serializes_without_empty_message() {
        let json = serde_json::to_value(Verdict::new(1, 1)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"required": 1, "current": 1, "satisfied": true})
        );
    }
}
