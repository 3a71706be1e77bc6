//! Required-review computation.
//!
//! Label rules and file-count brackets are independent axes; the PR must
//! satisfy whichever demands the most reviews. Within the file-count axis
//! only the highest qualifying bracket applies.

use std::cmp::Reverse;

use crate::classifier::is_ignored;
use crate::policy::{FileCountRule, ReviewPolicy};

/// Maximum reviews required across all rules that apply to the PR.
///
/// Each PR label contributes the reviews of the first label rule with the
/// same name. File-count rules contribute the rule with the largest
/// threshold not exceeding `effective_file_count`; equal thresholds keep
/// their configured order.
pub fn compute_max_reviews_required<S: AsRef<str>>(
    policy: &ReviewPolicy,
    labels: &[S],
    effective_file_count: u64,
) -> u32 {
    let mut required = 0;

    for label in labels {
        if let Some(rule) = policy.label_rule(label.as_ref()) {
            required = required.max(rule.reviews);
        }
    }

    if let Some(rule) = file_count_bracket(&policy.file_count_rules, effective_file_count) {
        required = required.max(rule.reviews);
    }

    required
}

fn file_count_bracket(rules: &[FileCountRule], count: u64) -> Option<&FileCountRule> {
    let mut sorted: Vec<&FileCountRule> = rules.iter().collect();
    // Stable, so equal thresholds keep configuration order.
    sorted.sort_by_key(|rule| Reverse(rule.threshold));
    sorted.into_iter().find(|rule| rule.threshold <= count)
}

/// Changed-file count after dropping files matched by `ignore_paths`.
///
/// Starts from the host-reported count and subtracts one per ignored file,
/// never going below zero.
pub fn effective_file_count<S: AsRef<str>>(
    reported: u64,
    changed_files: &[S],
    ignore_paths: &[String],
) -> u64 {
    if ignore_paths.is_empty() {
        return reported;
    }
    changed_files
        .iter()
        .filter(|file| is_ignored(file.as_ref(), ignore_paths))
        .fold(reported, |count, _| count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LabelRule;
    use pretty_assertions::assert_eq;

    fn label_policy() -> ReviewPolicy {
        ReviewPolicy {
            label_rules: vec![
                LabelRule {
                    label: "sensitive".into(),
                    reviews: 2,
                },
                LabelRule {
                    label: "nightwatch".into(),
                    reviews: 1,
                },
            ],
            ..Default::default()
        }
    }

    fn bracket_policy(rules: &[(u64, u32)]) -> ReviewPolicy {
        ReviewPolicy {
            file_count_rules: rules
                .iter()
                .map(|&(threshold, reviews)| FileCountRule { threshold, reviews })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_policy_requires_nothing() {
        let policy = ReviewPolicy::default();
        for count in [0, 1, 50] {
            assert_eq!(compute_max_reviews_required(&policy, &["sensitive"], count), 0);
        }
    }

    #[test]
    fn label_rule_applies() {
        assert_eq!(
            compute_max_reviews_required(&label_policy(), &["sensitive"], 2),
            2
        );
    }

    #[test]
    fn unknown_labels_contribute_nothing() {
        assert_eq!(compute_max_reviews_required(&label_policy(), &["wip"], 2), 0);
    }

    #[test]
    fn more_matching_labels_never_lower_the_requirement() {
        let policy = label_policy();
        let one = compute_max_reviews_required(&policy, &["nightwatch"], 0);
        let two = compute_max_reviews_required(&policy, &["nightwatch", "sensitive"], 0);
        assert!(two >= one);
        assert_eq!(two, 2);
    }

    #[test]
    fn highest_qualifying_bracket_wins() {
        let policy = bracket_policy(&[(3, 30), (2, 20), (1, 10)]);
        assert_eq!(compute_max_reviews_required::<&str>(&policy, &[], 2), 20);
        assert_eq!(compute_max_reviews_required::<&str>(&policy, &[], 5), 30);
        assert_eq!(compute_max_reviews_required::<&str>(&policy, &[], 1), 10);
        assert_eq!(compute_max_reviews_required::<&str>(&policy, &[], 0), 0);
    }

    #[test]
    fn bracket_order_in_config_does_not_matter() {
        let policy = bracket_policy(&[(1, 10), (3, 30), (2, 20)]);
        assert_eq!(compute_max_reviews_required::<&str>(&policy, &[], 2), 20);
    }

    #[test]
    fn equal_thresholds_keep_configured_order() {
        let policy = bracket_policy(&[(2, 7), (2, 3)]);
        assert_eq!(compute_max_reviews_required::<&str>(&policy, &[], 2), 7);
    }

    #[test]
    fn evaluation_does_not_reorder_the_policy() {
        let policy = bracket_policy(&[(1, 10), (3, 30)]);
        compute_max_reviews_required::<&str>(&policy, &[], 3);
        assert_eq!(policy.file_count_rules[0].threshold, 1);
    }

    #[test]
    fn axes_combine_with_max_not_sum() {
        let mut policy = label_policy();
        policy.file_count_rules = vec![
            FileCountRule {
                threshold: 3,
                reviews: 3,
            },
            FileCountRule {
                threshold: 2,
                reviews: 2,
            },
            FileCountRule {
                threshold: 1,
                reviews: 1,
            },
        ];
        assert_eq!(
            compute_max_reviews_required(&policy, &["sensitive", "nightwatch"], 1),
            2
        );
        assert_eq!(compute_max_reviews_required(&policy, &["nightwatch"], 3), 3);
    }

    #[test]
    fn ignored_files_reduce_the_count() {
        let files = [
            "apps/web/src/containers/class/class.ts",
            "apps/web-e2e-nightwatch/src/utils/apiUtils.ts",
        ];
        let ignore = vec!["apps/web-e2e-nightwatch/**/*".to_string()];
        assert_eq!(effective_file_count(2, &files, &ignore), 1);
        assert_eq!(effective_file_count(2, &files, &[]), 2);
    }

    #[test]
    fn ignored_files_never_drive_the_count_negative() {
        let files = ["a.snap", "b.snap", "c.snap"];
        let ignore = vec!["*.snap".to_string()];
        assert_eq!(effective_file_count(1, &files, &ignore), 0);
        assert_eq!(effective_file_count(0, &files, &ignore), 0);
    }
}
