//! Behavior shared by every analyzer: confidence scoring, issue
//! prioritization, and summarization. Expressed as free functions over the
//! issue list rather than a base type, since none of it depends on the
//! metric domain.

use crate::core::{Category, Issue, Severity};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Fixed evidence weight table. Keys absent from the evidence map contribute
/// zero rather than renormalizing over the present subset, which biases
/// confidence toward 0 for under-evidenced findings. Downstream report logic
/// assumes these exact constants; do not "fix" this.
pub const EVIDENCE_WEIGHTS: [(&str, f64); 3] = [
    ("pattern_match", 0.3),
    ("statistical_significance", 0.4),
    ("historical_data", 0.3),
];

/// Deterministic weighted-evidence score, clamped to [0.0, 1.0].
pub fn calculate_confidence(evidence: &BTreeMap<String, f64>) -> f64 {
    let score: f64 = EVIDENCE_WEIGHTS
        .iter()
        .filter_map(|(key, weight)| evidence.get(*key).map(|value| value * weight))
        .sum();
    score.clamp(0.0, 1.0)
}

/// Sort issues descending by (severity rank, confidence). The sort is stable,
/// so exact ties keep their original relative order. This ordering is both
/// the analyzer return order and the correlator input order.
pub fn prioritize(mut issues: Vec<Issue>) -> Vec<Issue> {
    issues.sort_by(|a, b| {
        match b.severity.rank().cmp(&a.severity.rank()) {
            Ordering::Equal => b.confidence.total_cmp(&a.confidence),
            order => order,
        }
    });
    issues
}

/// Summary statistics for a list of issues
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueSummary {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

pub fn summarize(issues: &[Issue]) -> IssueSummary {
    let mut summary = IssueSummary {
        total: issues.len(),
        ..Default::default()
    };
    for issue in issues {
        *summary.by_severity.entry(issue.severity).or_insert(0) += 1;
        *summary
            .by_category
            .entry(issue.category.clone())
            .or_insert(0) += 1;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn issue(severity: Severity, category: Category, confidence: f64) -> Issue {
        Issue {
            severity,
            category,
            title: "test issue".to_string(),
            description: "description".to_string(),
            affected_component: "component".to_string(),
            impact: "impact".to_string(),
            recommendation: "recommendation".to_string(),
            confidence,
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn confidence_of_empty_evidence_is_zero() {
        assert_eq!(calculate_confidence(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn confidence_weights_sum_as_specified() {
        let evidence = BTreeMap::from([
            ("pattern_match".to_string(), 1.0),
            ("statistical_significance".to_string(), 0.5),
            ("historical_data".to_string(), 1.0),
        ]);
        let expected = 0.3 + 0.5 * 0.4 + 0.3;
        assert!((calculate_confidence(&evidence) - expected).abs() < 1e-9);
    }

    #[test]
    fn confidence_ignores_unknown_evidence_keys() {
        let evidence = BTreeMap::from([
            ("pattern_match".to_string(), 1.0),
            ("gut_feeling".to_string(), 100.0),
        ]);
        assert!((calculate_confidence(&evidence) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn confidence_clamps_oversized_evidence() {
        let evidence = BTreeMap::from([
            ("pattern_match".to_string(), 50.0),
            ("statistical_significance".to_string(), 50.0),
        ]);
        assert_eq!(calculate_confidence(&evidence), 1.0);
    }

    #[test]
    fn confidence_clamps_negative_evidence() {
        let evidence = BTreeMap::from([("historical_data".to_string(), -10.0)]);
        assert_eq!(calculate_confidence(&evidence), 0.0);
    }

    #[test]
    fn prioritize_orders_by_severity_then_confidence() {
        let issues = vec![
            issue(Severity::Low, Category::Quality, 0.9),
            issue(Severity::Critical, Category::Security, 0.5),
            issue(Severity::High, Category::Performance, 0.7),
            issue(Severity::High, Category::Reliability, 0.95),
        ];
        let ordered = prioritize(issues);
        assert_eq!(ordered[0].severity, Severity::Critical);
        assert_eq!(ordered[1].severity, Severity::High);
        assert_eq!(ordered[1].confidence, 0.95);
        assert_eq!(ordered[2].confidence, 0.7);
        assert_eq!(ordered[3].severity, Severity::Low);
    }

    #[test]
    fn prioritize_is_stable_for_exact_ties() {
        let mut first = issue(Severity::Medium, Category::Performance, 0.8);
        first.title = "first".to_string();
        let mut second = issue(Severity::Medium, Category::Cost, 0.8);
        second.title = "second".to_string();

        let ordered = prioritize(vec![first, second]);
        assert_eq!(ordered[0].title, "first");
        assert_eq!(ordered[1].title, "second");
    }

    #[test]
    fn summarize_empty_list() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.by_severity.is_empty());
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn summarize_counts_by_severity_and_category() {
        let issues = vec![
            issue(Severity::High, Category::Reliability, 0.9),
            issue(Severity::High, Category::Performance, 0.8),
            issue(Severity::Low, Category::Reliability, 0.5),
        ];
        let summary = summarize(&issues);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_severity[&Severity::High], 2);
        assert_eq!(summary.by_severity[&Severity::Low], 1);
        assert_eq!(summary.by_category[&Category::Reliability], 2);
        assert_eq!(summary.by_category[&Category::Performance], 1);
    }

    fn arb_severity() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::Low),
            Just(Severity::Medium),
            Just(Severity::High),
            Just(Severity::Critical),
        ]
    }

    fn arb_issue() -> impl Strategy<Value = Issue> {
        (arb_severity(), 0.0f64..=1.0).prop_map(|(severity, confidence)| {
            issue(severity, Category::Performance, confidence)
        })
    }

    proptest! {
        #[test]
        fn prioritize_is_a_sorted_permutation(issues in prop::collection::vec(arb_issue(), 0..20)) {
            let ordered = prioritize(issues.clone());
            prop_assert_eq!(ordered.len(), issues.len());
            for pair in ordered.windows(2) {
                let key_a = (pair[0].severity.rank(), pair[0].confidence);
                let key_b = (pair[1].severity.rank(), pair[1].confidence);
                prop_assert!(key_a >= key_b);
            }
        }

        #[test]
        fn prioritize_is_idempotent(issues in prop::collection::vec(arb_issue(), 0..20)) {
            let once = prioritize(issues);
            let twice = prioritize(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn confidence_stays_in_unit_interval(
            evidence in prop::collection::btree_map("[a-z_]{1,30}", -1000.0f64..1000.0, 0..6)
        ) {
            let score = calculate_confidence(&evidence);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn summarize_total_matches_input_length(issues in prop::collection::vec(arb_issue(), 0..20)) {
            prop_assert_eq!(summarize(&issues).total, issues.len());
        }
    }
}
