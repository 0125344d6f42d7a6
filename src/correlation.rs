//! Cross-analyzer correlation.
//!
//! Consumes the union of issues produced by all analyzers in one run and
//! detects patterns that only exist across that union: cascading failures,
//! systemic resource bottlenecks, and platform-wide category pressure. Each
//! detection is a pure, single-pass transformation over the input; the input
//! is never mutated and an empty input yields an empty output.

use crate::analyzers::metadata;
use crate::core::{Category, Issue, Severity};
use serde_json::json;
use std::collections::BTreeMap;

/// Title keywords that mark an issue as resource-related
const RESOURCE_KEYWORDS: [&str; 4] = ["cpu", "memory", "resource", "gpu"];

/// Minimum number of resource-related performance issues that counts as a
/// shared bottleneck
const RESOURCE_BOTTLENECK_MIN: usize = 2;

/// Minimum per-category issue count that counts as systemic pressure
const SYSTEMIC_CATEGORY_MIN: usize = 5;

/// Detect issues that span multiple pipelines. Synthetic issues are emitted
/// in detection order: cascading failures, resource bottlenecks, then
/// systemic category pressure.
pub fn detect_cross_cutting(issues: &[Issue]) -> Vec<Issue> {
    log::info!("detecting cross-pipeline issues");

    let mut cross_issues = Vec::new();
    cross_issues.extend(detect_cascading_failures(issues));
    cross_issues.extend(detect_resource_bottlenecks(issues));
    cross_issues.extend(detect_systemic_issues(issues));

    log::info!("detected {} cross-pipeline issues", cross_issues.len());
    cross_issues
}

/// Build failures blocking deployments: both halves must be present
fn detect_cascading_failures(issues: &[Issue]) -> Vec<Issue> {
    let build_failures = issues
        .iter()
        .filter(|i| {
            i.title.to_lowercase().contains("build")
                && matches!(i.severity, Severity::High | Severity::Critical)
        })
        .count();
    let deployment_failures = issues
        .iter()
        .filter(|i| i.title.to_lowercase().contains("deployment"))
        .count();

    if build_failures == 0 || deployment_failures == 0 {
        return Vec::new();
    }

    vec![Issue {
        severity: Severity::Critical,
        category: Category::Reliability,
        title: "Cascading Failures Detected".to_string(),
        description: format!(
            "Build failures ({}) are likely causing deployment issues ({})",
            build_failures, deployment_failures
        ),
        affected_component: "CI/CD Pipeline".to_string(),
        impact: "Build failures block deployments, creating a bottleneck in the release \
                 process"
            .to_string(),
        recommendation: "Fix build issues first: address test failures, resolve dependency \
                         conflicts, improve build stability"
            .to_string(),
        confidence: 0.85,
        metadata: metadata([
            ("build_failures", json!(build_failures)),
            ("deployment_failures", json!(deployment_failures)),
        ]),
    }]
}

/// Resource constraints showing up across multiple pipelines at once
fn detect_resource_bottlenecks(issues: &[Issue]) -> Vec<Issue> {
    let resource_issues = issues
        .iter()
        .filter(|i| {
            i.category == Category::Performance && {
                let title = i.title.to_lowercase();
                RESOURCE_KEYWORDS.iter().any(|kw| title.contains(kw))
            }
        })
        .count();

    if resource_issues < RESOURCE_BOTTLENECK_MIN {
        return Vec::new();
    }

    vec![Issue {
        severity: Severity::High,
        category: Category::Performance,
        title: "System-Wide Resource Constraints".to_string(),
        description: format!(
            "Multiple pipelines experiencing resource constraints ({} issues)",
            resource_issues
        ),
        affected_component: "Infrastructure".to_string(),
        impact: "Resource constraints are creating bottlenecks across delivery and ML \
                 pipelines"
            .to_string(),
        recommendation: "Scale infrastructure, optimize resource allocation, implement \
                         resource quotas, investigate resource leaks"
            .to_string(),
        confidence: 0.80,
        metadata: metadata([("resource_issue_count", json!(resource_issues))]),
    }]
}

/// Category pressure: many issues in one category point at a platform-level
/// problem rather than isolated findings. Each category over the threshold
/// triggers its own synthetic issue.
fn detect_systemic_issues(issues: &[Issue]) -> Vec<Issue> {
    let mut category_counts: BTreeMap<Category, usize> = BTreeMap::new();
    for issue in issues {
        *category_counts.entry(issue.category.clone()).or_insert(0) += 1;
    }

    category_counts
        .into_iter()
        .filter(|(_, count)| *count >= SYSTEMIC_CATEGORY_MIN)
        .map(|(category, count)| Issue {
            severity: Severity::High,
            title: format!("Systemic {} Issues", category.title_case()),
            description: format!("Detected {} {} issues across pipelines", count, category),
            affected_component: "Platform-Wide".to_string(),
            impact: format!(
                "Multiple {} issues indicate a systemic problem requiring platform-level \
                 attention",
                category
            ),
            recommendation: format!(
                "Conduct root cause analysis for {} issues, implement platform-level \
                 improvements, review {} best practices",
                category, category
            ),
            confidence: 0.75,
            metadata: metadata([
                ("issue_count", json!(count)),
                ("category", json!(category.as_str())),
            ]),
            category,
        })
        .collect()
}
