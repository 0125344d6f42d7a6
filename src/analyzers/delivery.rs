//! Delivery-pipeline analyzer: builds, tests, deployments, build
//! infrastructure, security scans, and orchestration-cluster health.

use super::{metadata, Analyzer};
use crate::config::DeliveryThresholds;
use crate::core::{
    parse_records, parse_section, BuildRecord, Category, ClusterMetrics, DeploymentRecord, Issue,
    MetricBatch, Optimization, ResourceMetrics, SecurityScan, Severity, TestRecord,
};
use crate::core::{EffortLevel, OptimizationKind};
use crate::priority::prioritize;
use serde_json::json;
use std::collections::BTreeMap;

/// Pod states that count as failed
const FAILED_POD_STATES: [&str; 3] = ["CrashLoopBackOff", "Error", "Failed"];

pub struct DeliveryAnalyzer {
    thresholds: DeliveryThresholds,
}

impl DeliveryAnalyzer {
    pub fn new(thresholds: DeliveryThresholds) -> Self {
        Self { thresholds }
    }

    fn check_build_performance(&self, builds: &[BuildRecord]) -> Vec<Issue> {
        let mut issues = Vec::new();

        if builds.is_empty() {
            return issues;
        }

        // Average duration over successful builds only
        let durations: Vec<f64> = builds
            .iter()
            .filter(|b| b.status.as_deref() == Some("success"))
            .map(|b| b.duration)
            .collect();
        if !durations.is_empty() {
            let avg_duration = durations.iter().sum::<f64>() / durations.len() as f64;

            if avg_duration > self.thresholds.slow_build_secs {
                issues.push(Issue {
                    severity: Severity::Medium,
                    category: Category::Performance,
                    title: "Slow Build Times".to_string(),
                    description: format!(
                        "Average build time is {:.0} seconds, exceeding recommended threshold",
                        avg_duration
                    ),
                    affected_component: "CI/CD Pipeline".to_string(),
                    impact: format!(
                        "Delayed feedback cycles, reduced developer productivity. \
                         Average delay: {:.0}s per build",
                        avg_duration - self.thresholds.cacheable_build_secs
                    ),
                    recommendation: "Consider: 1) Enable build caching, 2) Parallelize test \
                                     execution, 3) Use faster build agents, 4) Optimize \
                                     dependency resolution"
                        .to_string(),
                    confidence: 0.9,
                    metadata: metadata([
                        ("avg_duration", json!(avg_duration)),
                        ("sample_size", json!(durations.len())),
                    ]),
                });
            }
        }

        // Failure rate over all builds
        let total_builds = builds.len();
        let failed_builds = builds
            .iter()
            .filter(|b| b.status.as_deref() == Some("failed"))
            .count();
        let failure_rate = failed_builds as f64 / total_builds as f64;

        if failure_rate > self.thresholds.build_failure_rate {
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Reliability,
                title: "High Build Failure Rate".to_string(),
                description: format!(
                    "Build failure rate is {:.1}%, indicating instability",
                    failure_rate * 100.0
                ),
                affected_component: "Build Process".to_string(),
                impact: format!(
                    "{} out of {} builds failed. This blocks deployments and wastes resources",
                    failed_builds, total_builds
                ),
                recommendation: "Investigate common failure patterns, improve test stability, \
                                 add pre-commit hooks, review recent code changes"
                    .to_string(),
                confidence: 0.95,
                metadata: metadata([
                    ("failure_rate", json!(failure_rate)),
                    ("failed_count", json!(failed_builds)),
                    ("total_count", json!(total_builds)),
                ]),
            });
        }

        issues
    }

    fn check_test_flakiness(&self, tests: &[TestRecord]) -> Vec<Issue> {
        let mut issues = Vec::new();

        // Group executions by test name, preserving first-seen order so the
        // reported sample names are deterministic
        let mut order: Vec<String> = Vec::new();
        let mut results: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for test in tests {
            let Some(name) = test.name.as_deref() else {
                continue;
            };
            if !results.contains_key(name) {
                order.push(name.to_string());
            }
            let counts = results.entry(name.to_string()).or_insert((0, 0));
            if test.status.as_deref() == Some("passed") {
                counts.0 += 1;
            } else {
                counts.1 += 1;
            }
        }

        let mut flaky: Vec<(String, f64)> = Vec::new();
        for name in order {
            let (passed, failed) = results[&name];
            let total = passed + failed;
            if total > 1 && failed > 0 && passed > 0 {
                let failure_rate = failed as f64 / total as f64;
                if failure_rate > self.thresholds.flaky_ratio_low
                    && failure_rate < self.thresholds.flaky_ratio_high
                {
                    flaky.push((name, failure_rate));
                }
            }
        }

        if !flaky.is_empty() {
            let sample: Vec<&str> = flaky.iter().take(3).map(|(name, _)| name.as_str()).collect();
            let ellipsis = if flaky.len() > 3 { "..." } else { "" };
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Reliability,
                title: "Flaky Tests Detected".to_string(),
                description: format!(
                    "Found {} flaky tests with intermittent failures",
                    flaky.len()
                ),
                affected_component: "Test Suite".to_string(),
                impact: "Flaky tests reduce confidence in test results, waste time \
                         investigating false failures, and may mask real issues"
                    .to_string(),
                recommendation: format!(
                    "Investigate and fix flaky tests: {}{}. Common causes: timing issues, \
                     shared state, external dependencies",
                    sample.join(", "),
                    ellipsis
                ),
                confidence: 0.85,
                metadata: metadata([(
                    "flaky_tests",
                    json!(flaky
                        .iter()
                        .map(|(name, rate)| json!({"name": name, "failure_rate": rate}))
                        .collect::<Vec<_>>()),
                )]),
            });
        }

        issues
    }

    fn check_deployments(&self, deployments: &[DeploymentRecord]) -> Vec<Issue> {
        let mut issues = Vec::new();

        // Only records carrying a timestamp count as valid deployments
        let recent: Vec<&DeploymentRecord> = deployments
            .iter()
            .filter(|d| d.timestamp.as_deref().is_some_and(|t| !t.is_empty()))
            .collect();
        let failed = recent
            .iter()
            .filter(|d| d.status.as_deref() == Some("failed"))
            .count();

        if failed > 0 {
            let failure_rate = failed as f64 / recent.len() as f64;

            if failure_rate > self.thresholds.deploy_failure_rate {
                issues.push(Issue {
                    severity: Severity::Critical,
                    category: Category::Reliability,
                    title: "High Deployment Failure Rate".to_string(),
                    description: format!("Deployment failure rate is {:.1}%", failure_rate * 100.0),
                    affected_component: "Deployment Pipeline".to_string(),
                    impact: "Failed deployments cause service disruptions, rollbacks, and \
                             delayed feature releases"
                        .to_string(),
                    recommendation: "Review deployment process, implement better \
                                     pre-deployment testing, add automated rollback \
                                     mechanisms, improve deployment scripts"
                        .to_string(),
                    confidence: 0.92,
                    metadata: metadata([
                        ("failure_rate", json!(failure_rate)),
                        ("failed_count", json!(failed)),
                        ("total_count", json!(recent.len())),
                    ]),
                });
            }
        }

        issues
    }

    fn check_resource_usage(&self, resources: &ResourceMetrics) -> Vec<Issue> {
        let mut issues = Vec::new();

        if let Some((max_cpu, avg_cpu)) = max_and_average(&resources.cpu_usage) {
            if max_cpu > self.thresholds.max_cpu_percent {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Performance,
                    title: "High CPU Usage".to_string(),
                    description: format!(
                        "CPU usage reached {:.1}% (average: {:.1}%)",
                        max_cpu, avg_cpu
                    ),
                    affected_component: "Build Infrastructure".to_string(),
                    impact: "High CPU usage causes build slowdowns, potential timeouts, and \
                             resource contention"
                        .to_string(),
                    recommendation: "Scale build agents, optimize build processes, distribute \
                                     workload, investigate CPU-intensive operations"
                        .to_string(),
                    confidence: 0.88,
                    metadata: metadata([
                        ("max_cpu", json!(max_cpu)),
                        ("avg_cpu", json!(avg_cpu)),
                    ]),
                });
            }
        }

        if let Some((max_memory, avg_memory)) = max_and_average(&resources.memory_usage) {
            if max_memory > self.thresholds.max_memory_percent {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Performance,
                    title: "High Memory Usage".to_string(),
                    description: format!(
                        "Memory usage reached {:.1}% (average: {:.1}%)",
                        max_memory, avg_memory
                    ),
                    affected_component: "Build Infrastructure".to_string(),
                    impact: "High memory usage can cause OOM errors, build failures, and \
                             system instability"
                        .to_string(),
                    recommendation: "Increase memory allocation, optimize memory-intensive \
                                     processes, investigate memory leaks, add memory monitoring"
                        .to_string(),
                    confidence: 0.87,
                    metadata: metadata([
                        ("max_memory", json!(max_memory)),
                        ("avg_memory", json!(avg_memory)),
                    ]),
                });
            }
        }

        issues
    }

    fn check_security(&self, scans: &[SecurityScan]) -> Vec<Issue> {
        let mut issues = Vec::new();

        for scan in scans {
            let critical: Vec<_> = scan
                .vulnerabilities
                .iter()
                .filter(|v| v.severity.as_deref() == Some("critical"))
                .collect();
            let high_count = scan
                .vulnerabilities
                .iter()
                .filter(|v| v.severity.as_deref() == Some("high"))
                .count();

            if !critical.is_empty() {
                let cves: Vec<&str> = critical
                    .iter()
                    .take(3)
                    .map(|v| v.cve.as_deref().unwrap_or("Unknown"))
                    .collect();
                issues.push(Issue {
                    severity: Severity::Critical,
                    category: Category::Security,
                    title: "Critical Security Vulnerabilities Detected".to_string(),
                    description: format!(
                        "Found {} critical security vulnerabilities",
                        critical.len()
                    ),
                    affected_component: "Dependencies/Code".to_string(),
                    impact: "Critical vulnerabilities pose immediate security risks and must \
                             be addressed urgently"
                        .to_string(),
                    recommendation: format!(
                        "Update vulnerable dependencies immediately. CVEs: {}",
                        cves.join(", ")
                    ),
                    confidence: 0.98,
                    metadata: metadata([
                        ("critical_count", json!(critical.len())),
                        ("vulnerabilities", json!(critical)),
                    ]),
                });
            }

            if high_count > self.thresholds.high_vuln_count {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Security,
                    title: "Multiple High-Severity Vulnerabilities".to_string(),
                    description: format!(
                        "Found {} high-severity security vulnerabilities",
                        high_count
                    ),
                    affected_component: "Dependencies/Code".to_string(),
                    impact: "High-severity vulnerabilities require prompt attention to \
                             prevent potential security breaches"
                        .to_string(),
                    recommendation: "Review and update vulnerable dependencies, implement \
                                     security scanning in CI/CD"
                        .to_string(),
                    confidence: 0.95,
                    metadata: metadata([("high_count", json!(high_count))]),
                });
            }
        }

        issues
    }

    fn check_cluster_health(&self, cluster: &ClusterMetrics) -> Vec<Issue> {
        let mut issues = Vec::new();

        if !cluster.pods.is_empty() {
            let failed: Vec<&str> = cluster
                .pods
                .iter()
                .filter(|p| {
                    p.status
                        .as_deref()
                        .is_some_and(|s| FAILED_POD_STATES.contains(&s))
                })
                .filter_map(|p| p.name.as_deref())
                .collect();
            let pending = cluster
                .pods
                .iter()
                .filter(|p| p.status.as_deref() == Some("Pending"))
                .count();

            if !failed.is_empty() {
                issues.push(Issue {
                    severity: Severity::Critical,
                    category: Category::Reliability,
                    title: "Cluster Pod Failures".to_string(),
                    description: format!("{} pods are in failed state", failed.len()),
                    affected_component: "Orchestration Cluster".to_string(),
                    impact: "Failed pods indicate application crashes, configuration errors, \
                             or resource issues. Services may be degraded or unavailable"
                        .to_string(),
                    recommendation: "Inspect pod logs for the failing workloads. Common \
                                     causes: image pull errors, OOM kills, liveness probe \
                                     failures, misconfigured environment variables"
                        .to_string(),
                    confidence: 0.95,
                    metadata: metadata([
                        (
                            "failed_pods",
                            json!(failed.iter().take(5).collect::<Vec<_>>()),
                        ),
                        ("failed_count", json!(failed.len())),
                    ]),
                });
            }

            if pending > self.thresholds.pending_pod_count {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Reliability,
                    title: "Multiple Pods Stuck in Pending State".to_string(),
                    description: format!("{} pods cannot be scheduled", pending),
                    affected_component: "Cluster Scheduler".to_string(),
                    impact: "Pending pods indicate resource constraints or scheduling issues, \
                             preventing services from scaling or deploying"
                        .to_string(),
                    recommendation: "Check node capacity and scheduling constraints. Verify \
                                     resource requests/limits, node selectors, taints and \
                                     tolerations, and autoscaling configuration"
                        .to_string(),
                    confidence: 0.90,
                    metadata: metadata([("pending_count", json!(pending))]),
                });
            }
        }

        if !cluster.nodes.is_empty() {
            let unhealthy: Vec<&str> = cluster
                .nodes
                .iter()
                .filter(|n| n.status.as_deref() != Some("Ready"))
                .filter_map(|n| n.name.as_deref())
                .collect();

            if !unhealthy.is_empty() {
                issues.push(Issue {
                    severity: Severity::Critical,
                    category: Category::Reliability,
                    title: "Unhealthy Cluster Nodes".to_string(),
                    description: format!("{} nodes are not in Ready state", unhealthy.len()),
                    affected_component: "Cluster Nodes".to_string(),
                    impact: "Unhealthy nodes reduce cluster capacity and may cause pod \
                             evictions or scheduling failures"
                        .to_string(),
                    recommendation: "Investigate node conditions. Check for disk pressure, \
                                     memory pressure, network issues, or node agent problems"
                        .to_string(),
                    confidence: 0.96,
                    metadata: metadata([
                        ("unhealthy_nodes", json!(&unhealthy)),
                        ("unhealthy_count", json!(unhealthy.len())),
                        ("total_nodes", json!(cluster.nodes.len())),
                    ]),
                });
            }
        }

        let mut zero_available: Vec<&str> = Vec::new();
        let mut under_replicated: Vec<&str> = Vec::new();
        for deploy in &cluster.deployments {
            if deploy.desired_replicas > 0 && deploy.available_replicas < deploy.desired_replicas {
                let name = deploy.name.as_deref().unwrap_or("unknown");
                if deploy.available_replicas == 0 {
                    zero_available.push(name);
                } else {
                    under_replicated.push(name);
                }
            }
        }

        if !zero_available.is_empty() {
            issues.push(Issue {
                severity: Severity::Critical,
                category: Category::Reliability,
                title: "Cluster Deployments with Zero Availability".to_string(),
                description: format!(
                    "{} deployments have no available replicas",
                    zero_available.len()
                ),
                affected_component: "Cluster Deployments".to_string(),
                impact: "Services are completely unavailable, causing outages and service \
                         disruptions"
                    .to_string(),
                recommendation: format!(
                    "Check the status of deployment '{}' first. Review pod events, resource \
                     limits, and image availability",
                    zero_available[0]
                ),
                confidence: 0.98,
                metadata: metadata([("failed_deployments", json!(zero_available))]),
            });
        }

        if !under_replicated.is_empty() {
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Reliability,
                title: "Under-Replicated Cluster Deployments".to_string(),
                description: format!(
                    "{} deployments running below desired replica count",
                    under_replicated.len()
                ),
                affected_component: "Cluster Deployments".to_string(),
                impact: "Reduced capacity and redundancy, potential performance degradation \
                         and single points of failure"
                    .to_string(),
                recommendation: "Investigate why replicas aren't starting. Check resource \
                                 availability, autoscaler configuration, and pod scheduling \
                                 constraints"
                    .to_string(),
                confidence: 0.88,
                metadata: metadata([("underscaled_deployments", json!(under_replicated))]),
            });
        }

        if let Some(usage) = &cluster.resource_usage {
            if usage.cpu_usage_percent > self.thresholds.cluster_cpu_percent {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Performance,
                    title: "High Cluster CPU Usage".to_string(),
                    description: format!("Cluster CPU usage at {:.1}%", usage.cpu_usage_percent),
                    affected_component: "Cluster Resources".to_string(),
                    impact: "High CPU usage may cause throttling, slow response times, and \
                             pod scheduling failures"
                        .to_string(),
                    recommendation: "Scale cluster nodes, optimize pod resource \
                                     requests/limits, identify CPU-intensive workloads, \
                                     consider horizontal pod autoscaling"
                        .to_string(),
                    confidence: 0.92,
                    metadata: metadata([("cpu_usage_percent", json!(usage.cpu_usage_percent))]),
                });
            }

            if usage.memory_usage_percent > self.thresholds.cluster_memory_percent {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Performance,
                    title: "High Cluster Memory Usage".to_string(),
                    description: format!(
                        "Cluster memory usage at {:.1}%",
                        usage.memory_usage_percent
                    ),
                    affected_component: "Cluster Resources".to_string(),
                    impact: "High memory usage may trigger OOM kills, pod evictions, and \
                             prevent new pods from scheduling"
                        .to_string(),
                    recommendation: "Scale cluster nodes, review memory requests/limits, \
                                     investigate memory leaks, enable cluster autoscaling"
                        .to_string(),
                    confidence: 0.92,
                    metadata: metadata([(
                        "memory_usage_percent",
                        json!(usage.memory_usage_percent),
                    )]),
                });
            }
        }

        let pending_claims: Vec<&str> = cluster
            .storage_claims
            .iter()
            .filter(|c| c.status.as_deref() == Some("Pending"))
            .filter_map(|c| c.name.as_deref())
            .collect();
        if !pending_claims.is_empty() {
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Reliability,
                title: "Pending Storage Claims".to_string(),
                description: format!(
                    "{} storage claims unable to bind to volumes",
                    pending_claims.len()
                ),
                affected_component: "Cluster Storage".to_string(),
                impact: "Applications requiring persistent storage cannot start, blocking \
                         deployments and causing data access issues"
                    .to_string(),
                recommendation: "Check storage class availability, verify the volume \
                                 provisioner is working, ensure sufficient storage capacity \
                                 in the cluster"
                    .to_string(),
                confidence: 0.87,
                metadata: metadata([("pending_claims", json!(pending_claims))]),
            });
        }

        if let Some(mesh) = &cluster.service_mesh {
            if mesh.error_rate > self.thresholds.mesh_error_rate {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Reliability,
                    title: "High Service Mesh Error Rate".to_string(),
                    description: format!(
                        "Service mesh reporting {:.1}% error rate",
                        mesh.error_rate * 100.0
                    ),
                    affected_component: "Service Mesh".to_string(),
                    impact: "High error rates indicate service communication failures, \
                             impacting application reliability"
                        .to_string(),
                    recommendation: "Review service mesh metrics, check for misconfigured \
                                     routes, verify mTLS settings, investigate failing \
                                     services"
                        .to_string(),
                    confidence: 0.85,
                    metadata: metadata([("error_rate", json!(mesh.error_rate))]),
                });
            }
        }

        issues
    }
}

/// Max and mean of a sample list; None when the list is empty
fn max_and_average(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    Some((max, avg))
}

impl Analyzer for DeliveryAnalyzer {
    fn name(&self) -> &'static str {
        "delivery"
    }

    fn analyze(&self, batch: &MetricBatch) -> Vec<Issue> {
        log::info!("delivery analyzer inspecting batch");
        let mut issues = Vec::new();

        let builds: Vec<BuildRecord> = parse_records(&batch.builds, "builds");
        issues.extend(self.check_build_performance(&builds));

        let tests: Vec<TestRecord> = parse_records(&batch.tests, "tests");
        issues.extend(self.check_test_flakiness(&tests));

        let deployments: Vec<DeploymentRecord> = parse_records(&batch.deployments, "deployments");
        issues.extend(self.check_deployments(&deployments));

        if let Some(resources) = parse_section::<ResourceMetrics>(&batch.resources, "resources") {
            issues.extend(self.check_resource_usage(&resources));
        }

        let scans: Vec<SecurityScan> = parse_records(&batch.security_scans, "security_scans");
        issues.extend(self.check_security(&scans));

        if let Some(cluster) = parse_section::<ClusterMetrics>(&batch.cluster, "cluster") {
            issues.extend(self.check_cluster_health(&cluster));
        }

        let issues = prioritize(issues);
        log::info!("delivery analyzer found {} issues", issues.len());
        issues
    }

    fn optimize(&self, batch: &MetricBatch, issues: &[Issue]) -> Vec<Optimization> {
        log::info!("delivery analyzer generating optimization suggestions");
        let mut optimizations = Vec::new();

        // Build caching: mean duration over all builds, not just successes
        let builds: Vec<BuildRecord> = parse_records(&batch.builds, "builds");
        if !builds.is_empty() {
            let avg_duration =
                builds.iter().map(|b| b.duration).sum::<f64>() / builds.len() as f64;

            if avg_duration > self.thresholds.cacheable_build_secs {
                optimizations.push(Optimization {
                    kind: OptimizationKind::Time,
                    title: "Implement Build Caching".to_string(),
                    description: "Reduce build times by caching dependencies and build \
                                  artifacts"
                        .to_string(),
                    estimated_impact: format!(
                        "Potential 30-50% reduction in build time (estimated saving: {:.0}s \
                         per build)",
                        avg_duration * 0.4
                    ),
                    implementation_effort: EffortLevel::Medium,
                    priority: 1,
                    steps: vec![
                        "Enable dependency caching in the CI/CD system".to_string(),
                        "Implement container layer caching for containerized builds".to_string(),
                        "Cache compiled artifacts between builds".to_string(),
                        "Use distributed caching for multi-stage builds".to_string(),
                    ],
                    metrics_impact: BTreeMap::from([
                        ("build_time_reduction".to_string(), 0.4),
                        ("resource_usage_reduction".to_string(), 0.2),
                    ]),
                });
            }
        }

        let has_test_issues = issues.iter().any(|i| {
            i.category == Category::Reliability && i.title.to_lowercase().contains("test")
        });
        if has_test_issues {
            optimizations.push(Optimization {
                kind: OptimizationKind::Reliability,
                title: "Improve Test Suite Reliability".to_string(),
                description: "Fix flaky tests and improve test infrastructure".to_string(),
                estimated_impact: "Increase confidence in test results, reduce false \
                                   positives by 80%"
                    .to_string(),
                implementation_effort: EffortLevel::High,
                priority: 2,
                steps: vec![
                    "Identify and isolate flaky tests".to_string(),
                    "Add proper test isolation and cleanup".to_string(),
                    "Implement retry logic for genuinely flaky external dependencies"
                        .to_string(),
                    "Use test containers for consistent test environments".to_string(),
                    "Add better error reporting and logging".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("test_reliability".to_string(), 0.8),
                    ("false_positive_rate".to_string(), -0.8),
                ]),
            });
        }

        let has_deployment_issues = issues
            .iter()
            .any(|i| i.title.to_lowercase().contains("deployment"));
        if has_deployment_issues {
            optimizations.push(Optimization {
                kind: OptimizationKind::Reliability,
                title: "Implement Blue-Green Deployments".to_string(),
                description: "Reduce deployment risks with zero-downtime deployment strategy"
                    .to_string(),
                estimated_impact: "Near-zero downtime deployments, instant rollback capability"
                    .to_string(),
                implementation_effort: EffortLevel::High,
                priority: 1,
                steps: vec![
                    "Set up parallel production environments (blue/green)".to_string(),
                    "Implement health checks and automated validation".to_string(),
                    "Configure load balancer for traffic switching".to_string(),
                    "Add automated rollback triggers".to_string(),
                    "Implement comprehensive deployment monitoring".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("deployment_success_rate".to_string(), 0.3),
                    ("rollback_time".to_string(), -0.9),
                ]),
            });
        }

        let has_performance_issues = issues
            .iter()
            .any(|i| i.category == Category::Performance);
        if has_performance_issues {
            optimizations.push(Optimization {
                kind: OptimizationKind::Cost,
                title: "Optimize Resource Allocation".to_string(),
                description: "Right-size build agents and optimize resource usage".to_string(),
                estimated_impact: "20-40% reduction in infrastructure costs".to_string(),
                implementation_effort: EffortLevel::Medium,
                priority: 2,
                steps: vec![
                    "Analyze actual resource usage patterns".to_string(),
                    "Implement autoscaling for build agents".to_string(),
                    "Use spot instances for non-critical builds".to_string(),
                    "Optimize container resource limits".to_string(),
                    "Schedule resource-intensive jobs during off-peak hours".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("cost_reduction".to_string(), 0.3),
                    ("resource_efficiency".to_string(), 0.35),
                ]),
            });
        }

        let has_cluster_issues = issues
            .iter()
            .any(|i| i.affected_component.to_lowercase().contains("cluster"));
        if has_cluster_issues {
            optimizations.push(Optimization {
                kind: OptimizationKind::Reliability,
                title: "Apply Cluster Operations Best Practices".to_string(),
                description: "Apply production-ready cluster configurations and observability"
                    .to_string(),
                estimated_impact: "50% reduction in pod failures, improved cluster stability"
                    .to_string(),
                implementation_effort: EffortLevel::Medium,
                priority: 2,
                steps: vec![
                    "Configure proper resource requests and limits for all pods".to_string(),
                    "Implement liveness and readiness probes".to_string(),
                    "Set up horizontal pod autoscaling for dynamic workloads".to_string(),
                    "Configure disruption budgets for high availability".to_string(),
                    "Implement network policies for security".to_string(),
                    "Set up cluster monitoring and alerting".to_string(),
                    "Configure log aggregation".to_string(),
                    "Enforce pod security standards".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("pod_failure_rate".to_string(), -0.5),
                    ("availability".to_string(), 0.3),
                    ("recovery_time".to_string(), -0.6),
                ]),
            });

            optimizations.push(Optimization {
                kind: OptimizationKind::Cost,
                title: "Optimize Cluster Resource Utilization".to_string(),
                description: "Right-size pods and implement efficient autoscaling strategies"
                    .to_string(),
                estimated_impact: "30-40% reduction in infrastructure costs".to_string(),
                implementation_effort: EffortLevel::Medium,
                priority: 2,
                steps: vec![
                    "Analyze actual resource usage vs requests".to_string(),
                    "Right-size pod resource requests and limits based on actual usage"
                        .to_string(),
                    "Implement vertical autoscaling for automatic sizing".to_string(),
                    "Use the cluster autoscaler for node-level scaling".to_string(),
                    "Implement priority classes for critical workloads".to_string(),
                    "Use spot/preemptible nodes for non-critical workloads".to_string(),
                    "Schedule batch jobs during off-peak hours".to_string(),
                    "Implement per-namespace resource quotas".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("cost_reduction".to_string(), 0.35),
                    ("resource_waste".to_string(), -0.45),
                ]),
            });

            optimizations.push(Optimization {
                kind: OptimizationKind::Performance,
                title: "Improve Cluster Deployment Speed and Reliability".to_string(),
                description: "Optimize container images and deployment strategies".to_string(),
                estimated_impact: "50% faster deployments, zero-downtime updates".to_string(),
                implementation_effort: EffortLevel::Medium,
                priority: 3,
                steps: vec![
                    "Optimize container images (multi-stage builds, minimal layers)"
                        .to_string(),
                    "Implement image caching strategies".to_string(),
                    "Use rolling updates with proper readiness checks".to_string(),
                    "Configure appropriate termination grace periods".to_string(),
                    "Implement blue-green or canary deployment strategies".to_string(),
                    "Use init containers for setup tasks".to_string(),
                    "Pull images only when not already present".to_string(),
                    "Set up a local container registry cache".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("deployment_time".to_string(), -0.5),
                    ("deployment_success_rate".to_string(), 0.25),
                ]),
            });
        }

        optimizations.sort_by_key(|o| o.priority);
        optimizations
    }
}
