//! Threshold configuration.
//!
//! Every comparison constant used by the analyzers lives here as static
//! configuration data, loaded once at startup and immutable afterwards.
//! Defaults reproduce the shipped detection behavior; a TOML file can
//! override individual values. The comparison operators themselves are fixed
//! per sub-check and are not configurable.

use crate::core::{PipewatchError, PipewatchResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub delivery: DeliveryThresholds,
    #[serde(default)]
    pub ml: MlThresholds,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PipewatchResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|err| PipewatchError::Config(format!("{}: {}", path.display(), err)))
    }
}

/// Thresholds for the delivery-pipeline analyzer (build/deploy/infra)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryThresholds {
    /// Average successful build duration (seconds) above which builds count as slow
    #[serde(default = "default_slow_build_secs")]
    pub slow_build_secs: f64,
    /// Average build duration (seconds) above which build caching is suggested
    #[serde(default = "default_cacheable_build_secs")]
    pub cacheable_build_secs: f64,
    /// Build failure rate above which the pipeline counts as unstable
    #[serde(default = "default_build_failure_rate")]
    pub build_failure_rate: f64,
    /// Flaky-test failure ratio band, both bounds exclusive
    #[serde(default = "default_flaky_ratio_low")]
    pub flaky_ratio_low: f64,
    #[serde(default = "default_flaky_ratio_high")]
    pub flaky_ratio_high: f64,
    /// Deployment failure rate above which deployments count as unreliable
    #[serde(default = "default_deploy_failure_rate")]
    pub deploy_failure_rate: f64,
    /// Peak CPU percentage above which build infrastructure is saturated
    #[serde(default = "default_max_cpu_percent")]
    pub max_cpu_percent: f64,
    /// Peak memory percentage above which build infrastructure is saturated
    #[serde(default = "default_max_memory_percent")]
    pub max_memory_percent: f64,
    /// High-severity vulnerability count that must be exceeded to flag a scan
    #[serde(default = "default_high_vuln_count")]
    pub high_vuln_count: usize,
    /// Pending pod count that must be exceeded to flag the scheduler
    #[serde(default = "default_pending_pod_count")]
    pub pending_pod_count: usize,
    /// Cluster-wide CPU/memory utilization percentage thresholds
    #[serde(default = "default_cluster_cpu_percent")]
    pub cluster_cpu_percent: f64,
    #[serde(default = "default_cluster_memory_percent")]
    pub cluster_memory_percent: f64,
    /// Service-mesh error rate above which mesh traffic counts as degraded
    #[serde(default = "default_mesh_error_rate")]
    pub mesh_error_rate: f64,
}

impl Default for DeliveryThresholds {
    fn default() -> Self {
        Self {
            slow_build_secs: default_slow_build_secs(),
            cacheable_build_secs: default_cacheable_build_secs(),
            build_failure_rate: default_build_failure_rate(),
            flaky_ratio_low: default_flaky_ratio_low(),
            flaky_ratio_high: default_flaky_ratio_high(),
            deploy_failure_rate: default_deploy_failure_rate(),
            max_cpu_percent: default_max_cpu_percent(),
            max_memory_percent: default_max_memory_percent(),
            high_vuln_count: default_high_vuln_count(),
            pending_pod_count: default_pending_pod_count(),
            cluster_cpu_percent: default_cluster_cpu_percent(),
            cluster_memory_percent: default_cluster_memory_percent(),
            mesh_error_rate: default_mesh_error_rate(),
        }
    }
}

fn default_slow_build_secs() -> f64 {
    600.0
}

fn default_cacheable_build_secs() -> f64 {
    300.0
}

fn default_build_failure_rate() -> f64 {
    0.15
}

fn default_flaky_ratio_low() -> f64 {
    0.1
}

fn default_flaky_ratio_high() -> f64 {
    0.9
}

fn default_deploy_failure_rate() -> f64 {
    0.1
}

fn default_max_cpu_percent() -> f64 {
    90.0
}

fn default_max_memory_percent() -> f64 {
    85.0
}

fn default_high_vuln_count() -> usize {
    5
}

fn default_pending_pod_count() -> usize {
    3
}

fn default_cluster_cpu_percent() -> f64 {
    85.0
}

fn default_cluster_memory_percent() -> f64 {
    85.0
}

fn default_mesh_error_rate() -> f64 {
    0.05
}

/// Thresholds for the ML-pipeline analyzer (model/training/data/serving)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlThresholds {
    /// Absolute accuracy drop between evaluation windows that counts as degradation
    #[serde(default = "default_accuracy_drop")]
    pub accuracy_drop: f64,
    /// Minimum acceptable F1 score for the latest evaluation
    #[serde(default = "default_f1_score_min")]
    pub f1_score_min: f64,
    /// Average completed training duration (seconds) above which runs are slow
    #[serde(default = "default_max_training_secs")]
    pub max_training_secs: f64,
    /// Minimum acceptable average GPU utilization across runs
    #[serde(default = "default_gpu_utilization_min")]
    pub gpu_utilization_min: f64,
    /// Training failure rate above which the pipeline counts as unreliable
    #[serde(default = "default_training_failure_rate")]
    pub training_failure_rate: f64,
    /// Data drift score above which retraining is warranted
    #[serde(default = "default_drift_score_max")]
    pub drift_score_max: f64,
    /// Minimum acceptable data quality score
    #[serde(default = "default_quality_score_min")]
    pub quality_score_min: f64,
    /// Missing-value rate above which data collection needs attention
    #[serde(default = "default_missing_value_rate")]
    pub missing_value_rate: f64,
    /// P95 inference latency (milliseconds) upper bound
    #[serde(default = "default_latency_p95_ms")]
    pub latency_p95_ms: f64,
    /// Minimum acceptable serving throughput (requests per second)
    #[serde(default = "default_throughput_min")]
    pub throughput_min: f64,
    /// Inference error rate upper bound
    #[serde(default = "default_inference_error_rate")]
    pub inference_error_rate: f64,
    /// Fraction of untagged experiments that must be exceeded to flag hygiene
    #[serde(default = "default_untagged_fraction")]
    pub untagged_fraction: f64,
}

impl Default for MlThresholds {
    fn default() -> Self {
        Self {
            accuracy_drop: default_accuracy_drop(),
            f1_score_min: default_f1_score_min(),
            max_training_secs: default_max_training_secs(),
            gpu_utilization_min: default_gpu_utilization_min(),
            training_failure_rate: default_training_failure_rate(),
            drift_score_max: default_drift_score_max(),
            quality_score_min: default_quality_score_min(),
            missing_value_rate: default_missing_value_rate(),
            latency_p95_ms: default_latency_p95_ms(),
            throughput_min: default_throughput_min(),
            inference_error_rate: default_inference_error_rate(),
            untagged_fraction: default_untagged_fraction(),
        }
    }
}

fn default_accuracy_drop() -> f64 {
    0.05
}

fn default_f1_score_min() -> f64 {
    0.7
}

fn default_max_training_secs() -> f64 {
    // 4 hours
    4.0 * 3600.0
}

fn default_gpu_utilization_min() -> f64 {
    0.6
}

fn default_training_failure_rate() -> f64 {
    0.1
}

fn default_drift_score_max() -> f64 {
    0.1
}

fn default_quality_score_min() -> f64 {
    0.95
}

fn default_missing_value_rate() -> f64 {
    0.05
}

fn default_latency_p95_ms() -> f64 {
    100.0
}

fn default_throughput_min() -> f64 {
    100.0
}

fn default_inference_error_rate() -> f64 {
    0.01
}

fn default_untagged_fraction() -> f64 {
    0.3
}
