//! Metric batch input model.
//!
//! A batch is a snapshot of named telemetry sections collected upstream.
//! Sections are optional and loosely typed: list sections are kept as raw
//! JSON values so a single malformed record can be skipped without discarding
//! the rest of the section, and object sections are decoded as a whole with
//! the sub-check disabled on failure. Absent sections mean "no data", never
//! an error.

use crate::core::errors::{PipewatchError, PipewatchResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Input snapshot consumed by one analysis call. Unknown sections and fields
/// are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricBatch {
    // Delivery-pipeline sections
    #[serde(default)]
    pub builds: Vec<Value>,
    #[serde(default)]
    pub tests: Vec<Value>,
    #[serde(default)]
    pub deployments: Vec<Value>,
    #[serde(default)]
    pub resources: Option<Value>,
    #[serde(default)]
    pub security_scans: Vec<Value>,
    #[serde(default)]
    pub cluster: Option<Value>,

    // ML-pipeline sections
    #[serde(default)]
    pub model_metrics: Vec<Value>,
    #[serde(default)]
    pub training_runs: Vec<Value>,
    #[serde(default)]
    pub data_metrics: Option<Value>,
    #[serde(default)]
    pub inference_metrics: Option<Value>,
    #[serde(default)]
    pub experiments: Vec<Value>,
}

impl MetricBatch {
    /// Read and decode a batch snapshot from a JSON file.
    pub fn from_file(path: &Path) -> PipewatchResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|err| PipewatchError::Parse(format!("{}: {}", path.display(), err)))
    }
}

/// Decode each record of a list section individually, logging and skipping
/// the malformed ones. Partial data beats no data for a health report.
pub fn parse_records<T: DeserializeOwned>(records: &[Value], section: &str) -> Vec<T> {
    records
        .iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("skipping malformed {} record: {}", section, err);
                None
            }
        })
        .collect()
}

/// Decode an object section as a whole. A malformed section disables only
/// the sub-check that reads it.
pub fn parse_section<T: DeserializeOwned>(section: &Option<Value>, name: &str) -> Option<T> {
    let value = section.as_ref()?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::warn!("skipping malformed {} section: {}", name, err);
            None
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildRecord {
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceMetrics {
    #[serde(default)]
    pub cpu_usage: Vec<f64>,
    #[serde(default)]
    pub memory_usage: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityScan {
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Vulnerability {
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub cve: Option<String>,
}

/// Orchestration-layer (cluster) metrics, all blocks optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterMetrics {
    #[serde(default)]
    pub pods: Vec<PodRecord>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub deployments: Vec<ClusterDeployment>,
    #[serde(default)]
    pub resource_usage: Option<ClusterResourceUsage>,
    #[serde(default)]
    pub storage_claims: Vec<StorageClaim>,
    #[serde(default)]
    pub service_mesh: Option<ServiceMesh>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterDeployment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desired_replicas: u32,
    #[serde(default)]
    pub available_replicas: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterResourceUsage {
    #[serde(default)]
    pub cpu_usage_percent: f64,
    #[serde(default)]
    pub memory_usage_percent: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageClaim {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceMesh {
    #[serde(default)]
    pub error_rate: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelMetricRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub f1_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingRun {
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub gpu_utilization: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataMetrics {
    #[serde(default)]
    pub drift_score: f64,
    #[serde(default = "default_quality_score")]
    pub quality_score: f64,
    #[serde(default)]
    pub missing_value_rate: f64,
}

fn default_quality_score() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InferenceMetrics {
    #[serde(default)]
    pub latency_p95: f64,
    #[serde(default)]
    pub throughput: f64,
    #[serde(default)]
    pub error_rate: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperimentRecord {
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ExperimentRecord {
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}
