//! Concrete analyzers behind a common trait and kind registry.
//!
//! Analyzers are stateless, input-driven inspections: each call is a pure
//! function of the batch it receives. Missing sections are treated as empty
//! input and malformed records are skipped per-record, so `analyze` and
//! `optimize` never fail.

use crate::config::Config;
use crate::core::{Issue, MetricBatch, Optimization};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod delivery;
pub mod ml;

pub use delivery::DeliveryAnalyzer;
pub use ml::MlAnalyzer;

pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Inspect one metric batch and return issues ordered by priority.
    fn analyze(&self, batch: &MetricBatch) -> Vec<Issue>;

    /// Derive remediation plans from already-detected issues, ordered by
    /// ascending priority number (1 = most urgent first).
    fn optimize(&self, batch: &MetricBatch, issues: &[Issue]) -> Vec<Optimization>;
}

/// The metric domains an analyzer can cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    /// Build, deployment, and infrastructure telemetry
    Delivery,
    /// Model, training, data, and serving telemetry
    Ml,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Delivery => "delivery",
            PipelineKind::Ml => "ml",
        }
    }
}

/// Registry mapping a pipeline kind to its analyzer implementation
pub fn get_analyzer(kind: PipelineKind, config: &Config) -> Box<dyn Analyzer> {
    match kind {
        PipelineKind::Delivery => Box::new(DeliveryAnalyzer::new(config.delivery.clone())),
        PipelineKind::Ml => Box::new(MlAnalyzer::new(config.ml.clone())),
    }
}

/// Build an issue metadata map from literal entries
pub(crate) fn metadata<const N: usize>(
    entries: [(&str, serde_json::Value); N],
) -> BTreeMap<String, serde_json::Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
