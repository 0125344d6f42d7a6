pub mod batch;
pub mod errors;
pub mod types;

pub use batch::{
    parse_records, parse_section, BuildRecord, ClusterDeployment, ClusterMetrics,
    ClusterResourceUsage, DataMetrics, DeploymentRecord, ExperimentRecord, InferenceMetrics,
    MetricBatch, ModelMetricRecord, NodeRecord, PodRecord, ResourceMetrics, SecurityScan,
    ServiceMesh, StorageClaim, TestRecord, TrainingRun, Vulnerability,
};
pub use errors::{PipewatchError, PipewatchResult};
pub use types::{Category, EffortLevel, Issue, Optimization, OptimizationKind, Severity};
