// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod correlation;
pub mod engine;
pub mod io;
pub mod priority;

// Re-export commonly used types
pub use crate::core::{
    Category, EffortLevel, Issue, MetricBatch, Optimization, OptimizationKind, PipewatchError,
    PipewatchResult, Severity,
};

pub use crate::analyzers::{get_analyzer, Analyzer, DeliveryAnalyzer, MlAnalyzer, PipelineKind};

pub use crate::correlation::detect_cross_cutting;

pub use crate::engine::{run_analysis, AnalysisReport, AnalysisScope, PipelineReport};

pub use crate::io::{create_writer, OutputFormat, OutputWriter};

pub use crate::priority::{calculate_confidence, prioritize, summarize, IssueSummary};
