//! Analysis entry point: runs the selected analyzers over one batch, then
//! the correlator over their combined output. Pure computation over an
//! already-materialized batch; the caller owns data acquisition and
//! rendering.

use crate::analyzers::{get_analyzer, PipelineKind};
use crate::config::Config;
use crate::core::{Issue, MetricBatch, Optimization};
use crate::correlation::detect_cross_cutting;
use crate::priority::{summarize, IssueSummary};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

/// Which pipelines one run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisScope {
    Delivery,
    Ml,
    Both,
}

impl AnalysisScope {
    fn kinds(&self) -> Vec<PipelineKind> {
        match self {
            AnalysisScope::Delivery => vec![PipelineKind::Delivery],
            AnalysisScope::Ml => vec![PipelineKind::Ml],
            AnalysisScope::Both => vec![PipelineKind::Delivery, PipelineKind::Ml],
        }
    }
}

/// Findings for one pipeline domain
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub pipeline: PipelineKind,
    pub issues: Vec<Issue>,
    pub summary: IssueSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizations: Option<Vec<Optimization>>,
}

/// Combined result of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub timestamp: DateTime<Utc>,
    pub pipelines: Vec<PipelineReport>,
    pub cross_cutting: Vec<Issue>,
}

impl AnalysisReport {
    pub fn total_issues(&self) -> usize {
        self.pipelines.iter().map(|p| p.summary.total).sum::<usize>() + self.cross_cutting.len()
    }
}

/// Run the analyzers selected by `scope` over `batch`, correlate their
/// combined issue lists, and optionally attach optimization plans.
///
/// The delivery and ML analyses are independent pure functions with no
/// shared state, so a `Both` run executes them in parallel.
pub fn run_analysis(
    batch: &MetricBatch,
    scope: AnalysisScope,
    config: &Config,
    include_optimizations: bool,
) -> AnalysisReport {
    let kinds = scope.kinds();

    let pipelines: Vec<PipelineReport> = if kinds.len() == 2 {
        let (delivery, ml) = rayon::join(
            || analyze_pipeline(kinds[0], batch, config, include_optimizations),
            || analyze_pipeline(kinds[1], batch, config, include_optimizations),
        );
        vec![delivery, ml]
    } else {
        kinds
            .into_iter()
            .map(|kind| analyze_pipeline(kind, batch, config, include_optimizations))
            .collect()
    };

    let all_issues: Vec<Issue> = pipelines
        .iter()
        .flat_map(|p| p.issues.iter().cloned())
        .collect();
    let cross_cutting = detect_cross_cutting(&all_issues);

    AnalysisReport {
        timestamp: Utc::now(),
        pipelines,
        cross_cutting,
    }
}

fn analyze_pipeline(
    kind: PipelineKind,
    batch: &MetricBatch,
    config: &Config,
    include_optimizations: bool,
) -> PipelineReport {
    let analyzer = get_analyzer(kind, config);
    let issues = analyzer.analyze(batch);
    let summary = summarize(&issues);
    let optimizations = include_optimizations.then(|| analyzer.optimize(batch, &issues));

    PipelineReport {
        pipeline: kind,
        issues,
        summary,
        optimizations,
    }
}
