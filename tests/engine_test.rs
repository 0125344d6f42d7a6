use pipewatch::analyzers::PipelineKind;
use pipewatch::config::Config;
use pipewatch::core::{MetricBatch, Severity};
use pipewatch::engine::{run_analysis, AnalysisScope};
use serde_json::json;

fn batch(value: serde_json::Value) -> MetricBatch {
    serde_json::from_value(value).unwrap()
}

/// A batch that trips the delivery build-failure check and the ML
/// inference-error check at the same time.
fn troubled_batch() -> MetricBatch {
    let builds: Vec<_> = (0..10)
        .map(|i| {
            let status = if i < 4 { "failed" } else { "success" };
            json!({"duration": 100.0, "status": status})
        })
        .collect();
    batch(json!({
        "builds": builds,
        "inference_metrics": {
            "latency_p95": 50.0,
            "throughput": 500.0,
            "error_rate": 0.05
        }
    }))
}

#[test]
fn both_scope_runs_delivery_then_ml() {
    let report = run_analysis(&troubled_batch(), AnalysisScope::Both, &Config::default(), false);

    assert_eq!(report.pipelines.len(), 2);
    assert_eq!(report.pipelines[0].pipeline, PipelineKind::Delivery);
    assert_eq!(report.pipelines[1].pipeline, PipelineKind::Ml);

    let delivery_titles: Vec<&str> = report.pipelines[0]
        .issues
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert!(delivery_titles.contains(&"High Build Failure Rate"));

    let ml_titles: Vec<&str> = report.pipelines[1]
        .issues
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert!(ml_titles.contains(&"High Inference Error Rate"));
}

#[test]
fn narrow_scope_skips_the_other_pipeline() {
    let report = run_analysis(
        &troubled_batch(),
        AnalysisScope::Delivery,
        &Config::default(),
        false,
    );

    assert_eq!(report.pipelines.len(), 1);
    assert_eq!(report.pipelines[0].pipeline, PipelineKind::Delivery);
    assert!(report.pipelines[0]
        .issues
        .iter()
        .all(|i| i.title != "High Inference Error Rate"));
}

#[test]
fn cross_cutting_sees_issues_from_both_pipelines() {
    // Delivery contributes four performance issues, ML contributes two more;
    // the systemic detector only crosses its threshold on the combined view.
    let input = batch(json!({
        "resources": {
            "cpu_usage": [95.0],
            "memory_usage": [90.0]
        },
        "cluster": {
            "resource_usage": {"cpu_usage_percent": 90.0, "memory_usage_percent": 90.0}
        },
        "inference_metrics": {
            "latency_p95": 200.0,
            "throughput": 50.0,
            "error_rate": 0.0
        }
    }));
    let config = Config::default();

    let delivery_only = run_analysis(&input, AnalysisScope::Delivery, &config, false);
    assert!(delivery_only
        .cross_cutting
        .iter()
        .all(|i| i.title != "Systemic Performance Issues"));

    let report = run_analysis(&input, AnalysisScope::Both, &config, false);
    let systemic = report
        .cross_cutting
        .iter()
        .find(|i| i.title == "Systemic Performance Issues")
        .unwrap();
    assert_eq!(systemic.metadata["issue_count"], 6);
}

#[test]
fn summary_and_total_issue_count_line_up() {
    let report = run_analysis(&troubled_batch(), AnalysisScope::Both, &Config::default(), false);

    let per_pipeline: usize = report.pipelines.iter().map(|p| p.issues.len()).sum();
    let summarized: usize = report.pipelines.iter().map(|p| p.summary.total).sum();
    assert_eq!(per_pipeline, summarized);
    assert_eq!(report.total_issues(), summarized + report.cross_cutting.len());
}

#[test]
fn issues_within_each_pipeline_are_prioritized() {
    let input = batch(json!({
        "builds": (0..10).map(|i| {
            let status = if i < 3 { "failed" } else { "success" };
            json!({"duration": 700.0, "status": status})
        }).collect::<Vec<_>>()
    }));
    let report = run_analysis(&input, AnalysisScope::Delivery, &Config::default(), false);

    let issues = &report.pipelines[0].issues;
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].severity, Severity::High);
    assert_eq!(issues[1].severity, Severity::Medium);
}

#[test]
fn clean_batch_produces_an_empty_report() {
    let report = run_analysis(
        &MetricBatch::default(),
        AnalysisScope::Both,
        &Config::default(),
        true,
    );

    for pipeline in &report.pipelines {
        assert!(pipeline.issues.is_empty());
        assert_eq!(pipeline.summary.total, 0);
    }
    assert!(report.cross_cutting.is_empty());
    // The ML analyzer always proposes its two infrastructure templates
    let ml_opts = report.pipelines[1].optimizations.as_ref().unwrap();
    assert_eq!(ml_opts.len(), 2);
    assert!(report.pipelines[0].optimizations.as_ref().unwrap().is_empty());
}

#[test]
fn report_serializes_with_stable_field_names() {
    let report = run_analysis(&troubled_batch(), AnalysisScope::Both, &Config::default(), false);
    let value = serde_json::to_value(&report).unwrap();

    assert!(value["timestamp"].is_string());
    assert!(value["pipelines"].is_array());
    assert!(value["cross_cutting"].is_array());
    let first = &value["pipelines"][0];
    assert_eq!(first["pipeline"], "delivery");
    assert!(first["issues"].is_array());
    assert!(first["summary"]["total"].is_u64());
    // Optimizations were not requested, so the key is absent entirely
    assert!(first.get("optimizations").is_none());
}
