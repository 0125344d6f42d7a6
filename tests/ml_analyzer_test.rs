use pipewatch::analyzers::{Analyzer, MlAnalyzer};
use pipewatch::config::Config;
use pipewatch::core::{Category, MetricBatch, Severity};
use serde_json::json;

fn analyzer() -> MlAnalyzer {
    MlAnalyzer::new(Config::default().ml)
}

fn batch(value: serde_json::Value) -> MetricBatch {
    serde_json::from_value(value).unwrap()
}

fn metric_points(accuracies: &[f64], f1: f64) -> Vec<serde_json::Value> {
    accuracies
        .iter()
        .enumerate()
        .map(|(i, accuracy)| {
            json!({
                "timestamp": format!("2026-08-{:02}T00:00:00Z", i + 1),
                "accuracy": accuracy,
                "f1_score": f1
            })
        })
        .collect()
}

#[test]
fn accuracy_drop_of_ten_points_is_degradation() {
    let history = metric_points(&[0.90, 0.90, 0.90, 0.90, 0.90, 0.80, 0.80, 0.80, 0.80, 0.80], 0.9);
    let issues = analyzer().analyze(&batch(json!({ "model_metrics": history })));

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.title, "Model Performance Degradation Detected");
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.category, Category::Quality);
    assert_eq!(issue.confidence, 0.88);
    let drop = issue.metadata["drop"].as_f64().unwrap();
    assert!((drop - 0.10).abs() < 1e-9);
}

#[test]
fn stable_accuracy_is_not_degradation() {
    let history = metric_points(&[0.90; 10], 0.9);
    let issues = analyzer().analyze(&batch(json!({ "model_metrics": history })));
    assert!(issues.is_empty());
}

#[test]
fn trend_uses_all_earlier_points_when_fewer_than_ten() {
    // 7 points: older window is the first 2, recent window the last 5
    let history = metric_points(&[0.95, 0.95, 0.85, 0.85, 0.85, 0.85, 0.85], 0.9);
    let issues = analyzer().analyze(&batch(json!({ "model_metrics": history })));
    assert_eq!(issues.len(), 1);
    let drop = issues[0].metadata["drop"].as_f64().unwrap();
    assert!((drop - 0.10).abs() < 1e-9);
}

#[test]
fn low_f1_score_on_latest_point_is_flagged() {
    let history = metric_points(&[0.9, 0.9], 0.6);
    let issues = analyzer().analyze(&batch(json!({ "model_metrics": history })));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Low Model F1 Score");
    assert_eq!(issues[0].severity, Severity::Medium);
    assert_eq!(issues[0].confidence, 0.85);
}

#[test]
fn a_single_metric_point_is_not_enough_for_model_checks() {
    let history = metric_points(&[0.5], 0.1);
    let issues = analyzer().analyze(&batch(json!({ "model_metrics": history })));
    assert!(issues.is_empty());
}

#[test]
fn model_metrics_are_sorted_by_timestamp_before_trend_analysis() {
    // Same series as the degradation test but shuffled by timestamp
    let mut history = metric_points(&[0.90, 0.90, 0.90, 0.90, 0.90, 0.80, 0.80, 0.80, 0.80, 0.80], 0.9);
    history.reverse();
    let issues = analyzer().analyze(&batch(json!({ "model_metrics": history })));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Model Performance Degradation Detected");
}

#[test]
fn long_training_times_are_flagged_over_completed_runs() {
    let runs = vec![
        json!({"duration": 18000.0, "status": "completed"}),
        json!({"duration": 16000.0, "status": "completed"}),
        json!({"duration": 99999.0, "status": "running"}),
    ];
    let issues = analyzer().analyze(&batch(json!({ "training_runs": runs })));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Long Training Times");
    assert_eq!(issues[0].category, Category::Performance);
    assert_eq!(issues[0].confidence, 0.82);
    assert_eq!(issues[0].metadata["avg_duration"].as_f64().unwrap(), 17000.0);
}

#[test]
fn low_gpu_utilization_is_a_cost_issue() {
    let runs = vec![
        json!({"duration": 100.0, "status": "completed", "gpu_utilization": [0.5, 0.4]}),
        json!({"duration": 100.0, "status": "completed", "gpu_utilization": [0.6]}),
    ];
    let issues = analyzer().analyze(&batch(json!({ "training_runs": runs })));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Low GPU Utilization");
    assert_eq!(issues[0].category, Category::Cost);
    assert_eq!(issues[0].confidence, 0.90);
    let util = issues[0].metadata["avg_gpu_utilization"].as_f64().unwrap();
    assert!((util - 0.525).abs() < 1e-9);
}

#[test]
fn training_failure_rate_above_ten_percent_is_flagged() {
    let mut runs: Vec<_> = (0..8)
        .map(|_| json!({"duration": 100.0, "status": "completed"}))
        .collect();
    runs.extend((0..2).map(|_| json!({"duration": 100.0, "status": "failed"})));

    let issues = analyzer().analyze(&batch(json!({ "training_runs": runs })));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "High Training Failure Rate");
    assert_eq!(issues[0].severity, Severity::High);
    assert_eq!(issues[0].confidence, 0.87);
    assert_eq!(issues[0].metadata["failed_count"].as_u64().unwrap(), 2);
}

#[test]
fn all_three_data_quality_checks_can_fire_together() {
    let issues = analyzer().analyze(&batch(json!({
        "data_metrics": {
            "drift_score": 0.2,
            "quality_score": 0.90,
            "missing_value_rate": 0.06
        }
    })));

    let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles.len(), 3);
    assert!(titles.contains(&"Data Drift Detected"));
    assert!(titles.contains(&"Low Data Quality"));
    assert!(titles.contains(&"High Missing Value Rate"));
    // Drift is high severity, the other two medium
    assert_eq!(issues[0].title, "Data Drift Detected");
    assert_eq!(issues[0].severity, Severity::High);
}

#[test]
fn healthy_data_metrics_emit_nothing() {
    let issues = analyzer().analyze(&batch(json!({
        "data_metrics": {
            "drift_score": 0.05,
            "quality_score": 0.99,
            "missing_value_rate": 0.01
        }
    })));
    assert!(issues.is_empty());
}

#[test]
fn inference_error_rate_is_the_most_severe_serving_issue() {
    let issues = analyzer().analyze(&batch(json!({
        "inference_metrics": {
            "latency_p95": 150.0,
            "throughput": 50.0,
            "error_rate": 0.02
        }
    })));

    assert_eq!(issues.len(), 3);
    // prioritized: critical error rate first, then high latency, then medium throughput
    assert_eq!(issues[0].title, "High Inference Error Rate");
    assert_eq!(issues[0].severity, Severity::Critical);
    assert_eq!(issues[0].confidence, 0.95);
    assert_eq!(issues[1].title, "High Inference Latency");
    assert_eq!(issues[2].title, "Low Inference Throughput");
}

#[test]
fn untagged_experiments_above_thirty_percent_are_flagged() {
    let mut experiments: Vec<_> = (0..6).map(|_| json!({"tags": ["baseline"]})).collect();
    experiments.extend((0..4).map(|_| json!({})));

    let issues = analyzer().analyze(&batch(json!({ "experiments": experiments })));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Poor Experiment Organization");
    assert_eq!(issues[0].severity, Severity::Low);
    assert_eq!(issues[0].confidence, 0.75);
    assert_eq!(issues[0].metadata["untagged_count"].as_u64().unwrap(), 4);
}

#[test]
fn untagged_fraction_threshold_is_strict() {
    // Exactly 30% untagged must not fire
    let mut experiments: Vec<_> = (0..7).map(|_| json!({"tags": ["tagged"]})).collect();
    experiments.extend((0..3).map(|_| json!({"tags": []})));

    let issues = analyzer().analyze(&batch(json!({ "experiments": experiments })));
    assert!(issues.is_empty());
}

#[test]
fn optimize_always_includes_the_two_infrastructure_templates() {
    let analyzer = analyzer();
    let empty = MetricBatch::default();
    let optimizations = analyzer.optimize(&empty, &[]);

    assert_eq!(optimizations.len(), 2);
    let titles: Vec<&str> = optimizations.iter().map(|o| o.title.as_str()).collect();
    assert!(titles.contains(&"Implement Automated Model Retraining Pipeline"));
    assert!(titles.contains(&"Optimize Training and Inference Costs"));
}

#[test]
fn optimize_adds_conditional_templates_and_sorts_by_priority() {
    let batch = batch(json!({
        "training_runs": [{"duration": 100.0, "status": "completed"}],
        "inference_metrics": {"latency_p95": 200.0, "throughput": 500.0, "error_rate": 0.0},
        "data_metrics": {"drift_score": 0.5, "quality_score": 1.0, "missing_value_rate": 0.0}
    }));
    let analyzer = analyzer();
    let issues = analyzer.analyze(&batch);
    let optimizations = analyzer.optimize(&batch, &issues);

    let titles: Vec<&str> = optimizations.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(optimizations.len(), 5);
    assert!(titles.contains(&"Implement Distributed Training"));
    assert!(titles.contains(&"Optimize Model for Inference"));
    assert!(titles.contains(&"Implement Automated Data Quality Monitoring"));

    let priorities: Vec<u8> = optimizations.iter().map(|o| o.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
    // Priority-1 templates come first
    assert_eq!(optimizations[0].priority, 1);
}
