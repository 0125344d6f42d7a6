//! ML-pipeline analyzer: model performance trends, training efficiency,
//! data quality, inference serving, and experiment hygiene.

use super::{metadata, Analyzer};
use crate::config::MlThresholds;
use crate::core::{
    parse_records, parse_section, Category, DataMetrics, EffortLevel, ExperimentRecord,
    InferenceMetrics, Issue, MetricBatch, ModelMetricRecord, Optimization, OptimizationKind,
    Severity, TrainingRun,
};
use crate::priority::prioritize;
use serde_json::json;
use std::collections::BTreeMap;

pub struct MlAnalyzer {
    thresholds: MlThresholds,
}

impl MlAnalyzer {
    pub fn new(thresholds: MlThresholds) -> Self {
        Self { thresholds }
    }

    fn check_model_performance(&self, model_metrics: &[ModelMetricRecord]) -> Vec<Issue> {
        let mut issues = Vec::new();

        // Trend analysis needs at least two evaluation points
        if model_metrics.len() < 2 {
            return issues;
        }

        let mut sorted: Vec<&ModelMetricRecord> = model_metrics.iter().collect();
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        // Compare the most recent five evaluations against the window that
        // preceded them (the five before that, or everything earlier when
        // fewer than ten points exist)
        let recent = &sorted[sorted.len().saturating_sub(5)..];
        let older: &[&ModelMetricRecord] = if sorted.len() >= 10 {
            &sorted[sorted.len() - 10..sorted.len() - 5]
        } else {
            &sorted[..sorted.len().saturating_sub(5)]
        };

        if !older.is_empty() && !recent.is_empty() {
            let recent_accuracy = mean(recent.iter().map(|m| m.accuracy));
            let older_accuracy = mean(older.iter().map(|m| m.accuracy));
            let drop = older_accuracy - recent_accuracy;

            if drop > self.thresholds.accuracy_drop {
                issues.push(Issue {
                    severity: Severity::High,
                    category: Category::Quality,
                    title: "Model Performance Degradation Detected".to_string(),
                    description: format!(
                        "Model accuracy dropped by {:.1}% from {:.2}% to {:.2}%",
                        drop * 100.0,
                        older_accuracy * 100.0,
                        recent_accuracy * 100.0
                    ),
                    affected_component: "ML Model".to_string(),
                    impact: "Degraded model performance affects prediction quality and \
                             business outcomes"
                        .to_string(),
                    recommendation: "Investigate data drift, retrain model with recent data, \
                                     review feature engineering, check for concept drift"
                        .to_string(),
                    confidence: 0.88,
                    metadata: metadata([
                        ("recent_accuracy", json!(recent_accuracy)),
                        ("older_accuracy", json!(older_accuracy)),
                        ("drop", json!(drop)),
                    ]),
                });
            }
        }

        // Latest evaluation point, independent of the trend comparison
        let latest = sorted[sorted.len() - 1];
        if latest.f1_score < self.thresholds.f1_score_min {
            issues.push(Issue {
                severity: Severity::Medium,
                category: Category::Quality,
                title: "Low Model F1 Score".to_string(),
                description: format!(
                    "Current F1 score is {:.2}, below threshold of {}",
                    latest.f1_score, self.thresholds.f1_score_min
                ),
                affected_component: "ML Model".to_string(),
                impact: "Low F1 score indicates poor balance between precision and recall"
                    .to_string(),
                recommendation: "Review class imbalance, adjust decision threshold, improve \
                                 feature selection, collect more training data for \
                                 underrepresented classes"
                    .to_string(),
                confidence: 0.85,
                metadata: metadata([
                    ("f1_score", json!(latest.f1_score)),
                    ("accuracy", json!(latest.accuracy)),
                ]),
            });
        }

        issues
    }

    fn check_training(&self, training_runs: &[TrainingRun]) -> Vec<Issue> {
        let mut issues = Vec::new();

        if training_runs.is_empty() {
            return issues;
        }

        let durations: Vec<f64> = training_runs
            .iter()
            .filter(|run| run.status.as_deref() == Some("completed"))
            .map(|run| run.duration)
            .collect();
        if !durations.is_empty() {
            let avg_duration = mean(durations.iter().copied());
            let max_duration = durations.iter().copied().fold(f64::MIN, f64::max);

            if avg_duration > self.thresholds.max_training_secs {
                issues.push(Issue {
                    severity: Severity::Medium,
                    category: Category::Performance,
                    title: "Long Training Times".to_string(),
                    description: format!(
                        "Average training time is {:.1} hours",
                        avg_duration / 3600.0
                    ),
                    affected_component: "Training Pipeline".to_string(),
                    impact: "Long training times slow down model iteration and increase costs"
                        .to_string(),
                    recommendation: "Optimize training code, use mixed precision training, \
                                     implement gradient accumulation, consider distributed \
                                     training, profile the training loop for bottlenecks"
                        .to_string(),
                    confidence: 0.82,
                    metadata: metadata([
                        ("avg_duration", json!(avg_duration)),
                        ("max_duration", json!(max_duration)),
                    ]),
                });
            }
        }

        // Per-run mean utilization, averaged across runs that report samples
        let run_utilizations: Vec<f64> = training_runs
            .iter()
            .filter(|run| !run.gpu_utilization.is_empty())
            .map(|run| mean(run.gpu_utilization.iter().copied()))
            .collect();
        if !run_utilizations.is_empty() {
            let avg_gpu_util = mean(run_utilizations.iter().copied());

            if avg_gpu_util < self.thresholds.gpu_utilization_min {
                issues.push(Issue {
                    severity: Severity::Medium,
                    category: Category::Cost,
                    title: "Low GPU Utilization".to_string(),
                    description: format!(
                        "Average GPU utilization is {:.1}%",
                        avg_gpu_util * 100.0
                    ),
                    affected_component: "Training Infrastructure".to_string(),
                    impact: format!(
                        "Underutilized GPUs waste {:.0}% of compute resources and increase \
                         training costs",
                        (1.0 - avg_gpu_util) * 100.0
                    ),
                    recommendation: "Increase batch size, optimize the data loading \
                                     pipeline, use data prefetching, profile GPU \
                                     bottlenecks, consider mixed precision training"
                        .to_string(),
                    confidence: 0.90,
                    metadata: metadata([("avg_gpu_utilization", json!(avg_gpu_util))]),
                });
            }
        }

        let failed_runs = training_runs
            .iter()
            .filter(|run| run.status.as_deref() == Some("failed"))
            .count();
        let failure_rate = failed_runs as f64 / training_runs.len() as f64;

        if failure_rate > self.thresholds.training_failure_rate {
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Reliability,
                title: "High Training Failure Rate".to_string(),
                description: format!("Training failure rate is {:.1}%", failure_rate * 100.0),
                affected_component: "Training Pipeline".to_string(),
                impact: "Training failures waste resources and delay model development"
                    .to_string(),
                recommendation: "Add robust error handling, implement checkpointing, \
                                 validate data before training, add memory monitoring, \
                                 review training logs for common errors"
                    .to_string(),
                confidence: 0.87,
                metadata: metadata([
                    ("failure_rate", json!(failure_rate)),
                    ("failed_count", json!(failed_runs)),
                ]),
            });
        }

        issues
    }

    fn check_data_quality(&self, data_metrics: &DataMetrics) -> Vec<Issue> {
        let mut issues = Vec::new();

        if data_metrics.drift_score > self.thresholds.drift_score_max {
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Quality,
                title: "Data Drift Detected".to_string(),
                description: format!(
                    "Data drift score is {:.2}, exceeding threshold",
                    data_metrics.drift_score
                ),
                affected_component: "Input Data".to_string(),
                impact: "Data drift causes model performance degradation and unreliable \
                         predictions"
                    .to_string(),
                recommendation: "Retrain model with recent data, implement continuous \
                                 monitoring, set up an automated retraining pipeline, \
                                 investigate the root cause of drift"
                    .to_string(),
                confidence: 0.92,
                metadata: metadata([("drift_score", json!(data_metrics.drift_score))]),
            });
        }

        if data_metrics.quality_score < self.thresholds.quality_score_min {
            issues.push(Issue {
                severity: Severity::Medium,
                category: Category::Quality,
                title: "Low Data Quality".to_string(),
                description: format!(
                    "Data quality score is {:.1}%",
                    data_metrics.quality_score * 100.0
                ),
                affected_component: "Input Data".to_string(),
                impact: "Low data quality leads to poor model performance and unreliable \
                         predictions"
                    .to_string(),
                recommendation: "Implement data validation rules, add data quality checks \
                                 in the pipeline, investigate and fix data collection \
                                 issues, add data cleaning steps"
                    .to_string(),
                confidence: 0.85,
                metadata: metadata([("quality_score", json!(data_metrics.quality_score))]),
            });
        }

        if data_metrics.missing_value_rate > self.thresholds.missing_value_rate {
            issues.push(Issue {
                severity: Severity::Medium,
                category: Category::Quality,
                title: "High Missing Value Rate".to_string(),
                description: format!(
                    "Missing value rate is {:.1}%",
                    data_metrics.missing_value_rate * 100.0
                ),
                affected_component: "Input Data".to_string(),
                impact: "High missing value rate reduces model training effectiveness and \
                         prediction coverage"
                    .to_string(),
                recommendation: "Implement proper imputation strategies, investigate data \
                                 collection issues, consider dropping features with \
                                 excessive missing values, add data validation"
                    .to_string(),
                confidence: 0.80,
                metadata: metadata([("missing_rate", json!(data_metrics.missing_value_rate))]),
            });
        }

        issues
    }

    fn check_inference(&self, inference: &InferenceMetrics) -> Vec<Issue> {
        let mut issues = Vec::new();

        if inference.latency_p95 > self.thresholds.latency_p95_ms {
            issues.push(Issue {
                severity: Severity::High,
                category: Category::Performance,
                title: "High Inference Latency".to_string(),
                description: format!("P95 inference latency is {:.0}ms", inference.latency_p95),
                affected_component: "Model Serving".to_string(),
                impact: "High latency degrades user experience and may violate SLAs"
                    .to_string(),
                recommendation: "Optimize the model (quantization, pruning), use serving \
                                 optimizations (batching, caching), scale horizontally, \
                                 consider a lighter model architecture"
                    .to_string(),
                confidence: 0.88,
                metadata: metadata([("latency_p95", json!(inference.latency_p95))]),
            });
        }

        if inference.throughput < self.thresholds.throughput_min {
            issues.push(Issue {
                severity: Severity::Medium,
                category: Category::Performance,
                title: "Low Inference Throughput".to_string(),
                description: format!(
                    "Inference throughput is {:.0} req/s",
                    inference.throughput
                ),
                affected_component: "Model Serving".to_string(),
                impact: "Low throughput limits system capacity and may require \
                         overprovisioning"
                    .to_string(),
                recommendation: "Enable request batching, optimize preprocessing, use GPU \
                                 inference, implement model parallelism, review resource \
                                 allocation"
                    .to_string(),
                confidence: 0.83,
                metadata: metadata([("throughput", json!(inference.throughput))]),
            });
        }

        if inference.error_rate > self.thresholds.inference_error_rate {
            issues.push(Issue {
                severity: Severity::Critical,
                category: Category::Reliability,
                title: "High Inference Error Rate".to_string(),
                description: format!(
                    "Inference error rate is {:.1}%",
                    inference.error_rate * 100.0
                ),
                affected_component: "Model Serving".to_string(),
                impact: "High error rate indicates serving instability and affects user \
                         experience"
                    .to_string(),
                recommendation: "Investigate error logs, add input validation, implement \
                                 fallback mechanisms, improve error handling, monitor \
                                 model serving health"
                    .to_string(),
                confidence: 0.95,
                metadata: metadata([("error_rate", json!(inference.error_rate))]),
            });
        }

        issues
    }

    fn check_experiments(&self, experiments: &[ExperimentRecord]) -> Vec<Issue> {
        let mut issues = Vec::new();

        if experiments.is_empty() {
            return issues;
        }

        let untagged = experiments.iter().filter(|e| e.is_untagged()).count();
        if untagged as f64 / experiments.len() as f64 > self.thresholds.untagged_fraction {
            issues.push(Issue {
                severity: Severity::Low,
                category: Category::Quality,
                title: "Poor Experiment Organization".to_string(),
                description: format!(
                    "{} out of {} experiments lack proper tagging",
                    untagged,
                    experiments.len()
                ),
                affected_component: "Experiment Tracking".to_string(),
                impact: "Poor organization makes it difficult to track progress and \
                         reproduce results"
                    .to_string(),
                recommendation: "Implement a consistent tagging strategy, add metadata to \
                                 experiments, use meaningful names, document experiment \
                                 purpose"
                    .to_string(),
                confidence: 0.75,
                metadata: metadata([
                    ("untagged_count", json!(untagged)),
                    ("total_count", json!(experiments.len())),
                ]),
            });
        }

        issues
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl Analyzer for MlAnalyzer {
    fn name(&self) -> &'static str {
        "ml"
    }

    fn analyze(&self, batch: &MetricBatch) -> Vec<Issue> {
        log::info!("ml analyzer inspecting batch");
        let mut issues = Vec::new();

        let model_metrics: Vec<ModelMetricRecord> =
            parse_records(&batch.model_metrics, "model_metrics");
        issues.extend(self.check_model_performance(&model_metrics));

        let training_runs: Vec<TrainingRun> = parse_records(&batch.training_runs, "training_runs");
        issues.extend(self.check_training(&training_runs));

        if let Some(data_metrics) = parse_section::<DataMetrics>(&batch.data_metrics, "data_metrics")
        {
            issues.extend(self.check_data_quality(&data_metrics));
        }

        if let Some(inference) =
            parse_section::<InferenceMetrics>(&batch.inference_metrics, "inference_metrics")
        {
            issues.extend(self.check_inference(&inference));
        }

        let experiments: Vec<ExperimentRecord> = parse_records(&batch.experiments, "experiments");
        issues.extend(self.check_experiments(&experiments));

        let issues = prioritize(issues);
        log::info!("ml analyzer found {} issues", issues.len());
        issues
    }

    fn optimize(&self, batch: &MetricBatch, issues: &[Issue]) -> Vec<Optimization> {
        log::info!("ml analyzer generating optimization suggestions");
        let mut optimizations = Vec::new();

        if !batch.training_runs.is_empty() {
            optimizations.push(Optimization {
                kind: OptimizationKind::Performance,
                title: "Implement Distributed Training".to_string(),
                description: "Speed up training with data-parallel or model-parallel \
                              distributed training"
                    .to_string(),
                estimated_impact: "50-70% reduction in training time for large models"
                    .to_string(),
                implementation_effort: EffortLevel::High,
                priority: 2,
                steps: vec![
                    "Evaluate distributed training frameworks".to_string(),
                    "Refactor training code for distributed execution".to_string(),
                    "Set up multi-GPU or multi-node infrastructure".to_string(),
                    "Optimize data loading for distributed training".to_string(),
                    "Implement gradient accumulation for effective large batch training"
                        .to_string(),
                    "Test and validate distributed training convergence".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("training_time_reduction".to_string(), 0.6),
                    ("throughput_increase".to_string(), 2.5),
                ]),
            });
        }

        let has_inference_issues = issues.iter().any(|i| {
            i.category == Category::Performance && i.title.to_lowercase().contains("inference")
        });
        if has_inference_issues {
            optimizations.push(Optimization {
                kind: OptimizationKind::Performance,
                title: "Optimize Model for Inference".to_string(),
                description: "Apply model optimization techniques to reduce latency and \
                              improve throughput"
                    .to_string(),
                estimated_impact: "30-50% latency reduction, 2-3x throughput improvement"
                    .to_string(),
                implementation_effort: EffortLevel::Medium,
                priority: 1,
                steps: vec![
                    "Apply model quantization (INT8 or mixed precision)".to_string(),
                    "Prune unnecessary weights and connections".to_string(),
                    "Use an optimized serving runtime".to_string(),
                    "Implement dynamic batching".to_string(),
                    "Enable model caching for repeated inputs".to_string(),
                    "Profile and optimize the preprocessing pipeline".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("latency_reduction".to_string(), 0.4),
                    ("throughput_increase".to_string(), 2.0),
                    ("cost_reduction".to_string(), 0.3),
                ]),
            });
        }

        let has_quality_issues = issues.iter().any(|i| i.category == Category::Quality);
        if has_quality_issues {
            optimizations.push(Optimization {
                kind: OptimizationKind::Quality,
                title: "Implement Automated Data Quality Monitoring".to_string(),
                description: "Set up continuous data quality monitoring and alerting"
                    .to_string(),
                estimated_impact: "Early detection of data issues, 80% reduction in \
                                   data-related model failures"
                    .to_string(),
                implementation_effort: EffortLevel::Medium,
                priority: 1,
                steps: vec![
                    "Define data quality metrics and thresholds".to_string(),
                    "Implement an automated data validation pipeline".to_string(),
                    "Set up data drift detection monitors".to_string(),
                    "Create alerting for quality violations".to_string(),
                    "Build a data profiling dashboard".to_string(),
                    "Implement automated data quality reports".to_string(),
                ],
                metrics_impact: BTreeMap::from([
                    ("data_issue_detection".to_string(), 0.8),
                    ("model_reliability".to_string(), 0.3),
                ]),
            });
        }

        // Infrastructure templates apply regardless of detected issues
        optimizations.push(Optimization {
            kind: OptimizationKind::Reliability,
            title: "Implement Automated Model Retraining Pipeline".to_string(),
            description: "Set up automated retraining triggered by performance degradation \
                          or data drift"
                .to_string(),
            estimated_impact: "Maintain model performance automatically, reduce manual \
                               intervention by 90%"
                .to_string(),
            implementation_effort: EffortLevel::High,
            priority: 2,
            steps: vec![
                "Define retraining triggers (drift, performance drop, schedule)".to_string(),
                "Implement an automated data preparation pipeline".to_string(),
                "Set up automated training with hyperparameter optimization".to_string(),
                "Implement automated model validation and testing".to_string(),
                "Create automated deployment with A/B testing".to_string(),
                "Set up rollback mechanisms for failed deployments".to_string(),
                "Implement continuous monitoring and alerting".to_string(),
            ],
            metrics_impact: BTreeMap::from([
                ("model_freshness".to_string(), 0.9),
                ("manual_effort".to_string(), -0.9),
                ("downtime".to_string(), -0.5),
            ]),
        });

        optimizations.push(Optimization {
            kind: OptimizationKind::Cost,
            title: "Optimize Training and Inference Costs".to_string(),
            description: "Reduce cloud costs through resource optimization and efficient \
                          scheduling"
                .to_string(),
            estimated_impact: "25-40% reduction in ML infrastructure costs".to_string(),
            implementation_effort: EffortLevel::Medium,
            priority: 3,
            steps: vec![
                "Use spot instances for training workloads".to_string(),
                "Implement auto-scaling for inference".to_string(),
                "Optimize model size and complexity".to_string(),
                "Schedule training during off-peak hours".to_string(),
                "Use reserved instances for baseline capacity".to_string(),
                "Implement resource usage monitoring and alerts".to_string(),
            ],
            metrics_impact: BTreeMap::from([
                ("cost_reduction".to_string(), 0.35),
                ("resource_efficiency".to_string(), 0.4),
            ]),
        });

        optimizations.sort_by_key(|o| o.priority);
        optimizations
    }
}
