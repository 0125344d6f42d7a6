//! Report writers for analysis results.

use crate::core::{Issue, Optimization, Severity};
use crate::engine::AnalysisReport;
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Pipeline Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "**Generated:** {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let mut critical = report
            .cross_cutting
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count();
        let mut high = report
            .cross_cutting
            .iter()
            .filter(|i| i.severity == Severity::High)
            .count();
        for pipeline in &report.pipelines {
            critical += pipeline
                .summary
                .by_severity
                .get(&Severity::Critical)
                .copied()
                .unwrap_or(0);
            high += pipeline
                .summary
                .by_severity
                .get(&Severity::High)
                .copied()
                .unwrap_or(0);
        }

        writeln!(self.writer, "## Executive Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Total issues | {} |", report.total_issues())?;
        writeln!(self.writer, "| Critical | {} |", critical)?;
        writeln!(self.writer, "| High | {} |", high)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_issue(&mut self, issue: &Issue) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "### [{}] {}",
            issue.severity.as_str().to_uppercase(),
            issue.title
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- **Category:** {}", issue.category)?;
        writeln!(self.writer, "- **Component:** {}", issue.affected_component)?;
        writeln!(self.writer, "- **Confidence:** {:.0}%", issue.confidence * 100.0)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", issue.description)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Impact:** {}", issue.impact)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Recommendation:** {}", issue.recommendation)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_optimization(&mut self, opt: &Optimization) -> anyhow::Result<()> {
        writeln!(self.writer, "### P{}: {}", opt.priority, opt.title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", opt.description)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- **Type:** {}", opt.kind)?;
        writeln!(
            self.writer,
            "- **Effort:** {:?}",
            opt.implementation_effort
        )?;
        writeln!(
            self.writer,
            "- **Estimated impact:** {}",
            opt.estimated_impact
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**Steps:**")?;
        writeln!(self.writer)?;
        for (index, step) in opt.steps.iter().enumerate() {
            writeln!(self.writer, "{}. {}", index + 1, step)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;

        for pipeline in &report.pipelines {
            writeln!(
                self.writer,
                "## {} Pipeline ({} issues)",
                pipeline.pipeline.as_str(),
                pipeline.summary.total
            )?;
            writeln!(self.writer)?;
            for issue in &pipeline.issues {
                self.write_issue(issue)?;
            }

            if let Some(optimizations) = &pipeline.optimizations {
                writeln!(self.writer, "## {} Optimization Plan", pipeline.pipeline.as_str())?;
                writeln!(self.writer)?;
                for opt in optimizations {
                    self.write_optimization(opt)?;
                }
            }
        }

        if !report.cross_cutting.is_empty() {
            writeln!(self.writer, "## Cross-Pipeline Issues")?;
            writeln!(self.writer)?;
            for issue in &report.cross_cutting {
                self.write_issue(issue)?;
            }
        }

        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn severity_tag(severity: Severity) -> ColoredString {
        match severity {
            Severity::Critical => "CRITICAL".red().bold(),
            Severity::High => "HIGH".red(),
            Severity::Medium => "MEDIUM".yellow(),
            Severity::Low => "LOW".green(),
        }
    }

    fn write_issue(&mut self, issue: &Issue) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "  [{}] {} ({}, confidence {:.0}%)",
            Self::severity_tag(issue.severity),
            issue.title.bold(),
            issue.category,
            issue.confidence * 100.0
        )?;
        writeln!(self.writer, "      {}", issue.description)?;
        writeln!(self.writer, "      fix: {}", issue.recommendation)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} ({} issues)",
            "Pipeline Analysis".bold().underline(),
            report.total_issues()
        )?;
        writeln!(self.writer)?;

        for pipeline in &report.pipelines {
            writeln!(
                self.writer,
                "{} pipeline: {} issues",
                pipeline.pipeline.as_str().cyan(),
                pipeline.summary.total
            )?;
            for issue in &pipeline.issues {
                self.write_issue(issue)?;
            }
            writeln!(self.writer)?;

            if let Some(optimizations) = &pipeline.optimizations {
                writeln!(
                    self.writer,
                    "{} optimization plan:",
                    pipeline.pipeline.as_str().cyan()
                )?;
                for opt in optimizations {
                    writeln!(
                        self.writer,
                        "  P{} {} [{}] {}",
                        opt.priority,
                        opt.title.bold(),
                        opt.kind,
                        opt.estimated_impact
                    )?;
                }
                writeln!(self.writer)?;
            }
        }

        if !report.cross_cutting.is_empty() {
            writeln!(self.writer, "{}", "Cross-pipeline issues".cyan())?;
            for issue in &report.cross_cutting {
                self.write_issue(issue)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::MetricBatch;
    use crate::engine::{run_analysis, AnalysisScope};
    use serde_json::json;

    fn sample_report() -> AnalysisReport {
        let batch: MetricBatch = serde_json::from_value(json!({
            "inference_metrics": {"latency_p95": 250.0, "throughput": 500.0, "error_rate": 0.0}
        }))
        .unwrap();
        run_analysis(&batch, AnalysisScope::Ml, &Config::default(), true)
    }

    #[test]
    fn json_writer_produces_valid_json() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["pipelines"][0]["pipeline"], "ml");
        assert_eq!(value["pipelines"][0]["summary"]["total"], 1);
    }

    #[test]
    fn markdown_writer_includes_issue_sections() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_report(&sample_report())
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Pipeline Analysis Report"));
        assert!(text.contains("[HIGH] High Inference Latency"));
        assert!(text.contains("Optimization Plan"));
    }
}
