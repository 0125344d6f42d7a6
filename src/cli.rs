use crate::engine::AnalysisScope;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pipewatch",
    about = "Pipeline issue detection and prioritization",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a metric batch and report detected issues
    Analyze {
        /// Path to the metric batch snapshot (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Pipelines to analyze
        #[arg(short, long, value_enum, default_value = "both")]
        pipeline: AnalysisScope,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a TOML threshold configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a metric batch and also generate ranked optimization plans
    Optimize {
        /// Path to the metric batch snapshot (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Pipelines to analyze
        #[arg(short, long, value_enum, default_value = "both")]
        pipeline: AnalysisScope,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a TOML threshold configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
