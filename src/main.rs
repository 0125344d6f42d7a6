use anyhow::{Context, Result};
use clap::Parser;
use pipewatch::cli::{Cli, Commands};
use pipewatch::config::Config;
use pipewatch::core::MetricBatch;
use pipewatch::engine::{run_analysis, AnalysisScope};
use pipewatch::io::{create_writer, OutputFormat};
use std::fs::File;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            pipeline,
            format,
            output,
            config,
            verbose,
        } => run(input, pipeline, format, output, config, verbose, false),
        Commands::Optimize {
            input,
            pipeline,
            format,
            output,
            config,
            verbose,
        } => run(input, pipeline, format, output, config, verbose, true),
    }
}

fn run(
    input: PathBuf,
    scope: AnalysisScope,
    format: OutputFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    verbose: bool,
    include_optimizations: bool,
) -> Result<()> {
    init_logging(verbose);

    let config = match config_path {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let batch = MetricBatch::from_file(&input)
        .with_context(|| format!("failed to load metric batch: {}", input.display()))?;
    let report = run_analysis(&batch, scope, &config, include_optimizations);

    log::info!(
        "analysis complete: {} issues across {} pipelines",
        report.total_issues(),
        report.pipelines.len()
    );

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?;
            create_writer(file, format).write_report(&report)?;
            log::info!("report written to {}", path.display());
        }
        None => {
            create_writer(std::io::stdout(), format).write_report(&report)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
