//! CLI entry point for the marksheet pipeline.
//!
//! Runs the full load -> clean -> transform -> report -> write sequence
//! against one input file. Exits 0 on success and 1 on any fatal stage error.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use marksheet::config::PipelineConfig;
use marksheet::pipeline;

#[derive(Parser)]
#[command(name = "marksheet")]
#[command(about = "Clean a student marks CSV, assign grades and render summary charts", long_about = None)]
struct Cli {
    /// Input CSV of raw student marks
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the cleaned and transformed CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the three chart PNG files
    #[arg(long)]
    chart_dir: Option<PathBuf>,

    /// Optional JSON config file (paths and column names)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn build_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(input) = &cli.input {
        config.input_path = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(chart_dir) = &cli.chart_dir {
        config.chart_dir = chart_dir.clone();
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match pipeline::run(&config) {
        Ok(summary) => {
            info!(
                output = %config.output_path.display(),
                rows = summary.output_rows,
                "Run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Pipeline run failed");
            ExitCode::FAILURE
        }
    }
}
