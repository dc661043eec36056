//! Pipeline orchestration.
//!
//! Runs Loader -> Audit -> Cleaner -> Transformer -> Reporter -> Writer
//! sequentially, single-threaded, handing table ownership stage to stage.
//! Stage errors stop the run at the stage boundary; individual chart
//! failures are reported per artifact and do not block the Writer.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::charts;
use crate::config::{ConfigError, PipelineConfig};
use crate::data;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Loading failed: {0}")]
    Load(#[from] data::LoaderError),
    #[error("Cleaning failed: {0}")]
    Clean(#[from] data::CleanError),
    #[error("Transformation failed: {0}")]
    Transform(#[from] data::TransformError),
    #[error("Reporting failed: {0}")]
    Report(#[from] charts::ChartError),
    /// Processing succeeded but the output could not be persisted.
    #[error("Saving the output failed: {0}")]
    Persist(#[from] data::WriteError),
}

/// What a completed run did.
#[derive(Debug)]
pub struct RunSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    pub negative_score_rows: usize,
    /// Chart artifacts that failed to render (non-fatal).
    pub chart_failures: Vec<&'static str>,
}

/// Execute the full pipeline against one input file.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    config.validate()?;

    info!(path = %config.input_path.display(), "Loading dataset");
    let df = data::load_roster(&config.input_path)?;
    let input_rows = df.height();

    let audit_report = data::audit(&df, &config.schema);

    info!("Cleaning the dataset");
    let df = data::clean(df, &config.schema)?;

    info!("Transforming the dataset");
    let df = data::add_percentage(df, &config.schema)?;

    info!("Creating visualizations");
    let mut chart_failures = Vec::new();
    for (artifact, outcome) in charts::render_all(&df, config)? {
        if let Err(e) = outcome {
            error!(artifact, error = %e, "Chart rendering failed");
            chart_failures.push(artifact);
        }
    }

    info!("Saving the cleaned and transformed dataset");
    let mut df = df;
    data::write_roster(&mut df, &config.output_path)?;

    let summary = RunSummary {
        input_rows,
        output_rows: df.height(),
        negative_score_rows: audit_report.negative_score_rows.len(),
        chart_failures,
    };
    if !summary.chart_failures.is_empty() {
        warn!(failed = ?summary.chart_failures, "Some chart artifacts were not produced");
    }
    info!(
        input_rows = summary.input_rows,
        output_rows = summary.output_rows,
        "Data cleaning, transformation, and processing completed"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_input_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            input_path: PathBuf::from("/nonexistent/marks.csv"),
            output_path: dir.path().join("out.csv"),
            chart_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let result = run(&config);
        assert!(matches!(result, Err(PipelineError::Load(_))));
        // Nothing was written.
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_missing_score_column_is_clean_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "UFID,IDS Lab-1 Score\n111,80\n").unwrap();

        let config = PipelineConfig {
            input_path: input,
            output_path: dir.path().join("out.csv"),
            chart_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let result = run(&config);
        match result {
            Err(PipelineError::Clean(data::CleanError::MissingColumn(name))) => {
                assert_eq!(name, "IDS Lab-2 Score")
            }
            other => panic!("expected Clean(MissingColumn), got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unwritable_output_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(
            &input,
            "UFID,IDS Lab-1 Score,IDS Lab-2 Score,IDS Lab-3 Score,IDS Exam-1 Score,IDS Exam-2 Score\n\
             111,90,90,90,90,90\n",
        )
        .unwrap();

        let config = PipelineConfig {
            input_path: input,
            output_path: PathBuf::from("/nonexistent/dir/out.csv"),
            chart_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let result = run(&config);
        assert!(matches!(result, Err(PipelineError::Persist(_))));
        // Processing got far enough that the charts were still produced.
        assert!(config.grade_chart_path().exists());
    }
}
