//! Pipeline configuration.
//!
//! Paths and column names are explicit configuration rather than globals.
//! Defaults reproduce the fixed schema the pipeline was designed around; a
//! JSON config file can override any of them.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Expected exactly 5 score columns, got {0}")]
    BadScoreColumns(usize),
}

/// Column names of the roster table, input and derived.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterSchema {
    /// Unique per-student numeric key.
    pub id_column: String,
    /// The five component score columns, in output order.
    pub score_columns: Vec<String>,
    pub total_column: String,
    pub grade_column: String,
    pub percentage_column: String,
}

impl Default for RosterSchema {
    fn default() -> Self {
        Self {
            id_column: "UFID".to_string(),
            score_columns: vec![
                "IDS Lab-1 Score".to_string(),
                "IDS Lab-2 Score".to_string(),
                "IDS Lab-3 Score".to_string(),
                "IDS Exam-1 Score".to_string(),
                "IDS Exam-2 Score".to_string(),
            ],
            total_column: "Calculated Total Score".to_string(),
            grade_column: "Calculated Grade".to_string(),
            percentage_column: "Percentage Score".to_string(),
        }
    }
}

impl RosterSchema {
    /// Columns that must be present in the raw input.
    pub fn expected_columns(&self) -> Vec<&str> {
        let mut cols = vec![self.id_column.as_str()];
        cols.extend(self.score_columns.iter().map(|s| s.as_str()));
        cols
    }
}

/// Chart artifact file names, fixed by contract with the verification script.
pub const GRADE_CHART_FILE: &str = "students_by_grade.png";
pub const TOTAL_CHART_FILE: &str = "total_score_distribution.png";
pub const PERCENTAGE_CHART_FILE: &str = "percentage_score_distribution.png";

/// Everything a pipeline run needs: where to read, where to write, and what
/// the columns are called.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub chart_dir: PathBuf,
    pub schema: RosterSchema,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("student_marks_dataset.csv"),
            output_path: PathBuf::from("cleaned_transformed_student_marks.csv"),
            chart_dir: PathBuf::from("."),
            schema: RosterSchema::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file, falling back to defaults for absent fields.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema.score_columns.len() != 5 {
            return Err(ConfigError::BadScoreColumns(self.schema.score_columns.len()));
        }
        Ok(())
    }

    pub fn grade_chart_path(&self) -> PathBuf {
        self.chart_dir.join(GRADE_CHART_FILE)
    }

    pub fn total_chart_path(&self) -> PathBuf {
        self.chart_dir.join(TOTAL_CHART_FILE)
    }

    pub fn percentage_chart_path(&self) -> PathBuf {
        self.chart_dir.join(PERCENTAGE_CHART_FILE)
    }
}
