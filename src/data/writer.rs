//! Roster Writer
//! Serializes the cleaned and transformed table back to CSV.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Write the table as CSV with a header row, preserving column order.
/// No auxiliary row-index column is emitted.
pub fn write_roster(df: &mut DataFrame, path: &Path) -> Result<(), WriteError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)?;

    info!(
        rows = df.height(),
        path = %path.display(),
        "Cleaned dataset saved"
    );
    Ok(())
}
