//! Roster CSV Loader
//! Reads the raw marks file into a Polars DataFrame.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("No data loaded from {0}")]
    NoData(String),
}

/// Load a roster CSV with a header row.
///
/// Cell-level parse failures become nulls for the Cleaner to repair; a file
/// that is missing, unreadable, or yields no rows is a hard error.
pub fn load_roster(path: &Path) -> Result<DataFrame, LoaderError> {
    // Use lazy evaluation for memory efficiency, then collect
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    if df.height() == 0 {
        return Err(LoaderError::NoData(path.display().to_string()));
    }

    info!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "Dataset successfully loaded"
    );
    Ok(df)
}
