//! Roster Cleaner
//! Repairs score columns, validates the identifier column, computes the total
//! score and assigns grades.

use polars::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::RosterSchema;
use crate::grades::grade_for_total;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column '{0}' is missing from the dataset")]
    MissingColumn(String),
}

/// Extract a numeric value from a cell of unknown type.
///
/// Numeric strings parse; anything non-numeric (or null) is `None`.
pub(crate) fn numeric_value(value: &AnyValue) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => s.trim().parse::<f64>().ok(),
        AnyValue::StringOwned(s) => s.trim().parse::<f64>().ok(),
        other => other.try_extract::<f64>().ok(),
    }
}

/// Clean the raw roster table.
///
/// Steps, in order:
/// 1. Verify every expected column is present.
/// 2. Impute missing score values with the column mean, round, cast to Int64.
/// 3. Drop rows with missing identifiers, then rows with non-numeric ones.
/// 4. Append the total score column (sum of the five score columns).
/// 5. Append the grade column from the total.
/// 6. Re-cast every numeric column to Int64.
///
/// Running on an already-clean table is a no-op.
pub fn clean(mut df: DataFrame, schema: &RosterSchema) -> Result<DataFrame, CleanError> {
    check_expected_columns(&df, schema)?;

    for name in &schema.score_columns {
        df = repair_score_column(df, name)?;
    }

    df = repair_identifier_column(df, &schema.id_column)?;
    df = append_total_column(df, schema)?;
    df = append_grade_column(df, schema)?;
    df = coerce_numeric_columns(df, schema)?;

    info!(rows = df.height(), "Data cleaned successfully");
    Ok(df)
}

fn check_expected_columns(df: &DataFrame, schema: &RosterSchema) -> Result<(), CleanError> {
    for name in schema.expected_columns() {
        if df.column(name).is_err() {
            return Err(CleanError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Two-pass mean imputation: accumulate sum and count of the parseable values,
/// then fill the gaps with the mean and round everything to integers.
fn repair_score_column(mut df: DataFrame, name: &str) -> Result<DataFrame, CleanError> {
    let column = df.column(name)?;

    let mut values: Vec<Option<f64>> = Vec::with_capacity(df.height());
    let mut sum = 0.0;
    let mut count = 0usize;

    for i in 0..df.height() {
        let parsed = column.get(i).ok().as_ref().and_then(numeric_value);
        if let Some(v) = parsed {
            sum += v;
            count += 1;
        }
        values.push(parsed);
    }

    let mean = if count > 0 {
        sum / count as f64
    } else {
        // Entirely-missing column: the mean is undefined, fill with zero
        // rather than aborting the run.
        warn!(column = name, "Column has no usable values, imputing zeros");
        0.0
    };

    let missing = values.iter().filter(|v| v.is_none()).count();
    if missing > 0 {
        info!(
            column = name,
            missing,
            fill = mean.round() as i64,
            "Imputing missing score values with column mean"
        );
    }

    let repaired: Vec<i64> = values
        .into_iter()
        .map(|v| v.unwrap_or(mean).round() as i64)
        .collect();

    df.with_column(Column::new(name.into(), repaired))?;
    Ok(df)
}

/// Drop rows with a missing identifier, then rows whose identifier does not
/// coerce to a number. The surviving column is Int64 and non-null.
fn repair_identifier_column(df: DataFrame, name: &str) -> Result<DataFrame, CleanError> {
    let column = df.column(name)?;

    // Pass 1: missing identifiers.
    let present: Vec<bool> = (0..df.height())
        .map(|i| {
            column
                .get(i)
                .map(|v| !matches!(v, AnyValue::Null))
                .unwrap_or(false)
        })
        .collect();
    let dropped_missing = present.iter().filter(|p| !**p).count();
    let mask = BooleanChunked::from_slice("mask".into(), &present);
    let df = df.filter(&mask)?;

    // Pass 2: identifiers that do not coerce to a number.
    let column = df.column(name)?;
    let parsed: Vec<Option<i64>> = (0..df.height())
        .map(|i| {
            column
                .get(i)
                .ok()
                .as_ref()
                .and_then(numeric_value)
                .map(|v| v as i64)
        })
        .collect();
    let valid: Vec<bool> = parsed.iter().map(|v| v.is_some()).collect();
    let dropped_invalid = valid.iter().filter(|p| !**p).count();
    let mask = BooleanChunked::from_slice("mask".into(), &valid);
    let mut df = df.filter(&mask)?;

    let identifiers: Vec<i64> = parsed.into_iter().flatten().collect();
    df.with_column(Column::new(name.into(), identifiers))?;

    if dropped_missing > 0 || dropped_invalid > 0 {
        warn!(
            column = name,
            dropped_missing,
            dropped_invalid,
            remaining = df.height(),
            "Dropped rows with unrecoverable identifiers"
        );
    }
    Ok(df)
}

/// Row-wise exact integer sum of the five score columns.
fn append_total_column(mut df: DataFrame, schema: &RosterSchema) -> Result<DataFrame, CleanError> {
    let mut totals = vec![0i64; df.height()];
    for name in &schema.score_columns {
        let scores = df.column(name)?.i64()?.clone();
        for (i, total) in totals.iter_mut().enumerate() {
            // Score columns are non-null Int64 after repair.
            *total += scores.get(i).unwrap_or(0);
        }
    }
    df.with_column(Column::new(schema.total_column.as_str().into(), totals))?;
    info!(column = %schema.total_column, "Calculated total scores");
    Ok(df)
}

fn append_grade_column(mut df: DataFrame, schema: &RosterSchema) -> Result<DataFrame, CleanError> {
    let totals = df.column(&schema.total_column)?.i64()?.clone();
    let grades: Vec<String> = (0..df.height())
        .map(|i| grade_for_total(totals.get(i).unwrap_or(0)).to_string())
        .collect();
    df.with_column(Column::new(schema.grade_column.as_str().into(), grades))?;
    info!(column = %schema.grade_column, "Assigned grades");
    Ok(df)
}

/// Final pass: every numeric column ends up Int64, no float artifacts.
fn coerce_numeric_columns(
    mut df: DataFrame,
    schema: &RosterSchema,
) -> Result<DataFrame, CleanError> {
    let mut names: Vec<&str> = vec![schema.id_column.as_str()];
    names.extend(schema.score_columns.iter().map(|s| s.as_str()));
    names.push(schema.total_column.as_str());

    let mut casted = Vec::with_capacity(names.len());
    for name in names {
        casted.push(df.column(name)?.cast(&DataType::Int64)?);
    }
    for column in casted {
        df.with_column(column)?;
    }
    Ok(df)
}
