//! Roster Transformer
//! Derives the percentage score from the calculated total.

use polars::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::config::RosterSchema;

/// Maximum achievable total (five components, 100 points each).
const MAX_TOTAL: f64 = 500.0;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' must be computed before transformation")]
    MissingTotal(String),
}

/// Append the percentage column: total / 500 * 100, rounded to 2 decimals.
///
/// The total column is a hard prerequisite; transforming a table without it
/// is a schema error, not a silent no-op.
pub fn add_percentage(mut df: DataFrame, schema: &RosterSchema) -> Result<DataFrame, TransformError> {
    let totals = df
        .column(&schema.total_column)
        .map_err(|_| TransformError::MissingTotal(schema.total_column.clone()))?
        .i64()?
        .clone();

    let percentages: Vec<f64> = (0..df.height())
        .map(|i| {
            let total = totals.get(i).unwrap_or(0) as f64;
            (total / MAX_TOTAL * 100.0 * 100.0).round() / 100.0
        })
        .collect();

    df.with_column(Column::new(
        schema.percentage_column.as_str().into(),
        percentages,
    ))?;
    info!(column = %schema.percentage_column, "Data transformed successfully");
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterSchema;

    #[test]
    fn test_percentage_rounds_to_two_decimals() {
        let schema = RosterSchema::default();
        let df = DataFrame::new(vec![Column::new(
            schema.total_column.as_str().into(),
            vec![480i64, 333, 0, 500],
        )])
        .unwrap();

        let transformed = add_percentage(df, &schema).unwrap();
        let pct: Vec<f64> = transformed
            .column(&schema.percentage_column)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect();
        assert_eq!(pct, vec![96.0, 66.6, 0.0, 100.0]);
    }

    #[test]
    fn test_percentage_bounded_for_valid_totals() {
        let schema = RosterSchema::default();
        let totals: Vec<i64> = (0..=500).step_by(25).collect();
        let df = DataFrame::new(vec![Column::new(
            schema.total_column.as_str().into(),
            totals,
        )])
        .unwrap();

        let transformed = add_percentage(df, &schema).unwrap();
        let pct = transformed
            .column(&schema.percentage_column)
            .unwrap()
            .f64()
            .unwrap()
            .clone();
        for v in pct.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_missing_total_column_is_error() {
        let schema = RosterSchema::default();
        let df = DataFrame::new(vec![Column::new("UFID".into(), vec![1i64])]).unwrap();
        let result = add_percentage(df, &schema);
        assert!(matches!(result, Err(TransformError::MissingTotal(_))));
    }
}
