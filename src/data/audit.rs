//! Roster Audit
//! Exploratory pass over the raw table: missing-value counts and invalid
//! (negative) score values. Findings are logged, never fatal.

use polars::prelude::*;
use tracing::{info, warn};

use crate::config::RosterSchema;
use crate::data::cleaner::numeric_value;

/// Summary of data-quality findings for one run.
#[derive(Debug, Default)]
pub struct AuditReport {
    pub rows: usize,
    /// (column, missing count) for each expected column found in the input.
    pub missing_by_column: Vec<(String, usize)>,
    /// Row indices holding at least one negative score value.
    pub negative_score_rows: Vec<usize>,
}

/// Inspect the raw table before cleaning. Reports what the Cleaner will have
/// to repair; absent columns are noted here but only the Cleaner rejects them.
pub fn audit(df: &DataFrame, schema: &RosterSchema) -> AuditReport {
    let mut report = AuditReport {
        rows: df.height(),
        ..AuditReport::default()
    };

    info!(rows = df.height(), columns = df.width(), "Dataset summary");

    for name in schema.expected_columns() {
        match df.column(name) {
            Ok(column) => {
                let missing = (0..df.height())
                    .filter(|&i| {
                        column
                            .get(i)
                            .ok()
                            .as_ref()
                            .and_then(numeric_value)
                            .is_none()
                    })
                    .count();
                if missing > 0 {
                    warn!(column = name, missing, "Missing or invalid values");
                }
                report.missing_by_column.push((name.to_string(), missing));
            }
            Err(_) => warn!(column = name, "Expected column absent"),
        }
    }

    for i in 0..df.height() {
        let has_negative = schema.score_columns.iter().any(|name| {
            df.column(name)
                .ok()
                .and_then(|c| c.get(i).ok().as_ref().and_then(numeric_value))
                .map(|v| v < 0.0)
                .unwrap_or(false)
        });
        if has_negative {
            report.negative_score_rows.push(i);
        }
    }

    if !report.negative_score_rows.is_empty() {
        warn!(
            rows = ?report.negative_score_rows,
            "Negative score values present; they are reported but not repaired"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterSchema;

    fn schema() -> RosterSchema {
        RosterSchema {
            score_columns: vec![
                "S1".to_string(),
                "S2".to_string(),
                "S3".to_string(),
                "S4".to_string(),
                "S5".to_string(),
            ],
            ..RosterSchema::default()
        }
    }

    #[test]
    fn test_audit_counts_missing_and_negative() {
        let score = Column::new("S1".into(), vec![Some(90i64), None, Some(-5)]);
        let df = DataFrame::new(vec![
            Column::new("UFID".into(), vec![1i64, 2, 3]),
            score.clone(),
            score.clone().with_name("S2".into()),
            score.clone().with_name("S3".into()),
            score.clone().with_name("S4".into()),
            score.with_name("S5".into()),
        ])
        .unwrap();

        let report = audit(&df, &schema());
        assert_eq!(report.rows, 3);
        assert_eq!(report.negative_score_rows, vec![2]);
        let s1_missing = report
            .missing_by_column
            .iter()
            .find(|(name, _)| name == "S1")
            .map(|(_, n)| *n);
        assert_eq!(s1_missing, Some(1));
    }

    #[test]
    fn test_audit_tolerates_absent_columns() {
        let df = DataFrame::new(vec![Column::new("UFID".into(), vec![1i64])]).unwrap();
        let report = audit(&df, &schema());
        assert_eq!(report.rows, 1);
        assert!(report.negative_score_rows.is_empty());
    }
}
