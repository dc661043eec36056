//! Static Chart Renderer
//! Renders the three summary charts as PNG files with Plotters.
//!
//! Artifacts:
//! 1. Bar chart: student count per grade band, bands in ordinal order
//! 2. Histogram: total score distribution, 10 equal-width bins
//! 3. Box plot: percentage score distribution, single horizontal series

use plotters::prelude::*;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::{PipelineConfig, GRADE_CHART_FILE, PERCENTAGE_CHART_FILE, TOTAL_CHART_FILE};
use crate::grades::GRADE_ORDER;

const CHART_SIZE: (u32, u32) = (800, 600);
const HISTOGRAM_BINS: usize = 10;
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const BAR_GREEN: RGBColor = RGBColor(46, 139, 87);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' is missing in the dataset")]
    MissingColumn(String),
    #[error("Chart rendering failed: {0}")]
    Render(String),
}

/// Per-artifact outcome of one reporting run.
pub type ChartOutcome = (&'static str, Result<(), ChartError>);

/// Render all three charts, each attempted independently.
///
/// The grade column is a precondition for reporting as a whole; with it
/// absent this returns an error without attempting any artifact. A single
/// artifact failing to render is reported in its outcome and does not stop
/// the others.
pub fn render_all(df: &DataFrame, config: &PipelineConfig) -> Result<Vec<ChartOutcome>, ChartError> {
    let schema = &config.schema;
    if df.column(&schema.grade_column).is_err() {
        return Err(ChartError::MissingColumn(schema.grade_column.clone()));
    }

    let outcomes = vec![
        (
            GRADE_CHART_FILE,
            render_grade_bar_chart(df, &schema.grade_column, &config.grade_chart_path()),
        ),
        (
            TOTAL_CHART_FILE,
            render_total_histogram(df, &schema.total_column, &config.total_chart_path()),
        ),
        (
            PERCENTAGE_CHART_FILE,
            render_percentage_box_plot(
                df,
                &schema.percentage_column,
                &config.percentage_chart_path(),
            ),
        ),
    ];
    Ok(outcomes)
}

/// Bar chart of student counts per grade band.
pub fn render_grade_bar_chart(
    df: &DataFrame,
    grade_column: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let grades = df
        .column(grade_column)
        .map_err(|_| ChartError::MissingColumn(grade_column.to_string()))?
        .str()?
        .clone();

    let mut counts = vec![0i32; GRADE_ORDER.len()];
    for grade in grades.into_iter().flatten() {
        if let Some(idx) = GRADE_ORDER.iter().position(|g| *g == grade) {
            counts[idx] += 1;
        }
    }
    let max_count = counts.iter().max().copied().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Number of Students by Grade", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (0..GRADE_ORDER.len() as i32).into_segmented(),
            0..max_count + 1,
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(GRADE_ORDER.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => GRADE_ORDER
                .get(*idx as usize)
                .map(|g| g.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Grade")
        .y_desc("Number of Students")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(idx, &count)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(idx as i32), 0),
                    (SegmentValue::Exact(idx as i32 + 1), count),
                ],
                SKY_BLUE.filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), "Grade bar chart saved");
    Ok(())
}

/// Histogram of total scores over a fixed number of equal-width bins.
pub fn render_total_histogram(
    df: &DataFrame,
    total_column: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let totals: Vec<f64> = df
        .column(total_column)
        .map_err(|_| ChartError::MissingColumn(total_column.to_string()))?
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .flatten()
        .collect();

    let min = totals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = totals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if min.is_finite() && max > min {
        (min, max)
    } else if min.is_finite() {
        // Degenerate distribution: widen so the single bar is visible.
        (min - 5.0, min + 5.0)
    } else {
        (0.0, 500.0)
    };

    let bin_width = (max - min) / HISTOGRAM_BINS as f64;
    let mut bins = vec![0i32; HISTOGRAM_BINS];
    for &value in &totals {
        let idx = (((value - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        bins[idx] += 1;
    }
    let max_bin = bins.iter().max().copied().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Total Scores", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(50)
        .build_cartesian_2d(min..max, 0..max_bin + 1)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Total Score")
        .y_desc("Frequency")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(bins.iter().enumerate().map(|(idx, &count)| {
            let x0 = min + bin_width * idx as f64;
            Rectangle::new([(x0, 0), (x0 + bin_width, count)], BAR_GREEN.mix(0.7).filled())
        }))
        .map_err(render_err)?;
    // Bin outlines
    chart
        .draw_series(bins.iter().enumerate().map(|(idx, &count)| {
            let x0 = min + bin_width * idx as f64;
            Rectangle::new([(x0, 0), (x0 + bin_width, count)], BLACK.stroke_width(1))
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), "Total score histogram saved");
    Ok(())
}

/// Single-series horizontal box plot of percentage scores.
pub fn render_percentage_box_plot(
    df: &DataFrame,
    percentage_column: &str,
    path: &Path,
) -> Result<(), ChartError> {
    let values: Vec<f64> = df
        .column(percentage_column)
        .map_err(|_| ChartError::MissingColumn(percentage_column.to_string()))?
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .flatten()
        .collect();

    if values.is_empty() {
        return Err(ChartError::Render(format!(
            "no values in '{}' to plot",
            percentage_column
        )));
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if min.is_finite() && max > min {
        let pad = (max - min) * 0.1;
        (min - pad, max + pad)
    } else if min.is_finite() {
        (min - 5.0, min + 5.0)
    } else {
        (0.0, 100.0)
    };

    let quartiles = Quartiles::new(&values);
    let labels = vec!["Percentage Score"];

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Percentage Scores", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(110)
        .build_cartesian_2d(x_min as f32..x_max as f32, labels[..].into_segmented())
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Percentage")
        .y_labels(labels.len())
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(labels.iter().map(|label| {
            Boxplot::new_horizontal(SegmentValue::CenterOf(label), &quartiles)
                .width(40)
                .whisker_width(0.5)
                .style(SKY_BLUE)
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), "Percentage box plot saved");
    Ok(())
}

fn render_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineConfig, RosterSchema};

    fn graded_frame() -> DataFrame {
        let schema = RosterSchema::default();
        DataFrame::new(vec![
            Column::new(
                schema.grade_column.as_str().into(),
                vec!["A", "A-", "F", "A"],
            ),
            Column::new(
                schema.total_column.as_str().into(),
                vec![480i64, 460, 340, 490],
            ),
            Column::new(
                schema.percentage_column.as_str().into(),
                vec![96.0, 92.0, 68.0, 98.0],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_all_produces_three_nonempty_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            chart_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };

        let outcomes = render_all(&graded_frame(), &config).unwrap();
        assert_eq!(outcomes.len(), 3);
        for (name, outcome) in outcomes {
            outcome.unwrap();
            let metadata = std::fs::metadata(dir.path().join(name)).unwrap();
            assert!(metadata.len() > 0, "{} is empty", name);
        }
    }

    #[test]
    fn test_missing_grade_column_fails_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            chart_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let df = DataFrame::new(vec![Column::new("UFID".into(), vec![1i64])]).unwrap();

        let result = render_all(&df, &config);
        assert!(matches!(result, Err(ChartError::MissingColumn(_))));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_one_artifact_failure_does_not_stop_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            chart_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        // Grade column present but the histogram's total column is not: the
        // bar chart and box plot must still render.
        let schema = RosterSchema::default();
        let df = DataFrame::new(vec![
            Column::new(schema.grade_column.as_str().into(), vec!["A", "F"]),
            Column::new(schema.percentage_column.as_str().into(), vec![96.0, 40.0]),
        ])
        .unwrap();

        let outcomes = render_all(&df, &config).unwrap();
        let failed: Vec<_> = outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_err())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(failed, vec![TOTAL_CHART_FILE]);
        assert!(dir.path().join(GRADE_CHART_FILE).exists());
        assert!(dir.path().join(PERCENTAGE_CHART_FILE).exists());
    }
}
