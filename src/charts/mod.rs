//! Charts module - static chart rendering

mod renderer;

pub use renderer::{
    render_all, render_grade_bar_chart, render_percentage_box_plot, render_total_histogram,
    ChartError, ChartOutcome,
};
