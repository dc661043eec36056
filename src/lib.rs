//! marksheet - student marks cleaning, grading & chart generation.
//!
//! Loads a CSV of student scores, repairs missing and invalid values,
//! computes total scores and letter grades, renders summary charts, and
//! writes the cleaned table back out as CSV.

pub mod charts;
pub mod config;
pub mod data;
pub mod grades;
pub mod pipeline;
