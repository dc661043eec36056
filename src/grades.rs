//! Grade band lookup.
//!
//! Converts a total score into a letter grade using an ordered threshold
//! table. The first satisfied lower bound wins, so the bands are exhaustive
//! and mutually exclusive over the full integer range by construction.
//!
//! | Total score | Grade |
//! |-------------|-------|
//! | >= 475      | A     |
//! | >= 450      | A-    |
//! | >= 435      | B+    |
//! | >= 425      | B     |
//! | >= 415      | B-    |
//! | >= 400      | C     |
//! | >= 350      | D     |
//! | < 350       | F     |

/// Lower bounds, descending. Totals below the last bound fall through to `F`.
const BANDS: [(i64, &str); 7] = [
    (475, "A"),
    (450, "A-"),
    (435, "B+"),
    (425, "B"),
    (415, "B-"),
    (400, "C"),
    (350, "D"),
];

/// All grade labels in fixed ordinal order (best to worst), used for chart axes.
pub const GRADE_ORDER: [&str; 8] = ["A", "A-", "B+", "B", "B-", "C", "D", "F"];

/// Returns the letter grade for a total score.
pub fn grade_for_total(total: i64) -> &'static str {
    BANDS
        .iter()
        .find(|(bound, _)| total >= *bound)
        .map(|(_, grade)| *grade)
        .unwrap_or("F")
}
