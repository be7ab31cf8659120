use std::fmt::Write as _;

use crate::metrics::{MetricsSeries, SeriesKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRow {
    pub frame: u32,
    pub burning: String,
    pub natural: String,
    pub extinguished: String,
}

/// Absent values are shown as an empty cell.
#[must_use]
pub fn format_cell(value: Option<f64>) -> String {
    value.map_or_else(String::new, |value| {
        if value.fract().abs() < f64::EPSILON {
            format!("{value:.0}")
        } else {
            format!("{value}")
        }
    })
}

/// One row per frame, `1..=total_frames`.
#[must_use]
pub fn tabulate(metrics: &MetricsSeries, total_frames: u32) -> Vec<MetricsRow> {
    (1..=total_frames)
        .map(|frame| MetricsRow {
            frame,
            burning: format_cell(metrics.value_at(SeriesKind::BurningCells, frame)),
            natural: format_cell(metrics.value_at(SeriesKind::NaturalBurnouts, frame)),
            extinguished: format_cell(metrics.value_at(SeriesKind::ExtinguishedCumulative, frame)),
        })
        .collect()
}

/// Plain-text table for stdout.
#[must_use]
pub fn render_table(rows: &[MetricsRow]) -> String {
    let mut out = String::new();
    if writeln!(
        out,
        "{:>6}  {:>12}  {:>16}  {:>20}",
        "frame", "burning", "natural_burnouts", "extinguished_cum"
    )
    .is_err()
    {
        return out;
    }
    for row in rows {
        if writeln!(
            out,
            "{:>6}  {:>12}  {:>16}  {:>20}",
            row.frame, row.burning, row.natural, row.extinguished
        )
        .is_err()
        {
            break;
        }
    }
    out
}
