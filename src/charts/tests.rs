use tempfile::tempdir;

use super::{
    DrawCommand, PNG_GEOMETRY, PlotGeometry, Point, format_cell, render_line_plot, render_table,
    tabulate, write_metric_charts,
};
use crate::color::Rgb;
use crate::error::{AppError, AppResult};
use crate::metrics::MetricsSeries;

const GEOMETRY: PlotGeometry = PlotGeometry::new(120.0, 60.0, 10.0);
const RED: Rgb = Rgb(255, 0, 0);

fn polyline(commands: &[DrawCommand]) -> Option<&Vec<Point>> {
    commands.iter().find_map(|command| match command {
        DrawCommand::Polyline { points, .. } => Some(points),
        DrawCommand::Clear | DrawCommand::Line { .. } => None,
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn line_plot_peaks_at_maximum() -> AppResult<()> {
    let commands = render_line_plot(&[Some(0.0), Some(3.0), Some(1.0)], &GEOMETRY, RED);
    if commands.first() != Some(&DrawCommand::Clear) {
        return Err(AppError::validation("Expected Clear first"));
    }
    if commands.len() != 4 {
        return Err(AppError::validation(format!(
            "Expected clear, two axes and a polyline, got {}",
            commands.len()
        )));
    }

    let points = polyline(&commands).ok_or_else(|| AppError::validation("Missing polyline"))?;
    let bottom = GEOMETRY.axis_bottom();
    let top = bottom - GEOMETRY.plot_height();
    let expected = [
        Point::new(10.0, bottom),
        Point::new(60.0, top),
        Point::new(110.0, bottom - GEOMETRY.plot_height() / 3.0),
    ];
    if points.len() != expected.len() {
        return Err(AppError::validation("Unexpected point count"));
    }
    for (point, want) in points.iter().zip(expected.iter()) {
        if !close(point.x, want.x) || !close(point.y, want.y) {
            return Err(AppError::validation(format!(
                "Unexpected point {point:?}, wanted {want:?}"
            )));
        }
    }
    Ok(())
}

#[test]
fn empty_and_absent_series_draw_axes_only() -> AppResult<()> {
    for series in [Vec::new(), vec![None, None]] {
        let commands = render_line_plot(&series, &GEOMETRY, RED);
        if polyline(&commands).is_some() || commands.len() != 3 {
            return Err(AppError::validation("Expected axes only"));
        }
        let axes_neutral = commands.iter().all(|command| match command {
            DrawCommand::Line { color, .. } => *color == Rgb::AXIS,
            DrawCommand::Clear | DrawCommand::Polyline { .. } => true,
        });
        if !axes_neutral {
            return Err(AppError::validation("Axes must use the neutral colour"));
        }
    }
    Ok(())
}

#[test]
fn small_values_use_unit_floor_and_single_sample_sits_on_axis() -> AppResult<()> {
    let commands = render_line_plot(&[Some(0.5)], &GEOMETRY, RED);
    let points = polyline(&commands).ok_or_else(|| AppError::validation("Missing polyline"))?;
    let point = points
        .first()
        .ok_or_else(|| AppError::validation("Missing point"))?;
    let expected_y = GEOMETRY.axis_bottom() - GEOMETRY.plot_height() * 0.5;
    if !close(point.x, GEOMETRY.axis_left()) || !close(point.y, expected_y) {
        return Err(AppError::validation(format!("Unexpected point {point:?}")));
    }
    Ok(())
}

#[test]
fn render_is_stateless() -> AppResult<()> {
    let series = [Some(1.0), None, Some(4.0)];
    if render_line_plot(&series, &GEOMETRY, RED) != render_line_plot(&series, &GEOMETRY, RED) {
        return Err(AppError::validation("Expected identical output"));
    }
    Ok(())
}

#[test]
fn tabulate_leaves_absent_cells_empty() -> AppResult<()> {
    let metrics = MetricsSeries {
        burning_cells: vec![Some(4.0), None, Some(2.5)],
        natural_burnouts: vec![Some(0.0)],
        extinguished_cumulative: Vec::new(),
    };
    let rows = tabulate(&metrics, 3);
    if rows.len() != 3 {
        return Err(AppError::validation("Expected a row per frame"));
    }
    let second = rows
        .get(1)
        .ok_or_else(|| AppError::validation("Missing row 2"))?;
    if second.frame != 2 || !second.burning.is_empty() || !second.natural.is_empty() {
        return Err(AppError::validation("Expected empty cells for frame 2"));
    }
    let first = rows
        .first()
        .ok_or_else(|| AppError::validation("Missing row 1"))?;
    if first.burning != "4" || first.natural != "0" || !first.extinguished.is_empty() {
        return Err(AppError::validation("Unexpected first row"));
    }
    if format_cell(Some(2.5)) != "2.5" {
        return Err(AppError::validation("Unexpected fractional cell"));
    }
    if render_table(&rows).lines().count() != 4 {
        return Err(AppError::validation("Expected header plus 3 rows"));
    }
    Ok(())
}

#[test]
fn metric_charts_are_written_as_png() -> AppResult<()> {
    let dir = tempdir()?;
    let metrics = MetricsSeries {
        burning_cells: vec![Some(0.0), Some(3.0), Some(1.0)],
        natural_burnouts: vec![None, None, None],
        extinguished_cumulative: vec![Some(0.0), Some(1.0), Some(2.0)],
    };
    let written = write_metric_charts(&metrics, dir.path())?;
    if written.len() != 3 {
        return Err(AppError::validation("Expected three charts"));
    }
    for path in &written {
        let bytes = std::fs::read(path)?;
        if !bytes.starts_with(b"\x89PNG") {
            return Err(AppError::validation(format!(
                "Expected PNG at {}",
                path.display()
            )));
        }
    }
    if PNG_GEOMETRY.plot_width() <= 0.0 {
        return Err(AppError::validation("PNG geometry must leave room to plot"));
    }
    Ok(())
}
