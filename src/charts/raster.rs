use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::color::Rgb;
use crate::error::AppResult;
use crate::metrics::{MetricsSeries, SeriesKind};

use super::plot::{DrawCommand, PlotGeometry, Point, render_line_plot, series_color};

/// Size of the PNG charts written to disk.
pub const PNG_GEOMETRY: PlotGeometry = PlotGeometry::new(800.0, 300.0, 30.0);

const fn to_color(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn to_pixel(point: &Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

/// Replays draw commands onto a PNG bitmap at `path`.
///
/// # Errors
///
/// Returns an error when the bitmap cannot be drawn or written.
pub fn draw_png(commands: &[DrawCommand], geometry: &PlotGeometry, path: &Path) -> AppResult<()> {
    let size = (
        geometry.width.max(1.0).round() as u32,
        geometry.height.max(1.0).round() as u32,
    );
    let root = BitMapBackend::new(path, size).into_drawing_area();

    for command in commands {
        match command {
            DrawCommand::Clear => root.fill(&WHITE)?,
            DrawCommand::Line { from, to, color } => {
                root.draw(&PathElement::new(
                    vec![to_pixel(from), to_pixel(to)],
                    to_color(*color),
                ))?;
            }
            DrawCommand::Polyline { points, color } => {
                let pixels: Vec<(i32, i32)> = points.iter().map(to_pixel).collect();
                root.draw(&PathElement::new(
                    pixels,
                    to_color(*color).stroke_width(2),
                ))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Writes one PNG per metric series into `dir`.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or a chart fails
/// to render.
pub fn write_metric_charts(metrics: &MetricsSeries, dir: &Path) -> AppResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(SeriesKind::ALL.len());
    for kind in SeriesKind::ALL {
        let path = dir.join(format!("{}.png", kind.file_stem()));
        let commands = render_line_plot(metrics.series(kind), &PNG_GEOMETRY, series_color(kind));
        draw_png(&commands, &PNG_GEOMETRY, &path)?;
        info!("Wrote {} chart to {}", kind.title(), path.display());
        written.push(path);
    }
    Ok(written)
}
