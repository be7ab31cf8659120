//! Metric charts: stateless geometry plus the surfaces that replay it.
mod plot;
mod raster;
mod table;

#[cfg(test)]
mod tests;

pub use plot::{DrawCommand, PlotGeometry, Point, render_line_plot, series_color};
pub use raster::{PNG_GEOMETRY, draw_png, write_metric_charts};
pub use table::{MetricsRow, format_cell, render_table, tabulate};
