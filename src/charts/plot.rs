use crate::color::Rgb;
use crate::metrics::SeriesKind;

/// Surface coordinates. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One primitive for a drawing surface to execute, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line { from: Point, to: Point, color: Rgb },
    Polyline { points: Vec<Point>, color: Rgb },
}

/// Surface size and the padding reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl PlotGeometry {
    #[must_use]
    pub const fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    #[must_use]
    pub const fn axis_left(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub const fn axis_top(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn axis_bottom(&self) -> f64 {
        self.height - self.padding
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }
}

#[must_use]
pub const fn series_color(kind: SeriesKind) -> Rgb {
    match kind {
        SeriesKind::BurningCells => Rgb(0xff, 0x4d, 0x4d),
        SeriesKind::NaturalBurnouts => Rgb(0xb8, 0x86, 0x0b),
        SeriesKind::ExtinguishedCumulative => Rgb(0x1e, 0x90, 0xff),
    }
}

fn sample_value(sample: Option<f64>) -> f64 {
    sample.filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Computes the draw commands for one metric series.
///
/// Output is `Clear`, the left and bottom axis borders, then a single
/// polyline through every sample in index order. Absent samples plot as 0
/// and the vertical scale never drops below 1. A series with no recorded
/// value produces no polyline.
#[must_use]
pub fn render_line_plot(
    series: &[Option<f64>],
    geometry: &PlotGeometry,
    color: Rgb,
) -> Vec<DrawCommand> {
    let left = geometry.axis_left();
    let bottom = geometry.axis_bottom();
    let right = left + geometry.plot_width();

    let mut commands = vec![
        DrawCommand::Clear,
        DrawCommand::Line {
            from: Point::new(left, geometry.axis_top()),
            to: Point::new(left, bottom),
            color: Rgb::AXIS,
        },
        DrawCommand::Line {
            from: Point::new(left, bottom),
            to: Point::new(right, bottom),
            color: Rgb::AXIS,
        },
    ];

    if series.iter().all(Option::is_none) {
        return commands;
    }

    let max_value = series
        .iter()
        .map(|sample| sample_value(*sample))
        .fold(1.0_f64, f64::max);
    let steps = series.len().saturating_sub(1);
    let plot_width = geometry.plot_width();
    let plot_height = geometry.plot_height();

    let points = series
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let x = if steps == 0 {
                left
            } else {
                left + plot_width * index as f64 / steps as f64
            };
            let y = bottom - plot_height * sample_value(*sample) / max_value;
            Point::new(x, y)
        })
        .collect();

    commands.push(DrawCommand::Polyline { points, color });
    commands
}
