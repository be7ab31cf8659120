use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::{Backend, Frame},
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Line as CanvasLine},
    },
};

use crate::charts::{DrawCommand, PlotGeometry, render_line_plot, series_color};
use crate::metrics::SeriesKind;
use crate::ui::model::UiRenderData;

use super::theme::{
    color_of, panel_block_style, panel_border_style, panel_title_style, rgb, PANEL_TEXT_RGB,
};

/// Virtual canvas the plot commands are laid out on.
const CANVAS_GEOMETRY: PlotGeometry = PlotGeometry::new(100.0, 50.0, 4.0);

pub(super) fn render_charts<B: Backend>(f: &mut Frame<'_, B>, data: &UiRenderData, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (kind, chunk) in SeriesKind::ALL.into_iter().zip(columns.iter()) {
        let commands = render_line_plot(
            data.snapshot.metrics.series(kind),
            &CANVAS_GEOMETRY,
            series_color(kind),
        );
        render_canvas(f, kind.title(), &commands, data.no_color, *chunk);
    }
}

/// Canvas y grows upwards while plot commands grow downwards.
const fn flip(y: f64) -> f64 {
    CANVAS_GEOMETRY.height - y
}

fn render_canvas<B: Backend>(
    f: &mut Frame<'_, B>,
    title: &str,
    commands: &[DrawCommand],
    no_color: bool,
    area: Rect,
) {
    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(panel_block_style(no_color))
                .border_style(panel_border_style(no_color))
                .title_style(panel_title_style(no_color)),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_GEOMETRY.width])
        .y_bounds([0.0, CANVAS_GEOMETRY.height])
        .paint(|ctx| {
            for command in commands {
                match command {
                    DrawCommand::Clear => {}
                    DrawCommand::Line { from, to, color } => ctx.draw(&CanvasLine {
                        x1: from.x,
                        y1: flip(from.y),
                        x2: to.x,
                        y2: flip(to.y),
                        color: pen(no_color, *color),
                    }),
                    DrawCommand::Polyline { points, color } => {
                        for pair in points.windows(2) {
                            if let [from, to] = pair {
                                ctx.draw(&CanvasLine {
                                    x1: from.x,
                                    y1: flip(from.y),
                                    x2: to.x,
                                    y2: flip(to.y),
                                    color: pen(no_color, *color),
                                });
                            }
                        }
                    }
                }
            }
        });
    f.render_widget(canvas, area);
}

const fn pen(no_color: bool, color: crate::color::Rgb) -> ratatui::style::Color {
    if no_color {
        rgb(PANEL_TEXT_RGB)
    } else {
        color_of(color)
    }
}
