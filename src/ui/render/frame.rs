use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::{Backend, Frame},
    widgets::Block,
};

use crate::ui::model::UiRenderData;

use super::charts::render_charts;
use super::panels::{
    render_export_panel, render_footer, render_frame_view, render_header, render_metrics_table,
    render_status_panel,
};
use super::theme::{
    CHART_HEIGHT, EXPORT_ROW, FOOTER_HEIGHT, HEADER_HEIGHT, SIDE_COL, STATUS_ROW, TABLE_ROW,
    UI_MARGIN, VIEW_COL, VIEW_MIN_HEIGHT, app_background_style,
};

pub fn draw_frame<B: Backend>(f: &mut Frame<'_, B>, data: &UiRenderData) {
    let size = f.size();
    f.render_widget(
        Block::default().style(app_background_style(data.no_color)),
        size,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(UI_MARGIN)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(VIEW_MIN_HEIGHT),
            Constraint::Length(CHART_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    let (header, body, charts, footer) = match rows.as_ref() {
        [a, b, c, d] => (*a, *b, *c, *d),
        _ => return,
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(VIEW_COL),
            Constraint::Percentage(SIDE_COL),
        ])
        .split(body);
    let (view_chunk, side_chunk) = match columns.as_ref() {
        [a, b] => (*a, *b),
        _ => return,
    };

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(STATUS_ROW),
            Constraint::Percentage(TABLE_ROW),
            Constraint::Percentage(EXPORT_ROW),
        ])
        .split(side_chunk);
    let (status_chunk, table_chunk, export_chunk) = match side.as_ref() {
        [a, b, c] => (*a, *b, *c),
        _ => return,
    };

    render_header(f, data, header);
    render_frame_view(f, data, view_chunk);
    render_status_panel(f, data, status_chunk);
    render_metrics_table(f, data, table_chunk);
    render_export_panel(f, data, export_chunk);
    render_charts(f, data, charts);
    render_footer(f, data, footer);
}
