use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::charts::tabulate;
use crate::controller::{LoadPhase, ReplaySnapshot};
use crate::playback::PlaybackState;
use crate::ui::model::UiRenderData;
use crate::view::MarkupLine;

use super::theme::{
    ACCENT_ERROR_RGB, ACCENT_EXPORT_RGB, ACCENT_PAUSED_RGB, ACCENT_PLAYING_RGB, TABLE_CONTEXT_ROWS,
    muted_style, panel_block_style, panel_border_style, panel_title_style, rgb, run_style,
    style_color,
};

const KEY_HELP: &str = "space play/pause  \u{2190}/\u{2192} step  home/end seek  +/- fps  [/] export fps  s/e range  g gif  z png  r reload  q quit";

fn panel(title: &str, no_color: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(panel_block_style(no_color))
        .border_style(panel_border_style(no_color))
        .title_style(panel_title_style(no_color))
}

const fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "idle",
        PlaybackState::Paused => "paused",
        PlaybackState::Playing => "playing",
    }
}

pub(super) fn render_header<B: Backend>(f: &mut Frame<'_, B>, data: &UiRenderData, area: Rect) {
    let snapshot = &data.snapshot;
    let state_color = match snapshot.state {
        PlaybackState::Playing => ACCENT_PLAYING_RGB,
        PlaybackState::Paused | PlaybackState::Idle => ACCENT_PAUSED_RGB,
    };
    let line = Line::from(vec![
        Span::styled(
            snapshot.indicator(),
            style_color(data.no_color, rgb(state_color)).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            state_label(snapshot.state),
            style_color(data.no_color, rgb(state_color)),
        ),
        Span::raw(format!("  {} fps  ", snapshot.playback_fps)),
        Span::raw(
            snapshot
                .view
                .as_ref()
                .and_then(|view| view.readings.summary())
                .map_or_else(String::new, |summary| format!("{summary}  ")),
        ),
        Span::styled(
            format!("{} @ {}", snapshot.log_path, data.server),
            muted_style(data.no_color),
        ),
    ]);
    let title = format!("wildfire-replay v{}", env!("CARGO_PKG_VERSION"));
    f.render_widget(
        Paragraph::new(line).block(panel(&title, data.no_color)),
        area,
    );
}

pub(super) fn markup_lines(content: &[MarkupLine], no_color: bool) -> Vec<Line<'static>> {
    content
        .iter()
        .map(|runs| {
            Line::from(
                runs.iter()
                    .map(|run| Span::styled(run.text.clone(), run_style(no_color, &run.style)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

pub(super) fn render_frame_view<B: Backend>(
    f: &mut Frame<'_, B>,
    data: &UiRenderData,
    area: Rect,
) {
    let lines = data.snapshot.view.as_ref().map_or_else(
        || vec![Line::styled(load_message(&data.snapshot), muted_style(data.no_color))],
        |view| markup_lines(&view.content, data.no_color),
    );
    f.render_widget(
        Paragraph::new(lines).block(panel("Frame", data.no_color)),
        area,
    );
}

fn load_message(snapshot: &ReplaySnapshot) -> String {
    match &snapshot.load {
        LoadPhase::NotStarted => "No log loaded".to_owned(),
        LoadPhase::Loading => format!("Loading {}...", snapshot.log_path),
        LoadPhase::Ready => "Waiting for frame...".to_owned(),
        LoadPhase::Failed(detail) => format!("Load failed: {detail}"),
    }
}

pub(super) fn render_status_panel<B: Backend>(
    f: &mut Frame<'_, B>,
    data: &UiRenderData,
    area: Rect,
) {
    let mut lines = Vec::new();
    if let Some(view) = data.snapshot.view.as_ref() {
        lines.extend(view.status_lines.iter().map(|line| Line::from(line.clone())));
        if let Some(summary) = view.readings.summary() {
            lines.push(Line::styled(summary, muted_style(data.no_color)));
        }
    }
    if !data.snapshot.status.is_empty() {
        let style = if matches!(data.snapshot.load, LoadPhase::Failed(_)) {
            style_color(data.no_color, rgb(ACCENT_ERROR_RGB))
        } else {
            muted_style(data.no_color)
        };
        lines.push(Line::styled(data.snapshot.status.clone(), style));
    }
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Agent status", data.no_color)),
        area,
    );
}

pub(super) fn render_metrics_table<B: Backend>(
    f: &mut Frame<'_, B>,
    data: &UiRenderData,
    area: Rect,
) {
    let snapshot = &data.snapshot;
    let current = snapshot.current_frame.unwrap_or(1);
    let first = current.saturating_sub(TABLE_CONTEXT_ROWS).max(1);
    let last = current.saturating_add(TABLE_CONTEXT_ROWS);

    let mut lines = vec![Line::styled(
        format!("{:>6} {:>10} {:>10} {:>12}", "frame", "burning", "natural", "extinguished"),
        muted_style(data.no_color),
    )];
    for row in tabulate(&snapshot.metrics, snapshot.total_frames)
        .into_iter()
        .filter(|row| row.frame >= first && row.frame <= last)
    {
        let text = format!(
            "{:>6} {:>10} {:>10} {:>12}",
            row.frame, row.burning, row.natural, row.extinguished
        );
        if snapshot.current_frame == Some(row.frame) {
            lines.push(Line::styled(
                text,
                ratatui::style::Style::default().add_modifier(Modifier::BOLD),
            ));
        } else {
            lines.push(Line::from(text));
        }
    }
    f.render_widget(
        Paragraph::new(lines).block(panel("Metrics", data.no_color)),
        area,
    );
}

pub(super) fn render_export_panel<B: Backend>(
    f: &mut Frame<'_, B>,
    data: &UiRenderData,
    area: Rect,
) {
    let export = &data.snapshot.export;
    let mut lines = vec![
        Line::from(format!(
            "range {}..{}  fps {}",
            export.range_start, export.range_end, export.fps_input
        )),
    ];
    if data.snapshot.exports_in_flight > 0 {
        lines.push(Line::styled(
            format!("{} export(s) running", data.snapshot.exports_in_flight),
            style_color(data.no_color, rgb(ACCENT_EXPORT_RGB)),
        ));
    }
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Export", data.no_color)),
        area,
    );
}

pub(super) fn render_footer<B: Backend>(f: &mut Frame<'_, B>, data: &UiRenderData, area: Rect) {
    f.render_widget(
        Paragraph::new(Line::styled(KEY_HELP, muted_style(data.no_color))),
        area,
    );
}
