use ratatui::style::{Color, Modifier, Style};

use crate::color::Rgb;
use crate::view::RunStyle;

pub(super) const UI_MARGIN: u16 = 1;
pub(super) const HEADER_HEIGHT: u16 = 3;
pub(super) const FOOTER_HEIGHT: u16 = 1;
pub(super) const VIEW_MIN_HEIGHT: u16 = 8;
pub(super) const CHART_HEIGHT: u16 = 10;
pub(super) const VIEW_COL: u16 = 60;
pub(super) const SIDE_COL: u16 = 40;
pub(super) const STATUS_ROW: u16 = 40;
pub(super) const TABLE_ROW: u16 = 35;
pub(super) const EXPORT_ROW: u16 = 25;
/// Rows shown on each side of the current frame in the metrics table.
pub(super) const TABLE_CONTEXT_ROWS: u32 = 3;
pub(super) const CHART_BG_RGB: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub(super) const PANEL_BORDER_RGB: (u8, u8, u8) = (0xe5, 0xe7, 0xeb);
pub(super) const PANEL_TEXT_RGB: (u8, u8, u8) = (0xff, 0xff, 0xff);
pub(super) const PANEL_MUTED_RGB: (u8, u8, u8) = (0xd1, 0xd5, 0xdb);
pub(super) const ACCENT_PLAYING_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const ACCENT_PAUSED_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const ACCENT_ERROR_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);
pub(super) const ACCENT_EXPORT_RGB: (u8, u8, u8) = (0xa7, 0x8b, 0xfa);

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) const fn color_of(value: Rgb) -> Color {
    Color::Rgb(value.0, value.1, value.2)
}

/// Style for a run of frame markup. Without colour only boldness survives.
pub(super) fn run_style(no_color: bool, style: &RunStyle) -> Style {
    let mut out = Style::default();
    if !no_color {
        if let Some(fg) = style.fg {
            out = out.fg(color_of(fg));
        }
        if let Some(bg) = style.bg {
            out = out.bg(color_of(bg));
        }
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    out
}

pub(super) fn panel_block_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default()
            .bg(rgb(CHART_BG_RGB))
            .fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn panel_border_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(rgb(PANEL_BORDER_RGB))
    }
}

pub(super) fn panel_title_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn muted_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_MUTED_RGB))
}

pub(super) fn app_background_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().bg(rgb(CHART_BG_RGB))
    }
}
