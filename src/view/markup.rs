//! Decoder for the backend's frame markup.
//!
//! Frames arrive as `<span style="...">text</span>` runs with lines joined by
//! `<br/>`. Only the inline `color`, `background-color` and `font-weight`
//! declarations are understood; other tags are dropped and their text kept.

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

pub type MarkupLine = Vec<StyledRun>;

/// Decodes frame markup into styled lines. Never fails: malformed markup
/// degrades to literal text.
#[must_use]
pub fn parse_frame_markup(markup: &str) -> Vec<MarkupLine> {
    let mut builder = LineBuilder::default();
    let mut rest = markup;

    while let Some((text, after)) = rest.split_once('<') {
        builder.push_text(text);
        match after.split_once('>') {
            Some((tag, tail)) => {
                builder.handle_tag(tag);
                rest = tail;
            }
            None => {
                builder.push_text("<");
                rest = after;
            }
        }
    }
    builder.push_text(rest);
    builder.finish()
}

#[derive(Debug, Default)]
struct LineBuilder {
    lines: Vec<MarkupLine>,
    current: MarkupLine,
    styles: Vec<RunStyle>,
}

impl LineBuilder {
    fn style(&self) -> RunStyle {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);
        let style = self.style();
        let mut segments = decoded.split('\n');
        if let Some(first) = segments.next() {
            self.push_run(first, style);
        }
        for segment in segments {
            self.break_line();
            self.push_run(segment, style);
        }
    }

    fn push_run(&mut self, text: &str, style: RunStyle) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.current.last_mut().filter(|last| last.style == style) {
            last.text.push_str(text);
            return;
        }
        self.current.push(StyledRun {
            text: text.to_owned(),
            style,
        });
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
    }

    fn handle_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if let Some(closing) = tag.strip_prefix('/') {
            if tag_name(closing) == "span" {
                self.styles.pop();
            }
            return;
        }
        match tag_name(tag).as_str() {
            "br" => self.break_line(),
            "span" => {
                let style = style_attribute(tag)
                    .map_or_else(|| self.style(), |decls| apply_declarations(self.style(), decls));
                self.styles.push(style);
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<MarkupLine> {
        if !self.current.is_empty() || !self.lines.is_empty() {
            self.break_line();
        }
        self.lines
    }
}

fn tag_name(tag: &str) -> String {
    tag.chars()
        .take_while(|ch| ch.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn style_attribute(tag: &str) -> Option<&str> {
    let (_, after) = tag.split_once("style=")?;
    let quote = after.chars().next().filter(|ch| *ch == '"' || *ch == '\'')?;
    let (value, _) = after.get(1..)?.split_once(quote)?;
    Some(value)
}

fn apply_declarations(mut style: RunStyle, declarations: &str) -> RunStyle {
    for declaration in declarations.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match property.trim().to_ascii_lowercase().as_str() {
            "color" => style.fg = Rgb::from_hex(value).or(style.fg),
            "background-color" | "background" => style.bg = Rgb::from_hex(value).or(style.bg),
            "font-weight" => {
                style.bold = value.eq_ignore_ascii_case("bold")
                    || value.parse::<u16>().is_ok_and(|weight| weight >= 600);
            }
            _ => {}
        }
    }
    style
}

/// Decodes HTML character references. Unknown entities are left as written.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    // Empty lines are padded with a non-breaking space; a plain space keeps
    // terminal cells aligned.
    html_escape::decode_html_entities(text).replace('\u{a0}', " ")
}
