use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::ControlInput;
use crate::export::ExportKind;

/// Frames skipped by PageUp/PageDown.
const PAGE_FRAMES: i64 = 10;
const FPS_STEP: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Control(ControlInput),
    Quit,
}

/// Maps a key press to the action it triggers, if any.
#[must_use]
pub fn resolve_key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return Some(KeyAction::Quit);
    }
    resolve_control(key.code).map(KeyAction::Control)
}

fn resolve_control(code: KeyCode) -> Option<ControlInput> {
    if matches!(code, KeyCode::Char(' ')) {
        return Some(ControlInput::TogglePlay);
    }
    if matches!(code, KeyCode::Char('p')) {
        return Some(ControlInput::Play);
    }
    if matches!(code, KeyCode::Char('P')) {
        return Some(ControlInput::Pause);
    }
    if matches!(code, KeyCode::Left | KeyCode::Char('h')) {
        return Some(ControlInput::Step(-1));
    }
    if matches!(code, KeyCode::Right | KeyCode::Char('l')) {
        return Some(ControlInput::Step(1));
    }
    if matches!(code, KeyCode::PageUp) {
        return Some(ControlInput::Step(-PAGE_FRAMES));
    }
    if matches!(code, KeyCode::PageDown) {
        return Some(ControlInput::Step(PAGE_FRAMES));
    }
    if matches!(code, KeyCode::Home) {
        return Some(ControlInput::Seek(1));
    }
    if matches!(code, KeyCode::End) {
        return Some(ControlInput::SeekLast);
    }
    if matches!(code, KeyCode::Char('+' | '=')) {
        return Some(ControlInput::NudgePlaybackFps(FPS_STEP));
    }
    if matches!(code, KeyCode::Char('-')) {
        return Some(ControlInput::NudgePlaybackFps(-FPS_STEP));
    }
    if matches!(code, KeyCode::Char(']')) {
        return Some(ControlInput::NudgeExportFps(FPS_STEP));
    }
    if matches!(code, KeyCode::Char('[')) {
        return Some(ControlInput::NudgeExportFps(-FPS_STEP));
    }
    if matches!(code, KeyCode::Char('s')) {
        return Some(ControlInput::MarkExportStart);
    }
    if matches!(code, KeyCode::Char('e')) {
        return Some(ControlInput::MarkExportEnd);
    }
    if matches!(code, KeyCode::Char('g')) {
        return Some(ControlInput::Export(ExportKind::Gif));
    }
    if matches!(code, KeyCode::Char('z')) {
        return Some(ControlInput::Export(ExportKind::PngArchive));
    }
    if matches!(code, KeyCode::Char('r')) {
        return Some(ControlInput::Reload);
    }
    None
}
