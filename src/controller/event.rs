use crate::api::LoadedLog;
use crate::error::LoadError;
use crate::export::{ExportKind, ExportStatus};
use crate::playback::TickId;
use crate::view::FrameView;

/// Requests the controller accepts from the outside.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlInput {
    TogglePlay,
    Play,
    Pause,
    /// Move by this many frames, without wrapping.
    Step(i64),
    /// Jump to this 1-based frame (clamped).
    Seek(i64),
    SeekLast,
    SetPlaybackFps(String),
    NudgePlaybackFps(f64),
    SetExportFps(String),
    NudgeExportFps(f64),
    MarkExportStart,
    MarkExportEnd,
    Export(ExportKind),
    Reload,
}

#[derive(Debug)]
pub(super) enum ControllerEvent {
    Input(ControlInput),
    LoadFinished {
        generation: u64,
        result: Result<LoadedLog, LoadError>,
    },
    FrameFetched {
        view: Option<FrameView>,
        /// Play epoch of the tick that requested the frame, if any.
        tick_epoch: Option<u64>,
    },
    Tick(TickId),
    Export(ExportStatus),
    ChartsWritten(Result<usize, String>),
}
