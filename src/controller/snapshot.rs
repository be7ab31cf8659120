use std::sync::Arc;

use crate::export::ExportSettings;
use crate::metrics::MetricsSeries;
use crate::playback::PlaybackState;
use crate::view::FrameView;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    NotStarted,
    Loading,
    Ready,
    Failed(String),
}

/// Read-only view of the controller state, published after every event.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySnapshot {
    pub state: PlaybackState,
    pub total_frames: u32,
    pub current_frame: Option<u32>,
    pub load: LoadPhase,
    pub has_agent_status: bool,
    pub status: String,
    pub view: Option<FrameView>,
    pub metrics: Arc<MetricsSeries>,
    pub playback_fps: String,
    pub export: ExportSettings,
    pub exports_in_flight: usize,
    pub log_path: String,
}

impl ReplaySnapshot {
    /// State before any log has been loaded.
    #[must_use]
    pub fn idle(log_path: String, playback_fps: String, export: ExportSettings) -> Self {
        Self {
            state: PlaybackState::Idle,
            total_frames: 0,
            current_frame: None,
            load: LoadPhase::NotStarted,
            has_agent_status: false,
            status: String::new(),
            view: None,
            metrics: Arc::new(MetricsSeries::default()),
            playback_fps,
            export,
            exports_in_flight: 0,
            log_path,
        }
    }

    /// Frame indicator for the view currently shown, e.g. `Frame 3 / 9`.
    #[must_use]
    pub fn indicator(&self) -> String {
        self.view.as_ref().map_or_else(
            || {
                self.current_frame.map_or_else(
                    || "No log loaded".to_owned(),
                    |frame| format!("Frame {} / {}", frame, self.total_frames),
                )
            },
            |view| view.indicator(self.total_frames),
        )
    }
}
