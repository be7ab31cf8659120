use tracing::debug;

use crate::api::{FramePayload, ReplayApi};

use super::markup::{MarkupLine, parse_frame_markup};

/// Status line shown when a frame carries no agent status.
pub const NO_AGENT_STATUS: &str = "no agent status";

/// Metric readings the backend reports alongside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReadings {
    pub burning: Option<f64>,
    pub natural: Option<f64>,
    pub extinguished: Option<f64>,
}

impl FrameReadings {
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.burning.is_none() && self.natural.is_none() && self.extinguished.is_none() {
            return None;
        }
        let show = |value: Option<f64>| value.map_or_else(|| "-".to_owned(), format_reading);
        Some(format!(
            "burning {} | natural {} | extinguished {}",
            show(self.burning),
            show(self.natural),
            show(self.extinguished)
        ))
    }
}

fn format_reading(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Everything shown for the frame currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub frame: u32,
    pub content: Vec<MarkupLine>,
    pub status_lines: Vec<String>,
    pub readings: FrameReadings,
}

impl FrameView {
    #[must_use]
    pub fn from_payload(frame: u32, payload: FramePayload) -> Self {
        let status_lines = if payload.agent_status.iter().all(|line| line.trim().is_empty()) {
            vec![NO_AGENT_STATUS.to_owned()]
        } else {
            payload.agent_status
        };
        Self {
            frame,
            content: parse_frame_markup(&payload.html),
            status_lines,
            readings: FrameReadings {
                burning: payload.burning,
                natural: payload.natural,
                extinguished: payload.ext,
            },
        }
    }

    #[must_use]
    pub fn indicator(&self, total_frames: u32) -> String {
        format!("Frame {} / {}", self.frame, total_frames)
    }
}

/// Fetches `frame` and builds its view. `None` means "keep what is shown".
pub async fn update_frame<A>(api: &A, frame: u32) -> Option<FrameView>
where
    A: ReplayApi + ?Sized,
{
    let payload = api.fetch_frame(frame).await?;
    if payload.index != 0 && payload.index != frame {
        debug!(
            "Backend answered frame {} for request {}; showing it as {}",
            payload.index, frame, frame
        );
    }
    Some(FrameView::from_payload(frame, payload))
}
