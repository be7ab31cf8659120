use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSeries;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRequest {
    pub ans_path: String,
    #[serde(rename = "index_jsonl")]
    pub index_path: Option<String>,
    #[serde(rename = "agent_status_path")]
    pub status_path: Option<String>,
}

impl LoadRequest {
    #[must_use]
    pub fn new(ans_path: impl Into<String>) -> Self {
        Self {
            ans_path: ans_path.into(),
            index_path: None,
            status_path: None,
        }
    }

    #[must_use]
    pub fn with_index_path(mut self, path: Option<String>) -> Self {
        self.index_path = path;
        self
    }

    #[must_use]
    pub fn with_status_path(mut self, path: Option<String>) -> Self {
        self.status_path = path;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoadedLog {
    #[serde(rename = "num_frames")]
    pub total_frames: u32,
    #[serde(default)]
    pub metrics: MetricsSeries,
    #[serde(default)]
    pub has_agent_status: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FramePayload {
    #[serde(default)]
    pub index: u32,
    #[serde(alias = "content")]
    pub html: String,
    #[serde(default)]
    pub agent_status: Vec<String>,
    #[serde(default)]
    pub burning: Option<f64>,
    #[serde(default)]
    pub natural: Option<f64>,
    #[serde(default)]
    pub ext: Option<f64>,
}

/// Export parameters as the user entered them. Nothing here is clamped or
/// validated; the backend decides what a valid range is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    #[serde(rename = "start")]
    pub range_start: u32,
    #[serde(rename = "end")]
    pub range_end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    pub font_size: u32,
    #[serde(rename = "bg_color")]
    pub background_color: String,
}
