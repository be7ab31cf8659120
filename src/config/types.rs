use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_arg;
use crate::error::{AppError, AppResult, ConfigError};
use crate::playback::PlaybackRate;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "server_url")]
    pub server: Option<String>,
    pub ans_path: Option<String>,
    #[serde(alias = "index_jsonl")]
    pub index_path: Option<String>,
    #[serde(alias = "agent_status_path")]
    pub status_path: Option<String>,
    pub fps: Option<RateValue>,
    pub export_fps: Option<RateValue>,
    pub export_start: Option<u32>,
    pub export_end: Option<u32>,
    pub font_size: Option<u32>,
    pub bg_color: Option<String>,
    pub download_dir: Option<String>,
    pub tmp_path: Option<String>,
    pub charts_path: Option<String>,
    pub timeout: Option<DurationValue>,
    pub export: Option<String>,
    pub no_ui: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// A frame rate written either as a number or as text.
///
/// Text is kept verbatim; unusable rates fall back at playback time rather
/// than failing the config.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    pub(crate) fn to_input(&self) -> String {
        match self {
            Self::Number(fps) => PlaybackRate::format_input(*fps),
            Self::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> AppResult<Duration> {
        match self {
            Self::Seconds(0) => Err(AppError::config(ConfigError::InvalidDuration {
                field,
                message: "Duration must be > 0.".to_owned(),
            })),
            Self::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            Self::Text(text) => parse_duration_arg(text).map_err(|err| {
                AppError::config(ConfigError::InvalidDuration {
                    field,
                    message: err.to_string(),
                })
            }),
        }
    }
}
