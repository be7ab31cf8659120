use clap::Parser;
use std::time::Duration;

use crate::export::ExportKind;

use super::defaults::{DEFAULT_SERVER_URL, default_tmp_path};
use super::parsers::{parse_bool_env, parse_duration_arg};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Terminal controller for replaying recorded wildfire simulation logs served by a webviz backend, with GIF and PNG archive export."
)]
pub struct ReplayArgs {
    /// Base URL of the webviz backend
    #[arg(long, short = 's', default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Path of the recorded ANSI log, as seen by the backend
    #[arg(long = "ans-path", short = 'a')]
    pub ans_path: Option<String>,

    /// Optional frame index (JSONL) for the log
    #[arg(long = "index-path")]
    pub index_path: Option<String>,

    /// Optional per-frame agent status file
    #[arg(long = "status-path")]
    pub status_path: Option<String>,

    /// Playback rate in frames per second (invalid values fall back to 10)
    #[arg(long, default_value = "10")]
    pub fps: String,

    /// Frame rate of exported GIFs
    #[arg(long = "export-fps", default_value = "2")]
    pub export_fps: String,

    /// First frame of the export range (defaults to 1)
    #[arg(long = "export-start")]
    pub export_start: Option<u32>,

    /// Last frame of the export range (defaults to the last frame)
    #[arg(long = "export-end")]
    pub export_end: Option<u32>,

    /// Font size used by the backend when rasterizing frames
    #[arg(long = "font-size", default_value_t = 14)]
    pub font_size: u32,

    /// Background colour used by the backend when rasterizing frames
    #[arg(long = "bg-color", default_value = "#111111")]
    pub bg_color: String,

    /// Directory exported files are saved into
    #[arg(long = "download-dir", default_value = ".")]
    pub download_dir: String,

    /// Staging directory for in-flight exports
    #[arg(long = "tmp-path", default_value_t = default_tmp_path())]
    pub tmp_path: String,

    /// Write metric charts as PNG files into this directory after load
    #[arg(long = "charts-path")]
    pub charts_path: Option<String>,

    /// Timeout for load and frame requests (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Export this media after loading (headless runs exit afterwards)
    #[arg(long, value_enum)]
    pub export: Option<ExportKind>,

    /// Run without the terminal UI
    #[arg(long = "no-ui", alias = "no-tui")]
    pub no_ui: bool,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
