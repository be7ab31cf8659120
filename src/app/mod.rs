//! Wiring between parsed arguments and the replay pipeline.
mod headless;
mod interactive;


use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ClientConfig, HttpReplayApi, LoadRequest, ReplayApi};
use crate::args::ReplayArgs;
use crate::controller::ControllerConfig;
use crate::error::AppResult;
use crate::export::{Downloads, ExportSettings};

pub use headless::run_headless;
pub use interactive::run_interactive;

/// Builds the HTTP backend client described by `args`.
///
/// # Errors
///
/// Returns an error when the server URL is invalid.
pub fn build_api(args: &ReplayArgs) -> AppResult<Arc<dyn ReplayApi>> {
    let config = ClientConfig {
        timeout: args.request_timeout,
        ..ClientConfig::default()
    };
    Ok(Arc::new(HttpReplayApi::new(&args.server, &config)?))
}

#[must_use]
pub fn load_request(args: &ReplayArgs) -> LoadRequest {
    LoadRequest::new(args.ans_path.clone().unwrap_or_default())
        .with_index_path(args.index_path.clone())
        .with_status_path(args.status_path.clone())
}

/// Export settings for a log of `total_frames`. Explicit range flags win.
#[must_use]
pub fn export_settings(args: &ReplayArgs, total_frames: u32) -> ExportSettings {
    ExportSettings {
        range_start: args.export_start.unwrap_or(1),
        range_end: args.export_end.unwrap_or(total_frames),
        fps_input: args.export_fps.clone(),
        font_size: args.font_size,
        background_color: args.bg_color.clone(),
    }
}

#[must_use]
pub fn downloads(args: &ReplayArgs) -> Downloads {
    Downloads::new(&args.download_dir, &args.tmp_path)
}

/// Controller setup before anything is loaded; the export range end is
/// filled in from the frame count once loading succeeds.
#[must_use]
pub fn controller_config(args: &ReplayArgs) -> ControllerConfig {
    ControllerConfig {
        load_request: load_request(args),
        playback_fps: args.fps.clone(),
        export: export_settings(args, 0),
        export_start: args.export_start,
        export_end: args.export_end,
        charts_dir: args.charts_path.as_ref().map(PathBuf::from),
    }
}
