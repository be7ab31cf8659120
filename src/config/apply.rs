use clap::parser::ValueSource;
use clap::{ArgMatches, ValueEnum};

use crate::args::ReplayArgs;
use crate::error::{AppError, AppResult, ConfigError};
use crate::export::ExportKind;

use super::types::ConfigFile;

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn apply_string(
    matches: &ArgMatches,
    name: &str,
    target: &mut String,
    value: Option<&String>,
) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        target.clone_from(value);
    }
}

fn apply_optional(
    matches: &ArgMatches,
    name: &str,
    target: &mut Option<String>,
    value: Option<&String>,
) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        *target = Some(value.clone());
    }
}

/// Applies configuration values to CLI arguments.
///
/// Options given on the command line always win; environment and default
/// values are overridden by the file.
///
/// # Errors
///
/// Returns an error when a config value cannot be converted.
pub fn apply_config(
    args: &mut ReplayArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    apply_string(matches, "server", &mut args.server, config.server.as_ref());
    apply_optional(matches, "ans_path", &mut args.ans_path, config.ans_path.as_ref());
    apply_optional(
        matches,
        "index_path",
        &mut args.index_path,
        config.index_path.as_ref(),
    );
    apply_optional(
        matches,
        "status_path",
        &mut args.status_path,
        config.status_path.as_ref(),
    );

    if !is_cli(matches, "fps")
        && let Some(fps) = config.fps.as_ref()
    {
        args.fps = fps.to_input();
    }

    if !is_cli(matches, "export_fps")
        && let Some(fps) = config.export_fps.as_ref()
    {
        args.export_fps = fps.to_input();
    }

    if !is_cli(matches, "export_start")
        && let Some(start) = config.export_start
    {
        args.export_start = Some(start);
    }

    if !is_cli(matches, "export_end")
        && let Some(end) = config.export_end
    {
        args.export_end = Some(end);
    }

    if !is_cli(matches, "font_size")
        && let Some(font_size) = config.font_size
    {
        args.font_size = font_size;
    }

    apply_string(matches, "bg_color", &mut args.bg_color, config.bg_color.as_ref());
    apply_string(
        matches,
        "download_dir",
        &mut args.download_dir,
        config.download_dir.as_ref(),
    );
    apply_string(matches, "tmp_path", &mut args.tmp_path, config.tmp_path.as_ref());
    apply_optional(
        matches,
        "charts_path",
        &mut args.charts_path,
        config.charts_path.as_ref(),
    );

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration("timeout")?;
    }

    if !is_cli(matches, "export")
        && let Some(export) = config.export.as_deref()
    {
        let kind = ExportKind::from_str(export, true).map_err(|_err| {
            AppError::config(ConfigError::InvalidExportFormat {
                value: export.to_owned(),
            })
        })?;
        args.export = Some(kind);
    }

    if !is_cli(matches, "no_ui")
        && let Some(no_ui) = config.no_ui
    {
        args.no_ui = no_ui;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}
