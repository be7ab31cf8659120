use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use reqwest::StatusCode;

use crate::api::detail_from_body;
use crate::args::{ReplayArgs, parsers::parse_duration_arg};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::AppResult;
use crate::view::{MarkupLine, parse_frame_markup};

thread_local! {
    static BASE_MATCHES: ArgMatches = ReplayArgs::command().get_matches_from(["wildfire-replay"]);
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

#[must_use]
pub fn frame_markup_input(input: &str) -> Vec<MarkupLine> {
    parse_frame_markup(input)
}

#[must_use]
pub fn error_detail_input(status: u16, body: &[u8]) -> String {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
    detail_from_body(status, body)
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<ReplayArgs> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<ReplayArgs> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(&config)
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<ReplayArgs> {
    BASE_MATCHES.with(|matches| {
        let mut args = ReplayArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)?;
        Ok(args)
    })
}
