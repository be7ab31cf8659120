use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Config files picked up from the working directory, in priority order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["wildfire-replay.toml", "wildfire-replay.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn parse(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            }),
            Self::Json => serde_json::from_str(content).map_err(|source| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// First default config file present in the working directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Loads `--config` when given, otherwise the first default config file.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let Some(path) = path.map(PathBuf::from).or_else(default_config_path) else {
        return Ok(None);
    };
    load_config_file(&path).map(Some)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::of(path).map_err(AppError::config)?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;
    format.parse(path, &content).map_err(AppError::config)
}
