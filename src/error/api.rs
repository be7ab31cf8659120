use std::path::PathBuf;

use thiserror::Error;

/// Failure of the load round trip. `Rejected` carries the backend's detail
/// message verbatim so it can be shown as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Load request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid load response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid backend URL for '{endpoint}': {source}")]
    InvalidUrl {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Export request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("Export stream interrupted: {source}")]
    Stream {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid backend URL for '{endpoint}': {source}")]
    InvalidUrl {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to stage export '{path}': {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to save download '{path}': {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Human-readable detail suitable for the status line.
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

impl ExportError {
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }
}
