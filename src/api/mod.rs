//! Data access layer for the replay backend.
//!
//! Four operations, each a single round trip: load a log, fetch one frame,
//! and export a frame range either as an animated GIF or as a ZIP archive of
//! PNG stills. [`ReplayApi`] is the seam the controller depends on;
//! [`HttpReplayApi`] is the reqwest-backed implementation.
mod client;
mod detail;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::error::{ExportError, LoadError};

pub use client::{ClientConfig, HttpReplayApi};
pub use detail::detail_from_body;
pub use types::{ExportRequest, FramePayload, LoadRequest, LoadedLog};

/// Binary export body, delivered chunk by chunk.
pub type ExportStream = BoxStream<'static, Result<Bytes, ExportError>>;

#[async_trait]
pub trait ReplayApi: Send + Sync + 'static {
    /// Loads a log on the backend and returns its frame count and metrics.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the request fails or the backend rejects it.
    async fn load_log(&self, request: &LoadRequest) -> Result<LoadedLog, LoadError>;

    /// Fetches the rendered content of one frame.
    ///
    /// Any failure yields `None`: the caller keeps the view it already has so
    /// that a transient error never interrupts playback.
    async fn fetch_frame(&self, frame: u32) -> Option<FramePayload>;

    /// Requests an animated GIF of the given range.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the request fails or the backend rejects it.
    async fn export_gif(&self, request: &ExportRequest) -> Result<ExportStream, ExportError>;

    /// Requests a ZIP archive of PNG stills for the given range.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when the request fails or the backend rejects it.
    async fn export_png_archive(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportStream, ExportError>;
}
