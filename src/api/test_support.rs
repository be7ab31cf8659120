use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;

use super::{ExportRequest, ExportStream, FramePayload, LoadRequest, LoadedLog, ReplayApi};
use crate::error::{ExportError, LoadError};
use crate::metrics::MetricsSeries;

/// In-memory backend that records every call it receives.
#[derive(Debug, Default)]
pub(crate) struct FakeReplayApi {
    total_frames: u32,
    metrics: MetricsSeries,
    has_agent_status: bool,
    load_rejection: Option<String>,
    missing_frames: Vec<u32>,
    export_chunks: Vec<Vec<u8>>,
    export_rejection: Option<String>,
    loads: Mutex<Vec<LoadRequest>>,
    fetched: Mutex<Vec<u32>>,
    fetch_times: Mutex<Vec<tokio::time::Instant>>,
    exports: Mutex<Vec<ExportRequest>>,
}

impl FakeReplayApi {
    pub(crate) fn with_frames(total_frames: u32) -> Self {
        Self {
            total_frames,
            export_chunks: vec![b"GIF89a".to_vec(), b"frames".to_vec()],
            ..Self::default()
        }
    }

    pub(crate) fn metrics(mut self, metrics: MetricsSeries) -> Self {
        self.metrics = metrics;
        self
    }

    pub(crate) const fn agent_status(mut self, available: bool) -> Self {
        self.has_agent_status = available;
        self
    }

    pub(crate) fn reject_load(mut self, detail: &str) -> Self {
        self.load_rejection = Some(detail.to_owned());
        self
    }

    pub(crate) fn missing_frame(mut self, frame: u32) -> Self {
        self.missing_frames.push(frame);
        self
    }

    pub(crate) fn export_chunks(mut self, chunks: Vec<Vec<u8>>) -> Self {
        self.export_chunks = chunks;
        self
    }

    pub(crate) fn reject_export(mut self, detail: &str) -> Self {
        self.export_rejection = Some(detail.to_owned());
        self
    }

    pub(crate) fn load_requests(&self) -> Vec<LoadRequest> {
        self.loads
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub(crate) fn fetched_frames(&self) -> Vec<u32> {
        self.fetched
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Clock reading at each frame fetch, in call order.
    pub(crate) fn fetch_times(&self) -> Vec<tokio::time::Instant> {
        self.fetch_times
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub(crate) fn export_requests(&self) -> Vec<ExportRequest> {
        self.exports
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn record_export(&self, request: &ExportRequest) -> Result<ExportStream, ExportError> {
        if let Ok(mut guard) = self.exports.lock() {
            guard.push(request.clone());
        }
        if let Some(detail) = self.export_rejection.clone() {
            return Err(ExportError::Rejected {
                status: 400,
                detail,
            });
        }
        let chunks: Vec<Result<Bytes, ExportError>> = self
            .export_chunks
            .iter()
            .map(|chunk| Ok(Bytes::from(chunk.clone())))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }
}

#[async_trait]
impl ReplayApi for FakeReplayApi {
    async fn load_log(&self, request: &LoadRequest) -> Result<LoadedLog, LoadError> {
        if let Ok(mut guard) = self.loads.lock() {
            guard.push(request.clone());
        }
        if let Some(detail) = self.load_rejection.clone() {
            return Err(LoadError::Rejected {
                status: 400,
                detail,
            });
        }
        Ok(LoadedLog {
            total_frames: self.total_frames,
            metrics: self.metrics.clone(),
            has_agent_status: self.has_agent_status,
        })
    }

    async fn fetch_frame(&self, frame: u32) -> Option<FramePayload> {
        if let Ok(mut guard) = self.fetched.lock() {
            guard.push(frame);
        }
        if let Ok(mut guard) = self.fetch_times.lock() {
            guard.push(tokio::time::Instant::now());
        }
        if frame == 0 || frame > self.total_frames || self.missing_frames.contains(&frame) {
            return None;
        }
        Some(FramePayload {
            index: frame,
            html: format!("<span style=\"color:#ff4d4d\">frame {frame}</span>"),
            agent_status: Vec::new(),
            burning: None,
            natural: None,
            ext: None,
        })
    }

    async fn export_gif(&self, request: &ExportRequest) -> Result<ExportStream, ExportError> {
        self.record_export(request)
    }

    async fn export_png_archive(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportStream, ExportError> {
        let mut request = request.clone();
        request.fps = None;
        self.record_export(&request)
    }
}
