use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{AppError, AppResult, ExportError, LoadError, ValidationError};

use super::detail::rejection;
use super::types::{ExportRequest, FramePayload, LoadRequest, LoadedLog};
use super::{ExportStream, ReplayApi};

const LOAD_ENDPOINT: &str = "api/load";
const FRAME_ENDPOINT: &str = "api/frame/";
const EXPORT_GIF_ENDPOINT: &str = "api/export/gif";
const EXPORT_PNG_ENDPOINT: &str = "api/export/pngzip";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for load and frame round trips. Exports stream for as long as
    /// the backend keeps rendering and are only bounded by `connect_timeout`.
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpReplayApi {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpReplayApi {
    /// Builds a client rooted at `base_url` (e.g. `http://127.0.0.1:8000`).
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, config: &ClientConfig) -> AppResult<Self> {
        let mut normalized = base_url.trim().to_owned();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|err| {
            AppError::validation(ValidationError::InvalidServerUrl {
                value: base_url.to_owned(),
                source: err,
            })
        })?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    async fn export(
        &self,
        endpoint: &str,
        request: &ExportRequest,
    ) -> Result<ExportStream, ExportError> {
        let url = self
            .endpoint(endpoint)
            .map_err(|err| ExportError::InvalidUrl {
                endpoint: endpoint.to_owned(),
                source: err,
            })?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| ExportError::Transport { source: err })?;
        if !response.status().is_success() {
            let (status, detail) = rejection(response).await;
            return Err(ExportError::Rejected { status, detail });
        }
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|err| ExportError::Stream { source: err }))
            .boxed())
    }
}

#[async_trait]
impl ReplayApi for HttpReplayApi {
    async fn load_log(&self, request: &LoadRequest) -> Result<LoadedLog, LoadError> {
        let url = self
            .endpoint(LOAD_ENDPOINT)
            .map_err(|err| LoadError::InvalidUrl {
                endpoint: LOAD_ENDPOINT.to_owned(),
                source: err,
            })?;
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|err| LoadError::Transport { source: err })?;
        if !response.status().is_success() {
            let (status, detail) = rejection(response).await;
            return Err(LoadError::Rejected { status, detail });
        }
        response
            .json::<LoadedLog>()
            .await
            .map_err(|err| LoadError::Decode { source: err })
    }

    async fn fetch_frame(&self, frame: u32) -> Option<FramePayload> {
        let path = format!("{FRAME_ENDPOINT}{frame}");
        let url = match self.endpoint(&path) {
            Ok(url) => url,
            Err(err) => {
                debug!("Frame {} skipped: invalid URL: {}", frame, err);
                return None;
            }
        };
        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("Frame {} skipped: {}", frame, err);
                return None;
            }
        };
        if !response.status().is_success() {
            debug!("Frame {} skipped: status {}", frame, response.status());
            return None;
        }
        match response.json::<FramePayload>().await {
            Ok(payload) => Some(payload),
            Err(err) => {
                debug!("Frame {} skipped: invalid body: {}", frame, err);
                None
            }
        }
    }

    async fn export_gif(&self, request: &ExportRequest) -> Result<ExportStream, ExportError> {
        self.export(EXPORT_GIF_ENDPOINT, request).await
    }

    async fn export_png_archive(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportStream, ExportError> {
        let body = ExportRequest {
            fps: None,
            ..request.clone()
        };
        self.export(EXPORT_PNG_ENDPOINT, &body).await
    }
}
