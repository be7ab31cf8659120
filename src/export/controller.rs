use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::{ExportRequest, ReplayApi};
use crate::error::ExportError;
use crate::playback::parse_fps;

use super::download::{Downloads, RELEASE_GRACE, discard, release_after};
use super::kind::ExportKind;

/// Minimum number of new bytes between two progress reports.
const PROGRESS_STEP: u64 = 64 * 1024;

/// Export inputs as the user last set them. Nothing here is validated; the
/// backend decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub range_start: u32,
    pub range_end: u32,
    pub fps_input: String,
    pub font_size: u32,
    pub background_color: String,
}

impl ExportSettings {
    /// Builds the request for `kind`. Only GIF exports carry a frame rate,
    /// and an unusable rate is left out so the backend applies its default.
    #[must_use]
    pub fn build_request(&self, kind: ExportKind) -> ExportRequest {
        let fps = match kind {
            ExportKind::Gif => parse_fps(&self.fps_input),
            ExportKind::PngArchive => None,
        };
        ExportRequest {
            range_start: self.range_start,
            range_end: self.range_end,
            fps,
            font_size: self.font_size,
            background_color: self.background_color.clone(),
        }
    }
}

/// Progress of one export, as shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Started { kind: ExportKind },
    Receiving { kind: ExportKind, bytes: u64 },
    Saved { kind: ExportKind, path: PathBuf },
    Failed { kind: ExportKind, detail: String },
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { kind } => write!(f, "Exporting {}...", kind.label()),
            Self::Receiving { kind, bytes } => {
                write!(f, "Exporting {}... {} received", kind.label(), human_bytes(*bytes))
            }
            Self::Saved { kind, path } => write!(f, "Saved {} to {}", kind.label(), path.display()),
            Self::Failed { kind, detail } => write!(f, "{} export failed: {}", kind.label(), detail),
        }
    }
}

fn human_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KIB * KIB {
        format!("{:.1} MiB", value / (KIB * KIB))
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// A delivered export.
#[derive(Debug)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub bytes: u64,
    staged: PathBuf,
    release: JoinHandle<()>,
}

impl ExportOutcome {
    #[must_use]
    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    /// Releases the staged file immediately instead of waiting for the grace
    /// delay. Used when the process is about to exit.
    pub async fn release_now(self) {
        self.release.abort();
        discard(&self.staged).await;
    }
}

/// Performs exports against the backend and delivers the results.
#[derive(Clone)]
pub struct ExportController {
    api: Arc<dyn ReplayApi>,
    downloads: Downloads,
    grace: Duration,
}

impl fmt::Debug for ExportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportController")
            .field("downloads", &self.downloads)
            .field("grace", &self.grace)
            .finish_non_exhaustive()
    }
}

impl ExportController {
    #[must_use]
    pub fn new(api: Arc<dyn ReplayApi>, downloads: Downloads) -> Self {
        Self {
            api,
            downloads,
            grace: RELEASE_GRACE,
        }
    }

    #[must_use]
    pub const fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Runs one export to completion, reporting progress through `report`.
    ///
    /// Every outcome is reported, failures included, so callers that only
    /// display status can ignore the returned value.
    ///
    /// # Errors
    ///
    /// Returns the [`ExportError`] that was reported as `Failed`.
    pub async fn run<F>(
        &self,
        kind: ExportKind,
        request: &ExportRequest,
        mut report: F,
    ) -> Result<ExportOutcome, ExportError>
    where
        F: FnMut(ExportStatus) + Send,
    {
        info!(
            "Requesting {} export of frames {}..{}",
            kind.label(),
            request.range_start,
            request.range_end
        );
        report(ExportStatus::Started { kind });
        match self.perform(kind, request, &mut report).await {
            Ok(outcome) => {
                info!("Saved {} export to {}", kind.label(), outcome.path.display());
                report(ExportStatus::Saved {
                    kind,
                    path: outcome.path.clone(),
                });
                Ok(outcome)
            }
            Err(err) => {
                warn!("{} export failed: {}", kind.label(), err);
                report(ExportStatus::Failed {
                    kind,
                    detail: err.detail(),
                });
                Err(err)
            }
        }
    }

    async fn perform<F>(
        &self,
        kind: ExportKind,
        request: &ExportRequest,
        report: &mut F,
    ) -> Result<ExportOutcome, ExportError>
    where
        F: FnMut(ExportStatus) + Send,
    {
        let mut stream = match kind {
            ExportKind::Gif => self.api.export_gif(request).await?,
            ExportKind::PngArchive => self.api.export_png_archive(request).await?,
        };

        let mut staged = self.downloads.stage(kind).await?;
        let staged_path = staged.path().to_path_buf();
        let mut last_reported = 0_u64;

        let streamed = async {
            while let Some(chunk) = stream.next().await {
                staged.write_chunk(&chunk?).await?;
                if staged.bytes().saturating_sub(last_reported) >= PROGRESS_STEP {
                    last_reported = staged.bytes();
                    report(ExportStatus::Receiving {
                        kind,
                        bytes: last_reported,
                    });
                }
            }
            let bytes = staged.bytes();
            staged.finish().await.map(|path| (path, bytes))
        }
        .await;

        let delivered = match streamed {
            Ok((path, bytes)) => self
                .downloads
                .deliver(&path, kind)
                .await
                .map(|target| (target, bytes)),
            Err(err) => Err(err),
        };

        match delivered {
            Ok((path, bytes)) => Ok(ExportOutcome {
                path,
                bytes,
                release: release_after(staged_path.clone(), self.grace),
                staged: staged_path,
            }),
            Err(err) => {
                discard(&staged_path).await;
                Err(err)
            }
        }
    }
}
