use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ExportError;

use super::kind::ExportKind;

/// How long a staged export is kept after delivery.
pub const RELEASE_GRACE: Duration = Duration::from_secs(10);

/// Extension of files still owned by the staging directory.
const STAGED_EXTENSION: &str = "part";

static STAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Where exports are staged while streaming and where they end up.
#[derive(Debug, Clone)]
pub struct Downloads {
    download_dir: PathBuf,
    staging_dir: PathBuf,
}

/// An export body being written to the staging directory.
#[derive(Debug)]
pub struct StagedExport {
    path: PathBuf,
    file: fs::File,
    bytes: u64,
}

impl StagedExport {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Appends one chunk of the body.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Stage`] when the write fails.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), ExportError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|err| ExportError::Stage {
                path: self.path.clone(),
                source: err,
            })?;
        self.bytes = self
            .bytes
            .saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        Ok(())
    }

    /// Flushes and closes the staged file, returning its path.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Stage`] when the flush fails.
    pub async fn finish(mut self) -> Result<PathBuf, ExportError> {
        let path = self.path;
        self.file
            .flush()
            .await
            .map_err(|err| ExportError::Stage {
                path: path.clone(),
                source: err,
            })?;
        Ok(path)
    }
}

impl Downloads {
    #[must_use]
    pub fn new(download_dir: impl Into<PathBuf>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            staging_dir: staging_dir.into(),
        }
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Final location of an export of `kind`.
    #[must_use]
    pub fn target_path(&self, kind: ExportKind) -> PathBuf {
        self.download_dir.join(kind.file_name())
    }

    /// Creates a fresh staged file for an export of `kind`, sweeping stale
    /// staged files first.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Stage`] when the staging directory or file
    /// cannot be created.
    pub async fn stage(&self, kind: ExportKind) -> Result<StagedExport, ExportError> {
        fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|err| ExportError::Stage {
                path: self.staging_dir.clone(),
                source: err,
            })?;
        self.sweep_stale(RELEASE_GRACE).await;
        let sequence = STAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let path = self.staging_dir.join(format!(
            "{}-{}-{}-{}.{}",
            stamp,
            std::process::id(),
            sequence,
            kind.stage_tag(),
            STAGED_EXTENSION
        ));
        let file = fs::File::create(&path)
            .await
            .map_err(|err| ExportError::Stage {
                path: path.clone(),
                source: err,
            })?;
        Ok(StagedExport {
            path,
            file,
            bytes: 0,
        })
    }

    /// Removes staged files nobody has written to for `older_than`.
    ///
    /// A release timer dies with the process, so exports interrupted by an
    /// exit leave their staged file behind until the next sweep. Returns how
    /// many files were removed.
    pub async fn sweep_stale(&self, older_than: Duration) -> usize {
        let Ok(mut entries) = fs::read_dir(&self.staging_dir).await else {
            return 0;
        };
        let mut removed = 0_usize;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(STAGED_EXTENSION) {
                continue;
            }
            let stale = entry
                .metadata()
                .await
                .ok()
                .and_then(|meta| meta.modified().ok())
                .and_then(|modified| modified.elapsed().ok())
                .is_some_and(|age| age >= older_than);
            if stale {
                discard(&path).await;
                removed = removed.saturating_add(1);
            }
        }
        if removed > 0 {
            debug!(
                "Swept {} stale staged exports from {}",
                removed,
                self.staging_dir.display()
            );
        }
        removed
    }

    /// Copies a finished staged file to its fixed download name.
    ///
    /// The staged file itself stays in place until it is released. A failed
    /// copy leaves nothing behind in the download directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Save`] when the copy fails.
    pub async fn deliver(&self, staged: &Path, kind: ExportKind) -> Result<PathBuf, ExportError> {
        let target = self.target_path(kind);
        let result = async {
            fs::create_dir_all(&self.download_dir).await?;
            fs::copy(staged, &target).await
        }
        .await;
        if let Err(err) = result {
            discard(&target).await;
            return Err(ExportError::Save {
                path: target,
                source: err,
            });
        }
        Ok(target)
    }
}

/// Removes `path` after `grace`, regardless of what happened to it since.
pub fn release_after(path: PathBuf, grace: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        discard(&path).await;
    })
}

/// Removes `path` now. A file that is already gone is not an error.
pub async fn discard(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Released staged export {}", path.display()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!("Failed to release {}: {}", path.display(), err),
    }
}
