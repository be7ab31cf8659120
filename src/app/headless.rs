use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::api::ReplayApi;
use crate::args::ReplayArgs;
use crate::charts::{render_table, tabulate, write_metric_charts};
use crate::error::AppResult;
use crate::export::ExportController;

use super::{downloads, export_settings, load_request};

/// Loads the log once, prints the metrics table to `out`, then writes the
/// requested charts and export without any terminal UI.
///
/// # Errors
///
/// Returns an error when loading fails, charts cannot be written or the
/// requested export fails.
pub async fn run_headless<W>(
    api: Arc<dyn ReplayApi>,
    args: &ReplayArgs,
    out: &mut W,
) -> AppResult<()>
where
    W: Write,
{
    let request = load_request(args);
    let log = api.load_log(&request).await?;
    info!(
        "Loaded {} frames from {}{}",
        log.total_frames,
        request.ans_path,
        if log.has_agent_status {
            " (agent status available)"
        } else {
            ""
        }
    );

    write!(
        out,
        "{}",
        render_table(&tabulate(&log.metrics, log.total_frames))
    )?;

    if let Some(dir) = args.charts_path.as_ref().map(PathBuf::from) {
        let metrics = log.metrics.clone();
        let written =
            tokio::task::spawn_blocking(move || write_metric_charts(&metrics, &dir)).await??;
        for path in written {
            writeln!(out, "Wrote chart {}", path.display())?;
        }
    }

    if let Some(kind) = args.export {
        let exporter = ExportController::new(api, downloads(args));
        let export_request = export_settings(args, log.total_frames).build_request(kind);
        let outcome = exporter
            .run(kind, &export_request, |status| info!("{}", status))
            .await?;
        writeln!(
            out,
            "Saved {} to {} ({} bytes)",
            kind.label(),
            outcome.path.display(),
            outcome.bytes
        )?;
        outcome.release_now().await;
    }

    out.flush()?;
    Ok(())
}
