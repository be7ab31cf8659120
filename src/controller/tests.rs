use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tempfile::tempdir;

use super::{ControlInput, ControllerConfig, ControllerHandle, LoadPhase, ReplayController, ReplaySnapshot};
use crate::api::LoadRequest;
use crate::api::test_support::FakeReplayApi;
use crate::error::{AppError, AppResult};
use crate::export::{Downloads, ExportController, ExportKind, ExportSettings};
use crate::metrics::MetricsSeries;
use crate::playback::PlaybackState;
use crate::shutdown::{ShutdownSender, shutdown_channel};

const POLL_STEP: Duration = Duration::from_millis(1);
const POLL_LIMIT: u32 = 2_000;

fn run_paused_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn config(fps: &str) -> ControllerConfig {
    ControllerConfig {
        load_request: LoadRequest::new("/logs/run.ans"),
        playback_fps: fps.to_owned(),
        export: ExportSettings {
            range_start: 1,
            range_end: 0,
            fps_input: "2".to_owned(),
            font_size: 14,
            background_color: "#111111".to_owned(),
        },
        export_start: None,
        export_end: None,
        charts_dir: None,
    }
}

struct Running {
    handle: ControllerHandle,
    shutdown: ShutdownSender,
    task: tokio::task::JoinHandle<ReplaySnapshot>,
}

impl Running {
    fn send(&self, input: ControlInput) -> AppResult<()> {
        if self.handle.send(input) {
            Ok(())
        } else {
            Err(AppError::validation("Controller stopped before the input was sent"))
        }
    }

    async fn stop(self) -> AppResult<ReplaySnapshot> {
        drop(self.shutdown.send(()));
        Ok(self.task.await?)
    }
}

fn start(api: Arc<FakeReplayApi>, config: ControllerConfig, downloads: Downloads) -> Running {
    let exporter = ExportController::new(api.clone(), downloads);
    let (controller, handle) = ReplayController::new(api, exporter, config);
    let (shutdown, shutdown_rx) = shutdown_channel();
    let task = tokio::spawn(controller.run(shutdown_rx));
    Running {
        handle,
        shutdown,
        task,
    }
}

fn scratch_downloads() -> AppResult<(tempfile::TempDir, Downloads)> {
    let dir = tempdir()?;
    let downloads = Downloads::new(dir.path().join("downloads"), dir.path().join("staging"));
    Ok((dir, downloads))
}

async fn wait_until<P>(handle: &ControllerHandle, what: &str, mut predicate: P) -> AppResult<ReplaySnapshot>
where
    P: FnMut(&ReplaySnapshot) -> bool,
{
    for _ in 0..POLL_LIMIT {
        let snapshot = handle.snapshot();
        if predicate(&snapshot) {
            return Ok(snapshot);
        }
        tokio::time::sleep(POLL_STEP).await;
    }
    Err(AppError::validation(format!("Timed out waiting for {what}")))
}

fn shows_frame(snapshot: &ReplaySnapshot, frame: u32) -> bool {
    snapshot.view.as_ref().is_some_and(|view| view.frame == frame)
}

#[test]
fn playback_at_ten_fps_shows_four_frames_in_350ms() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(5));
        let running = start(api.clone(), config("10"), downloads);

        let loaded = wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;
        if loaded.state != PlaybackState::Paused || loaded.total_frames != 5 {
            return Err(AppError::validation("Expected paused session after load"));
        }

        running.send(ControlInput::Play)?;
        tokio::time::sleep(Duration::from_millis(350)).await;

        let fetched = api.fetched_frames();
        if fetched != vec![1, 2, 3, 4] {
            return Err(AppError::validation(format!("Unexpected frames {fetched:?}")));
        }
        let snapshot = running.stop().await?;
        if snapshot.state != PlaybackState::Playing {
            return Err(AppError::validation("Expected playback to still be running"));
        }
        Ok(())
    })
}

#[test]
fn playback_wraps_and_pause_stops_ticks() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(2));
        let running = start(api.clone(), config("1000"), downloads);
        wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;

        running.send(ControlInput::Play)?;
        // 1000 fps is bounded to one tick per 40ms.
        tokio::time::sleep(Duration::from_millis(130)).await;
        running.send(ControlInput::Pause)?;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let fetched = api.fetched_frames();
        if fetched != vec![1, 2, 1, 2] {
            return Err(AppError::validation(format!("Unexpected frames {fetched:?}")));
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        if api.fetched_frames().len() != 4 {
            return Err(AppError::validation("Ticks continued after pause"));
        }
        let snapshot = running.stop().await?;
        if snapshot.state != PlaybackState::Paused || snapshot.current_frame != Some(2) {
            return Err(AppError::validation("Pause must keep the current frame"));
        }
        Ok(())
    })
}

#[test]
fn invalid_rate_input_plays_at_default_rate() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(9));
        let running = start(api.clone(), config("-4"), downloads);
        wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;

        running.send(ControlInput::Play)?;
        tokio::time::sleep(Duration::from_millis(250)).await;
        let fetched = api.fetched_frames();
        if fetched != vec![1, 2, 3] {
            return Err(AppError::validation(format!("Unexpected frames {fetched:?}")));
        }
        running.stop().await?;
        Ok(())
    })
}

#[test]
fn playback_keeps_advancing_past_a_missing_frame() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(9).missing_frame(3));
        let running = start(api.clone(), config("10"), downloads);
        wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;

        running.send(ControlInput::Play)?;
        tokio::time::sleep(Duration::from_millis(250)).await;
        let during_gap = running.handle.snapshot();
        if during_gap.current_frame != Some(3) || !shows_frame(&during_gap, 2) {
            return Err(AppError::validation(
                "A missing frame must keep the previous view on screen",
            ));
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        let fetched = api.fetched_frames();
        if fetched != vec![1, 2, 3, 4, 5] {
            return Err(AppError::validation(format!("Unexpected frames {fetched:?}")));
        }
        let snapshot = running.stop().await?;
        if snapshot.state != PlaybackState::Playing || !shows_frame(&snapshot, 5) {
            return Err(AppError::validation("Playback must continue after a missing frame"));
        }
        Ok(())
    })
}

#[test]
fn rate_change_while_playing_applies_from_the_next_tick() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(9));
        let running = start(api.clone(), config("10"), downloads);
        wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;

        running.send(ControlInput::Play)?;
        tokio::time::sleep(Duration::from_millis(120)).await;
        running.send(ControlInput::SetPlaybackFps("20".to_owned()))?;
        // The tick armed at 10 fps lands at 200ms, later ones every 50ms.
        tokio::time::sleep(Duration::from_millis(240)).await;

        let fetched = api.fetched_frames();
        if fetched != vec![1, 2, 3, 4, 5, 6] {
            return Err(AppError::validation(format!("Unexpected frames {fetched:?}")));
        }
        let times = api.fetch_times();
        let gaps: Vec<Duration> = times
            .windows(2)
            .filter_map(|pair| match pair {
                [earlier, later] => Some(later.duration_since(*earlier)),
                _ => None,
            })
            .skip(1)
            .collect();
        let expected = vec![
            Duration::from_millis(100),
            Duration::from_millis(50),
            Duration::from_millis(50),
            Duration::from_millis(50),
        ];
        if gaps != expected {
            return Err(AppError::validation(format!("Unexpected tick gaps {gaps:?}")));
        }
        let snapshot = running.stop().await?;
        if snapshot.playback_fps != "20" {
            return Err(AppError::validation("Expected the new rate in the snapshot"));
        }
        Ok(())
    })
}

#[test]
fn navigation_pauses_and_clamps() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(5));
        let running = start(api.clone(), config("10"), downloads);
        wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;

        running.send(ControlInput::Play)?;
        running.send(ControlInput::Seek(99))?;
        let snapshot = wait_until(&running.handle, "last frame", |s| shows_frame(s, 5)).await?;
        if snapshot.state != PlaybackState::Paused || snapshot.current_frame != Some(5) {
            return Err(AppError::validation("Seek must pause and clamp"));
        }

        running.send(ControlInput::Step(-10))?;
        let snapshot = wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;
        if snapshot.current_frame != Some(1) {
            return Err(AppError::validation("Step must clamp at the first frame"));
        }

        tokio::time::sleep(Duration::from_millis(300)).await;
        if api.fetched_frames() != vec![1, 5, 1] {
            return Err(AppError::validation(format!(
                "Unexpected frames {:?}",
                api.fetched_frames()
            )));
        }
        running.stop().await?;
        Ok(())
    })
}

#[test]
fn reload_resets_to_first_frame_with_identical_results() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let metrics = MetricsSeries {
            burning_cells: vec![Some(1.0), Some(4.0), None],
            natural_burnouts: vec![Some(0.0), Some(0.0), Some(1.0)],
            extinguished_cumulative: vec![None, Some(2.0), Some(3.0)],
        };
        let api = Arc::new(FakeReplayApi::with_frames(3).metrics(metrics).agent_status(true));
        let running = start(api.clone(), config("10"), downloads);
        let first = wait_until(&running.handle, "first load", |s| shows_frame(s, 1)).await?;
        if !first.status.contains("agent status available") {
            return Err(AppError::validation(format!("Unexpected status {}", first.status)));
        }

        running.send(ControlInput::Step(2))?;
        wait_until(&running.handle, "frame 3", |s| shows_frame(s, 3)).await?;

        running.send(ControlInput::Reload)?;
        let second = wait_until(&running.handle, "second load", |s| {
            api.load_requests().len() == 2 && shows_frame(s, 1)
        })
        .await?;

        if second.current_frame != Some(1) || second.state != PlaybackState::Paused {
            return Err(AppError::validation("Reload must reset to frame 1"));
        }
        if second.total_frames != first.total_frames
            || second.metrics != first.metrics
            || second.export != first.export
        {
            return Err(AppError::validation("Reload must reproduce the first load"));
        }
        running.stop().await?;
        Ok(())
    })
}

#[test]
fn failed_load_stays_idle_and_reports_detail() -> AppResult<()> {
    run_paused_test(async {
        let (_dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(5).reject_load("File not found: run.ans"));
        let running = start(api.clone(), config("10"), downloads);
        let snapshot = wait_until(&running.handle, "load failure", |s| {
            matches!(s.load, LoadPhase::Failed(_))
        })
        .await?;
        if !snapshot.status.contains("File not found: run.ans") {
            return Err(AppError::validation(format!("Unexpected status {}", snapshot.status)));
        }

        running.send(ControlInput::Play)?;
        running.send(ControlInput::Step(1))?;
        tokio::time::sleep(Duration::from_millis(300)).await;
        let snapshot = running.stop().await?;
        if snapshot.state != PlaybackState::Idle || !api.fetched_frames().is_empty() {
            return Err(AppError::validation("Idle session must ignore navigation"));
        }
        Ok(())
    })
}

#[test]
fn export_range_marks_and_gif_export_complete() -> AppResult<()> {
    run_paused_test(async {
        let (dir, downloads) = scratch_downloads()?;
        let api = Arc::new(FakeReplayApi::with_frames(5));
        let running = start(api.clone(), config("10"), downloads);
        let loaded = wait_until(&running.handle, "first frame", |s| shows_frame(s, 1)).await?;
        if loaded.export.range_start != 1 || loaded.export.range_end != 5 {
            return Err(AppError::validation("Export range must default to the whole log"));
        }

        running.send(ControlInput::Step(1))?;
        running.send(ControlInput::MarkExportStart)?;
        running.send(ControlInput::Step(2))?;
        running.send(ControlInput::MarkExportEnd)?;
        running.send(ControlInput::NudgeExportFps(1.0))?;
        running.send(ControlInput::Export(ExportKind::Gif))?;

        let done = wait_until(&running.handle, "export", |s| {
            s.exports_in_flight == 0 && s.status.starts_with("Saved")
        })
        .await?;
        if done.export.range_start != 2 || done.export.range_end != 4 {
            return Err(AppError::validation("Unexpected marked range"));
        }
        let requests = api.export_requests();
        let request = requests
            .first()
            .ok_or_else(|| AppError::validation("Missing export request"))?;
        if request.range_start != 2 || request.range_end != 4 || request.fps != Some(3.0) {
            return Err(AppError::validation(format!("Unexpected request {request:?}")));
        }
        if !dir.path().join("downloads").join("wildfire_replay.gif").exists() {
            return Err(AppError::validation("Expected delivered GIF"));
        }
        running.stop().await?;
        Ok(())
    })
}
