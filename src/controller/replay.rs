use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::api::{LoadRequest, LoadedLog, ReplayApi};
use crate::charts::write_metric_charts;
use crate::error::LoadError;
use crate::export::{ExportController, ExportKind, ExportSettings, ExportStatus};
use crate::metrics::MetricsSeries;
use crate::playback::{
    DEFAULT_PLAYBACK_FPS, PlaybackRate, ReplaySession, TickId, TickScheduler, parse_fps,
};
use crate::shutdown::ShutdownReceiver;
use crate::view::{FrameView, update_frame};

use super::event::{ControlInput, ControllerEvent};
use super::snapshot::{LoadPhase, ReplaySnapshot};

/// Export frame rate used when the rate input cannot be parsed.
const DEFAULT_EXPORT_FPS: f64 = 2.0;
const MIN_EXPORT_FPS: f64 = 1.0;

/// Startup settings for a [`ReplayController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub load_request: LoadRequest,
    pub playback_fps: String,
    pub export: ExportSettings,
    /// Export range bounds that survive reloads; unset bounds default to the
    /// whole log.
    pub export_start: Option<u32>,
    pub export_end: Option<u32>,
    pub charts_dir: Option<PathBuf>,
}

/// Cloneable front door to a running controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    events: mpsc::UnboundedSender<ControllerEvent>,
    snapshots: watch::Receiver<ReplaySnapshot>,
}

impl ControllerHandle {
    /// Queues `input`. Returns `false` once the controller has stopped.
    #[must_use]
    pub fn send(&self, input: ControlInput) -> bool {
        self.events.send(ControllerEvent::Input(input)).is_ok()
    }

    #[must_use]
    pub fn snapshot(&self) -> ReplaySnapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ReplaySnapshot> {
        self.snapshots.clone()
    }
}

pub struct ReplayController {
    api: Arc<dyn ReplayApi>,
    exporter: ExportController,
    config: ControllerConfig,
    session: ReplaySession,
    scheduler: TickScheduler,
    rate: PlaybackRate,
    export: ExportSettings,
    metrics: Arc<MetricsSeries>,
    view: Option<FrameView>,
    load: LoadPhase,
    has_agent_status: bool,
    status: String,
    play_epoch: u64,
    load_generation: u64,
    exports_in_flight: usize,
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    events_rx: mpsc::UnboundedReceiver<ControllerEvent>,
    snapshot_tx: watch::Sender<ReplaySnapshot>,
}

impl ReplayController {
    #[must_use]
    pub fn new(
        api: Arc<dyn ReplayApi>,
        exporter: ExportController,
        config: ControllerConfig,
    ) -> (Self, ControllerHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let rate = PlaybackRate::new(config.playback_fps.clone(), DEFAULT_PLAYBACK_FPS);
        let export = config.export.clone();
        let (snapshot_tx, snapshots) = watch::channel(ReplaySnapshot::idle(
            config.load_request.ans_path.clone(),
            config.playback_fps.clone(),
            export.clone(),
        ));
        let controller = Self {
            api,
            exporter,
            session: ReplaySession::new(),
            scheduler: TickScheduler::new(),
            rate,
            export,
            metrics: Arc::new(MetricsSeries::default()),
            view: None,
            load: LoadPhase::NotStarted,
            has_agent_status: false,
            status: String::new(),
            play_epoch: 0,
            load_generation: 0,
            exports_in_flight: 0,
            events_tx: events_tx.clone(),
            events_rx,
            snapshot_tx,
            config,
        };
        let handle = ControllerHandle {
            events: events_tx,
            snapshots,
        };
        (controller, handle)
    }

    /// Loads the configured log, then serves events until shutdown.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run(mut self, mut shutdown: ShutdownReceiver) -> ReplaySnapshot {
        self.begin_load();
        self.publish();
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                event = self.events_rx.recv() => {
                    let Some(event) = event else { break };
                    self.handle(event);
                    self.publish();
                }
            }
        }
        self.scheduler.cancel();
        debug!("Replay controller stopped");
        self.snapshot()
    }

    fn handle(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Input(input) => self.handle_input(input),
            ControllerEvent::LoadFinished { generation, result } => {
                self.finish_load(generation, result);
            }
            ControllerEvent::FrameFetched { view, tick_epoch } => {
                self.apply_frame(view, tick_epoch);
            }
            ControllerEvent::Tick(id) => self.on_tick(id),
            ControllerEvent::Export(status) => self.on_export_status(status),
            ControllerEvent::ChartsWritten(result) => match result {
                Ok(count) => debug!("Wrote {} metric charts", count),
                Err(err) => self.status = format!("Failed to write charts: {}", err),
            },
        }
    }

    fn handle_input(&mut self, input: ControlInput) {
        match input {
            ControlInput::TogglePlay => {
                if self.session.is_playing() {
                    self.pause();
                } else {
                    self.play();
                }
            }
            ControlInput::Play => self.play(),
            ControlInput::Pause => self.pause(),
            ControlInput::Step(delta) => {
                self.pause();
                let target = self.session.step(delta);
                self.show(target);
            }
            ControlInput::Seek(frame) => {
                self.pause();
                let target = self.session.seek(frame);
                self.show(target);
            }
            ControlInput::SeekLast => {
                self.pause();
                let target = self.session.seek(i64::from(self.session.total_frames()));
                self.show(target);
            }
            ControlInput::SetPlaybackFps(input) => self.rate.set_input(input),
            ControlInput::NudgePlaybackFps(delta) => self.rate.nudge(delta),
            ControlInput::SetExportFps(input) => self.export.fps_input = input,
            ControlInput::NudgeExportFps(delta) => {
                let current = parse_fps(&self.export.fps_input).unwrap_or(DEFAULT_EXPORT_FPS);
                self.export.fps_input =
                    PlaybackRate::format_input((current + delta).max(MIN_EXPORT_FPS));
            }
            ControlInput::MarkExportStart => {
                if let Some(frame) = self.session.current_frame() {
                    self.export.range_start = frame;
                    self.status = self.range_status();
                }
            }
            ControlInput::MarkExportEnd => {
                if let Some(frame) = self.session.current_frame() {
                    self.export.range_end = frame;
                    self.status = self.range_status();
                }
            }
            ControlInput::Export(kind) => self.start_export(kind),
            ControlInput::Reload => {
                self.begin_load();
            }
        }
    }

    fn range_status(&self) -> String {
        format!(
            "Export range {}..{}",
            self.export.range_start, self.export.range_end
        )
    }

    fn play(&mut self) {
        if !self.session.play() {
            return;
        }
        self.play_epoch = self.play_epoch.wrapping_add(1);
        self.arm_tick();
    }

    fn pause(&mut self) {
        if self.session.pause() {
            self.scheduler.cancel();
        }
    }

    fn arm_tick(&mut self) {
        let events = self.events_tx.clone();
        let period = self.rate.period();
        if self
            .scheduler
            .arm(period, move |id| {
                drop(events.send(ControllerEvent::Tick(id)));
            })
            .is_some()
        {
            debug!("Armed playback tick in {:?}", period);
        }
    }

    fn on_tick(&mut self, id: TickId) {
        if !self.scheduler.take_fired(id) {
            debug!("Ignoring stale playback tick");
            return;
        }
        if let Some(frame) = self.session.advance() {
            self.request_frame(frame, Some(self.play_epoch));
        }
    }

    fn show(&self, frame: Option<u32>) {
        if let Some(frame) = frame {
            self.request_frame(frame, None);
        }
    }

    fn request_frame(&self, frame: u32, tick_epoch: Option<u64>) {
        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let view = update_frame(api.as_ref(), frame).await;
            drop(events.send(ControllerEvent::FrameFetched { view, tick_epoch }));
        });
    }

    fn apply_frame(&mut self, view: Option<FrameView>, tick_epoch: Option<u64>) {
        if let Some(view) = view {
            self.view = Some(view);
        }
        let rearm = tick_epoch.is_some_and(|epoch| epoch == self.play_epoch)
            && self.session.is_playing()
            && !self.scheduler.is_pending();
        if rearm {
            self.arm_tick();
        }
    }

    fn begin_load(&mut self) {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.scheduler.cancel();
        self.session.reset();
        self.view = None;
        self.metrics = Arc::new(MetricsSeries::default());
        self.has_agent_status = false;
        self.load = LoadPhase::Loading;
        self.status = format!("Loading {}...", self.config.load_request.ans_path);
        info!("Loading {}", self.config.load_request.ans_path);

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        let request = self.config.load_request.clone();
        let generation = self.load_generation;
        tokio::spawn(async move {
            let result = api.load_log(&request).await;
            drop(events.send(ControllerEvent::LoadFinished { generation, result }));
        });
    }

    fn finish_load(&mut self, generation: u64, result: Result<LoadedLog, LoadError>) {
        if generation != self.load_generation {
            debug!("Ignoring superseded load result");
            return;
        }
        let log = match result {
            Ok(log) => log,
            Err(err) => {
                warn!("Load failed: {}", err);
                let detail = err.detail();
                self.status = format!("Load failed: {}", detail);
                self.load = LoadPhase::Failed(detail);
                return;
            }
        };

        self.metrics = Arc::new(log.metrics);
        self.has_agent_status = log.has_agent_status;
        self.load = LoadPhase::Ready;
        self.export.range_start = self.config.export_start.unwrap_or(1);
        self.export.range_end = self.config.export_end.unwrap_or(log.total_frames);

        let Some(frame) = self.session.populate(log.total_frames) else {
            self.status = "Log has no frames".to_owned();
            return;
        };
        self.status = if log.has_agent_status {
            format!("{} frames loaded (agent status available)", log.total_frames)
        } else {
            format!("{} frames loaded", log.total_frames)
        };
        info!("{}", self.status);
        self.request_frame(frame, None);
        self.write_charts();
    }

    fn write_charts(&self) {
        let Some(dir) = self.config.charts_dir.clone() else {
            return;
        };
        let metrics = Arc::clone(&self.metrics);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || write_metric_charts(&metrics, &dir))
                .await
                .map_err(|err| err.to_string())
                .and_then(|written| written.map(|paths| paths.len()).map_err(|err| err.to_string()));
            drop(events.send(ControllerEvent::ChartsWritten(result)));
        });
    }

    fn start_export(&mut self, kind: ExportKind) {
        let request = self.export.build_request(kind);
        let exporter = self.exporter.clone();
        let events = self.events_tx.clone();
        self.exports_in_flight = self.exports_in_flight.saturating_add(1);
        tokio::spawn(async move {
            let report = events.clone();
            let result = exporter
                .run(kind, &request, move |status| {
                    drop(report.send(ControllerEvent::Export(status)));
                })
                .await;
            if let Err(err) = result {
                debug!("Export task ended with error: {}", err);
            }
        });
    }

    fn on_export_status(&mut self, status: ExportStatus) {
        if matches!(
            status,
            ExportStatus::Saved { .. } | ExportStatus::Failed { .. }
        ) {
            self.exports_in_flight = self.exports_in_flight.saturating_sub(1);
        }
        self.status = status.to_string();
    }

    fn snapshot(&self) -> ReplaySnapshot {
        ReplaySnapshot {
            state: self.session.state(),
            total_frames: self.session.total_frames(),
            current_frame: self.session.current_frame(),
            load: self.load.clone(),
            has_agent_status: self.has_agent_status,
            status: self.status.clone(),
            view: self.view.clone(),
            metrics: Arc::clone(&self.metrics),
            playback_fps: self.rate.input().to_owned(),
            export: self.export.clone(),
            exports_in_flight: self.exports_in_flight,
            log_path: self.config.load_request.ans_path.clone(),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
