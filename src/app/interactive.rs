use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::args::ReplayArgs;
use crate::controller::ReplayController;
use crate::error::{AppError, AppResult};
use crate::export::{ExportController, RELEASE_GRACE};
use crate::shutdown::ShutdownSender;
use crate::ui::{KeyAction, resolve_key_action, setup_render_ui};

use super::{build_api, controller_config, downloads};

/// Keyboard poll cadence.
const UI_POLL_INTERVAL: Duration = Duration::from_millis(30);
/// Non-blocking poll interval for keyboard events.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(0);

/// Runs the dashboard until the user quits or a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error when the backend client cannot be built or reading
/// terminal events fails.
pub async fn run_interactive(args: &ReplayArgs, shutdown_tx: &ShutdownSender) -> AppResult<()> {
    let api = build_api(args)?;
    let downloads = downloads(args);
    downloads.sweep_stale(RELEASE_GRACE).await;
    let exporter = ExportController::new(Arc::clone(&api), downloads);
    let (controller, handle) = ReplayController::new(api, exporter, controller_config(args));

    let controller_task = tokio::spawn(controller.run(shutdown_tx.subscribe()));
    let render_ui_handle = setup_render_ui(
        shutdown_tx,
        handle.subscribe(),
        args.server.clone(),
        args.no_color,
    );

    let mut shutdown_rx = shutdown_tx.subscribe();
    let result = async {
        loop {
            if event::poll(EVENT_POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                match resolve_key_action(&key) {
                    Some(KeyAction::Quit) => break,
                    Some(KeyAction::Control(input)) => {
                        if !handle.send(input) {
                            break;
                        }
                    }
                    None => {}
                }
            }

            tokio::select! {
                _ = shutdown_rx.recv() => break,
                () = tokio::time::sleep(UI_POLL_INTERVAL) => {}
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    drop(shutdown_tx.send(()));
    if let Err(err) = render_ui_handle.await {
        eprintln!("Replay UI task failed: {}", err);
    }
    match controller_task.await {
        Ok(last) => tracing::debug!("Controller stopped at {}", last.indicator()),
        Err(err) => tracing::error!("Replay controller task failed: {}", err),
    }
    result
}
