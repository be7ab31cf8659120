use tokio::sync::watch;

use crate::controller::ReplaySnapshot;
use crate::shutdown::ShutdownSender;
use crate::ui::model::UiRenderData;

use super::dashboard::{Ui, UiActions};

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Ui::cleanup();
    }
}

/// Spawns the task that redraws the dashboard whenever a new snapshot is
/// published. The terminal is restored when the task ends.
#[must_use]
pub fn setup_render_ui(
    shutdown_tx: &ShutdownSender,
    mut snapshots: watch::Receiver<ReplaySnapshot>,
    server: String,
    no_color: bool,
) -> tokio::task::JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        let mut terminal = match Ui::setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                eprintln!("Failed to setup terminal: {}", err);
                return;
            }
        };
        let _guard = TerminalGuard;

        let initial = snapshots.borrow_and_update().clone();
        Ui::render(
            &mut terminal,
            &UiRenderData::new(initial, server.clone(), no_color),
        );

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                res = snapshots.changed() => {
                    if res.is_ok() {
                        let snapshot = snapshots.borrow_and_update().clone();
                        let data = UiRenderData::new(snapshot, server.clone(), no_color);
                        Ui::render(&mut terminal, &data);
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
