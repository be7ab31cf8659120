//! The single owner of replay state.
//!
//! User input, timer expiry and network completions all arrive as events on
//! one queue and are handled to completion, one at a time, by
//! [`ReplayController::run`]. Observers read published [`ReplaySnapshot`]s.
mod event;
mod replay;
mod snapshot;

#[cfg(test)]
mod tests;

pub use event::ControlInput;
pub use replay::{ControllerConfig, ControllerHandle, ReplayController};
pub use snapshot::{LoadPhase, ReplaySnapshot};
