//! Playback state and the self-rescheduling tick that drives it.
mod rate;
mod scheduler;
mod session;

#[cfg(test)]
mod tests;

pub use rate::{DEFAULT_PLAYBACK_FPS, MIN_TICK_PERIOD, PlaybackRate, parse_fps, period_for_fps};
pub use scheduler::{TickId, TickScheduler};
pub use session::{PlaybackState, ReplaySession, next_frame};
