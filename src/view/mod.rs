//! Turning fetched frames into something the terminal can show.
pub mod markup;
mod updater;


pub use markup::{MarkupLine, RunStyle, StyledRun, parse_frame_markup};
pub use updater::{FrameReadings, FrameView, NO_AGENT_STATUS, update_frame};
