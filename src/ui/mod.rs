//! Terminal dashboard for the replay controller.
mod input;
mod model;
mod render;


pub use input::{KeyAction, resolve_key_action};
pub use model::UiRenderData;
pub use render::{Ui, UiActions, setup_render_ui};
