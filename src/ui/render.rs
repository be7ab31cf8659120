mod charts;
mod dashboard;
mod frame;
mod lifecycle;
mod panels;
mod theme;

pub use dashboard::{Ui, UiActions};
pub use lifecycle::setup_render_ui;
