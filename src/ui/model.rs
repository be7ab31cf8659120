use crate::controller::ReplaySnapshot;

/// Everything one dashboard frame is drawn from.
#[derive(Debug, Clone)]
pub struct UiRenderData {
    pub snapshot: ReplaySnapshot,
    pub server: String,
    pub no_color: bool,
}

impl UiRenderData {
    #[must_use]
    pub const fn new(snapshot: ReplaySnapshot, server: String, no_color: bool) -> Self {
        Self {
            snapshot,
            server,
            no_color,
        }
    }
}
