/// Where the session sits in the replay state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No log loaded (`total_frames == 0`).
    #[default]
    Idle,
    Paused,
    Playing,
}

/// Playback position over a loaded log.
///
/// `current_frame` is `None` exactly when nothing is loaded, and the state is
/// never `Playing` in that case. Every mutation goes through the methods
/// below so those invariants cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplaySession {
    total_frames: u32,
    current_frame: Option<u32>,
    state: PlaybackState,
}

/// Frame that follows `current`, wrapping from the last frame back to 1.
#[must_use]
pub fn next_frame(current: u32, total: u32) -> u32 {
    current
        .checked_rem(total)
        .map_or(1, |rem| rem.saturating_add(1))
}

impl ReplaySession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_frames: 0,
            current_frame: None,
            state: PlaybackState::Idle,
        }
    }

    #[must_use]
    pub const fn total_frames(&self) -> u32 {
        self.total_frames
    }

    #[must_use]
    pub const fn current_frame(&self) -> Option<u32> {
        self.current_frame
    }

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.total_frames > 0
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Drops back to `Idle`; called at the start of every load attempt.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Installs a freshly loaded log. Returns the frame to display, or `None`
    /// when the log has no frames and the session stays idle.
    pub fn populate(&mut self, total_frames: u32) -> Option<u32> {
        self.reset();
        if total_frames == 0 {
            return None;
        }
        self.total_frames = total_frames;
        self.current_frame = Some(1);
        self.state = PlaybackState::Paused;
        self.current_frame
    }

    /// `Paused -> Playing`. Returns `false` (and changes nothing) when idle or
    /// already playing.
    pub fn play(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    /// `Playing -> Paused`, keeping the current frame.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    /// One playback step. Only meaningful while playing.
    pub fn advance(&mut self) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let current = self.current_frame?;
        let next = next_frame(current, self.total_frames);
        self.current_frame = Some(next);
        Some(next)
    }

    /// Pauses, then moves to `frame` clamped into `[1, total_frames]`.
    pub fn seek(&mut self, frame: i64) -> Option<u32> {
        if !self.is_loaded() {
            return None;
        }
        self.pause();
        let clamped = frame.clamp(1, i64::from(self.total_frames));
        let target = u32::try_from(clamped).unwrap_or(self.total_frames);
        self.current_frame = Some(target);
        Some(target)
    }

    /// Pauses, then moves by `delta` frames without wrapping.
    pub fn step(&mut self, delta: i64) -> Option<u32> {
        let current = i64::from(self.current_frame?);
        self.seek(current.saturating_add(delta))
    }
}
