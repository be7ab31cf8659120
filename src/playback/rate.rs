use std::time::Duration;

/// Lower bound on the playback tick period.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(40);
pub const DEFAULT_PLAYBACK_FPS: f64 = 10.0;

/// Slowest rate the nudge controls will go down to.
const MIN_NUDGED_FPS: f64 = 1.0;

/// Parses a user-entered frame rate. Only finite, strictly positive numbers
/// are accepted.
#[must_use]
pub fn parse_fps(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|fps| fps.is_finite() && *fps > 0.0)
}

/// `max(40ms, 1s / fps)`, or `None` when `fps` cannot produce a period.
#[must_use]
pub fn period_for_fps(fps: f64) -> Option<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / fps)
        .ok()
        .map(|period| period.max(MIN_TICK_PERIOD))
}

/// The playback-rate input as the user typed it.
///
/// The raw text is kept and re-parsed on every scheduling decision, so a
/// change made while playing applies from the next tick on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRate {
    input: String,
    fallback_fps: f64,
}

impl PlaybackRate {
    #[must_use]
    pub fn new(input: impl Into<String>, fallback_fps: f64) -> Self {
        Self {
            input: input.into(),
            fallback_fps,
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Rate currently in effect, falling back when the input is unusable.
    #[must_use]
    pub fn effective_fps(&self) -> f64 {
        parse_fps(&self.input)
            .or_else(|| Some(self.fallback_fps).filter(|fps| fps.is_finite() && *fps > 0.0))
            .unwrap_or(DEFAULT_PLAYBACK_FPS)
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        period_for_fps(self.effective_fps())
            .or_else(|| period_for_fps(DEFAULT_PLAYBACK_FPS))
            .unwrap_or(MIN_TICK_PERIOD)
    }

    /// Adjusts the rate by `delta` fps, never dropping below 1 fps.
    pub fn nudge(&mut self, delta: f64) {
        let next = (self.effective_fps() + delta).max(MIN_NUDGED_FPS);
        self.input = Self::format_input(next);
    }

    /// Renders a rate the way it is shown in the rate input.
    #[must_use]
    pub fn format_input(fps: f64) -> String {
        if fps.fract().abs() < f64::EPSILON {
            format!("{fps:.0}")
        } else {
            format!("{fps:.2}")
        }
    }
}
