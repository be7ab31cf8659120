use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    MIN_TICK_PERIOD, PlaybackRate, PlaybackState, ReplaySession, TickScheduler, next_frame,
    parse_fps, period_for_fps,
};
use crate::error::{AppError, AppResult};

fn run_paused_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[test]
fn populate_starts_paused_on_first_frame() -> AppResult<()> {
    let mut session = ReplaySession::new();
    if session.state() != PlaybackState::Idle || session.current_frame().is_some() {
        return Err(AppError::validation("Expected idle session without frame"));
    }
    if session.populate(5) != Some(1) {
        return Err(AppError::validation("Expected first frame after populate"));
    }
    if session.state() != PlaybackState::Paused || session.total_frames() != 5 {
        return Err(AppError::validation("Expected paused session with 5 frames"));
    }
    Ok(())
}

#[test]
fn populate_with_zero_frames_stays_idle() -> AppResult<()> {
    let mut session = ReplaySession::new();
    session.populate(3);
    if session.populate(0).is_some() {
        return Err(AppError::validation("Expected no frame for empty log"));
    }
    if session.state() != PlaybackState::Idle || session.current_frame().is_some() {
        return Err(AppError::validation("Expected idle session after empty load"));
    }
    if session.play() {
        return Err(AppError::validation("Idle session must not start playing"));
    }
    Ok(())
}

#[test]
fn advance_wraps_from_last_to_first() -> AppResult<()> {
    let mut session = ReplaySession::new();
    session.populate(3);
    session.seek(3);
    session.play();
    if session.advance() != Some(1) {
        return Err(AppError::validation("Expected wrap to frame 1"));
    }
    if session.advance() != Some(2) {
        return Err(AppError::validation("Expected frame 2"));
    }
    Ok(())
}

#[test]
fn advance_is_noop_while_paused() -> AppResult<()> {
    let mut session = ReplaySession::new();
    session.populate(4);
    if session.advance().is_some() || session.current_frame() != Some(1) {
        return Err(AppError::validation("Paused session must not advance"));
    }
    Ok(())
}

#[test]
fn seek_clamps_and_pauses() -> AppResult<()> {
    let mut session = ReplaySession::new();
    session.populate(10);
    session.play();
    if session.seek(99) != Some(10) {
        return Err(AppError::validation("Expected clamp to last frame"));
    }
    if session.is_playing() {
        return Err(AppError::validation("Seek must pause playback"));
    }
    if session.seek(-4) != Some(1) {
        return Err(AppError::validation("Expected clamp to first frame"));
    }
    Ok(())
}

#[test]
fn step_does_not_wrap() -> AppResult<()> {
    let mut session = ReplaySession::new();
    session.populate(3);
    if session.step(-1) != Some(1) {
        return Err(AppError::validation("Step back from first must stay on first"));
    }
    session.seek(3);
    if session.step(1) != Some(3) {
        return Err(AppError::validation("Step forward from last must stay on last"));
    }
    Ok(())
}

#[test]
fn next_frame_handles_degenerate_totals() -> AppResult<()> {
    if next_frame(1, 1) != 1 || next_frame(4, 5) != 5 || next_frame(5, 5) != 1 {
        return Err(AppError::validation("Unexpected wrap arithmetic"));
    }
    if next_frame(3, 0) != 1 {
        return Err(AppError::validation("Zero total must not panic"));
    }
    Ok(())
}

#[test]
fn period_is_bounded_below() -> AppResult<()> {
    if period_for_fps(1000.0) != Some(MIN_TICK_PERIOD) {
        return Err(AppError::validation("Expected 40ms floor"));
    }
    if period_for_fps(4.0) != Some(Duration::from_millis(250)) {
        return Err(AppError::validation("Expected 250ms at 4 fps"));
    }
    if period_for_fps(0.0).is_some() || period_for_fps(f64::NAN).is_some() {
        return Err(AppError::validation("Expected no period for unusable rates"));
    }
    Ok(())
}

#[test]
fn invalid_rate_input_falls_back() -> AppResult<()> {
    for input in ["", "fast", "-3", "0", "inf", "NaN"] {
        if parse_fps(input).is_some() {
            return Err(AppError::validation(format!("Accepted invalid fps {input:?}")));
        }
        let rate = PlaybackRate::new(input, 10.0);
        if rate.period() != Duration::from_millis(100) {
            return Err(AppError::validation(format!(
                "Expected fallback period for {input:?}"
            )));
        }
    }
    Ok(())
}

#[test]
fn nudge_rewrites_input_and_keeps_minimum() -> AppResult<()> {
    let mut rate = PlaybackRate::new("2", 10.0);
    rate.nudge(-5.0);
    if rate.input() != "1" {
        return Err(AppError::validation(format!(
            "Expected nudge floor of 1, got {}",
            rate.input()
        )));
    }
    rate.nudge(1.5);
    if rate.input() != "2.50" {
        return Err(AppError::validation(format!(
            "Unexpected nudged input {}",
            rate.input()
        )));
    }
    Ok(())
}

#[test]
fn scheduler_fires_once_after_period() -> AppResult<()> {
    run_paused_test(async {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = TickScheduler::new();
        let sink = Arc::clone(&fired);
        let id = scheduler
            .arm(Duration::from_millis(100), move |id| {
                if let Ok(mut guard) = sink.lock() {
                    guard.push(id);
                }
            })
            .ok_or_else(|| AppError::validation("Expected tick to be armed"))?;

        if scheduler
            .arm(Duration::from_millis(100), |_| {})
            .is_some()
        {
            return Err(AppError::validation("Second arm must be a no-op"));
        }

        tokio::time::sleep(Duration::from_millis(99)).await;
        tokio::task::yield_now().await;
        let early = fired.lock().map(|guard| guard.len()).unwrap_or(0);
        if early != 0 {
            return Err(AppError::validation("Tick fired too early"));
        }

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        let fired_ids = fired.lock().map(|guard| guard.clone()).unwrap_or_default();
        if fired_ids != vec![id] {
            return Err(AppError::validation("Expected exactly one fired tick"));
        }
        if !scheduler.take_fired(id) || scheduler.is_pending() {
            return Err(AppError::validation("Expected fired tick to clear pending"));
        }
        Ok(())
    })
}

#[test]
fn cancelled_tick_never_fires() -> AppResult<()> {
    run_paused_test(async {
        let fired = Arc::new(Mutex::new(0_u32));
        let mut scheduler = TickScheduler::new();
        let sink = Arc::clone(&fired);
        let id = scheduler
            .arm(Duration::from_millis(50), move |_| {
                if let Ok(mut guard) = sink.lock() {
                    *guard = guard.saturating_add(1);
                }
            })
            .ok_or_else(|| AppError::validation("Expected tick to be armed"))?;
        if !scheduler.cancel() {
            return Err(AppError::validation("Expected cancel to report a pending tick"));
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        let count = fired.lock().map(|guard| *guard).unwrap_or(0);
        if count != 0 {
            return Err(AppError::validation("Cancelled tick fired"));
        }
        if scheduler.take_fired(id) {
            return Err(AppError::validation("Stale tick must be rejected"));
        }
        Ok(())
    })
}
