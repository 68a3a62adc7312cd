//! Per-frame seek strategies
//!
//! Two incompatible consumers share each audio resource. Deterministic
//! export needs frame-exact positioning with no autonomous advancement,
//! so [`precision_seek`] pins the resource paused at an exact timestamp
//! every frame. Live preview needs gap-free sound, so [`realtime_sync`]
//! lets the resource free-run and only forces the position back when it
//! drifts past the configured tolerance (scrubs, loops, rate flips);
//! within tolerance it leaves the position alone to avoid audible
//! micro-seek artifacts.

use crate::handle::AudioHandle;
use crate::memo::FrameDeps;
use crate::timeline::TimelineMode;
use tracing::debug;

/// Which strategy a frame uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Exact, paused positioning for deterministic capture
    Precision,
    /// Free-running playback with bounded drift correction
    Realtime,
}

/// Pure mode dispatch: live modes free-run, everything else pins exactly
pub fn select_strategy(mode: TimelineMode) -> StrategyKind {
    match mode {
        TimelineMode::Playing | TimelineMode::Presenting => StrategyKind::Realtime,
        TimelineMode::Paused | TimelineMode::Rendering => StrategyKind::Precision,
    }
}

/// Pin the resource paused at exactly `time`
///
/// Past the end of the media (or while the duration is still unknown)
/// the resource is paused and its position left untouched. Otherwise the
/// position is clamped, the rate applied, playback force-paused, and the
/// position written exactly.
pub fn precision_seek(handle: &mut AudioHandle, time: f64, rate: f64) {
    let past_end = match handle.duration() {
        Some(duration) => time >= duration,
        None => true,
    };
    if past_end {
        handle.request_pause();
        return;
    }

    let target = handle.clamp_time(time);
    handle.set_rate(rate);

    if !handle.paused() {
        handle.request_pause();
    }

    handle.set_position(target);
}

/// Keep a free-running resource within `tolerance` of the timeline
///
/// Issues at most one play or pause request per invocation. A play
/// request is asynchronous: its completion marker is collected into the
/// frame's dependencies but never blocks the frame, and a rejection
/// (autoplay policy) is not observed, leaving the handle paused.
pub fn realtime_sync(
    handle: &mut AudioHandle,
    deps: &mut FrameDeps,
    time: f64,
    rate: f64,
    desired_playing: bool,
    tolerance: f64,
) {
    let target = handle.clamp_time(time);
    handle.set_rate(rate);

    let should_play = desired_playing
        && matches!(handle.duration(), Some(duration) if target < duration)
        && rate > 0.0;

    if should_play {
        if handle.paused() {
            handle.clear_mute_workaround();
            let started = handle.request_play();
            deps.collect(started);
        }
    } else if !handle.paused() {
        handle.request_pause();
    }

    // Hard resync only when significantly out of sync; no drift
    // correction before the duration is known
    if handle.duration().is_some() {
        let drift = (handle.position() - target).abs();
        if drift > tolerance {
            debug!(
                "Handle {}: drift {:.3}s exceeds {:.3}s, resyncing to {:.3}s",
                handle.key(),
                drift,
                tolerance,
                target
            );
            handle.set_position(target);
        }
    }
}
