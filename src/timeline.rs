//! Timeline state consumed by the per-frame synchronization entry point
//!
//! The timeline is driven entirely by the enclosing renderer; this
//! subsystem only reads it. One `TimelineState` snapshot is taken per
//! rendered frame and handed to [`crate::sync::AudioSync::sync`].

use serde::{Deserialize, Serialize};

/// Global playback mode of the timeline driver
///
/// `Playing` and `Presenting` select the realtime strategy (free-running
/// audio with bounded drift correction); every other mode selects the
/// precision strategy (exact, paused positioning for deterministic
/// capture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineMode {
    /// Live preview, timeline advancing in real time
    Playing,
    /// Fullscreen presentation, timeline advancing in real time
    Presenting,
    /// Timeline halted or being scrubbed by the user
    Paused,
    /// Deterministic frame-by-frame export
    Rendering,
}

impl std::fmt::Display for TimelineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineMode::Playing => write!(f, "playing"),
            TimelineMode::Presenting => write!(f, "presenting"),
            TimelineMode::Paused => write!(f, "paused"),
            TimelineMode::Rendering => write!(f, "rendering"),
        }
    }
}

/// Read-only per-frame snapshot of the external timeline
///
/// Never mutated by this subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineState {
    /// Current timeline position in seconds
    pub time: f64,
    /// Requested playback rate (> 0 expected)
    pub rate: f64,
    /// Whether the driver wants audio audible this frame
    pub playing: bool,
    /// Global playback mode, selects the seek strategy
    pub mode: TimelineMode,
}

impl TimelineState {
    pub fn new(time: f64, rate: f64, playing: bool, mode: TimelineMode) -> Self {
        Self {
            time,
            rate,
            playing,
            mode,
        }
    }
}
