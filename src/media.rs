//! Media resource collaborator interface
//!
//! The physical playback resource (platform audio element, decoder stack,
//! whatever the host embeds) lives behind [`MediaBackend`]. This crate
//! never creates or decodes media itself; it only positions, pauses and
//! resumes a backend the host's [`MediaFactory`] hands out.
//!
//! # Event delivery
//!
//! There are no callbacks. The backend queues [`MediaEvent`]s and the
//! owning handle drains them once per frame via
//! [`MediaBackend::take_events`], which keeps every operation on a handle
//! strictly sequential within the cooperative frame driver.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// How much of the resource has loaded
///
/// Mirrors the usual platform readiness ladder: `Metadata` is enough to
/// know the duration and begin gating computations, `CurrentData` is the
/// stricter threshold required before absolute position writes are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Nothing loaded yet
    Nothing,
    /// Duration and seekability known
    Metadata,
    /// Data at the current position available
    CurrentData,
}

/// Events a backend reports to its handle
///
/// Drained once per frame; see the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Metadata (duration, seekability) became available
    LoadedMetadata,
    /// Playback actually started (asynchronous play request succeeded)
    Play,
    /// Playback reached the natural end of the media
    Ended,
}

/// State of an asynchronous request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Pending,
    Resolved,
    Rejected,
}

/// Shared marker for an in-flight asynchronous request
///
/// Cheap to clone; the producer keeps one clone to settle, the consumer
/// registers another with the frame's dependency collector. A rejected
/// marker is never retried by this subsystem (rejected play requests
/// simply leave the handle paused).
#[derive(Debug, Clone)]
pub struct Pending {
    state: Rc<Cell<PendingState>>,
}

impl Pending {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(PendingState::Pending)),
        }
    }

    /// Create an already-resolved marker (for synchronous backends)
    pub fn resolved() -> Self {
        let pending = Self::new();
        pending.resolve();
        pending
    }

    pub fn resolve(&self) {
        if self.state.get() == PendingState::Pending {
            self.state.set(PendingState::Resolved);
        }
    }

    pub fn reject(&self) {
        if self.state.get() == PendingState::Pending {
            self.state.set(PendingState::Rejected);
        }
    }

    pub fn state(&self) -> PendingState {
        self.state.get()
    }

    /// True once the request settled, resolved or rejected
    pub fn is_settled(&self) -> bool {
        self.state.get() != PendingState::Pending
    }
}

impl Default for Pending {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource loading behavior requested at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preload {
    None,
    Metadata,
    #[default]
    Auto,
}

/// Hints applied to every newly created resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaLoadHints {
    /// Request anonymous cross-origin fetching
    pub cross_origin_anonymous: bool,
    /// How eagerly the backend should load data
    pub preload: Preload,
    /// Ask the platform for inline (non-fullscreen) playback attributes
    pub inline_playback: bool,
}

impl Default for MediaLoadHints {
    fn default() -> Self {
        Self {
            cross_origin_anonymous: true,
            preload: Preload::Auto,
            inline_playback: false,
        }
    }
}

/// The physical playback resource
///
/// All mutations are fire-and-forget from the caller's perspective;
/// failures surface (if at all) through [`MediaEvent`]s or a rejected
/// [`Pending`], never as `Result`s. That keeps the per-frame path
/// non-blocking and infallible, matching the degradation policy of the
/// synchronization core.
pub trait MediaBackend {
    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Absolute position write in seconds
    fn set_position(&mut self, secs: f64);

    /// Total duration in seconds, `None` until metadata has loaded
    fn duration(&self) -> Option<f64>;

    fn paused(&self) -> bool;

    fn muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    fn set_rate(&mut self, rate: f64);

    /// Request playback start
    ///
    /// Asynchronous: the backend settles the returned marker once the
    /// request is accepted or denied (e.g. by an autoplay policy), and
    /// reports an actual start with [`MediaEvent::Play`].
    fn play(&mut self) -> Pending;

    /// Request pause; synchronous and idempotent
    fn pause(&mut self);

    fn readiness(&self) -> Readiness;

    /// Drain events queued since the last call
    fn take_events(&mut self) -> Vec<MediaEvent>;
}

/// Creates backends for the resource pool
///
/// Implemented by the host environment; invoked at most once per
/// [`crate::pool::SourceKey`] over the pool's lifetime.
pub trait MediaFactory {
    fn create(&self, src: &str, hints: &MediaLoadHints) -> Box<dyn MediaBackend>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_settles_once() {
        let pending = Pending::new();
        assert!(!pending.is_settled());

        pending.resolve();
        assert_eq!(pending.state(), PendingState::Resolved);

        // A later rejection must not overwrite the settled state
        pending.reject();
        assert_eq!(pending.state(), PendingState::Resolved);
    }

    #[test]
    fn test_pending_clones_share_state() {
        let pending = Pending::new();
        let observer = pending.clone();
        pending.reject();
        assert_eq!(observer.state(), PendingState::Rejected);
        assert!(observer.is_settled());
    }

    #[test]
    fn test_readiness_ordering() {
        assert!(Readiness::Nothing < Readiness::Metadata);
        assert!(Readiness::Metadata < Readiness::CurrentData);
    }

    #[test]
    fn test_default_load_hints() {
        let hints = MediaLoadHints::default();
        assert!(hints.cross_origin_anonymous);
        assert_eq!(hints.preload, Preload::Auto);
    }
}
