//! Live audio resource handle
//!
//! An [`AudioHandle`] wraps one physical [`MediaBackend`] together with
//! the bookkeeping the synchronization core needs around it: the
//! one-shot intents registered at creation (unmute on first real play,
//! pause on natural completion), readiness waiters, a revision counter
//! for memoization, and the last absolute position the caller applied.
//!
//! A handle's lifetime spans the pool's lifetime, not any single frame.
//! All event dispatch happens in [`AudioHandle::pump_events`], called
//! once per frame before any strategy runs, so operations on one handle
//! are strictly sequential.

use crate::config::MediaCapabilities;
use crate::media::{MediaBackend, MediaEvent, Pending, Readiness};
use crate::pool::SourceKey;
use tracing::{debug, info};

pub struct AudioHandle {
    key: SourceKey,
    backend: Box<dyn MediaBackend>,

    /// Autoplay workaround still armed: the handle started muted and the
    /// first real playback start will unmute it, exactly once
    mute_workaround_armed: bool,

    /// One-shot readiness waiters resolved when metadata loads
    waiters: Vec<Pending>,

    /// Bumped on every resource-side state change the memoization layer
    /// must observe (metadata loaded, play started, ended, absolute seek)
    revision: u64,

    /// Last position applied through [`AudioHandle::seek_absolute`]
    last_applied_time: Option<f64>,
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("key", &self.key)
            .field("mute_workaround_armed", &self.mute_workaround_armed)
            .field("waiters", &self.waiters.len())
            .field("revision", &self.revision)
            .field("last_applied_time", &self.last_applied_time)
            .finish()
    }
}

impl AudioHandle {
    /// Wrap a freshly created backend, applying platform capabilities
    ///
    /// Capability configuration happens here exactly once; the per-frame
    /// strategies only ever consult handle state afterwards.
    pub fn new(
        key: SourceKey,
        mut backend: Box<dyn MediaBackend>,
        capabilities: &MediaCapabilities,
    ) -> Self {
        let mute_workaround_armed = capabilities.autoplay_requires_mute;
        if mute_workaround_armed {
            backend.set_muted(true);
            info!("Handle {} starts muted (autoplay workaround)", key);
        }

        Self {
            key,
            backend,
            mute_workaround_armed,
            waiters: Vec::new(),
            revision: 0,
            last_applied_time: None,
        }
    }

    pub fn key(&self) -> &SourceKey {
        &self.key
    }

    pub fn position(&self) -> f64 {
        self.backend.position()
    }

    pub fn duration(&self) -> Option<f64> {
        self.backend.duration()
    }

    pub fn paused(&self) -> bool {
        self.backend.paused()
    }

    pub fn muted(&self) -> bool {
        self.backend.muted()
    }

    pub fn readiness(&self) -> Readiness {
        self.backend.readiness()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_applied_time(&self) -> Option<f64> {
        self.last_applied_time
    }

    pub fn mute_workaround_armed(&self) -> bool {
        self.mute_workaround_armed
    }

    /// Clamp a timeline position to the seekable range of this resource
    ///
    /// With unknown duration only the lower bound applies; the strategies
    /// never write a position before the duration is known anyway.
    pub fn clamp_time(&self, time: f64) -> f64 {
        match self.backend.duration() {
            Some(duration) => time.clamp(0.0, duration),
            None => time.max(0.0),
        }
    }

    /// Drain and dispatch backend events queued since the last frame
    pub fn pump_events(&mut self) {
        for event in self.backend.take_events() {
            match event {
                MediaEvent::LoadedMetadata => {
                    debug!("Handle {}: metadata loaded", self.key);
                    for waiter in self.waiters.drain(..) {
                        waiter.resolve();
                    }
                    self.revision += 1;
                }
                MediaEvent::Play => {
                    if self.mute_workaround_armed {
                        self.backend.set_muted(false);
                        self.mute_workaround_armed = false;
                        debug!("Handle {}: unmuted on first playback start", self.key);
                    }
                    self.revision += 1;
                }
                MediaEvent::Ended => {
                    // Pause-on-ended intent, registered once at creation
                    debug!("Handle {}: natural completion, pausing", self.key);
                    self.backend.pause();
                    self.revision += 1;
                }
            }
        }
    }

    /// Register a one-shot waiter resolved when metadata loads
    pub(crate) fn add_readiness_waiter(&mut self, waiter: Pending) {
        self.waiters.push(waiter);
    }

    /// Clear the autoplay mute before an explicit play request
    ///
    /// Used by the realtime strategy when it starts playback itself;
    /// subsequent [`MediaEvent::Play`] events find the workaround
    /// disarmed and leave the mute state alone.
    pub(crate) fn clear_mute_workaround(&mut self) {
        if self.mute_workaround_armed {
            self.backend.set_muted(false);
            self.mute_workaround_armed = false;
        }
    }

    pub(crate) fn set_rate(&mut self, rate: f64) {
        self.backend.set_rate(rate);
    }

    /// Position write on behalf of a strategy; bypasses the readiness
    /// guard because strategies only write once the duration is known
    pub(crate) fn set_position(&mut self, secs: f64) {
        self.backend.set_position(secs);
    }

    pub(crate) fn request_play(&mut self) -> Pending {
        debug!("Handle {}: play requested", self.key);
        self.backend.play()
    }

    pub(crate) fn request_pause(&mut self) {
        self.backend.pause();
    }

    /// Guarded absolute seek, the entry point used outside the per-frame
    /// strategies
    ///
    /// Writes attempted before the resource has loaded data at the
    /// current position are silently dropped: tolerant degradation, not
    /// an error. An accepted write records the value for later delta
    /// comparisons and bumps the revision so memoized frames recompute.
    pub fn seek_absolute(&mut self, value: f64) {
        if self.backend.readiness() < Readiness::CurrentData {
            debug!(
                "Handle {}: dropped position write to {:.3}s (not enough data loaded)",
                self.key, value
            );
            return;
        }

        self.backend.set_position(value);
        self.last_applied_time = Some(value);
        self.revision += 1;
    }
}
