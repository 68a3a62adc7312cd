//! Shared fixtures for audio-sync integration tests
//!
//! Provides a scripted media backend standing in for the host's
//! platform resource, with inspectable request counters and manual
//! control over loading progress and event delivery.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use audio_sync::media::{MediaBackend, MediaEvent, MediaFactory, MediaLoadHints, Pending};
use audio_sync::Readiness;
use std::cell::RefCell;
use std::rc::Rc;

/// Install a test subscriber once; harmless if already set
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct FakeState {
    pub position: f64,
    pub duration: Option<f64>,
    pub paused: bool,
    pub muted: bool,
    pub rate: f64,
    pub readiness: Readiness,
    pub queued: Vec<MediaEvent>,
    pub play_requests: u32,
    pub pause_requests: u32,
    pub position_writes: u32,
    /// Simulate an autoplay policy: play() is accepted but never starts
    pub deny_play: bool,
    pub last_play: Option<Pending>,
}

/// Scripted media backend; clones share one state cell so tests keep a
/// view into the resource after the box moves into the pool
#[derive(Clone)]
pub struct FakeMedia {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeMedia {
    pub fn unloaded() -> Self {
        Self::with_state(None, Readiness::Nothing)
    }

    pub fn loaded(duration: f64) -> Self {
        Self::with_state(Some(duration), Readiness::CurrentData)
    }

    fn with_state(duration: Option<f64>, readiness: Readiness) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                position: 0.0,
                duration,
                paused: true,
                muted: false,
                rate: 1.0,
                readiness,
                queued: Vec::new(),
                play_requests: 0,
                pause_requests: 0,
                position_writes: 0,
                deny_play: false,
                last_play: None,
            })),
        }
    }

    /// Finish loading: set duration, raise readiness, queue the
    /// metadata event for the next frame's pump
    pub fn finish_loading(&self, duration: f64) {
        let mut state = self.state.borrow_mut();
        state.duration = Some(duration);
        state.readiness = Readiness::CurrentData;
        state.queued.push(MediaEvent::LoadedMetadata);
    }

    pub fn queue_event(&self, event: MediaEvent) {
        self.state.borrow_mut().queued.push(event);
    }

    /// Simulate free-running playback advancing the position
    pub fn advance(&self, secs: f64) {
        let mut state = self.state.borrow_mut();
        if !state.paused {
            state.position += secs * state.rate;
        }
    }
}

impl MediaBackend for FakeMedia {
    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_position(&mut self, secs: f64) {
        let mut state = self.state.borrow_mut();
        state.position = secs;
        state.position_writes += 1;
    }

    fn duration(&self) -> Option<f64> {
        self.state.borrow().duration
    }

    fn paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn muted(&self) -> bool {
        self.state.borrow().muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn set_rate(&mut self, rate: f64) {
        self.state.borrow_mut().rate = rate;
    }

    fn play(&mut self) -> Pending {
        let mut state = self.state.borrow_mut();
        state.play_requests += 1;
        let pending = Pending::new();
        if !state.deny_play {
            state.paused = false;
            state.queued.push(MediaEvent::Play);
            pending.resolve();
        }
        state.last_play = Some(pending.clone());
        pending
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pause_requests += 1;
        state.paused = true;
    }

    fn readiness(&self) -> Readiness {
        self.state.borrow().readiness
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.state.borrow_mut().queued)
    }
}

/// Factory handing out scripted backends and remembering every creation
pub struct FakeFactory {
    pub backends: RefCell<Vec<(String, FakeMedia)>>,
    pub template: fn() -> FakeMedia,
}

impl FakeFactory {
    pub fn new(template: fn() -> FakeMedia) -> Self {
        Self {
            backends: RefCell::new(Vec::new()),
            template,
        }
    }

    /// The backend created for the n-th distinct source
    pub fn backend(&self, index: usize) -> FakeMedia {
        self.backends.borrow()[index].1.clone()
    }

    pub fn created(&self) -> usize {
        self.backends.borrow().len()
    }
}

impl MediaFactory for FakeFactory {
    fn create(&self, src: &str, _hints: &MediaLoadHints) -> Box<dyn MediaBackend> {
        let media = (self.template)();
        self.backends
            .borrow_mut()
            .push((src.to_string(), media.clone()));
        Box::new(media)
    }
}
