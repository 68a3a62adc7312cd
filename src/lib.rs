//! # Frame-Driven Audio Synchronization (audio-sync)
//!
//! Synchronizes physical audio-playback resources to a logical,
//! externally-driven timeline inside a frame-based rendering pipeline.
//!
//! **Purpose:** Serve two incompatible consumers from the same resource:
//! frame-exact paused positioning for deterministic export, and
//! best-effort continuous playback with bounded drift correction for
//! live preview.
//!
//! **Architecture:** A resource pool deduplicates handles by
//! (node, source URL); a readiness gate marks frames provisional until
//! metadata loads; a per-frame entry point selects one of two seek
//! strategies from the global playback mode. Everything runs inside a
//! single cooperative, driver-pushed evaluation model with no internal
//! threads or timers.

pub mod config;
pub mod error;
pub mod gate;
pub mod handle;
pub mod media;
pub mod memo;
pub mod pool;
pub mod strategy;
pub mod sync;
pub mod timeline;

pub use config::{MediaCapabilities, SyncConfig};
pub use error::{Error, Result};
pub use handle::AudioHandle;
pub use media::{MediaBackend, MediaEvent, MediaFactory, Pending, Readiness};
pub use memo::FrameDeps;
pub use pool::{ResourcePool, SourceKey};
pub use sync::AudioSync;
pub use timeline::{TimelineMode, TimelineState};
