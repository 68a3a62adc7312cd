//! Per-frame synchronization entry point
//!
//! One [`AudioSync`] exists per audio node in the scene. Each rendered
//! frame the driver calls [`AudioSync::sync`] with the current timeline
//! snapshot; the call resolves the node's handle through the pool, pumps
//! queued backend events, gates on readiness, and dispatches the seek
//! strategy selected by the global mode. The returned handle reference
//! is consumed for side effects only (sound output); audio produces no
//! pixels.
//!
//! Re-invocations with bit-identical inputs and an unchanged resource
//! are memo hits and touch nothing, which keeps the renderer free to
//! recompute its frame graph as often as it likes.

use crate::config::SyncConfig;
use crate::error::Result;
use crate::gate;
use crate::handle::AudioHandle;
use crate::media::MediaFactory;
use crate::memo::{Fingerprint, FrameDeps};
use crate::pool::{ResourcePool, SourceKey};
use crate::strategy::{precision_seek, realtime_sync, select_strategy, StrategyKind};
use crate::timeline::TimelineState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Synchronizes one audio node to the external timeline
#[derive(Debug)]
pub struct AudioSync {
    key: SourceKey,
    last_fingerprint: Option<Fingerprint>,
}

impl AudioSync {
    pub fn new(node_id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            key: SourceKey::new(node_id, src),
            last_fingerprint: None,
        }
    }

    pub fn key(&self) -> &SourceKey {
        &self.key
    }

    pub fn src(&self) -> &str {
        &self.key.src
    }

    /// Point this node at a different source URL
    ///
    /// The next `sync` resolves (and if needed creates) the handle for
    /// the new key; the old handle stays in the pool untouched.
    pub fn set_src(&mut self, src: impl Into<String>) {
        let src = src.into();
        if self.key.src != src {
            self.key.src = src;
            self.last_fingerprint = None;
        }
    }

    /// Synchronize the node's resource to the current frame
    ///
    /// Non-blocking: an unready resource or in-flight play request marks
    /// the frame provisional through `deps` instead of waiting. The only
    /// error is the pool's empty-URL precondition.
    pub fn sync(
        &mut self,
        pool: &mut ResourcePool,
        factory: &dyn MediaFactory,
        timeline: &TimelineState,
        config: &SyncConfig,
        deps: &mut FrameDeps,
    ) -> Result<Rc<RefCell<AudioHandle>>> {
        let handle_rc = pool.get_or_create(self.key.clone(), factory, config)?;

        {
            let mut handle = handle_rc.borrow_mut();
            handle.pump_events();
            gate::ensure_ready(&mut handle, deps);

            let fingerprint = Fingerprint::capture(timeline, &handle);
            if self.last_fingerprint == Some(fingerprint) {
                trace!("Handle {}: inputs unchanged, skipping", handle.key());
                return Ok(Rc::clone(&handle_rc));
            }
            self.last_fingerprint = Some(fingerprint);

            match select_strategy(timeline.mode) {
                StrategyKind::Realtime => realtime_sync(
                    &mut handle,
                    deps,
                    timeline.time,
                    timeline.rate,
                    timeline.playing,
                    config.drift_tolerance,
                ),
                StrategyKind::Precision => {
                    precision_seek(&mut handle, timeline.time, timeline.rate)
                }
            }
        }

        Ok(handle_rc)
    }
}
