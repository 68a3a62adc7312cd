//! Readiness gate bridging synchronous computation to resource loading
//!
//! The per-frame strategies execute synchronously, but a freshly created
//! resource has not loaded its metadata yet. The gate does not block:
//! it registers a one-shot waiter on the handle and collects the
//! corresponding [`Pending`](crate::media::Pending) marker into the
//! frame's dependencies, so the frame's audio state stays provisional
//! until metadata arrives. The wait is unbounded; no timeout exists
//! anywhere in this subsystem.

use crate::handle::AudioHandle;
use crate::media::{Pending, Readiness};
use crate::memo::FrameDeps;
use tracing::debug;

/// Ensure a handle's metadata is available, or mark the frame provisional
///
/// Returns `true` when the handle is ready for consumption right now.
/// When it is not, a one-shot waiter is registered (resolved exactly
/// once, on the metadata-loaded event) and the frame must be recomputed
/// after [`FrameDeps::settled`] reports completion. Callers proceed
/// either way: with unknown duration the strategies degrade to their
/// paused branches.
pub fn ensure_ready(handle: &mut AudioHandle, deps: &mut FrameDeps) -> bool {
    if handle.readiness() >= Readiness::Metadata {
        return true;
    }

    debug!("Handle {}: waiting for metadata", handle.key());
    let waiter = Pending::new();
    handle.add_readiness_waiter(waiter.clone());
    deps.collect(waiter);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaCapabilities;
    use crate::media::testing::ScriptedMedia;
    use crate::media::MediaEvent;
    use crate::pool::SourceKey;

    fn handle_for(media: &ScriptedMedia) -> AudioHandle {
        AudioHandle::new(
            SourceKey::new("n1", "a.mp3"),
            media.boxed(),
            &MediaCapabilities::default(),
        )
    }

    #[test]
    fn test_ready_handle_passes_immediately() {
        let media = ScriptedMedia::ready(10.0);
        let mut handle = handle_for(&media);
        let mut deps = FrameDeps::new();

        assert!(ensure_ready(&mut handle, &mut deps));
        assert!(deps.is_empty());
    }

    #[test]
    fn test_unready_handle_marks_frame_provisional() {
        let media = ScriptedMedia::new(None, Readiness::Nothing);
        let mut handle = handle_for(&media);
        let mut deps = FrameDeps::new();

        assert!(!ensure_ready(&mut handle, &mut deps));
        assert_eq!(deps.len(), 1);
        assert!(!deps.settled());
    }

    #[test]
    fn test_metadata_event_settles_the_wait() {
        let media = ScriptedMedia::new(None, Readiness::Nothing);
        let mut handle = handle_for(&media);
        let mut deps = FrameDeps::new();

        ensure_ready(&mut handle, &mut deps);

        // Backend finishes loading between frames
        {
            let mut state = media.state.borrow_mut();
            state.duration = Some(10.0);
            state.readiness = Readiness::Metadata;
        }
        media.queue_event(MediaEvent::LoadedMetadata);
        handle.pump_events();

        assert!(deps.settled());
        assert!(ensure_ready(&mut handle, &mut deps));
    }
}
