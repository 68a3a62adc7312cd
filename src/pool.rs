//! Resource pool keyed by logical source identity
//!
//! Repeated recomputation of the frame graph must not reinitialize
//! physical audio resources, so handles are deduplicated by
//! [`SourceKey`] and live as long as the pool. The pool is owned by the
//! enclosing rendering context and passed in by reference; it is not a
//! process-wide global.
//!
//! Entries are never evicted. A long-running session that cycles through
//! many transient sources will grow the pool without bound; accepted as
//! a known limitation.

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::handle::AudioHandle;
use crate::media::{MediaFactory, MediaLoadHints};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::info;

/// Identity of one logical audio source: owning node plus resolved URL
///
/// Distinct nodes referencing the same URL get distinct resources, so a
/// node can reposition its audio without disturbing another's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub node_id: String,
    pub src: String,
}

impl SourceKey {
    pub fn new(node_id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            src: src.into(),
        }
    }
}

impl std::fmt::Display for SourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.node_id, self.src)
    }
}

/// Deduplicating cache of live audio handles
///
/// At most one handle exists per [`SourceKey`]. Handles are shared via
/// `Rc<RefCell<...>>`: the evaluation model is single-threaded and
/// strictly sequential per handle, so no locking is involved. A
/// multi-threaded driver would need an atomic insert-if-absent here.
#[derive(Debug, Default)]
pub struct ResourcePool {
    entries: HashMap<SourceKey, Rc<RefCell<AudioHandle>>>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `key`, creating it on first use
    ///
    /// Creation applies the platform capabilities from `config` exactly
    /// once: load hints (cross-origin, preload, inline playback) go to
    /// the factory, the autoplay-mute workaround arms the new handle.
    /// Construction itself is assumed to succeed; the only error is the
    /// empty-URL precondition.
    pub fn get_or_create(
        &mut self,
        key: SourceKey,
        factory: &dyn MediaFactory,
        config: &SyncConfig,
    ) -> Result<Rc<RefCell<AudioHandle>>> {
        if key.src.is_empty() {
            return Err(Error::InvalidSource(format!(
                "empty source URL for node {}",
                key.node_id
            )));
        }

        if let Some(handle) = self.entries.get(&key) {
            return Ok(Rc::clone(handle));
        }

        let hints = MediaLoadHints {
            inline_playback: config.capabilities.inline_playback,
            ..MediaLoadHints::default()
        };
        let backend = factory.create(&key.src, &hints);
        let handle = Rc::new(RefCell::new(AudioHandle::new(
            key.clone(),
            backend,
            &config.capabilities,
        )));
        info!("Created audio resource for {}", key);

        self.entries.insert(key, Rc::clone(&handle));
        Ok(handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
