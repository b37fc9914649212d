//! Registry: at most one live carousel handle per gallery tab.
//!
//! Handles live in a slotmap arena; a side map resolves tab ids to handle
//! ids. Disposed handles are removed from both maps immediately, so a tab that
//! is present always maps to a `Running` or `Paused` handle.

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::{debug, info};

use crate::dom::NodeId;
use crate::gallery::TabId;
use crate::time::Timestamp;

use super::config::{CarouselConfig, Layout};
use super::engine::{AttachRequest, EngineFactory};
use super::error::CarouselError;
use super::handle::{CarouselHandle, HandleId};

/// Where a new carousel attaches.
#[derive(Debug, Clone, Copy)]
pub struct Mount {
    /// The rendered container, or `None` if the view has not rendered it.
    pub container: Option<NodeId>,
    /// Number of slides inside the container.
    pub slide_count: usize,
    /// Initial layout.
    pub layout: Layout,
}

/// Keyed collection of live carousel handles.
#[derive(Debug, Default)]
pub struct Registry {
    handles: SlotMap<HandleId, CarouselHandle>,
    by_tab: HashMap<TabId, HandleId>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a handle for `tab` and start its autoplay.
    ///
    /// # Errors
    ///
    /// - [`CarouselError::AlreadyActive`] if `tab` already has a live handle.
    /// - [`CarouselError::ContainerNotFound`] if `mount.container` is `None`.
    /// - [`CarouselError::EngineAttachFailure`] if the factory fails.
    ///
    /// On error nothing is recorded.
    pub fn create(
        &mut self,
        tab: &TabId,
        config: CarouselConfig,
        mount: Mount,
        factory: &mut dyn EngineFactory,
        now: Timestamp,
    ) -> Result<HandleId, CarouselError> {
        if self.by_tab.contains_key(tab) {
            return Err(CarouselError::AlreadyActive { tab: tab.clone() });
        }
        let container = mount
            .container
            .ok_or_else(|| CarouselError::ContainerNotFound { tab: tab.clone() })?;

        let engine = factory
            .attach(AttachRequest {
                tab,
                container,
                slide_count: mount.slide_count,
                config: &config,
                layout: mount.layout,
            })
            .map_err(|err| CarouselError::EngineAttachFailure {
                tab: tab.clone(),
                reason: err.to_string(),
            })?;

        let mut handle = CarouselHandle::new(tab.clone(), container, config, engine);
        handle.resume(now);
        let id = self.handles.insert(handle);
        self.by_tab.insert(tab.clone(), id);
        info!(tab = %tab, slides = mount.slide_count, "carousel initialized and autoplay started");
        Ok(id)
    }

    /// The handle for `tab`, if live.
    pub fn get(&self, tab: &TabId) -> Option<&CarouselHandle> {
        self.by_tab.get(tab).and_then(|&id| self.handles.get(id))
    }

    /// Mutable handle for `tab`, if live.
    pub fn get_mut(&mut self, tab: &TabId) -> Option<&mut CarouselHandle> {
        let id = *self.by_tab.get(tab)?;
        self.handles.get_mut(id)
    }

    /// The handle id for `tab`, if live.
    pub fn id_of(&self, tab: &TabId) -> Option<HandleId> {
        self.by_tab.get(tab).copied()
    }

    /// Resolve a handle id. Ids of disposed handles resolve to `None`.
    pub fn handle(&self, id: HandleId) -> Option<&CarouselHandle> {
        self.handles.get(id)
    }

    /// Resolve a handle id mutably.
    pub fn handle_mut(&mut self, id: HandleId) -> Option<&mut CarouselHandle> {
        self.handles.get_mut(id)
    }

    /// Whether `tab` has a live handle.
    pub fn contains(&self, tab: &TabId) -> bool {
        self.by_tab.contains_key(tab)
    }

    /// Dispose `tab`'s handle and remove it. Returns the id and the disposed
    /// handle, so callers can cancel anything still keyed by the id.
    pub fn dispose(&mut self, tab: &TabId) -> Option<(HandleId, CarouselHandle)> {
        let id = self.by_tab.remove(tab)?;
        let mut handle = self.handles.remove(id)?;
        handle.dispose();
        debug!(tab = %tab, "carousel disposed");
        Some((id, handle))
    }

    /// Dispose every handle. Returns the ids that were released.
    pub fn dispose_all(&mut self) -> Vec<HandleId> {
        self.by_tab.clear();
        let ids: Vec<HandleId> = self.handles.keys().collect();
        for (_, mut handle) in self.handles.drain() {
            handle.dispose();
        }
        if !ids.is_empty() {
            debug!(count = ids.len(), "all carousels disposed");
        }
        ids
    }

    /// Iterate live handles.
    pub fn iter(&self) -> impl Iterator<Item = (HandleId, &CarouselHandle)> {
        self.handles.iter()
    }

    /// Iterate live handles mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (HandleId, &mut CarouselHandle)> {
        self.handles.iter_mut()
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handle is live.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
