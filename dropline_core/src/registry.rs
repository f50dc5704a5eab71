// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler registry.
//!
//! Owns every registered source and target handler, keyed by role-tagged
//! ids, and the pinned-source side channel that keeps the active source's
//! handler reachable after mid-drag unregistration.

use alloc::rc::Rc;
use core::fmt;

use hashbrown::HashMap;

use crate::error::RegistryError;
use crate::handle::{SourceId, TargetId};
use crate::handler::{DragSource, DropTarget};
use crate::types::{ItemType, TargetTypes};

struct SourceEntry {
    item_type: ItemType,
    handler: Rc<dyn DragSource>,
}

struct TargetEntry {
    accepts: TargetTypes,
    handler: Rc<dyn DropTarget>,
}

struct PinnedSource {
    id: SourceId,
    handler: Rc<dyn DragSource>,
}

/// Identity and capability bookkeeping for sources and targets.
///
/// Handlers are stored behind `Rc` and never copied or mutated; the same
/// handler instance may not be registered twice. Ids are allocated from a
/// single monotonic sequence and never reused.
#[derive(Default)]
pub struct HandlerRegistry {
    sources: HashMap<SourceId, SourceEntry>,
    targets: HashMap<TargetId, TargetEntry>,
    next_seq: u32,
    pinned: Option<PinnedSource>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u32 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Registers a drag source under exactly one item type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateHandler`] if this handler instance
    /// is already registered.
    pub fn add_source(
        &mut self,
        item_type: ItemType,
        handler: Rc<dyn DragSource>,
    ) -> Result<SourceId, RegistryError> {
        if self
            .sources
            .values()
            .any(|entry| Rc::ptr_eq(&entry.handler, &handler))
        {
            return Err(RegistryError::DuplicateHandler);
        }

        let id = SourceId::new(self.next_seq());
        self.sources.insert(id, SourceEntry { item_type, handler });
        Ok(id)
    }

    /// Registers a drop target under an accepted-type set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateHandler`] if this handler instance
    /// is already registered.
    pub fn add_target(
        &mut self,
        accepts: TargetTypes,
        handler: Rc<dyn DropTarget>,
    ) -> Result<TargetId, RegistryError> {
        if self
            .targets
            .values()
            .any(|entry| Rc::ptr_eq(&entry.handler, &handler))
        {
            return Err(RegistryError::DuplicateHandler);
        }

        let id = TargetId::new(self.next_seq());
        self.targets.insert(id, TargetEntry { accepts, handler });
        Ok(id)
    }

    /// Resolves a source handler.
    ///
    /// With `include_pinned`, a handler that was unregistered mid-drag is
    /// still returned as long as it is the pinned active source.
    #[must_use]
    pub fn source(&self, id: SourceId, include_pinned: bool) -> Option<Rc<dyn DragSource>> {
        if include_pinned {
            if let Some(pinned) = &self.pinned {
                if pinned.id == id {
                    return Some(Rc::clone(&pinned.handler));
                }
            }
        }
        self.sources.get(&id).map(|entry| Rc::clone(&entry.handler))
    }

    /// Resolves a target handler.
    #[must_use]
    pub fn target(&self, id: TargetId) -> Option<Rc<dyn DropTarget>> {
        self.targets.get(&id).map(|entry| Rc::clone(&entry.handler))
    }

    /// Returns the item type a source was registered under.
    #[must_use]
    pub fn source_type(&self, id: SourceId) -> Option<&ItemType> {
        self.sources.get(&id).map(|entry| &entry.item_type)
    }

    /// Returns the accepted-type set a target was registered under.
    #[must_use]
    pub fn target_types(&self, id: TargetId) -> Option<&TargetTypes> {
        self.targets.get(&id).map(|entry| &entry.accepts)
    }

    /// Removes a source registration. The handler itself is not notified.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn remove_source(&mut self, id: SourceId) -> Result<(), RegistryError> {
        self.sources
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::NotRegistered(id.handler_id()))
    }

    /// Removes a target registration. The handler itself is not notified.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn remove_target(&mut self, id: TargetId) -> Result<(), RegistryError> {
        self.targets
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::NotRegistered(id.handler_id()))
    }

    /// Captures the active source in the side channel for the duration of
    /// an operation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn pin_source(&mut self, id: SourceId) -> Result<(), RegistryError> {
        let handler = self
            .source(id, false)
            .ok_or(RegistryError::NotRegistered(id.handler_id()))?;
        self.pinned = Some(PinnedSource { id, handler });
        Ok(())
    }

    /// Releases the pinned source.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NothingPinned`] if no source is pinned.
    pub fn unpin_source(&mut self) -> Result<(), RegistryError> {
        if self.pinned.take().is_none() {
            return Err(RegistryError::NothingPinned);
        }
        Ok(())
    }

    /// Returns the id of the pinned source, if any.
    #[must_use]
    pub fn pinned_source_id(&self) -> Option<SourceId> {
        self.pinned.as_ref().map(|pinned| pinned.id)
    }

    /// Returns the number of live registrations (sources and targets).
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.sources.len() + self.targets.len()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("sources", &self.sources.len())
            .field("targets", &self.targets.len())
            .field("next_seq", &self.next_seq)
            .field("pinned", &self.pinned_source_id())
            .finish()
    }
}
