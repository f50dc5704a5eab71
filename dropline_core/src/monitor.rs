// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monitor: stateless derived queries over the registry and the store.
//!
//! The monitor owns no operation state of its own. It combines the stored
//! snapshot with handler-supplied predicates and the type-matching rule, and
//! re-exposes the store's subscription mechanism. Handler callbacks receive
//! a `&DragMonitor` so they can read mid-operation state synchronously.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::error::RegistryError;
use crate::handle::{HandlerId, SourceId, TargetId};
use crate::handler::{DragItem, DropResult};
use crate::registry::HandlerRegistry;
use crate::store::{OperationStore, SubscriptionId};
use crate::types::ItemType;

/// Read-only query facade over the handler registry and operation store.
#[derive(Clone)]
pub struct DragMonitor {
    registry: Rc<RefCell<HandlerRegistry>>,
    store: Rc<OperationStore>,
}

impl DragMonitor {
    pub(crate) fn new(registry: Rc<RefCell<HandlerRegistry>>, store: Rc<OperationStore>) -> Self {
        Self { registry, store }
    }

    /// Whether a drag may begin from this source: no operation in progress
    /// and the handler's `can_drag` predicate holds.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn can_drag_source(&self, source_id: SourceId) -> Result<bool, RegistryError> {
        let handler = self
            .registry
            .borrow()
            .source(source_id, false)
            .ok_or(RegistryError::NotRegistered(source_id.handler_id()))?;

        if self.is_dragging() {
            return Ok(false);
        }
        // Registry borrow released above; the predicate may re-query us.
        Ok(handler.can_drag(self, source_id))
    }

    /// Whether a drop on this target would currently be accepted: an
    /// operation is in flight, no drop occurred yet, the target's type set
    /// matches the dragged type, and the handler's `can_drop` holds.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn can_drop_on_target(&self, target_id: TargetId) -> Result<bool, RegistryError> {
        let (handler, matches) = {
            let registry = self.registry.borrow();
            let handler = registry
                .target(target_id)
                .ok_or(RegistryError::NotRegistered(target_id.handler_id()))?;
            let matches = match (registry.target_types(target_id), self.store.item_type()) {
                (Some(accepts), Some(dragged)) => accepts.matches(&dragged),
                _ => false,
            };
            (handler, matches)
        };

        if !self.is_dragging() || self.did_drop() || !matches {
            return Ok(false);
        }
        Ok(handler.can_drop(self, target_id))
    }

    /// Returns `true` while an operation is in flight.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.store.is_dragging()
    }

    /// Whether this particular source is the one being dragged: dragging,
    /// publicly visible, type-matching, and the handler's `is_dragging`
    /// predicate (default: "this is the active source handle") holds.
    ///
    /// The source is resolved through the pinned side channel, so a source
    /// unregistered mid-drag still answers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id resolves neither
    /// to a live entry nor to the pinned source.
    pub fn is_dragging_source(&self, source_id: SourceId) -> Result<bool, RegistryError> {
        let (handler, source_type) = {
            let registry = self.registry.borrow();
            let handler = registry
                .source(source_id, true)
                .ok_or(RegistryError::NotRegistered(source_id.handler_id()))?;
            (handler, registry.source_type(source_id).cloned())
        };

        if !self.is_dragging() || !self.is_source_public() {
            return Ok(false);
        }
        if source_type != self.item_type() {
            return Ok(false);
        }
        Ok(handler.is_dragging(self, source_id))
    }

    /// Whether the target is currently hovered. With `shallow`, only the
    /// innermost (most recently entered) target answers `true`; otherwise
    /// any position in the hover stack counts.
    ///
    /// Unregistered targets and non-matching types answer `false`.
    #[must_use]
    pub fn is_over_target(&self, target_id: TargetId, shallow: bool) -> bool {
        if !self.is_dragging() {
            return false;
        }

        let matches = {
            let registry = self.registry.borrow();
            match (registry.target_types(target_id), self.store.item_type()) {
                (Some(accepts), Some(dragged)) => accepts.matches(&dragged),
                _ => false,
            }
        };
        if !matches {
            return false;
        }

        let target_ids = self.store.target_ids();
        if shallow {
            target_ids.last() == Some(&target_id)
        } else {
            target_ids.contains(&target_id)
        }
    }

    /// Returns the dragged item's type, if dragging.
    #[must_use]
    pub fn item_type(&self) -> Option<ItemType> {
        self.store.item_type()
    }

    /// Returns the dragged item payload, if dragging.
    #[must_use]
    pub fn item(&self) -> Option<DragItem> {
        self.store.item()
    }

    /// Returns the active source id, if dragging.
    #[must_use]
    pub fn source_id(&self) -> Option<SourceId> {
        self.store.source_id()
    }

    /// Returns a copy of the hover stack, outermost first.
    #[must_use]
    pub fn target_ids(&self) -> Vec<TargetId> {
        self.store.target_ids()
    }

    /// Returns the accumulated drop result.
    #[must_use]
    pub fn drop_result(&self) -> DropResult {
        self.store.drop_result()
    }

    /// Returns `true` once a drop occurred in the current operation.
    #[must_use]
    pub fn did_drop(&self) -> bool {
        self.store.did_drop()
    }

    /// Returns whether the active source is externally visible.
    #[must_use]
    pub fn is_source_public(&self) -> bool {
        self.store.is_source_public()
    }

    /// Registers a change listener, optionally filtered to fire only when
    /// any of `handler_ids` changed. Unsubscribe with
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(
        &self,
        listener: impl Fn() + 'static,
        handler_ids: Option<Vec<HandlerId>>,
    ) -> SubscriptionId {
        self.store.subscribe(listener, handler_ids)
    }

    /// Removes a subscription. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }
}

impl fmt::Debug for DragMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragMonitor")
            .field("is_dragging", &self.is_dragging())
            .field("source_id", &self.source_id())
            .field("did_drop", &self.did_drop())
            .finish_non_exhaustive()
    }
}
