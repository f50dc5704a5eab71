// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operation store: the authoritative state of the in-flight operation.
//!
//! One `OperationStore` exists per [`DragDropManager`](crate::DragDropManager)
//! and holds the single operation record: dragged item and type, active
//! source, hover stack, drop result and flags. Every mutation computes a
//! [`DirtyHandlers`] set and synchronously notifies subscribers; listeners
//! registered with an id filter are skipped when their ids are not dirty.
//!
//! Notification runs after the internal state borrow is released, so a
//! listener may re-query the store (or the monitor layered over it) and may
//! subscribe or unsubscribe reentrantly. A panicking listener propagates to
//! the mutating caller.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::dirty::DirtyHandlers;
use crate::handle::{HandlerId, SourceId, TargetId};
use crate::handler::{DragItem, DropResult};
use crate::types::ItemType;

/// The record pushed into the store by a successful `begin_drag` transition.
#[derive(Debug)]
pub struct BeginDragRecord {
    /// The type of the dragged item.
    pub item_type: ItemType,
    /// The dragged item payload.
    pub item: DragItem,
    /// The source the operation started from.
    pub source_id: SourceId,
    /// Whether the source is externally visible from the start.
    pub is_source_public: bool,
}

#[derive(Default)]
struct OperationState {
    item_type: Option<ItemType>,
    item: Option<DragItem>,
    source_id: Option<SourceId>,
    is_source_public: bool,
    target_ids: Vec<TargetId>,
    drop_result: DropResult,
    did_drop: bool,
}

/// A token identifying one subscription, used to unsubscribe.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

struct ListenerEntry {
    id: SubscriptionId,
    filter: Option<Vec<HandlerId>>,
    callback: Rc<dyn Fn()>,
}

/// Authoritative mutable state of the in-flight operation, with
/// minimal-diff change notification.
#[derive(Default)]
pub struct OperationStore {
    state: RefCell<OperationState>,
    dirty: RefCell<DirtyHandlers>,
    listeners: RefCell<Vec<ListenerEntry>>,
    next_subscription: Cell<u64>,
}

impl OperationStore {
    /// Creates a store in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Transitions. Only the manager calls these; each one updates the state,
    // records the dirty set, then notifies with no borrow held.

    pub(crate) fn begin_drag(&self, record: BeginDragRecord) {
        {
            let mut state = self.state.borrow_mut();
            state.item_type = Some(record.item_type);
            state.item = Some(record.item);
            state.source_id = Some(record.source_id);
            state.is_source_public = record.is_source_public;
            state.target_ids.clear();
            state.drop_result = DropResult::Missed;
            state.did_drop = false;
        }
        self.notify(DirtyHandlers::All);
    }

    pub(crate) fn publish_drag_source(&self) {
        self.state.borrow_mut().is_source_public = true;
        self.notify(DirtyHandlers::All);
    }

    /// Replaces the hover stack. Returns `true` if the stack changed; an
    /// identical stack is a free no-op with no notification.
    pub(crate) fn hover(&self, target_ids: Vec<TargetId>) -> bool {
        let dirty = {
            let mut state = self.state.borrow_mut();
            let Some(dirty) = DirtyHandlers::for_hover(&state.target_ids, &target_ids) else {
                return false;
            };
            state.target_ids = target_ids;
            dirty
        };
        self.notify(dirty);
        true
    }

    /// Removes an unregistered target from the hover stack in place,
    /// leaving sibling order intact. No-op if the target is not hovered.
    pub(crate) fn handle_remove_target(&self, target_id: TargetId) {
        let removed = {
            let mut state = self.state.borrow_mut();
            let len_before = state.target_ids.len();
            state.target_ids.retain(|id| *id != target_id);
            state.target_ids.len() != len_before
        };
        if removed {
            // Removal has no derived-state implication beyond what the
            // registry removal already implies, so no id is marked dirty;
            // unfiltered listeners still observe the change.
            self.notify(DirtyHandlers::None);
        }
    }

    pub(crate) fn record_drop(&self, drop_result: DropResult) {
        {
            let mut state = self.state.borrow_mut();
            state.drop_result = drop_result;
            state.did_drop = true;
        }
        self.notify(DirtyHandlers::All);
    }

    pub(crate) fn end_drag(&self) {
        *self.state.borrow_mut() = OperationState::default();
        self.notify(DirtyHandlers::All);
    }

    // Readers.

    /// Returns `true` while an operation is in flight.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().item_type.is_some()
    }

    /// Returns the dragged item's type, if dragging.
    #[must_use]
    pub fn item_type(&self) -> Option<ItemType> {
        self.state.borrow().item_type.clone()
    }

    /// Returns the dragged item payload, if dragging.
    #[must_use]
    pub fn item(&self) -> Option<DragItem> {
        self.state.borrow().item.clone()
    }

    /// Returns the active source id, if dragging.
    #[must_use]
    pub fn source_id(&self) -> Option<SourceId> {
        self.state.borrow().source_id
    }

    /// Returns whether the active source is externally visible.
    #[must_use]
    pub fn is_source_public(&self) -> bool {
        self.state.borrow().is_source_public
    }

    /// Returns a copy of the hover stack, outermost first. Mutating the
    /// returned list never affects the store.
    #[must_use]
    pub fn target_ids(&self) -> Vec<TargetId> {
        self.state.borrow().target_ids.clone()
    }

    /// Returns the accumulated drop result.
    #[must_use]
    pub fn drop_result(&self) -> DropResult {
        self.state.borrow().drop_result.clone()
    }

    /// Returns `true` once a drop occurred in the current operation.
    #[must_use]
    pub fn did_drop(&self) -> bool {
        self.state.borrow().did_drop
    }

    /// Returns `true` if any of `handler_ids` may have changed in the most
    /// recent mutation.
    #[must_use]
    pub fn are_dirty(&self, handler_ids: &[HandlerId]) -> bool {
        self.dirty.borrow().are_dirty(handler_ids)
    }

    // Subscription.

    /// Registers a change listener, optionally filtered to fire only when
    /// any of `handler_ids` is dirty.
    pub fn subscribe(
        &self,
        listener: impl Fn() + 'static,
        handler_ids: Option<Vec<HandlerId>>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push(ListenerEntry {
            id,
            filter: handler_ids,
            callback: Rc::new(listener),
        });
        id
    }

    /// Removes a subscription. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let len_before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        listeners.len() != len_before
    }

    fn notify(&self, dirty: DirtyHandlers) {
        *self.dirty.borrow_mut() = dirty;

        // Snapshot so listeners can (un)subscribe from inside the callback.
        let snapshot: Vec<(Option<Vec<HandlerId>>, Rc<dyn Fn()>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|entry| (entry.filter.clone(), Rc::clone(&entry.callback)))
            .collect();

        for (filter, callback) in snapshot {
            match filter {
                Some(ids) if !self.are_dirty(&ids) => {}
                _ => callback(),
            }
        }
    }
}

impl fmt::Debug for OperationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("OperationStore")
            .field("item_type", &state.item_type)
            .field("source_id", &state.source_id)
            .field("is_source_public", &state.is_source_public)
            .field("target_ids", &state.target_ids)
            .field("did_drop", &state.did_drop)
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
