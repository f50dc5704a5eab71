// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manager: component wiring and the operation transition layer.
//!
//! [`DragDropManager`] owns the registry and the operation store, hands out
//! the monitor, and is the only component that mutates the store. The four
//! phases run synchronously to completion:
//!
//! ```text
//! begin_drag → hover* → drop_item? → end_drag
//! ```
//!
//! Precondition violations are fatal to the call. The two deliberate silent
//! cases are a vetoed `begin_drag` (the source declined) and hovered targets
//! whose type does not match the dragged type (kept in the stack for
//! bookkeeping, skipped for callbacks and drop dispatch) — input backends
//! are expected to call liberally without pre-filtering.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashSet;

use crate::backend::Backend;
use crate::error::{OperationError, RegistryError};
use crate::handle::{SourceId, TargetId};
use crate::handler::{DragSource, DropResult, DropTarget};
use crate::monitor::DragMonitor;
use crate::registry::HandlerRegistry;
use crate::store::{BeginDragRecord, OperationStore};
use crate::types::{ItemType, TargetTypes};

/// Options for [`DragDropManager::begin_drag_with`].
#[derive(Copy, Clone, Debug)]
pub struct BeginDragOptions {
    /// Whether the source is externally visible from the start. Backends
    /// that defer visibility until a drag threshold is crossed pass `false`
    /// here and call
    /// [`publish_drag_source`](DragDropManager::publish_drag_source) later.
    pub publish_source: bool,
}

impl Default for BeginDragOptions {
    fn default() -> Self {
        Self {
            publish_source: true,
        }
    }
}

/// Coordinates one logical drag-and-drop operation at a time.
pub struct DragDropManager {
    registry: Rc<RefCell<HandlerRegistry>>,
    store: Rc<OperationStore>,
    monitor: DragMonitor,
    backend: RefCell<Option<Rc<dyn Backend>>>,
}

impl Default for DragDropManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DragDropManager {
    /// Creates a manager with an empty registry and an idle store.
    #[must_use]
    pub fn new() -> Self {
        let registry = Rc::new(RefCell::new(HandlerRegistry::new()));
        let store = Rc::new(OperationStore::new());
        let monitor = DragMonitor::new(Rc::clone(&registry), Rc::clone(&store));
        Self {
            registry,
            store,
            monitor,
            backend: RefCell::new(None),
        }
    }

    /// Returns the query facade.
    #[must_use]
    pub fn monitor(&self) -> &DragMonitor {
        &self.monitor
    }

    /// Attaches an input backend. If handlers are already registered, its
    /// `setup` hook runs immediately.
    pub fn set_backend(&self, backend: Rc<dyn Backend>) {
        if self.registry.borrow().handler_count() > 0 {
            backend.setup();
        }
        *self.backend.borrow_mut() = Some(backend);
    }

    // Registration. These wrap the registry so backend lifecycle hooks and
    // the hover-stack bookkeeping stay consistent with the live table.

    /// Registers a drag source under exactly one item type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateHandler`] if the handler instance
    /// is already registered.
    pub fn add_source(
        &self,
        item_type: impl Into<ItemType>,
        handler: Rc<dyn DragSource>,
    ) -> Result<SourceId, RegistryError> {
        let was_empty = self.registry.borrow().handler_count() == 0;
        let id = self
            .registry
            .borrow_mut()
            .add_source(item_type.into(), handler)?;
        if was_empty {
            if let Some(backend) = self.backend.borrow().as_ref() {
                backend.setup();
            }
        }
        Ok(id)
    }

    /// Registers a drop target under an accepted-type set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateHandler`] if the handler instance
    /// is already registered.
    pub fn add_target(
        &self,
        accepts: impl Into<TargetTypes>,
        handler: Rc<dyn DropTarget>,
    ) -> Result<TargetId, RegistryError> {
        let was_empty = self.registry.borrow().handler_count() == 0;
        let id = self
            .registry
            .borrow_mut()
            .add_target(accepts.into(), handler)?;
        if was_empty {
            if let Some(backend) = self.backend.borrow().as_ref() {
                backend.setup();
            }
        }
        Ok(id)
    }

    /// Removes a source registration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn remove_source(&self, id: SourceId) -> Result<(), RegistryError> {
        self.registry.borrow_mut().remove_source(id)?;
        self.maybe_teardown();
        Ok(())
    }

    /// Removes a target registration. If the target is currently hovered it
    /// is removed from the hover stack in the same call, leaving the other
    /// entries' order intact.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if the id has no live entry.
    pub fn remove_target(&self, id: TargetId) -> Result<(), RegistryError> {
        self.registry.borrow_mut().remove_target(id)?;
        self.store.handle_remove_target(id);
        self.maybe_teardown();
        Ok(())
    }

    /// Returns the item type a source was registered under.
    #[must_use]
    pub fn source_type(&self, id: SourceId) -> Option<ItemType> {
        self.registry.borrow().source_type(id).cloned()
    }

    /// Returns the accepted-type set a target was registered under.
    #[must_use]
    pub fn target_types(&self, id: TargetId) -> Option<TargetTypes> {
        self.registry.borrow().target_types(id).cloned()
    }

    fn maybe_teardown(&self) {
        if self.registry.borrow().handler_count() == 0 {
            if let Some(backend) = self.backend.borrow().as_ref() {
                backend.teardown();
            }
        }
    }

    // Transitions.

    /// Begins an operation from the given source with default options.
    ///
    /// A source whose `can_drag` declines is a silent no-op, not an error:
    /// backends call this for every candidate gesture.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::AlreadyDragging`] if an operation is in
    /// flight, or a registry error if the source is not registered.
    pub fn begin_drag(&self, source_id: SourceId) -> Result<(), OperationError> {
        self.begin_drag_with(source_id, BeginDragOptions::default())
    }

    /// Begins an operation from the given source.
    ///
    /// # Errors
    ///
    /// See [`begin_drag`](Self::begin_drag).
    pub fn begin_drag_with(
        &self,
        source_id: SourceId,
        options: BeginDragOptions,
    ) -> Result<(), OperationError> {
        if self.store.is_dragging() {
            return Err(OperationError::AlreadyDragging);
        }
        if !self.monitor.can_drag_source(source_id)? {
            return Ok(());
        }

        let (handler, item_type) = {
            let registry = self.registry.borrow();
            let handler = registry
                .source(source_id, false)
                .ok_or(RegistryError::NotRegistered(source_id.handler_id()))?;
            let item_type = registry
                .source_type(source_id)
                .cloned()
                .ok_or(RegistryError::NotRegistered(source_id.handler_id()))?;
            (handler, item_type)
        };

        let item = handler.begin_drag(&self.monitor, source_id);
        self.registry.borrow_mut().pin_source(source_id)?;
        self.store.begin_drag(BeginDragRecord {
            item_type,
            item,
            source_id,
            is_source_public: options.publish_source,
        });
        Ok(())
    }

    /// Marks the active source as externally visible. A silent no-op while
    /// idle, so backends may call it unconditionally once their threshold
    /// is crossed.
    pub fn publish_drag_source(&self) {
        if !self.store.is_dragging() {
            return;
        }
        self.store.publish_drag_source();
    }

    /// Replaces the hover stack, outermost target first.
    ///
    /// Every hovered target whose type matches the dragged type gets its
    /// `hover` callback (observing the previous stack); non-matching targets
    /// stay in the stack for bookkeeping but are not notified. The store is
    /// only updated, and subscribers only notified, if the stack actually
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotDragging`] while idle,
    /// [`OperationError::AlreadyDropped`] after a drop,
    /// [`OperationError::DuplicateTarget`] for a repeated entry, and
    /// [`OperationError::UnregisteredTarget`] for an unresolvable id.
    pub fn hover(&self, target_ids: &[TargetId]) -> Result<(), OperationError> {
        if !self.store.is_dragging() {
            return Err(OperationError::NotDragging);
        }
        if self.store.did_drop() {
            return Err(OperationError::AlreadyDropped);
        }

        let mut seen = HashSet::with_capacity(target_ids.len());
        for &id in target_ids {
            if !seen.insert(id) {
                return Err(OperationError::DuplicateTarget(id));
            }
        }

        let Some(dragged) = self.store.item_type() else {
            return Err(OperationError::NotDragging);
        };

        let mut to_notify: Vec<(Rc<dyn DropTarget>, TargetId)> = Vec::new();
        {
            let registry = self.registry.borrow();
            for &id in target_ids {
                let Some(handler) = registry.target(id) else {
                    return Err(OperationError::UnregisteredTarget(id));
                };
                let matches = registry
                    .target_types(id)
                    .is_some_and(|accepts| accepts.matches(&dragged));
                if matches {
                    to_notify.push((handler, id));
                }
            }
        }

        for (handler, id) in to_notify {
            handler.hover(&self.monitor, id);
        }

        self.store.hover(target_ids.to_vec());
        Ok(())
    }

    /// Performs the drop phase.
    ///
    /// The hover stack is filtered by
    /// [`can_drop_on_target`](DragMonitor::can_drop_on_target) and processed
    /// innermost first. Each target's `drop` return feeds the accumulated
    /// result: an explicit payload replaces it, the innermost `None` becomes
    /// [`DropResult::Handled`], and an outer `None` inherits whatever the
    /// nested child produced. Outer targets observe the inner result through
    /// the monitor before returning their own.
    ///
    /// With no eligible target this is a silent no-op: no state change, no
    /// notification, and `did_drop` stays `false`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotDragging`] while idle and
    /// [`OperationError::AlreadyDropped`] if called twice in one operation.
    pub fn drop_item(&self) -> Result<(), OperationError> {
        if !self.store.is_dragging() {
            return Err(OperationError::NotDragging);
        }
        if self.store.did_drop() {
            return Err(OperationError::AlreadyDropped);
        }

        let mut eligible: Vec<TargetId> = Vec::new();
        for id in self.store.target_ids() {
            if self.monitor.can_drop_on_target(id)? {
                eligible.push(id);
            }
        }
        eligible.reverse();

        for (index, id) in eligible.iter().copied().enumerate() {
            let handler = self
                .registry
                .borrow()
                .target(id)
                .ok_or(OperationError::UnregisteredTarget(id))?;

            let result = match DropTarget::drop(&*handler, &self.monitor, id) {
                Some(payload) => DropResult::Payload(payload),
                None if index == 0 => DropResult::Handled,
                None => self.store.drop_result(),
            };
            self.store.record_drop(result);
        }
        Ok(())
    }

    /// Completes the operation.
    ///
    /// The active source is resolved through the pinned side channel, so a
    /// source unregistered mid-drag still receives `end_drag` and can read
    /// the final drop result from the monitor before the store is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NotDragging`] while idle.
    pub fn end_drag(&self) -> Result<(), OperationError> {
        let Some(source_id) = self.store.source_id() else {
            return Err(OperationError::NotDragging);
        };

        let handler = self
            .registry
            .borrow()
            .source(source_id, true)
            .ok_or(RegistryError::NotRegistered(source_id.handler_id()))?;

        handler.end_drag(&self.monitor, source_id);
        self.registry.borrow_mut().unpin_source()?;
        self.store.end_drag();
        Ok(())
    }
}

impl fmt::Debug for DragDropManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDropManager")
            .field("registry", &self.registry.borrow())
            .field("is_dragging", &self.store.is_dragging())
            .field("has_backend", &self.backend.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::handler::{DragItem, DropPayload};
    use alloc::vec;
    use core::cell::Cell;

    struct Card;

    #[derive(Default)]
    struct Source {
        draggable: Cell<bool>,
        began: Cell<u32>,
        end_drag_result: RefCell<Option<DropResult>>,
    }

    impl Source {
        fn draggable() -> Self {
            let source = Self::default();
            source.draggable.set(true);
            source
        }
    }

    impl DragSource for Source {
        fn can_drag(&self, _monitor: &DragMonitor, _source_id: SourceId) -> bool {
            self.draggable.get()
        }

        fn begin_drag(&self, _monitor: &DragMonitor, _source_id: SourceId) -> DragItem {
            self.began.set(self.began.get() + 1);
            DragItem::new(Card)
        }

        fn end_drag(&self, monitor: &DragMonitor, _source_id: SourceId) {
            *self.end_drag_result.borrow_mut() = Some(monitor.drop_result());
        }
    }

    #[derive(Default)]
    struct Target {
        droppable: Cell<bool>,
        hovered: Cell<u32>,
        dropped: Cell<u32>,
        result: RefCell<Option<i32>>,
        observed_inner: Cell<Option<i32>>,
    }

    impl Target {
        fn accepting() -> Self {
            let target = Self::default();
            target.droppable.set(true);
            target
        }

        fn with_result(result: i32) -> Self {
            let target = Self::accepting();
            *target.result.borrow_mut() = Some(result);
            target
        }
    }

    impl DropTarget for Target {
        fn can_drop(&self, _monitor: &DragMonitor, _target_id: TargetId) -> bool {
            self.droppable.get()
        }

        fn hover(&self, _monitor: &DragMonitor, _target_id: TargetId) {
            self.hovered.set(self.hovered.get() + 1);
        }

        fn drop(&self, monitor: &DragMonitor, _target_id: TargetId) -> Option<DropPayload> {
            self.dropped.set(self.dropped.get() + 1);
            let inner = monitor
                .drop_result()
                .payload()
                .and_then(|p| p.downcast_ref::<i32>().copied());
            self.observed_inner.set(inner);
            self.result.borrow().map(DropPayload::new)
        }
    }

    fn manager_with_source() -> (DragDropManager, Rc<Source>, SourceId) {
        let manager = DragDropManager::new();
        let source = Rc::new(Source::draggable());
        let id = manager.add_source("card", Rc::clone(&source) as Rc<dyn DragSource>).unwrap();
        (manager, source, id)
    }

    #[test]
    fn begin_drag_populates_operation_state() {
        let (manager, source, id) = manager_with_source();

        manager.begin_drag(id).unwrap();
        assert_eq!(source.began.get(), 1);
        assert!(manager.monitor().is_dragging());
        assert_eq!(manager.monitor().source_id(), Some(id));
        assert!(manager.monitor().item().unwrap().is::<Card>());
        assert!(manager.monitor().is_source_public());
    }

    #[test]
    fn begin_drag_while_dragging_is_fatal() {
        let (manager, _source, id) = manager_with_source();

        manager.begin_drag(id).unwrap();
        assert_eq!(manager.begin_drag(id), Err(OperationError::AlreadyDragging));
    }

    #[test]
    fn vetoed_begin_drag_is_a_silent_no_op() {
        let manager = DragDropManager::new();
        let source = Rc::new(Source::default());
        let id = manager
            .add_source("card", Rc::clone(&source) as Rc<dyn DragSource>)
            .unwrap();

        manager.begin_drag(id).unwrap();
        assert_eq!(source.began.get(), 0);
        assert!(!manager.monitor().is_dragging());
    }

    #[test]
    fn begin_drag_on_unregistered_source_is_fatal() {
        let (manager, _source, id) = manager_with_source();
        manager.remove_source(id).unwrap();

        assert_eq!(
            manager.begin_drag(id),
            Err(OperationError::Registry(RegistryError::NotRegistered(
                id.handler_id()
            )))
        );
    }

    #[test]
    fn no_source_can_drag_while_an_operation_is_in_flight() {
        let (manager, _source, id) = manager_with_source();
        let other = manager
            .add_source("card", Rc::new(Source::draggable()) as Rc<dyn DragSource>)
            .unwrap();

        assert!(manager.monitor().can_drag_source(other).unwrap());
        manager.begin_drag(id).unwrap();
        assert!(!manager.monitor().can_drag_source(other).unwrap());
        assert!(!manager.monitor().can_drag_source(id).unwrap());

        manager.end_drag().unwrap();
        assert!(manager.monitor().can_drag_source(other).unwrap());
    }

    #[test]
    fn deferred_publication_flow() {
        let (manager, _source, id) = manager_with_source();

        manager
            .begin_drag_with(
                id,
                BeginDragOptions {
                    publish_source: false,
                },
            )
            .unwrap();
        assert!(!manager.monitor().is_source_public());
        assert!(!manager.monitor().is_dragging_source(id).unwrap());

        manager.publish_drag_source();
        assert!(manager.monitor().is_source_public());
        assert!(manager.monitor().is_dragging_source(id).unwrap());
    }

    #[test]
    fn publish_while_idle_is_a_silent_no_op() {
        let manager = DragDropManager::new();
        manager.publish_drag_source();
        assert!(!manager.monitor().is_dragging());
    }

    #[test]
    fn hover_requires_an_operation() {
        let manager = DragDropManager::new();
        assert_eq!(manager.hover(&[]), Err(OperationError::NotDragging));
    }

    #[test]
    fn hover_rejects_duplicates_and_unregistered_targets() {
        let (manager, _source, id) = manager_with_source();
        let target = manager
            .add_target("card", Rc::new(Target::accepting()) as Rc<dyn DropTarget>)
            .unwrap();
        manager.begin_drag(id).unwrap();

        assert_eq!(
            manager.hover(&[target, target]),
            Err(OperationError::DuplicateTarget(target))
        );

        let gone = manager
            .add_target("card", Rc::new(Target::accepting()) as Rc<dyn DropTarget>)
            .unwrap();
        manager.remove_target(gone).unwrap();
        assert_eq!(
            manager.hover(&[target, gone]),
            Err(OperationError::UnregisteredTarget(gone))
        );
    }

    #[test]
    fn hover_notifies_only_matching_targets_but_stacks_all() {
        let (manager, _source, id) = manager_with_source();
        let matching = Rc::new(Target::accepting());
        let mismatched = Rc::new(Target::accepting());
        let matching_id = manager
            .add_target("card", Rc::clone(&matching) as Rc<dyn DropTarget>)
            .unwrap();
        let mismatched_id = manager
            .add_target("file", Rc::clone(&mismatched) as Rc<dyn DropTarget>)
            .unwrap();

        manager.begin_drag(id).unwrap();
        manager.hover(&[mismatched_id, matching_id]).unwrap();

        assert_eq!(matching.hovered.get(), 1);
        assert_eq!(mismatched.hovered.get(), 0);
        assert_eq!(
            manager.monitor().target_ids(),
            vec![mismatched_id, matching_id]
        );
        assert!(!manager.monitor().is_over_target(mismatched_id, false));
        assert!(manager.monitor().is_over_target(matching_id, true));
    }

    #[test]
    fn drop_with_no_hovered_target_reports_missed() {
        let (manager, source, id) = manager_with_source();

        manager.begin_drag(id).unwrap();
        manager.drop_item().unwrap();

        // No eligible target: nothing recorded, drop can notionally still
        // happen later in this operation.
        assert!(!manager.monitor().did_drop());

        manager.end_drag().unwrap();
        let result = source.end_drag_result.borrow();
        assert!(!result.as_ref().unwrap().was_handled());
    }

    #[test]
    fn sole_target_with_no_result_defaults_to_handled() {
        let (manager, source, id) = manager_with_source();
        let target = Rc::new(Target::accepting());
        let target_id = manager
            .add_target("card", Rc::clone(&target) as Rc<dyn DropTarget>)
            .unwrap();

        manager.begin_drag(id).unwrap();
        manager.hover(&[target_id]).unwrap();
        manager.drop_item().unwrap();

        assert!(manager.monitor().did_drop());
        assert_eq!(target.dropped.get(), 1);

        manager.end_drag().unwrap();
        let result = source.end_drag_result.borrow();
        assert!(matches!(result.as_ref(), Some(DropResult::Handled)));
    }

    #[test]
    fn nested_drop_processes_innermost_first_and_outer_result_wins() {
        let (manager, source, id) = manager_with_source();
        let a = Rc::new(Target::accepting());
        let b = Rc::new(Target::with_result(16));
        let c = Rc::new(Target::with_result(42));
        let a_id = manager.add_target("card", Rc::clone(&a) as Rc<dyn DropTarget>).unwrap();
        let b_id = manager.add_target("card", Rc::clone(&b) as Rc<dyn DropTarget>).unwrap();
        let c_id = manager.add_target("card", Rc::clone(&c) as Rc<dyn DropTarget>).unwrap();

        manager.begin_drag(id).unwrap();
        manager.hover(&[a_id, b_id, c_id]).unwrap();
        manager.drop_item().unwrap();

        // Innermost first: C saw no prior result, B saw C's 42, A (returning
        // nothing) inherited B's 16 rather than resetting it.
        assert_eq!(c.observed_inner.get(), None);
        assert_eq!(b.observed_inner.get(), Some(42));
        assert_eq!(a.observed_inner.get(), Some(16));

        manager.end_drag().unwrap();
        let result = source.end_drag_result.borrow();
        let payload = result.as_ref().unwrap().payload().unwrap();
        assert_eq!(payload.downcast_ref::<i32>(), Some(&16));
    }

    #[test]
    fn drop_skips_targets_that_decline_or_mismatch() {
        let (manager, _source, id) = manager_with_source();
        let declining = Rc::new(Target::default());
        let mismatched = Rc::new(Target::accepting());
        let accepting = Rc::new(Target::accepting());
        let declining_id = manager
            .add_target("card", Rc::clone(&declining) as Rc<dyn DropTarget>)
            .unwrap();
        let mismatched_id = manager
            .add_target("file", Rc::clone(&mismatched) as Rc<dyn DropTarget>)
            .unwrap();
        let accepting_id = manager
            .add_target("card", Rc::clone(&accepting) as Rc<dyn DropTarget>)
            .unwrap();

        manager.begin_drag(id).unwrap();
        manager
            .hover(&[declining_id, mismatched_id, accepting_id])
            .unwrap();
        manager.drop_item().unwrap();

        assert_eq!(declining.dropped.get(), 0);
        assert_eq!(mismatched.dropped.get(), 0);
        assert_eq!(accepting.dropped.get(), 1);
    }

    #[test]
    fn drop_twice_is_fatal_and_blocks_further_hovers() {
        let (manager, _source, id) = manager_with_source();
        let target_id = manager
            .add_target("card", Rc::new(Target::accepting()) as Rc<dyn DropTarget>)
            .unwrap();

        manager.begin_drag(id).unwrap();
        manager.hover(&[target_id]).unwrap();
        manager.drop_item().unwrap();

        assert_eq!(manager.drop_item(), Err(OperationError::AlreadyDropped));
        assert_eq!(
            manager.hover(&[target_id]),
            Err(OperationError::AlreadyDropped)
        );
        assert!(!manager.monitor().can_drop_on_target(target_id).unwrap());
    }

    #[test]
    fn end_drag_reaches_a_source_removed_mid_drag() {
        let (manager, source, id) = manager_with_source();

        manager.begin_drag(id).unwrap();
        manager.remove_source(id).unwrap();
        manager.end_drag().unwrap();

        assert!(source.end_drag_result.borrow().is_some());
        assert!(!manager.monitor().is_dragging());
    }

    #[test]
    fn end_drag_while_idle_is_fatal() {
        let manager = DragDropManager::new();
        assert_eq!(manager.end_drag(), Err(OperationError::NotDragging));
    }

    #[test]
    fn unregistering_a_hovered_target_updates_the_stack() {
        let (manager, _source, id) = manager_with_source();
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(
                manager
                    .add_target("card", Rc::new(Target::accepting()) as Rc<dyn DropTarget>)
                    .unwrap(),
            );
        }

        manager.begin_drag(id).unwrap();
        manager.hover(&ids).unwrap();

        manager.remove_target(ids[1]).unwrap();
        assert_eq!(manager.monitor().target_ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn backend_lifecycle_follows_the_handler_count() {
        let manager = DragDropManager::new();
        let backend = Rc::new(TestBackend::new());
        manager.set_backend(Rc::clone(&backend) as Rc<dyn Backend>);
        assert!(!backend.is_set_up());

        let source = manager
            .add_source("card", Rc::new(Source::draggable()) as Rc<dyn DragSource>)
            .unwrap();
        assert_eq!(backend.setup_calls(), 1);

        let target = manager
            .add_target("card", Rc::new(Target::accepting()) as Rc<dyn DropTarget>)
            .unwrap();
        assert_eq!(backend.setup_calls(), 1);

        manager.remove_source(source).unwrap();
        assert!(backend.is_set_up());
        manager.remove_target(target).unwrap();
        assert!(!backend.is_set_up());
        assert_eq!(backend.teardown_calls(), 1);
    }

    #[test]
    fn backend_attached_late_sets_up_immediately() {
        let manager = DragDropManager::new();
        manager
            .add_source("card", Rc::new(Source::draggable()) as Rc<dyn DragSource>)
            .unwrap();

        let backend = Rc::new(TestBackend::new());
        manager.set_backend(Rc::clone(&backend) as Rc<dyn Backend>);
        assert!(backend.is_set_up());
    }

    #[test]
    fn mirror_source_overrides_is_dragging() {
        struct Mirror;

        impl DragSource for Mirror {
            fn begin_drag(&self, _monitor: &DragMonitor, _source_id: SourceId) -> DragItem {
                DragItem::new(Card)
            }

            fn is_dragging(&self, monitor: &DragMonitor, _source_id: SourceId) -> bool {
                // Considers itself dragging whenever a card drag is live.
                monitor.item_type() == Some(ItemType::from("card"))
            }
        }

        let (manager, _source, id) = manager_with_source();
        let mirror = manager
            .add_source("card", Rc::new(Mirror) as Rc<dyn DragSource>)
            .unwrap();

        manager.begin_drag(id).unwrap();
        assert!(manager.monitor().is_dragging_source(id).unwrap());
        assert!(manager.monitor().is_dragging_source(mirror).unwrap());
    }
}
