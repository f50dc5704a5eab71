// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropline Offset: pointer-offset tracking for drag-and-drop operations.
//!
//! This crate is the optional companion to `dropline_core`. The core state
//! machine is deliberately coordinate-free; rendering layers that want to
//! draw a drag preview need the pointer offsets. An [`OffsetStore`] is fed
//! by the input backend in parallel with the core manager — it observes the
//! same `begin_drag`/`hover`/`drop`/`end_drag` transitions but is otherwise
//! independent, so headless uses of the core simply omit it.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use dropline_offset::OffsetStore;
//!
//! let offsets = OffsetStore::new();
//!
//! // Backend: drag began with the pointer at (10, 10) and the dragged
//! // source's origin at (4, 4).
//! offsets.begin_drag(Some(Point::new(10.0, 10.0)), Some(Point::new(4.0, 4.0)));
//!
//! // Pointer moved.
//! offsets.hover(Some(Point::new(25.0, 30.0)));
//! assert_eq!(offsets.difference_from_initial_offset(), Some(Vec2::new(15.0, 20.0)));
//!
//! // The source origin shifted by the same amount.
//! assert_eq!(offsets.source_client_offset(), Some(Point::new(19.0, 24.0)));
//!
//! offsets.end_drag();
//! assert_eq!(offsets.client_offset(), None);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature for
//! `no_std` numeric support in kurbo.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Vec2};

#[derive(Copy, Clone, Default)]
struct OffsetState {
    initial_client_offset: Option<Point>,
    initial_source_client_offset: Option<Point>,
    client_offset: Option<Point>,
}

/// A token identifying one subscription, used to unsubscribe.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

struct ListenerEntry {
    id: SubscriptionId,
    callback: Rc<dyn Fn()>,
}

/// Pointer offsets for the in-flight drag operation.
///
/// All offsets are `None` while idle. Listeners are notified synchronously
/// on every change; a hover with an unchanged offset is coalesced away.
#[derive(Default)]
pub struct OffsetStore {
    state: Cell<OffsetState>,
    listeners: RefCell<Vec<ListenerEntry>>,
    next_subscription: Cell<u64>,
}

impl OffsetStore {
    /// Creates a store in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the offsets captured when the drag began.
    pub fn begin_drag(
        &self,
        client_offset: Option<Point>,
        source_client_offset: Option<Point>,
    ) {
        self.state.set(OffsetState {
            initial_client_offset: client_offset,
            initial_source_client_offset: source_client_offset,
            client_offset,
        });
        self.notify();
    }

    /// Updates the current pointer offset. Unchanged offsets are a free
    /// no-op with no notification.
    pub fn hover(&self, client_offset: Option<Point>) {
        let mut state = self.state.get();
        if state.client_offset == client_offset {
            return;
        }
        state.client_offset = client_offset;
        self.state.set(state);
        self.notify();
    }

    /// Clears all offsets when the drop is committed.
    pub fn record_drop(&self) {
        self.reset();
    }

    /// Clears all offsets when the operation completes.
    pub fn end_drag(&self) {
        self.reset();
    }

    fn reset(&self) {
        self.state.set(OffsetState::default());
        self.notify();
    }

    /// The pointer offset captured at `begin_drag`.
    #[must_use]
    pub fn initial_client_offset(&self) -> Option<Point> {
        self.state.get().initial_client_offset
    }

    /// The dragged source's origin captured at `begin_drag`.
    #[must_use]
    pub fn initial_source_client_offset(&self) -> Option<Point> {
        self.state.get().initial_source_client_offset
    }

    /// The most recent pointer offset.
    #[must_use]
    pub fn client_offset(&self) -> Option<Point> {
        self.state.get().client_offset
    }

    /// Total pointer movement since `begin_drag`.
    #[must_use]
    pub fn difference_from_initial_offset(&self) -> Option<Vec2> {
        let state = self.state.get();
        match (state.client_offset, state.initial_client_offset) {
            (Some(current), Some(initial)) => Some(current - initial),
            _ => None,
        }
    }

    /// The projected position of the dragged source's origin: its initial
    /// origin translated by the pointer movement so far.
    #[must_use]
    pub fn source_client_offset(&self) -> Option<Point> {
        let initial = self.state.get().initial_source_client_offset?;
        Some(initial + self.difference_from_initial_offset()?)
    }

    /// Registers an offset-change listener.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push(ListenerEntry {
            id,
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

    fn notify(&self) {
        // Snapshot so listeners can (un)subscribe from inside the callback.
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect();
        for callback in snapshot {
            callback();
        }
    }
}

impl fmt::Debug for OffsetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.get();
        f.debug_struct("OffsetStore")
            .field("initial_client_offset", &state.initial_client_offset)
            .field(
                "initial_source_client_offset",
                &state.initial_source_client_offset,
            )
            .field("client_offset", &state.client_offset)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
