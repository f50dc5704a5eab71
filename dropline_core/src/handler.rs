// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler contracts and type-erased operation payloads.
//!
//! Sources and targets are user-supplied trait objects. The optional parts
//! of each contract are defaulted here rather than modeled with base types:
//! [`DragSource::can_drag`] and [`DropTarget::can_drop`] default to `true`,
//! [`DragSource::is_dragging`] defaults to "this handle is the active
//! source", and [`DropTarget::hover`] defaults to a no-op.

use alloc::rc::Rc;
use core::any::Any;
use core::fmt;

use crate::handle::{SourceId, TargetId};
use crate::monitor::DragMonitor;

/// The type-erased payload produced by [`DragSource::begin_drag`].
///
/// Wraps any `'static` value behind a shared pointer so the operation store
/// and every observer can hold it without copying.
///
/// # Example
///
/// ```
/// use dropline_core::DragItem;
///
/// struct Card {
///     rank: u8,
/// }
///
/// let item = DragItem::new(Card { rank: 7 });
/// assert!(item.is::<Card>());
/// assert_eq!(item.downcast_ref::<Card>().unwrap().rank, 7);
/// ```
#[derive(Clone)]
pub struct DragItem {
    inner: Rc<dyn Any>,
}

impl DragItem {
    /// Wraps a concrete payload value.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    /// Returns `true` if the payload is of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Attempts to downcast the payload to a reference of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for DragItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragItem")
            .field("type_id", &self.inner.as_ref().type_id())
            .finish_non_exhaustive()
    }
}

/// The type-erased payload a target may return from [`DropTarget::drop`].
#[derive(Clone)]
pub struct DropPayload {
    inner: Rc<dyn Any>,
}

impl DropPayload {
    /// Wraps a concrete result value.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    /// Returns `true` if the payload is of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Attempts to downcast the payload to a reference of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for DropPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropPayload")
            .field("type_id", &self.inner.as_ref().type_id())
            .finish_non_exhaustive()
    }
}

/// The accumulated outcome of the drop phase, as observed by the source's
/// [`end_drag`](DragSource::end_drag) and by outer targets mid-bubble.
#[derive(Clone, Debug, Default)]
pub enum DropResult {
    /// No target handled the drop.
    #[default]
    Missed,
    /// A target handled the drop without producing a payload.
    Handled,
    /// A target produced an explicit payload.
    Payload(DropPayload),
}

impl DropResult {
    /// Returns `true` unless the drop was [`Missed`](Self::Missed).
    #[must_use]
    pub fn was_handled(&self) -> bool {
        !matches!(self, Self::Missed)
    }

    /// Returns the explicit payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&DropPayload> {
        match self {
            Self::Payload(p) => Some(p),
            _ => None,
        }
    }
}

/// A draggable-item provider.
///
/// Registered with [`DragDropManager::add_source`](crate::DragDropManager::add_source)
/// under exactly one [`ItemType`](crate::ItemType). All methods are invoked
/// synchronously and must not re-enter the manager for the same operation.
pub trait DragSource {
    /// Whether a drag may begin from this source right now.
    fn can_drag(&self, monitor: &DragMonitor, source_id: SourceId) -> bool {
        let _ = (monitor, source_id);
        true
    }

    /// Produces the dragged item payload. Called once per operation, after
    /// `can_drag` succeeded.
    fn begin_drag(&self, monitor: &DragMonitor, source_id: SourceId) -> DragItem;

    /// Notified when the operation completes. The final drop result is still
    /// readable through the monitor at this point.
    fn end_drag(&self, monitor: &DragMonitor, source_id: SourceId) {
        let _ = (monitor, source_id);
    }

    /// Whether this source considers itself the one being dragged.
    ///
    /// Override for "mirror" sources that track a logical item rather than
    /// their own handle.
    fn is_dragging(&self, monitor: &DragMonitor, source_id: SourceId) -> bool {
        monitor.source_id() == Some(source_id)
    }
}

/// A drop-acceptance site.
///
/// Registered with [`DragDropManager::add_target`](crate::DragDropManager::add_target)
/// under a [`TargetTypes`](crate::TargetTypes) accepted-type set.
pub trait DropTarget {
    /// Whether this target accepts the current drag, beyond the type match.
    fn can_drop(&self, monitor: &DragMonitor, target_id: TargetId) -> bool {
        let _ = (monitor, target_id);
        true
    }

    /// Notified when the target is part of a hover stack update and its type
    /// matches the dragged type.
    fn hover(&self, monitor: &DragMonitor, target_id: TargetId) {
        let _ = (monitor, target_id);
    }

    /// Handles a drop.
    ///
    /// Return `Some` to record an explicit result. Return `None` to inherit:
    /// the innermost target defaults to [`DropResult::Handled`], outer
    /// targets inherit whatever their nested child produced (readable via
    /// [`DragMonitor::drop_result`] while bubbling).
    fn drop(&self, monitor: &DragMonitor, target_id: TargetId) -> Option<DropPayload>;
}
