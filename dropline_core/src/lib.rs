// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropline Core: device-agnostic drag-and-drop operation coordination.
//!
//! This crate coordinates a single logical drag-and-drop operation between
//! independently-registered drag sources and drop targets, abstracted away
//! from any concrete input device or rendering surface. At any instant it
//! answers: is something being dragged, what item and type, which source
//! started it, which targets are hovered (in what nesting order), whether a
//! drop occurred, and what result the drop produced.
//!
//! ## Components
//!
//! - [`DragDropManager`]: owns everything, registers handlers, and drives
//!   the four-phase transition protocol
//!   (`begin_drag → hover* → drop_item? → end_drag`).
//! - [`DragMonitor`]: the read-only query facade
//!   ([`can_drag_source`](DragMonitor::can_drag_source),
//!   [`can_drop_on_target`](DragMonitor::can_drop_on_target),
//!   [`is_over_target`](DragMonitor::is_over_target), …) with
//!   change subscription.
//! - [`DragSource`] / [`DropTarget`]: the handler contracts UI components
//!   implement, with the optional methods defaulted.
//! - [`OperationStore`] / [`HandlerRegistry`]: the authoritative operation
//!   state and the handler bookkeeping behind the manager. Most consumers
//!   never touch these directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use dropline_core::{
//!     DragDropManager, DragItem, DragMonitor, DragSource, DropPayload, DropTarget, SourceId,
//!     TargetId,
//! };
//!
//! struct Card {
//!     rank: u8,
//! }
//!
//! struct Deck;
//!
//! impl DragSource for Deck {
//!     fn begin_drag(&self, _monitor: &DragMonitor, _id: SourceId) -> DragItem {
//!         DragItem::new(Card { rank: 7 })
//!     }
//! }
//!
//! struct Pile;
//!
//! impl DropTarget for Pile {
//!     fn drop(&self, monitor: &DragMonitor, _id: TargetId) -> Option<DropPayload> {
//!         let rank = monitor.item()?.downcast_ref::<Card>()?.rank;
//!         Some(DropPayload::new(rank))
//!     }
//! }
//!
//! let manager = DragDropManager::new();
//! let deck = manager.add_source("card", Rc::new(Deck)).unwrap();
//! let pile = manager.add_target("card", Rc::new(Pile)).unwrap();
//!
//! // An input backend would drive these from device gestures.
//! manager.begin_drag(deck).unwrap();
//! manager.hover(&[pile]).unwrap();
//! assert!(manager.monitor().is_over_target(pile, true));
//!
//! manager.drop_item().unwrap();
//! assert_eq!(
//!     manager.monitor().drop_result().payload().unwrap().downcast_ref::<u8>(),
//!     Some(&7)
//! );
//! manager.end_drag().unwrap();
//! ```
//!
//! ## Concurrency Model
//!
//! Single-threaded, synchronous, cooperative. Every operation runs to
//! completion on the calling stack; exactly one operation may be in flight
//! per manager; handler callbacks and change notification are synchronous
//! and must not re-enter the manager for the same operation.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod backend;
mod dirty;
mod error;
mod handle;
mod handler;
mod manager;
mod monitor;
mod registry;
mod store;
mod types;

pub use backend::{Backend, TestBackend};
pub use dirty::DirtyHandlers;
pub use error::{OperationError, RegistryError};
pub use handle::{HandlerId, HandlerRole, SourceId, TargetId};
pub use handler::{DragItem, DragSource, DropPayload, DropResult, DropTarget};
pub use manager::{BeginDragOptions, DragDropManager};
pub use monitor::DragMonitor;
pub use registry::HandlerRegistry;
pub use store::{BeginDragRecord, OperationStore, SubscriptionId};
pub use types::{AcceptedType, ItemType, TargetTypes};
