// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty handler ids: minimal change sets for notification filtering.
//!
//! Every store mutation computes one of three shapes: nothing changed for
//! derived handler state, everything may have changed, or an explicit list
//! of handler ids changed. Subscribers with an id filter use
//! [`DirtyHandlers::are_dirty`] to skip unrelated updates.

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::handle::{HandlerId, TargetId};

/// The set of handler ids whose derived state may have changed in the most
/// recent store mutation.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum DirtyHandlers {
    /// No handler's derived state changed.
    #[default]
    None,
    /// Every handler's derived state may have changed.
    All,
    /// Exactly these handlers' derived state may have changed.
    Ids(SmallVec<[HandlerId; 4]>),
}

impl DirtyHandlers {
    /// Returns `true` if any of `handler_ids` may have changed.
    #[must_use]
    pub fn are_dirty(&self, handler_ids: &[HandlerId]) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Ids(dirty) => handler_ids.iter().any(|id| dirty.contains(id)),
        }
    }

    /// Computes the dirty set for a hover-stack replacement, or `None` when
    /// the new stack is identical to the previous one and no notification
    /// should be emitted at all.
    ///
    /// The dirty ids are the symmetric difference of the two stacks. A
    /// reordering of the same set leaves the difference empty but still
    /// changes what shallow "top of stack" queries report, so it degrades
    /// to [`DirtyHandlers::All`].
    #[must_use]
    pub fn for_hover(prev: &[TargetId], next: &[TargetId]) -> Option<Self> {
        if prev == next {
            return None;
        }

        let prev_set: HashSet<TargetId> = prev.iter().copied().collect();
        let next_set: HashSet<TargetId> = next.iter().copied().collect();
        let difference: SmallVec<[HandlerId; 4]> = prev_set
            .symmetric_difference(&next_set)
            .map(|id| id.handler_id())
            .collect();

        if difference.is_empty() {
            // Same set, different order.
            Some(Self::All)
        } else {
            Some(Self::Ids(difference))
        }
    }
}
