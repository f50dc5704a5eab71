// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler identification types.
//!
//! This module provides [`HandlerId`] for untyped, role-tagged handler
//! identification, and the [`SourceId`]/[`TargetId`] newtypes that make role
//! misuse a compile-time error at the API surface.

use core::fmt;

use crate::error::RegistryError;

/// The role a registered handler plays in a drag-and-drop operation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum HandlerRole {
    /// A draggable-item provider.
    Source,
    /// A drop-acceptance site.
    Target,
}

impl fmt::Display for HandlerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// An opaque, role-tagged identifier for a registered handler.
///
/// Ids are allocated monotonically by the
/// [`HandlerRegistry`](crate::HandlerRegistry) and are never reused after
/// removal. Two ids are equal iff their role and sequence number are equal.
///
/// `HandlerId` is the untyped form used where sources and targets mix (dirty
/// id sets, subscription filters). Typed code uses [`SourceId`] and
/// [`TargetId`]; the fallible conversions back to those surface
/// [`RegistryError::WrongRole`] for backends that traffic in untyped ids.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId {
    role: HandlerRole,
    seq: u32,
}

impl HandlerId {
    pub(crate) const fn new(role: HandlerRole, seq: u32) -> Self {
        Self { role, seq }
    }

    /// Returns the role encoded in this id.
    #[must_use]
    #[inline]
    pub const fn role(self) -> HandlerRole {
        self.role
    }

    /// Returns the monotonically-assigned sequence number.
    #[must_use]
    #[inline]
    pub const fn seq(self) -> u32 {
        self.seq
    }
}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerId({}#{})", self.role, self.seq)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.role, self.seq)
    }
}

/// The id of a registered drag source.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SourceId(HandlerId);

impl SourceId {
    pub(crate) const fn new(seq: u32) -> Self {
        Self(HandlerId::new(HandlerRole::Source, seq))
    }

    /// Returns the untyped handler id.
    #[must_use]
    #[inline]
    pub const fn handler_id(self) -> HandlerId {
        self.0
    }
}

impl From<SourceId> for HandlerId {
    #[inline]
    fn from(id: SourceId) -> Self {
        id.0
    }
}

impl TryFrom<HandlerId> for SourceId {
    type Error = RegistryError;

    fn try_from(id: HandlerId) -> Result<Self, RegistryError> {
        match id.role {
            HandlerRole::Source => Ok(Self(id)),
            HandlerRole::Target => Err(RegistryError::WrongRole {
                expected: HandlerRole::Source,
                actual: HandlerRole::Target,
            }),
        }
    }
}

/// The id of a registered drop target.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TargetId(HandlerId);

impl TargetId {
    pub(crate) const fn new(seq: u32) -> Self {
        Self(HandlerId::new(HandlerRole::Target, seq))
    }

    /// Returns the untyped handler id.
    #[must_use]
    #[inline]
    pub const fn handler_id(self) -> HandlerId {
        self.0
    }
}

impl From<TargetId> for HandlerId {
    #[inline]
    fn from(id: TargetId) -> Self {
        id.0
    }
}

impl TryFrom<HandlerId> for TargetId {
    type Error = RegistryError;

    fn try_from(id: HandlerId) -> Result<Self, RegistryError> {
        match id.role {
            HandlerRole::Target => Ok(Self(id)),
            HandlerRole::Source => Err(RegistryError::WrongRole {
                expected: HandlerRole::Target,
                actual: HandlerRole::Source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn id_equality_is_by_role_and_sequence() {
        let a = SourceId::new(1);
        let b = SourceId::new(1);
        let c = SourceId::new(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn source_and_target_ids_with_same_sequence_differ() {
        let source = HandlerId::from(SourceId::new(7));
        let target = HandlerId::from(TargetId::new(7));

        assert_ne!(source, target);
        assert_eq!(source.seq(), target.seq());
    }

    #[test]
    fn untyped_conversion_checks_role() {
        let id = HandlerId::from(SourceId::new(3));

        assert_eq!(SourceId::try_from(id), Ok(SourceId::new(3)));
        assert_eq!(
            TargetId::try_from(id),
            Err(RegistryError::WrongRole {
                expected: HandlerRole::Target,
                actual: HandlerRole::Source,
            })
        );
    }

    #[test]
    fn debug_and_display() {
        let id = HandlerId::from(TargetId::new(4));
        assert_eq!(format!("{id:?}"), "HandlerId(target#4)");
        assert_eq!(format!("{id}"), "target#4");
    }
}
