// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Every error here reflects protocol misuse by the caller and is surfaced
//! immediately. There is no recoverable class: the one deliberately
//! non-fatal case, a vetoed [`begin_drag`](crate::DragDropManager::begin_drag),
//! is not an error at all.

use core::fmt;

use crate::handle::{HandlerId, HandlerRole, TargetId};

/// Registration and handle-resolution errors.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RegistryError {
    /// A target declared an empty accepted-type list.
    InvalidType,
    /// The same handler instance is already registered.
    DuplicateHandler,
    /// The id does not resolve to a live registration.
    NotRegistered(HandlerId),
    /// `unpin_source` was called with no source pinned.
    NothingPinned,
    /// An untyped id carried the wrong role tag.
    WrongRole {
        /// The role the conversion required.
        expected: HandlerRole,
        /// The role the id actually carries.
        actual: HandlerRole,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType => f.write_str("target accepted-type list must not be empty"),
            Self::DuplicateHandler => f.write_str("handler instance is already registered"),
            Self::NotRegistered(id) => write!(f, "no registered handler for {id}"),
            Self::NothingPinned => f.write_str("no source is pinned"),
            Self::WrongRole { expected, actual } => {
                write!(f, "expected a {expected} id, got a {actual} id")
            }
        }
    }
}

impl core::error::Error for RegistryError {}

/// Phase and transition errors raised by the
/// [`DragDropManager`](crate::DragDropManager).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OperationError {
    /// `begin_drag` was called while an operation is already in flight.
    AlreadyDragging,
    /// A mid-operation transition was called while idle.
    NotDragging,
    /// `drop_item` or `hover` was called after a drop already occurred.
    AlreadyDropped,
    /// The hover stack passed to `hover` contains a repeated target.
    DuplicateTarget(TargetId),
    /// A hovered target id does not resolve to a live registration.
    UnregisteredTarget(TargetId),
    /// A handle failed to resolve in the registry.
    Registry(RegistryError),
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDragging => f.write_str("cannot begin a drag while already dragging"),
            Self::NotDragging => f.write_str("no drag operation is in flight"),
            Self::AlreadyDropped => f.write_str("a drop already occurred in this operation"),
            Self::DuplicateTarget(id) => write!(f, "hover stack repeats {id:?}"),
            Self::UnregisteredTarget(id) => write!(f, "hovered target {id:?} is not registered"),
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for OperationError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::SourceId;
    use alloc::format;

    #[test]
    fn display_messages() {
        let id = HandlerId::from(SourceId::new(1));
        assert_eq!(
            format!("{}", RegistryError::NotRegistered(id)),
            "no registered handler for source#1"
        );
        assert_eq!(
            format!("{}", OperationError::AlreadyDragging),
            "cannot begin a drag while already dragging"
        );
    }

    #[test]
    fn registry_error_wraps_into_operation_error() {
        let err: OperationError = RegistryError::NothingPinned.into();
        assert_eq!(err, OperationError::Registry(RegistryError::NothingPinned));
    }
}
