// Copyright 2026 the Dropline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item type labels and target accepted-type sets.
//!
//! A source declares exactly one [`ItemType`]; a target declares a
//! [`TargetTypes`] set with OR semantics, where any entry may be the
//! wildcard that matches every dragged type.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use crate::error::RegistryError;

/// An opaque type label identifying what kind of item a source drags.
///
/// Labels are cheap to clone and compare by string equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ItemType(Cow<'static, str>);

impl ItemType {
    /// Creates a type label.
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    /// Returns the label text.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ItemType {
    fn from(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }
}

impl From<String> for ItemType {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}

impl fmt::Debug for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemType").field(&self.0).finish()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry in a target's accepted-type set.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AcceptedType {
    /// Matches any dragged type.
    Any,
    /// Matches exactly this dragged type.
    Is(ItemType),
}

impl AcceptedType {
    fn matches(&self, dragged: &ItemType) -> bool {
        match self {
            Self::Any => true,
            Self::Is(t) => t == dragged,
        }
    }
}

impl From<ItemType> for AcceptedType {
    fn from(t: ItemType) -> Self {
        Self::Is(t)
    }
}

impl From<&'static str> for AcceptedType {
    fn from(label: &'static str) -> Self {
        Self::Is(ItemType::from(label))
    }
}

/// The non-empty set of types a drop target accepts, with OR semantics.
///
/// # Example
///
/// ```
/// use dropline_core::{ItemType, TargetTypes};
///
/// let card = ItemType::from("card");
/// let token = ItemType::from("token");
///
/// assert!(TargetTypes::any().matches(&card));
/// assert!(TargetTypes::single(card.clone()).matches(&card));
///
/// let either = TargetTypes::one_of(["card", "token"]).unwrap();
/// assert!(either.matches(&card));
/// assert!(either.matches(&token));
/// assert!(!either.matches(&ItemType::from("file")));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TargetTypes(SmallVec<[AcceptedType; 2]>);

impl TargetTypes {
    /// A set that accepts every dragged type.
    #[must_use]
    pub fn any() -> Self {
        Self(SmallVec::from_iter([AcceptedType::Any]))
    }

    /// A set that accepts exactly one type.
    #[must_use]
    pub fn single(t: impl Into<ItemType>) -> Self {
        Self(SmallVec::from_iter([AcceptedType::Is(t.into())]))
    }

    /// A set that accepts any of the given entries.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidType`] if the iterator is empty.
    pub fn one_of<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator,
        I::Item: Into<AcceptedType>,
    {
        let entries: SmallVec<[AcceptedType; 2]> =
            entries.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(RegistryError::InvalidType);
        }
        Ok(Self(entries))
    }

    /// Returns `true` if the dragged type is accepted by this set.
    #[must_use]
    pub fn matches(&self, dragged: &ItemType) -> bool {
        self.0.iter().any(|entry| entry.matches(dragged))
    }

    /// Returns the accepted entries.
    #[must_use]
    pub fn entries(&self) -> &[AcceptedType] {
        &self.0
    }
}

impl From<ItemType> for TargetTypes {
    fn from(t: ItemType) -> Self {
        Self::single(t)
    }
}

impl From<&'static str> for TargetTypes {
    fn from(label: &'static str) -> Self {
        Self::single(label)
    }
}
