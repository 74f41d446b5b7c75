// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child collections: ordered lists, identifier-indexed lists, and
//! reference bags.
//!
//! All three containers hold small `Copy` handles, not element data; the
//! element data itself lives in the
//! [`ElementStore`](crate::element::ElementStore) arena. "Membership by
//! reference" therefore means handle equality.
//!
//! - [`ElementList`] — insertion-order-preserving sequence, duplicates
//!   rejected. Order is semantically meaningful (it determines output
//!   order when the tree is serialized).
//! - [`IdentifiableElementList`] — additionally indexed by [`Identifier`],
//!   enforcing identifier uniqueness within the list and supporting
//!   id-based lookup and removal. Iteration order is insertion order,
//!   never re-sorted by key.
//! - [`ReferenceList`] — unordered bag of non-owning cross-reference
//!   descriptors, never dereferenced by the composition engine itself.
//!
//! Rejections ([`ModelError::DuplicateIdentifier`],
//! [`ModelError::DuplicateElement`]) leave the collection untouched.
//! Remove misses return `false`/`None`.

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::ident::Identifier;

// ---------------------------------------------------------------------------
// ElementList
// ---------------------------------------------------------------------------

/// An ordered, insertion-order-preserving collection of element handles.
#[derive(Clone, Debug)]
pub struct ElementList<H> {
    items: Vec<H>,
}

impl<H> Default for ElementList<H> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<H: Copy + Eq> ElementList<H> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `item` to the list.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateElement`] if `item` is already a
    /// member; the list is unchanged.
    pub fn add(&mut self, item: H) -> Result<(), ModelError> {
        if self.items.contains(&item) {
            return Err(ModelError::DuplicateElement);
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes `item` from the list. Returns whether it was present.
    pub fn remove(&mut self, item: H) -> bool {
        match self.items.iter().position(|&h| h == item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns whether `item` is a member.
    #[must_use]
    pub fn contains(&self, item: H) -> bool {
        self.items.contains(&item)
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = H> + '_ {
        self.items.iter().copied()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// IdentifiableElementList
// ---------------------------------------------------------------------------

/// An insertion-ordered collection of element handles indexed by
/// [`Identifier`].
///
/// Invariant: no two members share an identifier. Insertion fails without
/// mutating state when the identifier is already indexed or the handle is
/// already a member.
#[derive(Clone, Debug)]
pub struct IdentifiableElementList<H> {
    entries: IndexMap<Identifier, H>,
}

impl<H> Default for IdentifiableElementList<H> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<H: Copy + Eq> IdentifiableElementList<H> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Appends `item` under `ident`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateIdentifier`] if `ident` is already
    /// indexed, or [`ModelError::DuplicateElement`] if `item` is already a
    /// member under another identifier. Either way the list is unchanged.
    pub fn add(&mut self, ident: Identifier, item: H) -> Result<(), ModelError> {
        if self.entries.contains_key(&ident) {
            return Err(ModelError::DuplicateIdentifier { value: ident });
        }
        if self.contains(item) {
            return Err(ModelError::DuplicateElement);
        }
        self.entries.insert(ident, item);
        Ok(())
    }

    /// Removes `item` from the list. Returns whether it was present.
    ///
    /// Survivors keep their relative insertion order.
    pub fn remove(&mut self, item: H) -> bool {
        match self.entries.iter().position(|(_, &h)| h == item) {
            Some(pos) => {
                self.entries.shift_remove_index(pos);
                true
            }
            None => false,
        }
    }

    /// Removes the member indexed under `ident`, returning it if present.
    ///
    /// Survivors keep their relative insertion order.
    pub fn remove_by_id(&mut self, ident: &Identifier) -> Option<H> {
        self.entries.shift_remove(ident)
    }

    /// Returns the member indexed under `ident`, if any.
    #[must_use]
    pub fn get(&self, ident: &Identifier) -> Option<H> {
        self.entries.get(ident).copied()
    }

    /// Returns whether `item` is a member.
    #[must_use]
    pub fn contains(&self, item: H) -> bool {
        self.entries.values().any(|&h| h == item)
    }

    /// Returns whether `ident` is indexed.
    #[must_use]
    pub fn contains_id(&self, ident: &Identifier) -> bool {
        self.entries.contains_key(ident)
    }

    /// Returns the identifier `item` is indexed under, if it is a member.
    #[must_use]
    pub fn identifier_of(&self, item: H) -> Option<&Identifier> {
        self.entries
            .iter()
            .find_map(|(ident, &h)| (h == item).then_some(ident))
    }

    /// Reindexes `item` under `ident`, keeping its position in the
    /// insertion order.
    ///
    /// Renaming a member to the identifier it already holds is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateIdentifier`] if another member holds
    /// `ident`, or [`ModelError::MissingIdentifier`] if `item` is not a
    /// member. The list is unchanged on error.
    pub fn rename(&mut self, item: H, ident: Identifier) -> Result<(), ModelError> {
        let Some(pos) = self.entries.iter().position(|(_, &h)| h == item) else {
            return Err(ModelError::MissingIdentifier);
        };
        if let Some(&holder) = self.entries.get(&ident) {
            if holder == item {
                return Ok(());
            }
            return Err(ModelError::DuplicateIdentifier { value: ident });
        }
        self.entries.shift_remove_index(pos);
        self.entries.shift_insert(pos, ident, item);
        Ok(())
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = H> + '_ {
        self.entries.values().copied()
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ReferenceList
// ---------------------------------------------------------------------------

/// An unordered bag of reference descriptors.
///
/// Purely additive/removable bookkeeping with no uniqueness constraint and
/// no ownership side effects; resolving the references is an external
/// collaborator's job.
#[derive(Clone, Debug)]
pub struct ReferenceList<R> {
    items: Vec<R>,
}

impl<R> Default for ReferenceList<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: PartialEq> ReferenceList<R> {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a descriptor.
    pub fn add(&mut self, item: R) {
        self.items.push(item);
    }

    /// Removes the first descriptor equal to `item`. Returns whether one
    /// was present.
    pub fn remove(&mut self, item: &R) -> bool {
        match self.items.iter().position(|r| r == item) {
            Some(pos) => {
                self.items.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns whether a descriptor equal to `item` is present.
    #[must_use]
    pub fn contains(&self, item: &R) -> bool {
        self.items.contains(item)
    }

    /// Iterates the descriptors (no meaningful order).
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.items.iter()
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
