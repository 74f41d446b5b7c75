// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity types.

use core::fmt;

/// Sentinel value indicating "no element" in internal index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an element in an [`ElementStore`](super::ElementStore).
///
/// Contains both a slot index and a generation counter so that stale
/// handles can be detected after an element is destroyed and the slot is
/// reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter — must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl ElementId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Rebuilds a handle from raw parts.
    ///
    /// Intended for recording playback and diagnostics; a handle built
    /// from raw parts carries no liveness guarantee until checked against
    /// a store with [`is_alive`](super::ElementStore::is_alive).
    #[inline]
    #[must_use]
    pub const fn from_raw(index: u32, generation: u32) -> Self {
        Self {
            idx: index,
            generation,
        }
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}

/// The kind of an element.
///
/// The full catalog of the document format is out of scope here; these
/// four kinds cover everything the composition engine distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A switch-like aggregate owning ports, binds, and child nodes.
    Composite,
    /// A leaf content node.
    Media,
    /// A named entry point exposing an internal element to the outside of
    /// a composite.
    Port,
    /// An association rule linking a selectable alternative to a
    /// condition; order-significant, identifier-less.
    Bind,
}

impl ElementKind {
    /// Returns whether elements of this kind may appear in a composite's
    /// child node list.
    #[must_use]
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Composite | Self::Media)
    }
}
