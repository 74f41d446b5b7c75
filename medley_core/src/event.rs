// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change observation for structural and attribute mutations.
//!
//! This module provides a [`ChangeSink`] trait with per-event methods that
//! the [`ElementStore`](crate::element::ElementStore) calls after every
//! successful mutation. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! The sink is dependency-injected at store construction (or later via
//! [`set_sink`](crate::element::ElementStore::set_sink)); there is no
//! global or singleton wiring. [`Notifier`] wraps the optional boxed sink
//! and performs a single `Option` branch per dispatch.
//!
//! Delivery is synchronous and reentrant-unsafe: a handler must not turn
//! around and mutate the collection it was just notified about. Rejected
//! and no-op operations emit nothing; a successful mutation emits exactly
//! one event.

use crate::element::ElementId;
use crate::ident::Identifier;

// ---------------------------------------------------------------------------
// Categories and attribute payloads
// ---------------------------------------------------------------------------

/// Which child collection (or slot) of a composite a structural event
/// concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementSet {
    /// The identifier-indexed port list.
    Ports,
    /// The order-significant, identifier-less bind list.
    Binds,
    /// The identifier-indexed child node list.
    Nodes,
    /// The single default-component slot.
    DefaultComponent,
}

/// Which element attribute an alteration event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeName {
    /// The element's identifier.
    Id,
    /// The non-owning alias to another composite's structure.
    Refer,
}

/// Old/new payload carried by an [`AlteredEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// The attribute was (or becomes) absent.
    Unset,
    /// An element-valued attribute.
    Element(ElementId),
    /// An identifier-valued attribute.
    Ident(Identifier),
}

impl From<Option<ElementId>> for AttrValue {
    fn from(value: Option<ElementId>) -> Self {
        value.map_or(Self::Unset, Self::Element)
    }
}

impl From<Option<Identifier>> for AttrValue {
    fn from(value: Option<Identifier>) -> Self {
        value.map_or(Self::Unset, Self::Ident)
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a child enters one of a composite's collections (or its
/// default-component slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertedEvent {
    /// The composite whose collection changed.
    pub parent: ElementId,
    /// Which collection or slot.
    pub set: ElementSet,
    /// The inserted child.
    pub child: ElementId,
}

/// Emitted after a child leaves one of a composite's collections (or its
/// default-component slot).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedEvent {
    /// The composite whose collection changed.
    pub parent: ElementId,
    /// Which collection or slot.
    pub set: ElementSet,
    /// The removed child.
    pub child: ElementId,
    /// The identifier the child was indexed under, when the collection is
    /// identifier-indexed. Carried so sinks need no store access.
    pub ident: Option<Identifier>,
}

/// Emitted after an element attribute is replaced, carrying old and new
/// values (either may be [`AttrValue::Unset`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlteredEvent {
    /// The element whose attribute changed.
    pub element: ElementId,
    /// Which attribute.
    pub attribute: AttributeName,
    /// The previous value.
    pub old: AttrValue,
    /// The new value.
    pub new: AttrValue,
}

// ---------------------------------------------------------------------------
// ChangeSink trait
// ---------------------------------------------------------------------------

/// Receives change events from an [`ElementStore`](crate::element::ElementStore).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait ChangeSink {
    /// Called after a child is inserted into a collection or slot.
    fn on_inserted(&mut self, e: &InsertedEvent) {
        _ = e;
    }

    /// Called after a child is removed from a collection or slot.
    fn on_removed(&mut self, e: &RemovedEvent) {
        _ = e;
    }

    /// Called after an element attribute is replaced.
    fn on_altered(&mut self, e: &AlteredEvent) {
        _ = e;
    }
}

/// A [`ChangeSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl ChangeSink for NoopSink {}

// ---------------------------------------------------------------------------
// Notifier wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional boxed [`ChangeSink`].
///
/// Each dispatch method checks the inner `Option` (one branch) before
/// forwarding to the sink.
#[derive(Default)]
pub struct Notifier {
    sink: Option<Box<dyn ChangeSink>>,
}

impl core::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifier")
            .field("attached", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl Notifier {
    /// Creates a notifier that dispatches to the given sink.
    #[must_use]
    pub fn new(sink: Box<dyn ChangeSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a notifier that discards all events.
    #[must_use]
    pub fn none() -> Self {
        Self { sink: None }
    }

    /// Replaces the sink, returning the previous one.
    pub fn replace(&mut self, sink: Option<Box<dyn ChangeSink>>) -> Option<Box<dyn ChangeSink>> {
        core::mem::replace(&mut self.sink, sink)
    }

    /// Emits an [`InsertedEvent`].
    #[inline]
    pub fn inserted(&mut self, e: &InsertedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_inserted(e);
        }
    }

    /// Emits a [`RemovedEvent`].
    #[inline]
    pub fn removed(&mut self, e: &RemovedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_removed(e);
        }
    }

    /// Emits an [`AlteredEvent`].
    #[inline]
    pub fn altered(&mut self, e: &AlteredEvent) {
        if let Some(s) = &mut self.sink {
            s.on_altered(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::element::ElementId;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_inserted(&InsertedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Ports,
            child: ElementId::from_raw(1, 0),
        });
        sink.on_altered(&AlteredEvent {
            element: ElementId::from_raw(0, 0),
            attribute: AttributeName::Refer,
            old: AttrValue::Unset,
            new: AttrValue::Unset,
        });
    }

    #[test]
    fn notifier_none_does_nothing() {
        let mut notifier = Notifier::none();
        notifier.inserted(&InsertedEvent {
            parent: ElementId::from_raw(0, 0),
            set: ElementSet::Nodes,
            child: ElementId::from_raw(1, 0),
        });
    }

    #[test]
    fn notifier_dispatches_to_sink() {
        struct CountingSink {
            counts: Rc<RefCell<(u32, u32, u32)>>,
        }
        impl ChangeSink for CountingSink {
            fn on_inserted(&mut self, _e: &InsertedEvent) {
                self.counts.borrow_mut().0 += 1;
            }
            fn on_removed(&mut self, _e: &RemovedEvent) {
                self.counts.borrow_mut().1 += 1;
            }
            fn on_altered(&mut self, _e: &AlteredEvent) {
                self.counts.borrow_mut().2 += 1;
            }
        }

        let counts = Rc::new(RefCell::new((0, 0, 0)));
        let mut notifier = Notifier::new(Box::new(CountingSink {
            counts: Rc::clone(&counts),
        }));

        let parent = ElementId::from_raw(0, 0);
        let child = ElementId::from_raw(1, 0);
        notifier.inserted(&InsertedEvent {
            parent,
            set: ElementSet::Binds,
            child,
        });
        notifier.removed(&RemovedEvent {
            parent,
            set: ElementSet::Binds,
            child,
            ident: None,
        });
        notifier.altered(&AlteredEvent {
            element: parent,
            attribute: AttributeName::Refer,
            old: AttrValue::Unset,
            new: AttrValue::Element(child),
        });
        assert_eq!(*counts.borrow(), (1, 1, 1));
    }

    #[test]
    fn replace_returns_previous_sink() {
        let mut notifier = Notifier::new(Box::new(NoopSink));
        let previous = notifier.replace(None);
        assert!(previous.is_some());
        assert!(notifier.replace(None).is_none());
    }

    #[test]
    fn attr_value_from_options() {
        let id = ElementId::from_raw(2, 0);
        assert_eq!(AttrValue::from(Some(id)), AttrValue::Element(id));
        assert_eq!(AttrValue::from(None::<ElementId>), AttrValue::Unset);
    }
}
