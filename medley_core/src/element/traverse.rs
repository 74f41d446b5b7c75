// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership-tree traversal.

use super::id::ElementId;
use super::store::ElementStore;

/// Depth-first pre-order iterator over an element's owned subtree.
///
/// Yields the starting element first. For each composite, its ports are
/// visited before its binds, then its child nodes, each collection in
/// insertion order, recursing into composite children. This is the order
/// a serializer linearizes the tree in.
///
/// The iterator borrows the store; mutate only after it is dropped.
#[derive(Debug)]
pub struct Descendants<'s> {
    store: &'s ElementStore,
    /// Pending elements, top of stack is visited next.
    stack: Vec<ElementId>,
}

impl<'s> Descendants<'s> {
    pub(crate) fn new(store: &'s ElementStore, root: ElementId) -> Self {
        Self {
            store,
            stack: vec![root],
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.stack.pop()?;
        if let Some(state) = self.store.composite_state(current) {
            // Push in reverse so ports pop first, nodes last.
            for child in state
                .nodes
                .iter()
                .rev()
                .chain(state.binds.iter().rev())
                .chain(state.ports.iter().rev())
            {
                self.stack.push(child);
            }
        }
        Some(current)
    }
}

impl ElementStore {
    /// Iterates `root` and every element it transitively owns, depth-first
    /// pre-order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn descendants(&self, root: ElementId) -> Descendants<'_> {
        self.validate(root);
        Descendants::new(self, root)
    }
}

#[cfg(test)]
mod tests {
    use crate::element::{ElementKind, ElementStore};
    use crate::ident::Identifier;

    fn ident(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn leaf_yields_only_itself() {
        let mut store = ElementStore::new();
        let media = store.create_media(Some(ident("m")));
        assert_eq!(store.descendants(media).collect::<Vec<_>>(), vec![media]);
    }

    #[test]
    fn preorder_ports_binds_nodes() {
        let mut store = ElementStore::new();
        let sw = store.create_composite(Some(ident("sw")));
        let p1 = store.create_port(ident("p1"));
        let p2 = store.create_port(ident("p2"));
        let b1 = store.create_bind();
        let n1 = store.create_media(Some(ident("n1")));
        let n2 = store.create_media(Some(ident("n2")));
        assert!(store.add_node(sw, n1));
        assert!(store.add_port(sw, p1));
        assert!(store.add_port(sw, p2));
        assert!(store.add_bind(sw, b1));
        assert!(store.add_node(sw, n2));

        assert_eq!(
            store.descendants(sw).collect::<Vec<_>>(),
            vec![sw, p1, p2, b1, n1, n2]
        );
    }

    #[test]
    fn recurses_into_nested_composites() {
        let mut store = ElementStore::new();
        let outer = store.create_composite(Some(ident("outer")));
        let inner = store.create_composite(Some(ident("inner")));
        let before = store.create_media(Some(ident("before")));
        let deep = store.create_media(Some(ident("deep")));
        let after = store.create_media(Some(ident("after")));
        assert!(store.add_node(outer, before));
        assert!(store.add_node(outer, inner));
        assert!(store.add_node(inner, deep));
        assert!(store.add_node(outer, after));

        // The nested composite's subtree is emitted before later siblings.
        assert_eq!(
            store.descendants(outer).collect::<Vec<_>>(),
            vec![outer, before, inner, deep, after]
        );
    }

    #[test]
    fn default_component_and_refer_are_not_traversed() {
        let mut store = ElementStore::new();
        let sw = store.create_composite(Some(ident("sw")));
        let outside = store.create_media(Some(ident("outside")));
        let alias = store.create_composite(Some(ident("alias")));
        store.set_default_component(sw, Some(outside));
        store.set_refer(sw, Some(alias));

        // Only ownership edges are walked.
        assert_eq!(store.descendants(sw).collect::<Vec<_>>(), vec![sw]);
        assert_eq!(store.kind(outside), ElementKind::Media);
    }
}
