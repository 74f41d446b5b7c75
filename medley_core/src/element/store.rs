// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot-arena element storage with allocation, composition, and identity
//! management.

use crate::collection::{ElementList, IdentifiableElementList, ReferenceList};
use crate::error::ModelError;
use crate::event::{
    AlteredEvent, AttributeName, ChangeSink, ElementSet, InsertedEvent, Notifier, RemovedEvent,
};
use crate::ident::Identifier;

use super::id::{ElementId, ElementKind, INVALID};

/// A non-owning cross-reference descriptor tracked on a composite.
///
/// Records that `referrer` points at the owning composite through
/// `attribute`. The composition engine only books these entries; resolving
/// them is an external collaborator's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference {
    /// The element holding the referencing attribute.
    pub referrer: ElementId,
    /// The attribute through which the reference is made.
    pub attribute: AttributeName,
}

/// Per-slot composition state, present only for composite elements.
#[derive(Debug, Default)]
pub(crate) struct CompositeState {
    /// Non-owning alias to another composite's structure.
    refer: Option<ElementId>,
    /// Designated default child. A designation, not a membership: the
    /// default need not appear in `nodes`.
    default_component: Option<ElementId>,
    pub(crate) ports: IdentifiableElementList<ElementId>,
    pub(crate) binds: ElementList<ElementId>,
    pub(crate) nodes: IdentifiableElementList<ElementId>,
    references: ReferenceList<Reference>,
}

/// Slot-arena storage for all elements of a document tree.
///
/// Elements are addressed by [`ElementId`] handles. Internally, each
/// element occupies a slot in parallel arrays. Destroyed elements are
/// recycled via a free list, and generation counters prevent stale handle
/// access.
///
/// Composite elements additionally carry their child collections (ports,
/// binds, nodes), the default-component slot, the `refer` alias, and the
/// external-reference bag. Membership edges are the only ownership edges;
/// `refer`, `default_component`, and [`Reference`] entries never own.
///
/// Every successful structural or attribute mutation is reported to the
/// injected [`ChangeSink`] exactly once; rejected and no-op calls report
/// nothing.
#[derive(Debug)]
pub struct ElementStore {
    // -- Per-slot element data --
    kind: Vec<ElementKind>,
    ident: Vec<Option<Identifier>>,
    /// Owner back-reference; [`INVALID`] for roots.
    parent: Vec<u32>,
    /// Composition state, `Some` only for composite slots.
    composite: Vec<Option<Box<CompositeState>>>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,
    len: u32,

    // -- Change observation --
    notifier: Notifier,
}

/// Panics with a uniform message for kind-contract violations.
fn not_a_composite(id: ElementId) -> ! {
    panic!("not a composite element: {id:?}");
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Creates an empty store with no change sink attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: Vec::new(),
            ident: Vec::new(),
            parent: Vec::new(),
            composite: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            notifier: Notifier::none(),
        }
    }

    /// Creates an empty store that reports every mutation to `sink`.
    #[must_use]
    pub fn with_sink(sink: Box<dyn ChangeSink>) -> Self {
        let mut store = Self::new();
        store.notifier = Notifier::new(sink);
        store
    }

    /// Attaches (or replaces) the change sink, returning the previous one.
    pub fn set_sink(&mut self, sink: Box<dyn ChangeSink>) -> Option<Box<dyn ChangeSink>> {
        self.notifier.replace(Some(sink))
    }

    /// Detaches the change sink, returning it.
    pub fn take_sink(&mut self) -> Option<Box<dyn ChangeSink>> {
        self.notifier.replace(None)
    }

    // -- Allocation API --

    /// Creates a composite element, optionally with an identifier.
    ///
    /// Identifier validation happens at [`Identifier`] construction, so
    /// this call itself cannot fail.
    pub fn create_composite(&mut self, ident: Option<Identifier>) -> ElementId {
        self.alloc(
            ElementKind::Composite,
            ident,
            Some(Box::new(CompositeState::default())),
        )
    }

    /// Creates a media (leaf content) element, optionally with an
    /// identifier.
    pub fn create_media(&mut self, ident: Option<Identifier>) -> ElementId {
        self.alloc(ElementKind::Media, ident, None)
    }

    /// Creates a port element. Ports are always identifier-keyed.
    pub fn create_port(&mut self, ident: Identifier) -> ElementId {
        self.alloc(ElementKind::Port, Some(ident), None)
    }

    /// Creates a bind element. Binds are identifier-less and
    /// order-significant.
    pub fn create_bind(&mut self) -> ElementId {
        self.alloc(ElementKind::Bind, None, None)
    }

    fn alloc(
        &mut self,
        kind: ElementKind,
        ident: Option<Identifier>,
        composite: Option<Box<CompositeState>>,
    ) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.kind[idx as usize] = kind;
            self.ident[idx as usize] = ident;
            self.parent[idx as usize] = INVALID;
            self.composite[idx as usize] = composite;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.kind.push(kind);
            self.ident.push(ident);
            self.parent.push(INVALID);
            self.composite.push(composite);
            self.generation.push(0);
            idx
        };

        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys an element, freeing its slot for reuse.
    ///
    /// The element is first detached from its owning composite, if any
    /// (observed as a removal). Ownership of its own members is released:
    /// they become parentless roots, with no per-member events — the
    /// collections cease to exist together with the element. Non-owning
    /// edges pointing *at* the destroyed element (`refer` aliases,
    /// default-component designations, [`Reference`] entries) are left in
    /// place and simply go stale, detectable via
    /// [`is_alive`](Self::is_alive).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy(&mut self, id: ElementId) {
        self.validate(id);
        let idx = id.idx;

        // Detach from the owning composite (emits the removal).
        let owner_idx = self.parent[idx as usize];
        if owner_idx != INVALID {
            let owner = ElementId {
                idx: owner_idx,
                generation: self.generation[owner_idx as usize],
            };
            match self.kind[idx as usize] {
                ElementKind::Port => {
                    self.remove_port(owner, id);
                }
                ElementKind::Bind => {
                    self.remove_bind(owner, id);
                }
                ElementKind::Composite | ElementKind::Media => {
                    self.remove_node(owner, id);
                }
            }
        }

        // Release ownership of members; they become roots.
        if let Some(state) = self.composite[idx as usize].take() {
            for member in state
                .ports
                .iter()
                .chain(state.binds.iter())
                .chain(state.nodes.iter())
            {
                self.parent[member.idx as usize] = INVALID;
            }
        }

        self.ident[idx as usize] = None;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the live elements that have no owner.
    #[must_use]
    pub fn roots(&self) -> Vec<ElementId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(ElementId {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        roots
    }

    // -- Identity API --

    /// Returns the kind of an element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> ElementKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the identifier of an element, if it has one.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn identifier(&self, id: ElementId) -> Option<&Identifier> {
        self.validate(id);
        self.ident[id.idx as usize].as_ref()
    }

    /// Returns the owning composite of an element, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(ElementId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Replaces the identifier of an element, reindexing through the
    /// owning collection when the element is currently a member of one.
    ///
    /// Emits `Altered(Id, old, new)` on success (also when old and new
    /// are equal).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateIdentifier`] if a sibling in the
    /// owning collection already holds `ident`, or
    /// [`ModelError::MissingIdentifier`] when clearing the identifier of
    /// a current member of an identifier-indexed collection. Nothing
    /// changes on error.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_identifier(
        &mut self,
        id: ElementId,
        ident: Option<Identifier>,
    ) -> Result<(), ModelError> {
        self.validate(id);
        let idx = id.idx as usize;
        let old = self.ident[idx].clone();

        let owner_idx = self.parent[idx];
        if owner_idx != INVALID {
            let Some(owner_state) = self.composite[owner_idx as usize].as_mut() else {
                unreachable!("owner of a member element is always a composite");
            };
            match self.kind[idx] {
                ElementKind::Port => {
                    let Some(new_ident) = ident.clone() else {
                        return Err(ModelError::MissingIdentifier);
                    };
                    owner_state.ports.rename(id, new_ident)?;
                }
                ElementKind::Composite | ElementKind::Media => {
                    let Some(new_ident) = ident.clone() else {
                        return Err(ModelError::MissingIdentifier);
                    };
                    owner_state.nodes.rename(id, new_ident)?;
                }
                // Binds are identifier-less members; no index to maintain.
                ElementKind::Bind => {}
            }
        }

        self.ident[idx] = ident.clone();
        self.notifier.altered(&AlteredEvent {
            element: id,
            attribute: AttributeName::Id,
            old: old.into(),
            new: ident.into(),
        });
        Ok(())
    }

    // -- Alias ("refer") API --

    /// Replaces the non-owning alias of a composite.
    ///
    /// Emits `Altered(Refer, old, new)`, also when the old value was
    /// absent. The alias never establishes ownership; destroying the
    /// target later leaves this composite's structure intact.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `composite` is not a composite, or
    /// if the target is not a composite.
    pub fn set_refer(&mut self, composite: ElementId, refer: Option<ElementId>) {
        if let Some(target) = refer {
            self.validate(target);
            if self.kind[target.idx as usize] != ElementKind::Composite {
                not_a_composite(target);
            }
        }
        self.validate(composite);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        let old = state.refer;
        state.refer = refer;
        self.notifier.altered(&AlteredEvent {
            element: composite,
            attribute: AttributeName::Refer,
            old: old.into(),
            new: refer.into(),
        });
    }

    /// Returns the alias of a composite, if set.
    ///
    /// The returned handle may be stale if the target was destroyed;
    /// check with [`is_alive`](Self::is_alive) before resolving.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or not a composite.
    #[must_use]
    pub fn refer(&self, composite: ElementId) -> Option<ElementId> {
        self.state(composite).refer
    }

    // -- Port API --

    /// Adds a port to a composite, taking ownership of it.
    ///
    /// Returns `false` — leaving everything unchanged and emitting
    /// nothing — when the port's identifier collides with a sibling
    /// port's, when the port is already a member, when it is owned by
    /// another composite, or when it carries no identifier. Emits
    /// `Inserted(Ports)` on success.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `composite` is not a composite, or
    /// if `port` is not a port element.
    pub fn add_port(&mut self, composite: ElementId, port: ElementId) -> bool {
        self.validate(composite);
        self.validate(port);
        assert!(
            self.kind[port.idx as usize] == ElementKind::Port,
            "add_port requires a port element: {port:?}"
        );
        if self.parent[port.idx as usize] != INVALID {
            return false;
        }
        let Some(ident) = self.ident[port.idx as usize].clone() else {
            return false;
        };
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        if state.ports.add(ident, port).is_err() {
            return false;
        }
        self.parent[port.idx as usize] = composite.idx;
        self.notifier.inserted(&InsertedEvent {
            parent: composite,
            set: ElementSet::Ports,
            child: port,
        });
        true
    }

    /// Removes a port from a composite, releasing ownership.
    ///
    /// Returns `false` if the port is not a member. Emits
    /// `Removed(Ports)` on success.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `composite` is not a composite.
    pub fn remove_port(&mut self, composite: ElementId, port: ElementId) -> bool {
        self.validate(composite);
        self.validate(port);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        let ident = state.ports.identifier_of(port).cloned();
        if !state.ports.remove(port) {
            return false;
        }
        self.parent[port.idx as usize] = INVALID;
        self.notifier.removed(&RemovedEvent {
            parent: composite,
            set: ElementSet::Ports,
            child: port,
            ident,
        });
        true
    }

    /// Removes the port indexed under `ident`, releasing ownership.
    ///
    /// Returns `false` if no port holds that identifier.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn remove_port_by_id(&mut self, composite: ElementId, ident: &Identifier) -> bool {
        self.validate(composite);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        let Some(port) = state.ports.remove_by_id(ident) else {
            return false;
        };
        self.parent[port.idx as usize] = INVALID;
        self.notifier.removed(&RemovedEvent {
            parent: composite,
            set: ElementSet::Ports,
            child: port,
            ident: Some(ident.clone()),
        });
        true
    }

    /// Returns whether `port` is a member of the composite's port list.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_port(&self, composite: ElementId, port: ElementId) -> bool {
        self.validate(port);
        self.state(composite).ports.contains(port)
    }

    /// Returns whether some port holds `ident`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_port_id(&self, composite: ElementId, ident: &Identifier) -> bool {
        self.state(composite).ports.contains_id(ident)
    }

    /// Returns whether the composite has any ports.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_ports(&self, composite: ElementId) -> bool {
        !self.state(composite).ports.is_empty()
    }

    /// Returns the port indexed under `ident`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn port(&self, composite: ElementId, ident: &Identifier) -> Option<ElementId> {
        self.state(composite).ports.get(ident)
    }

    /// Iterates the composite's ports in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn ports(&self, composite: ElementId) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.state(composite).ports.iter()
    }

    // -- Default component API --

    /// Replaces the composite's default component.
    ///
    /// When a previous default exists, its removal is emitted before the
    /// insertion of the new value; passing `None` clears the slot and
    /// emits only the removal (if one existed). The default is a
    /// designation, not a membership — it need not appear in `nodes`, and
    /// no ownership is taken.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `composite` is not a composite, or
    /// if the new value is not a node element.
    pub fn set_default_component(&mut self, composite: ElementId, component: Option<ElementId>) {
        if let Some(node) = component {
            self.validate(node);
            assert!(
                self.kind[node.idx as usize].is_node(),
                "default component must be a node element: {node:?}"
            );
        }
        self.validate(composite);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        let old = state.default_component;
        state.default_component = component;
        if let Some(old_child) = old {
            self.notifier.removed(&RemovedEvent {
                parent: composite,
                set: ElementSet::DefaultComponent,
                child: old_child,
                ident: None,
            });
        }
        if let Some(new_child) = component {
            self.notifier.inserted(&InsertedEvent {
                parent: composite,
                set: ElementSet::DefaultComponent,
                child: new_child,
            });
        }
    }

    /// Returns the composite's default component, if set.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn default_component(&self, composite: ElementId) -> Option<ElementId> {
        self.state(composite).default_component
    }

    // -- Bind API --

    /// Appends a bind to a composite, taking ownership of it.
    ///
    /// Returns `false` when the bind is already a member or owned by
    /// another composite. Emits `Inserted(Binds)` on success. Bind order
    /// is preserved and semantically meaningful.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `composite` is not a composite, or
    /// if `bind` is not a bind element.
    pub fn add_bind(&mut self, composite: ElementId, bind: ElementId) -> bool {
        self.validate(composite);
        self.validate(bind);
        assert!(
            self.kind[bind.idx as usize] == ElementKind::Bind,
            "add_bind requires a bind element: {bind:?}"
        );
        if self.parent[bind.idx as usize] != INVALID {
            return false;
        }
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        if state.binds.add(bind).is_err() {
            return false;
        }
        self.parent[bind.idx as usize] = composite.idx;
        self.notifier.inserted(&InsertedEvent {
            parent: composite,
            set: ElementSet::Binds,
            child: bind,
        });
        true
    }

    /// Removes a bind from a composite, releasing ownership.
    ///
    /// Returns `false` if the bind is not a member. Emits
    /// `Removed(Binds)` on success.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `composite` is not a composite.
    pub fn remove_bind(&mut self, composite: ElementId, bind: ElementId) -> bool {
        self.validate(composite);
        self.validate(bind);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        if !state.binds.remove(bind) {
            return false;
        }
        self.parent[bind.idx as usize] = INVALID;
        self.notifier.removed(&RemovedEvent {
            parent: composite,
            set: ElementSet::Binds,
            child: bind,
            ident: None,
        });
        true
    }

    /// Returns whether `bind` is a member of the composite's bind list.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_bind(&self, composite: ElementId, bind: ElementId) -> bool {
        self.validate(bind);
        self.state(composite).binds.contains(bind)
    }

    /// Returns whether the composite has any binds.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_binds(&self, composite: ElementId) -> bool {
        !self.state(composite).binds.is_empty()
    }

    /// Iterates the composite's binds in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn binds(&self, composite: ElementId) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.state(composite).binds.iter()
    }

    // -- Node API --

    /// Adds a child node to a composite, taking ownership of it.
    ///
    /// The node identifier namespace is independent of the port
    /// namespace: a node id may equal a port id without conflict.
    ///
    /// Returns `false` when the node's identifier collides with a sibling
    /// node's, when the node is already a member, when it is owned by
    /// another composite, when it carries no identifier, or when adopting
    /// it would make the ownership tree cyclic. Emits `Inserted(Nodes)`
    /// on success.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale, if `composite` is not a composite, or
    /// if `node` is not a node element.
    pub fn add_node(&mut self, composite: ElementId, node: ElementId) -> bool {
        self.validate(composite);
        self.validate(node);
        assert!(
            self.kind[node.idx as usize].is_node(),
            "add_node requires a node element: {node:?}"
        );
        if self.parent[node.idx as usize] != INVALID {
            return false;
        }
        // Adopting an ancestor (or the composite itself) would make the
        // ownership tree cyclic and hang any traversal.
        let mut cursor = composite.idx;
        loop {
            if cursor == node.idx {
                return false;
            }
            cursor = self.parent[cursor as usize];
            if cursor == INVALID {
                break;
            }
        }
        let Some(ident) = self.ident[node.idx as usize].clone() else {
            return false;
        };
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        if state.nodes.add(ident, node).is_err() {
            return false;
        }
        self.parent[node.idx as usize] = composite.idx;
        self.notifier.inserted(&InsertedEvent {
            parent: composite,
            set: ElementSet::Nodes,
            child: node,
        });
        true
    }

    /// Removes a child node from a composite, releasing ownership.
    ///
    /// Returns `false` if the node is not a member. Emits
    /// `Removed(Nodes)` on success.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `composite` is not a composite.
    pub fn remove_node(&mut self, composite: ElementId, node: ElementId) -> bool {
        self.validate(composite);
        self.validate(node);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        let ident = state.nodes.identifier_of(node).cloned();
        if !state.nodes.remove(node) {
            return false;
        }
        self.parent[node.idx as usize] = INVALID;
        self.notifier.removed(&RemovedEvent {
            parent: composite,
            set: ElementSet::Nodes,
            child: node,
            ident,
        });
        true
    }

    /// Removes the child node indexed under `ident`, releasing ownership.
    ///
    /// Returns `false` if no node holds that identifier.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn remove_node_by_id(&mut self, composite: ElementId, ident: &Identifier) -> bool {
        self.validate(composite);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        let Some(node) = state.nodes.remove_by_id(ident) else {
            return false;
        };
        self.parent[node.idx as usize] = INVALID;
        self.notifier.removed(&RemovedEvent {
            parent: composite,
            set: ElementSet::Nodes,
            child: node,
            ident: Some(ident.clone()),
        });
        true
    }

    /// Returns whether `node` is a member of the composite's node list.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_node(&self, composite: ElementId, node: ElementId) -> bool {
        self.validate(node);
        self.state(composite).nodes.contains(node)
    }

    /// Returns whether some child node holds `ident`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_node_id(&self, composite: ElementId, ident: &Identifier) -> bool {
        self.state(composite).nodes.contains_id(ident)
    }

    /// Returns whether the composite has any child nodes.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn has_nodes(&self, composite: ElementId) -> bool {
        !self.state(composite).nodes.is_empty()
    }

    /// Returns the child node indexed under `ident`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    #[must_use]
    pub fn node(&self, composite: ElementId, ident: &Identifier) -> Option<ElementId> {
        self.state(composite).nodes.get(ident)
    }

    /// Iterates the composite's child nodes in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn nodes(&self, composite: ElementId) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.state(composite).nodes.iter()
    }

    // -- Reference API --
    //
    // References are bookkeeping for external cross-reference resolution,
    // not tree structure; they never emit structural notifications.

    /// Records a reference descriptor on a composite.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn add_reference(&mut self, composite: ElementId, reference: Reference) {
        self.validate(composite);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        state.references.add(reference);
    }

    /// Removes a reference descriptor. Returns whether one was present.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn remove_reference(&mut self, composite: ElementId, reference: &Reference) -> bool {
        self.validate(composite);
        let Some(state) = self.composite[composite.idx as usize].as_mut() else {
            not_a_composite(composite);
        };
        state.references.remove(reference)
    }

    /// Iterates the composite's reference descriptors.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `composite` is not a composite.
    pub fn references(&self, composite: ElementId) -> impl Iterator<Item = &Reference> {
        self.state(composite).references.iter()
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ElementId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ElementId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Read access to composition state; panics on non-composites.
    fn state(&self, id: ElementId) -> &CompositeState {
        self.validate(id);
        match self.composite[id.idx as usize].as_ref() {
            Some(state) => state,
            None => not_a_composite(id),
        }
    }

    /// Read access to composition state for live composites, `None` for
    /// other kinds. Used by traversal, which already validated the handle.
    pub(crate) fn composite_state(&self, id: ElementId) -> Option<&CompositeState> {
        self.composite[id.idx as usize].as_deref()
    }
}
