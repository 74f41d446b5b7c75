// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element composition and identity management for declarative multimedia
//! presentation documents.
//!
//! `medley_core` provides the structural backbone of a document authoring
//! model: a slot-arena [`ElementStore`](element::ElementStore) holding
//! composite elements (switch-like aggregates), their identifier-indexed
//! ports and child nodes, order-significant binds, non-owning `refer`
//! aliases, and a default-component designation. Elements are addressed by
//! generational [`ElementId`](element::ElementId) handles so stale access
//! is detected instead of silently corrupting the tree.
//!
//! # Architecture
//!
//! Mutations flow through the store and out to an observer:
//!
//! ```text
//!   caller ──► ElementStore (arena + composition state)
//!                  │
//!                  ├── collection::{ElementList, IdentifiableElementList}
//!                  │       membership, ordering, identifier uniqueness
//!                  ▼
//!              event::Notifier ──► ChangeSink (inserted/removed/altered)
//! ```
//!
//! **[`element`]** — The arena store, element kinds, generational handles,
//! and the [`Descendants`](element::Descendants) pre-order traversal.
//!
//! **[`collection`]** — The child-collection containers enforcing the
//! structural rules: insertion order, duplicate rejection, per-collection
//! identifier uniqueness.
//!
//! **[`ident`]** — Validated [`Identifier`](ident::Identifier) strings.
//!
//! **[`event`]** — The [`ChangeSink`](event::ChangeSink) observer trait
//! and event payloads; every successful mutation is reported exactly once.
//!
//! **[`error`]** — [`ModelError`](error::ModelError) rejection kinds.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod collection;
pub mod element;
pub mod error;
pub mod event;
pub mod ident;
