// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element storage, composition, and traversal.
//!
//! All elements of a document tree live in one [`ElementStore`] arena and
//! are addressed by generational [`ElementId`] handles. Composites own
//! their ports, binds, and child nodes; `refer` aliases, the
//! default-component designation, and [`Reference`] entries are non-owning
//! and never cascade.

mod id;
mod store;
mod traverse;

pub use id::{ElementId, ElementKind, INVALID};
pub use store::{ElementStore, Reference};
pub use traverse::Descendants;
