// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error kinds for validation and collection rejections.
//!
//! Only conditions that reject an operation are errors. A remove or lookup
//! that finds nothing is a `false`/`None` outcome, not an error — repeated
//! removal is expected during interactive editing. Every rejection leaves
//! the affected collection in its prior, consistent state.

use thiserror::Error;

use crate::ident::Identifier;

/// A rejected model operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The string is not a well-formed identifier. Fatal to the
    /// construction call that supplied it.
    #[error("invalid identifier: {value:?}")]
    InvalidIdentifier {
        /// The offending string, verbatim.
        value: String,
    },

    /// An identifiable collection already indexes this identifier.
    #[error("duplicate identifier: {value}")]
    DuplicateIdentifier {
        /// The colliding identifier.
        value: Identifier,
    },

    /// The same element is already a member of the collection.
    #[error("element is already a member of the collection")]
    DuplicateElement,

    /// An element without an identifier was offered to a collection (or
    /// a rename) that requires one.
    #[error("element has no identifier")]
    MissingIdentifier,
}
