// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated element identifiers.
//!
//! An [`Identifier`] is an immutable string token used as a stable key for
//! lookups inside identifiable collections. Validation happens once at
//! construction; a constructed identifier is always well-formed. Equality,
//! ordering, and hashing are by string value.
//!
//! The accepted grammar follows the host document format's id rules: the
//! first character must be an ASCII letter or `_`, and the remainder may
//! contain ASCII letters, digits, `.`, `-`, and `_`.

use core::fmt;

use crate::error::ModelError;

/// A validated, immutable identifier string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Validates `value` and creates an identifier from it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidIdentifier`] if `value` is empty, does
    /// not start with an ASCII letter or `_`, or contains a character
    /// outside `[A-Za-z0-9._-]`.
    pub fn new(value: &str) -> Result<Self, ModelError> {
        let mut chars = value.chars();
        let valid_first = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if valid_first && valid_rest {
            Ok(Self(value.to_owned()))
        } else {
            Err(ModelError::InvalidIdentifier {
                value: value.to_owned(),
            })
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}
