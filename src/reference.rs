//! Core reference type for the concord engine.
//!
//! A [`Reference`] names a concept, predicate, justification or author as a
//! `(prefix, identifier)` pair. Prefixes are vocabulary namespaces such as
//! `mesh` or `doid`; the compact string form `prefix:identifier` is the CURIE.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// A namespaced identifier, compared and hashed by value.
///
/// Ordering is by prefix, then identifier, which is what gives the engine's
/// outputs their stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Vocabulary namespace.
    pub prefix: String,
    /// Local identifier within the namespace.
    pub identifier: String,
}

impl Reference {
    /// Create a reference from its parts without validation.
    pub fn new(prefix: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            identifier: identifier.into(),
        }
    }

    /// Parse a compact `prefix:identifier` string.
    ///
    /// Splits on the first `:`, so identifiers may themselves contain colons
    /// (`obo:GO:0008150` has prefix `obo` and identifier `GO:0008150`).
    pub fn from_curie(curie: &str) -> Result<Self, ReferenceError> {
        let Some((prefix, identifier)) = curie.split_once(':') else {
            return Err(ReferenceError::MissingSeparator {
                curie: curie.to_string(),
            });
        };
        if prefix.is_empty() {
            return Err(ReferenceError::EmptyPrefix {
                curie: curie.to_string(),
            });
        }
        if identifier.is_empty() {
            return Err(ReferenceError::EmptyIdentifier {
                curie: curie.to_string(),
            });
        }
        Ok(Self::new(prefix, identifier))
    }

    /// The compact `prefix:identifier` form.
    pub fn curie(&self) -> String {
        format!("{}:{}", self.prefix, self.identifier)
    }

    /// Whether both parts are non-empty.
    pub fn is_resolved(&self) -> bool {
        !self.prefix.is_empty() && !self.identifier.is_empty()
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prefix, self.identifier)
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_curie(s)
    }
}
