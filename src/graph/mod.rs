//! Mapping graph: concepts as nodes, assembled mappings as edges.
//!
//! - [`MappingGraph`](index::MappingGraph): a `petgraph` directed multigraph,
//!   one edge per distinct triple, so a pair of concepts may be joined by
//!   several predicates
//! - [`analytics`]: weakly connected components and bounded simple paths
//!
//! Node order is the order in which references first appear in the input,
//! which makes every traversal here deterministic.

pub mod analytics;
pub mod index;

pub use index::MappingGraph;

use serde::{Deserialize, Serialize};

use crate::model::{Evidence, Mapping};
use crate::reference::Reference;

/// Edge data stored on petgraph edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// The predicate of the mapping this edge stands for.
    pub predicate: Reference,
    /// The mapping's deduplicated evidence.
    pub evidence: Vec<Evidence>,
}

impl From<&Mapping> for EdgeData {
    fn from(m: &Mapping) -> Self {
        Self {
            predicate: m.predicate.clone(),
            evidence: m.evidence.clone(),
        }
    }
}
