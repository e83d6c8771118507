// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # concord
//!
//! A reasoning engine over semantic mappings between concepts in different
//! vocabularies (`mesh:D009369 skos:exactMatch doid:162`).
//!
//! ## Architecture
//!
//! - **Model** (`reference`, `model`): references, evidence and mappings
//! - **Evidence index** (`index`): triple → evidence, merging duplicate assertions
//! - **Inference** (`infer`): inversion, predicate mutation, chain inference
//! - **Mapping graph** (`graph`): petgraph multigraph, clusters and bounded paths
//! - **Set operations** (`filter`): prefix/predicate filters, many-to-many, projection
//! - **Prioritization** (`priority`): one representative per equivalence cluster
//! - **Predicate rules** (`rules`): flip, transitive and two-step tables, loadable from TOML
//! - **Sources** (`registry`): named mapping loaders
//!
//! ## Library usage
//!
//! ```
//! use concord::infer::{ChainConfig, infer_chains};
//! use concord::model::{Mapping, MappingSet, SimpleEvidence};
//! use concord::reference::Reference;
//! use concord::rules::PredicateRules;
//! use concord::vocab::{EXACT_MATCH, MANUAL_MAPPING};
//!
//! let evidence = SimpleEvidence::new(MANUAL_MAPPING.clone(), MappingSet::new("curated"));
//! let m = |s: &str, o: &str| -> Mapping {
//!     Mapping::asserted(
//!         Reference::from_curie(s).unwrap(),
//!         EXACT_MATCH.clone(),
//!         Reference::from_curie(o).unwrap(),
//!         evidence.clone(),
//!     )
//! };
//! let mappings = vec![m("mesh:D009369", "doid:162"), m("doid:162", "ncit:C3262")];
//!
//! let rules = PredicateRules::default();
//! let out = infer_chains(&mappings, &rules, &ChainConfig::default()).unwrap();
//! assert!(out.iter().any(|m| m.subject.curie() == "mesh:D009369"
//!     && m.object.curie() == "ncit:C3262"));
//! ```

pub mod error;
pub mod filter;
pub mod graph;
pub mod index;
pub mod infer;
pub mod model;
pub mod priority;
pub mod reference;
pub mod registry;
pub mod rules;
pub mod vocab;
