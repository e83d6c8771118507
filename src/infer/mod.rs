//! Inference stages: each takes a mapping collection and returns a new one
//! with derived mappings added.
//!
//! - [`inversion`]: swap subject and object under the predicate flip table
//! - [`mutation`]: upgrade (or generalize) predicates for configured
//!   vocabulary pairs
//! - [`chain`]: compose paths of mappings within a cluster
//!
//! Derived mappings carry [`ReasonedEvidence`](crate::model::ReasonedEvidence)
//! that owns copies of the mappings it consumed.

pub mod chain;
pub mod inversion;
pub mod mutation;

pub use chain::{ChainConfig, infer_chains, reduce_chain};
pub use inversion::{flip, infer_reversible};
pub use mutation::{
    MutationRule, PrefixPairConfidence, infer_generalizations, infer_mutations,
    infer_mutual_dbxref_mutations,
};
