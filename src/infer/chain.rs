//! Chain inference: entail new mappings by composing paths within a cluster.
//!
//! For every pair of concepts in a cluster that are not directly mapped, all
//! simple paths between them up to a hop cutoff are reduced to a single
//! entailed predicate with the two-step combination table. Paths that pass
//! through two concepts from the same vocabulary are not trusted and are
//! dropped; so are paths whose predicates conflict (broader then narrower).
//!
//! Path enumeration is exponential in the worst case. Cluster size bounds and
//! the hop cutoff are the only throttles; clusters above the ceiling are
//! skipped whole, never reasoned over partially.

use std::collections::{BTreeMap, HashSet};

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::error::{ConcordResult, ConfigError};
use crate::graph::MappingGraph;
use crate::graph::analytics::{Hop, expand_edges, simple_paths, weakly_connected_components};
use crate::index::assemble_evidences;
use crate::model::{Evidence, Mapping, ReasonedEvidence};
use crate::reference::Reference;
use crate::rules::PredicateRules;
use crate::vocab::CHAIN_MAPPING;

/// Bounds for chain inference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Maximum number of hops in a path (default: 5).
    pub cutoff: usize,
    /// Smallest cluster reasoned over, inclusive (default: 3).
    pub min_component_size: usize,
    /// Largest cluster reasoned over, inclusive (default: 100).
    pub max_component_size: usize,
    /// Also emit the flip of each entailed mapping (default: true).
    pub backward: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            cutoff: 5,
            min_component_size: 3,
            max_component_size: 100,
            backward: true,
        }
    }
}

impl ChainConfig {
    /// Reject bounds that cannot describe any cluster or path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cutoff == 0 {
            return Err(ConfigError::InvalidChain {
                message: "cutoff must be at least 1".into(),
            });
        }
        if self.min_component_size > self.max_component_size {
            return Err(ConfigError::InvalidChain {
                message: format!(
                    "min_component_size {} exceeds max_component_size {}",
                    self.min_component_size, self.max_component_size
                ),
            });
        }
        Ok(())
    }

    fn admits(&self, size: usize) -> bool {
        (self.min_component_size..=self.max_component_size).contains(&size)
    }
}

/// Reduce a sequence of predicates to the one it entails, if any.
///
/// Folds left with [`PredicateRules::combine`]: an all-equivalence path
/// entails equivalence, equivalence mixed with only broader entails broader
/// (likewise narrower), and any other mixture entails nothing.
pub fn reduce_chain(predicates: &[Reference], rules: &PredicateRules) -> Option<Reference> {
    let (first, rest) = predicates.split_first()?;
    rest.iter()
        .try_fold(first.clone(), |acc, next| rules.combine(&acc, next))
}

/// Whether two nodes of the path share a prefix.
fn has_prefix_duplicates(graph: &MappingGraph, nodes: &[NodeIndex]) -> bool {
    let mut seen = HashSet::new();
    nodes
        .iter()
        .any(|&n| !seen.insert(graph.reference(n).prefix.as_str()))
}

/// Entail new mappings from paths within each retained cluster.
///
/// Returns the assembled input followed by the new mappings, which hold at
/// most one mapping per (subject, predicate, object).
pub fn infer_chains(
    mappings: &[Mapping],
    rules: &PredicateRules,
    config: &ChainConfig,
) -> ConcordResult<Vec<Mapping>> {
    config.validate()?;

    let mut out = assemble_evidences(mappings);
    let graph = MappingGraph::from_mappings(&out);

    let mut inferred = Vec::new();
    let mut skipped = 0usize;
    for component in weakly_connected_components(&graph) {
        if !config.admits(component.len()) {
            if component.len() > config.max_component_size {
                tracing::debug!(
                    size = component.len(),
                    max = config.max_component_size,
                    "skipping oversized cluster"
                );
                skipped += 1;
            }
            continue;
        }
        infer_component(&graph, &component, rules, config, &mut inferred);
    }

    let inferred = assemble_evidences(&inferred);
    tracing::info!(
        before = out.len(),
        inferred = inferred.len(),
        skipped_clusters = skipped,
        "inferred chains"
    );
    out.extend(inferred);
    Ok(out)
}

fn infer_component(
    graph: &MappingGraph,
    component: &[NodeIndex],
    rules: &PredicateRules,
    config: &ChainConfig,
    out: &mut Vec<Mapping>,
) {
    for (i, &a) in component.iter().enumerate() {
        for &b in &component[i + 1..] {
            if graph.has_edge_between(a, b) {
                continue;
            }
            infer_pair(graph, a, b, rules, config, out);
            infer_pair(graph, b, a, rules, config, out);
        }
    }
}

fn infer_pair(
    graph: &MappingGraph,
    from: NodeIndex,
    to: NodeIndex,
    rules: &PredicateRules,
    config: &ChainConfig,
    out: &mut Vec<Mapping>,
) {
    // entailed predicate -> first path that entails it
    let mut entailed: BTreeMap<Reference, Vec<Hop<'_>>> = BTreeMap::new();
    for nodes in simple_paths(graph, from, to, config.cutoff) {
        if has_prefix_duplicates(graph, &nodes) {
            continue;
        }
        for hops in expand_edges(graph, &nodes) {
            let predicates: Vec<Reference> = hops.iter().map(|(_, _, e)| e.predicate.clone()).collect();
            if let Some(predicate) = reduce_chain(&predicates, rules) {
                entailed.entry(predicate).or_insert(hops);
            }
        }
    }

    let subject = graph.reference(from);
    let object = graph.reference(to);
    for (predicate, hops) in entailed {
        let consumed: Vec<Mapping> = hops
            .iter()
            .map(|&(u, v, edge)| graph.mapping(u, v, edge))
            .collect();
        let evidence = Evidence::from(ReasonedEvidence::new(CHAIN_MAPPING.clone(), consumed));

        if config.backward {
            if let Some(flipped) = rules.flip(&predicate) {
                out.push(Mapping::new(
                    object.clone(),
                    flipped.clone(),
                    subject.clone(),
                    vec![evidence.clone()],
                ));
            }
        }
        out.push(Mapping::new(
            subject.clone(),
            predicate,
            object.clone(),
            vec![evidence],
        ));
    }
}
