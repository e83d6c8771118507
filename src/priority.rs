//! Prioritization: collapse each equivalence cluster into a star graph.
//!
//! Given exact-match mappings and a ranked list of prefixes, every weakly
//! connected cluster gets one representative: a member from the
//! highest-ranked prefix present. Every other member directly mapped to the
//! representative is rewritten as `member skos:exactMatch representative`.

use std::collections::HashMap;

use crate::error::{ConcordResult, ConfigError};
use crate::graph::MappingGraph;
use crate::graph::analytics::weakly_connected_components;
use crate::model::Mapping;
use crate::reference::Reference;
use crate::vocab::EXACT_MATCH;

/// Deduplicate a priority list, keeping first occurrences in order.
pub fn clean_priority<S: AsRef<str>>(priority: &[S]) -> Result<Vec<String>, ConfigError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(priority.len());
    for prefix in priority {
        if !cleaned.iter().any(|p| p == prefix.as_ref()) {
            cleaned.push(prefix.as_ref().to_string());
        }
    }
    if cleaned.is_empty() {
        return Err(ConfigError::EmptyPriority);
    }
    Ok(cleaned)
}

/// Pick the representative of a cluster: a member whose prefix comes first
/// in `priority`. If several members share that prefix, the first one in
/// `component` wins. `None` if no listed prefix is present.
pub fn get_priority_reference<'a, I>(component: I, priority: &[String]) -> Option<Reference>
where
    I: IntoIterator<Item = &'a Reference>,
{
    let mut by_prefix: HashMap<&str, Vec<&Reference>> = HashMap::new();
    for reference in component {
        by_prefix
            .entry(reference.prefix.as_str())
            .or_default()
            .push(reference);
    }
    for prefix in priority {
        let Some(candidates) = by_prefix.get(prefix.as_str()) else {
            continue;
        };
        let Some(&first) = candidates.first() else {
            continue;
        };
        if candidates.len() > 1 {
            tracing::warn!(
                prefix = %prefix,
                candidates = candidates.len(),
                chosen = %first,
                "multiple references for priority prefix, using the first"
            );
        }
        return Some(first.clone());
    }
    None
}

/// Build the star graph for every equivalence cluster.
///
/// Only `skos:exactMatch` mappings are considered. A member joined to the
/// representative by an edge in either direction yields one
/// `member → representative` mapping carrying that edge's evidence, preferring
/// the member-to-representative edge when both exist. Clusters with no listed
/// prefix are dropped. Output is sorted by representative rank, representative
/// identifier, member prefix, member identifier.
pub fn prioritize<S: AsRef<str>>(mappings: &[Mapping], priority: &[S]) -> ConcordResult<Vec<Mapping>> {
    let priority = clean_priority(priority)?;
    let rank: HashMap<&str, usize> = priority
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();

    let exact: Vec<Mapping> = mappings
        .iter()
        .filter(|m| m.predicate == *EXACT_MATCH)
        .cloned()
        .collect();
    let graph = MappingGraph::from_mappings(&exact);

    let mut out = Vec::new();
    let mut dropped = 0usize;
    for component in weakly_connected_components(&graph) {
        let references = component.iter().map(|&n| graph.reference(n));
        let Some(representative) = get_priority_reference(references, &priority) else {
            dropped += 1;
            continue;
        };
        let Some(rep) = graph.node(&representative) else {
            continue;
        };
        for &member in component.iter().filter(|&&n| n != rep) {
            let edge = graph
                .edges(member, rep)
                .into_iter()
                .chain(graph.edges(rep, member))
                .find(|e| e.predicate == *EXACT_MATCH);
            if let Some(edge) = edge {
                out.push(Mapping::new(
                    graph.reference(member).clone(),
                    EXACT_MATCH.clone(),
                    representative.clone(),
                    edge.evidence.clone(),
                ));
            }
        }
    }

    out.sort_by(|a, b| {
        let key = |m: &Mapping| {
            (
                rank.get(m.object.prefix.as_str()).copied().unwrap_or(usize::MAX),
                m.object.identifier.clone(),
                m.subject.prefix.clone(),
                m.subject.identifier.clone(),
            )
        };
        key(a).cmp(&key(b))
    });

    tracing::info!(
        before = mappings.len(),
        exact = exact.len(),
        after = out.len(),
        dropped_clusters = dropped,
        "prioritized mappings"
    );
    Ok(out)
}
