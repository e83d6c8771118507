//! Evidence index: group evidence by triple and deduplicate it.
//!
//! Mappings from different sources often assert the same triple. The index
//! folds them into one entry per triple whose evidence list holds each
//! distinct piece of evidence once, in first-seen order. Triples come out
//! sorted, so assembling is deterministic and idempotent.

use std::collections::{BTreeMap, HashSet};

use crate::model::{Evidence, EvidenceKey, Mapping, Triple};

/// Triple → deduplicated evidence.
pub type EvidenceIndex = BTreeMap<Triple, Vec<Evidence>>;

/// Build the evidence index for a collection of mappings.
pub fn get_index(mappings: &[Mapping]) -> EvidenceIndex {
    let mut index: EvidenceIndex = BTreeMap::new();
    let mut seen: BTreeMap<Triple, HashSet<EvidenceKey>> = BTreeMap::new();
    for mapping in mappings {
        let triple = mapping.triple();
        let keys = seen.entry(triple.clone()).or_default();
        let slot = index.entry(triple).or_default();
        for evidence in &mapping.evidence {
            if keys.insert(evidence.key()) {
                slot.push(evidence.clone());
            }
        }
    }
    index
}

/// Turn an index back into mappings, one per triple.
pub fn unindex(index: EvidenceIndex) -> Vec<Mapping> {
    index
        .into_iter()
        .map(|(triple, evidence)| Mapping::from_triple(triple, evidence))
        .collect()
}

/// Merge mappings sharing a triple and deduplicate their evidence.
pub fn assemble_evidences(mappings: &[Mapping]) -> Vec<Mapping> {
    let assembled = unindex(get_index(mappings));
    tracing::debug!(
        before = mappings.len(),
        after = assembled.len(),
        "assembled evidences"
    );
    assembled
}

/// Keep the first occurrence of each distinct piece of evidence.
pub fn deduplicate_evidence(evidence: &[Evidence]) -> Vec<Evidence> {
    let mut seen = HashSet::new();
    evidence
        .iter()
        .filter(|e| seen.insert(e.key()))
        .cloned()
        .collect()
}
