//! Inversion: derive `o p′ s` from `s p o` when `p` has a flip partner `p′`.

use crate::model::{Mapping, ReasonedEvidence};
use crate::rules::PredicateRules;
use crate::vocab::INVERSION_MAPPING;

/// The inverse of a mapping, or `None` if its predicate has no flip.
///
/// The inverse carries a single piece of reasoned evidence wrapping the
/// original mapping, so its confidence equals the original's.
pub fn flip(mapping: &Mapping, rules: &PredicateRules) -> Option<Mapping> {
    let predicate = rules.flip(&mapping.predicate)?;
    let evidence = ReasonedEvidence::new(INVERSION_MAPPING.clone(), vec![mapping.clone()]);
    Some(Mapping::new(
        mapping.object.clone(),
        predicate.clone(),
        mapping.subject.clone(),
        vec![evidence.into()],
    ))
}

/// Append the inverse of every invertible mapping after it.
///
/// Originals are kept. The result is not deduplicated: if the input already
/// held both directions, run [`assemble_evidences`](crate::index::assemble_evidences)
/// afterwards to merge them.
pub fn infer_reversible(mappings: &[Mapping], rules: &PredicateRules) -> Vec<Mapping> {
    let mut out = Vec::with_capacity(mappings.len() * 2);
    for mapping in mappings {
        out.push(mapping.clone());
        if let Some(inverse) = flip(mapping, rules) {
            out.push(inverse);
        }
    }
    tracing::info!(
        before = mappings.len(),
        inferred = out.len() - mappings.len(),
        "inferred reversible mappings"
    );
    out
}
