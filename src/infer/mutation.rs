//! Mutation: add a more precise (or more general) predicate next to an
//! existing one, for configured vocabulary pairs.
//!
//! The typical case is the unqualified cross-reference between two
//! vocabularies known to only cross-reference equivalent concepts, which is
//! upgraded to `skos:exactMatch`. Originals are always kept; mutations only
//! add mappings.

use std::collections::BTreeMap;

use crate::error::{ConcordResult, ConfigError};
use crate::model::{Mapping, ReasonedEvidence};
use crate::reference::Reference;
use crate::vocab::{DB_XREF, EXACT_MATCH, KNOWLEDGE_MAPPING};

/// `(subject prefix, object prefix)` → confidence factor.
pub type PrefixPairConfidence = BTreeMap<(String, String), f64>;

/// Rewrite `old` to `new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRule {
    pub old: Reference,
    pub new: Reference,
}

impl MutationRule {
    /// Create a new rule.
    pub fn new(old: Reference, new: Reference) -> Self {
        Self { old, new }
    }
}

fn check_confidence(context: impl FnOnce() -> String, confidence: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(ConfigError::ConfidenceOutOfRange {
            context: context(),
            confidence,
        })
    }
}

fn mutate(mapping: &Mapping, predicate: &Reference, confidence: f64) -> Mapping {
    let evidence = ReasonedEvidence::new(KNOWLEDGE_MAPPING.clone(), vec![mapping.clone()])
        .with_confidence_factor(confidence);
    Mapping::new(
        mapping.subject.clone(),
        predicate.clone(),
        mapping.object.clone(),
        vec![evidence.into()],
    )
}

/// For every mapping with predicate `old` whose prefix pair is configured,
/// add a mapping with predicate `new`, scaled by the pair's confidence.
pub fn infer_mutations(
    mappings: &[Mapping],
    pairs: &PrefixPairConfidence,
    old: &Reference,
    new: &Reference,
) -> ConcordResult<Vec<Mapping>> {
    for ((s, o), &confidence) in pairs {
        check_confidence(|| format!("prefix pair ({s}, {o})"), confidence)?;
    }

    let mut out = mappings.to_vec();
    for mapping in mappings {
        if &mapping.predicate != old {
            continue;
        }
        let key = (mapping.subject.prefix.clone(), mapping.object.prefix.clone());
        if let Some(&confidence) = pairs.get(&key) {
            out.push(mutate(mapping, new, confidence));
        }
    }
    tracing::info!(
        old = %old,
        new = %new,
        inferred = out.len() - mappings.len(),
        "inferred mutations"
    );
    Ok(out)
}

/// Upgrade cross-references to exact matches between every two distinct
/// prefixes in `prefixes`, in both directions, at one confidence.
pub fn infer_mutual_dbxref_mutations<S: AsRef<str>>(
    mappings: &[Mapping],
    prefixes: &[S],
    confidence: f64,
) -> ConcordResult<Vec<Mapping>> {
    let mut pairs = PrefixPairConfidence::new();
    for s in prefixes {
        for o in prefixes {
            if s.as_ref() != o.as_ref() {
                pairs.insert((s.as_ref().to_string(), o.as_ref().to_string()), confidence);
            }
        }
    }
    infer_mutations(mappings, &pairs, &DB_XREF, &EXACT_MATCH)
}

/// Apply several rewrite rules in one pass, regardless of prefixes, at full
/// confidence. Used to collapse hierarchical predicates into a weaker one.
pub fn infer_generalizations(mappings: &[Mapping], rules: &[MutationRule]) -> Vec<Mapping> {
    let mut out = mappings.to_vec();
    for mapping in mappings {
        for rule in rules.iter().filter(|r| r.old == mapping.predicate) {
            out.push(mutate(mapping, &rule.new, 1.0));
        }
    }
    tracing::info!(
        rules = rules.len(),
        inferred = out.len() - mappings.len(),
        "inferred generalizations"
    );
    out
}
