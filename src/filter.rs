//! Filtering and set operations over mapping collections.
//!
//! All filters keep the relative order of the mappings they retain.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{ConcordResult, ConfigError, ProjectionError};
use crate::index::assemble_evidences;
use crate::model::{Mapping, Triple};
use crate::reference::Reference;

/// Which end(s) of a mapping a prefix filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Subject,
    Object,
    /// Subject or object.
    Either,
    /// Subject and object.
    #[default]
    Both,
}

impl Side {
    fn matches(self, mapping: &Mapping, prefixes: &HashSet<&str>) -> bool {
        let s = prefixes.contains(mapping.subject.prefix.as_str());
        let o = prefixes.contains(mapping.object.prefix.as_str());
        match self {
            Side::Subject => s,
            Side::Object => o,
            Side::Either => s || o,
            Side::Both => s && o,
        }
    }
}

fn prefix_set<S: AsRef<str>>(prefixes: &[S]) -> HashSet<&str> {
    prefixes.iter().map(AsRef::as_ref).collect()
}

// ---------------------------------------------------------------------------
// Simple filters
// ---------------------------------------------------------------------------

/// Drop mappings between two concepts of the same vocabulary.
pub fn filter_self_matches(mappings: &[Mapping]) -> Vec<Mapping> {
    let out: Vec<Mapping> = mappings
        .iter()
        .filter(|m| !m.is_self_match())
        .cloned()
        .collect();
    tracing::info!(before = mappings.len(), after = out.len(), "filtered self matches");
    out
}

/// Keep mappings whose prefixes on `side` are all listed.
pub fn keep_prefixes<S: AsRef<str>>(mappings: &[Mapping], prefixes: &[S], side: Side) -> Vec<Mapping> {
    let prefixes = prefix_set(prefixes);
    mappings
        .iter()
        .filter(|m| side.matches(m, &prefixes))
        .cloned()
        .collect()
}

/// Drop mappings whose prefixes on `side` are listed.
pub fn exclude_prefixes<S: AsRef<str>>(
    mappings: &[Mapping],
    prefixes: &[S],
    side: Side,
) -> Vec<Mapping> {
    let prefixes = prefix_set(prefixes);
    mappings
        .iter()
        .filter(|m| !side.matches(m, &prefixes))
        .cloned()
        .collect()
}

/// Keep mappings with one of the given predicates.
pub fn keep_predicates(mappings: &[Mapping], predicates: &[Reference]) -> Vec<Mapping> {
    mappings
        .iter()
        .filter(|m| predicates.contains(&m.predicate))
        .cloned()
        .collect()
}

/// Drop mappings with one of the given predicates.
pub fn exclude_predicates(mappings: &[Mapping], predicates: &[Reference]) -> Vec<Mapping> {
    let out: Vec<Mapping> = mappings
        .iter()
        .filter(|m| !predicates.contains(&m.predicate))
        .cloned()
        .collect();
    tracing::info!(before = mappings.len(), after = out.len(), "filtered predicates");
    out
}

/// Drop every mapping whose triple appears in `negatives`.
pub fn filter_negatives(mappings: &[Mapping], negatives: &[Mapping]) -> Vec<Mapping> {
    let blocked: HashSet<Triple> = negatives.iter().map(Mapping::triple).collect();
    let out: Vec<Mapping> = mappings
        .iter()
        .filter(|m| !blocked.contains(&m.triple()))
        .cloned()
        .collect();
    tracing::info!(
        before = mappings.len(),
        after = out.len(),
        negatives = blocked.len(),
        "filtered negative mappings"
    );
    out
}

/// Keep mappings whose confidence is known and at least `cutoff`.
pub fn filter_minimum_confidence(mappings: &[Mapping], cutoff: f64) -> ConcordResult<Vec<Mapping>> {
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(ConfigError::ConfidenceOutOfRange {
            context: "minimum confidence cutoff".into(),
            confidence: cutoff,
        }
        .into());
    }
    Ok(mappings
        .iter()
        .filter(|m| m.confidence().is_some_and(|c| c >= cutoff))
        .cloned()
        .collect())
}

// ---------------------------------------------------------------------------
// Many-to-many
// ---------------------------------------------------------------------------

/// (subject prefix, object prefix) → key identifier → other identifier → mappings.
type Grouping<'a> = HashMap<(&'a str, &'a str), HashMap<&'a str, HashMap<&'a str, Vec<&'a Mapping>>>>;

/// Triples of mappings whose subject has several objects, or whose object
/// has several subjects, within one prefix pair. Predicates are ignored.
fn ambiguous_triples(mappings: &[Mapping]) -> HashSet<Triple> {
    let mut forward: Grouping<'_> = HashMap::new();
    let mut backward: Grouping<'_> = HashMap::new();
    for m in mappings {
        let pair = (m.subject.prefix.as_str(), m.object.prefix.as_str());
        let (s, o) = (m.subject.identifier.as_str(), m.object.identifier.as_str());
        forward
            .entry(pair)
            .or_default()
            .entry(s)
            .or_default()
            .entry(o)
            .or_default()
            .push(m);
        backward
            .entry(pair)
            .or_default()
            .entry(o)
            .or_default()
            .entry(s)
            .or_default()
            .push(m);
    }

    let mut ambiguous = HashSet::new();
    for grouping in [&forward, &backward] {
        for by_key in grouping.values() {
            for others in by_key.values().filter(|others| others.len() > 1) {
                for m in others.values().flatten() {
                    ambiguous.insert(m.triple());
                }
            }
        }
    }
    ambiguous
}

/// The ambiguous (many-to-many) subset, assembled.
pub fn get_many_to_many(mappings: &[Mapping]) -> Vec<Mapping> {
    let ambiguous = ambiguous_triples(mappings);
    let subset: Vec<Mapping> = mappings
        .iter()
        .filter(|m| ambiguous.contains(&m.triple()))
        .cloned()
        .collect();
    assemble_evidences(&subset)
}

/// Drop every ambiguous (many-to-many) mapping.
pub fn filter_many_to_many(mappings: &[Mapping]) -> Vec<Mapping> {
    let ambiguous = ambiguous_triples(mappings);
    let out: Vec<Mapping> = mappings
        .iter()
        .filter(|m| !ambiguous.contains(&m.triple()))
        .cloned()
        .collect();
    tracing::info!(
        before = mappings.len(),
        after = out.len(),
        "filtered many-to-many mappings"
    );
    out
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Restrict to mappings from `source` to `target`, drop many-to-many pairs,
/// and assemble. Returns the projection and the ambiguous mappings removed.
pub fn project_with_ambiguous(
    mappings: &[Mapping],
    source: &str,
    target: &str,
) -> (Vec<Mapping>, Vec<Mapping>) {
    let between: Vec<Mapping> = mappings
        .iter()
        .filter(|m| m.subject.prefix == source && m.object.prefix == target)
        .cloned()
        .collect();
    let ambiguous = get_many_to_many(&between);
    let projected = assemble_evidences(&filter_many_to_many(&between));
    (projected, ambiguous)
}

/// Restrict to mappings from `source` to `target`, drop many-to-many pairs,
/// and assemble.
pub fn project(mappings: &[Mapping], source: &str, target: &str) -> Vec<Mapping> {
    project_with_ambiguous(mappings, source, target).0
}

/// Check that every subject appears in at most one mapping.
pub fn validate_projection(mappings: &[Mapping]) -> Result<(), ProjectionError> {
    let mut counts: BTreeMap<&Reference, usize> = BTreeMap::new();
    for m in mappings {
        *counts.entry(&m.subject).or_default() += 1;
    }
    match counts.into_iter().find(|(_, count)| *count > 1) {
        Some((subject, count)) => Err(ProjectionError::NotFunctional {
            subject: subject.curie(),
            count,
        }),
        None => Ok(()),
    }
}

/// Project and return subject identifier → object identifier.
pub fn project_dict(
    mappings: &[Mapping],
    source: &str,
    target: &str,
) -> ConcordResult<BTreeMap<String, String>> {
    let projected = project(mappings, source, target);
    validate_projection(&projected)?;
    Ok(projected
        .into_iter()
        .map(|m| (m.subject.identifier, m.object.identifier))
        .collect())
}
