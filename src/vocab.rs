//! Well-known references: mapping predicates and evidence justifications.
//!
//! Predicates follow SKOS plus the oboInOwl cross-reference; justifications
//! follow the SEMAPV mapping-process vocabulary.

use std::sync::LazyLock;

use crate::reference::Reference;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// `skos:exactMatch`, the equivalence predicate.
pub static EXACT_MATCH: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("skos", "exactMatch"));
/// `skos:broadMatch`: the object is broader than the subject.
pub static BROAD_MATCH: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("skos", "broadMatch"));
/// `skos:narrowMatch`: the object is narrower than the subject.
pub static NARROW_MATCH: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("skos", "narrowMatch"));
/// `skos:closeMatch`.
pub static CLOSE_MATCH: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("skos", "closeMatch"));
/// `oboInOwl:hasDbXref`, the imprecise cross-reference.
pub static DB_XREF: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("oboinowl", "hasDbXref"));
/// `owl:equivalentClass`.
pub static EQUIVALENT_TO: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("owl", "equivalentClass"));

// ---------------------------------------------------------------------------
// Justifications
// ---------------------------------------------------------------------------

/// Curated by a person.
pub static MANUAL_MAPPING: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("semapv", "ManualMappingCuration"));
/// Produced by lexical matching of labels.
pub static LEXICAL_MAPPING: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("semapv", "LexicalMatching"));
/// The source does not say how.
pub static UNSPECIFIED_MAPPING: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("semapv", "UnspecifiedMatching"));
/// Derived by swapping subject and object.
pub static INVERSION_MAPPING: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("semapv", "MappingInversion"));
/// Derived by composing a path of mappings.
pub static CHAIN_MAPPING: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("semapv", "MappingChaining"));
/// Derived by upgrading a predicate using knowledge about a vocabulary pair.
pub static KNOWLEDGE_MAPPING: LazyLock<Reference> =
    LazyLock::new(|| Reference::new("semapv", "BackgroundKnowledgeBasedMatching"));

/// Namespace of hash-derived evidence references.
pub const EVIDENCE_PREFIX: &str = "concord.evidence";
