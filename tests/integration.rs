//! End-to-end integration tests for the concord reasoning engine.
//!
//! These tests run the full pipeline from loading sources through mutation,
//! inversion and chain inference to prioritization, and check the
//! properties the stages promise to each other.

use concord::error::ConcordResult;
use concord::filter::{
    Side, exclude_predicates, filter_negatives, filter_self_matches, get_many_to_many, keep_prefixes,
    project, project_dict,
};
use concord::index::{assemble_evidences, get_index, unindex};
use concord::infer::{ChainConfig, flip, infer_chains, infer_mutual_dbxref_mutations, infer_reversible};
use concord::model::{Evidence, Mapping, MappingSet, SimpleEvidence, validate_mappings};
use concord::priority::prioritize;
use concord::reference::Reference;
use concord::registry::SourceRegistry;
use concord::rules::PredicateRules;
use concord::vocab::{
    BROAD_MATCH, CHAIN_MAPPING, DB_XREF, EVIDENCE_PREFIX, EXACT_MATCH, LEXICAL_MAPPING,
    MANUAL_MAPPING, NARROW_MATCH,
};

fn r(curie: &str) -> Reference {
    Reference::from_curie(curie).unwrap()
}

fn mapping(s: &str, p: &Reference, o: &str, source: &str, confidence: f64) -> Mapping {
    Mapping::asserted(
        r(s),
        p.clone(),
        r(o),
        SimpleEvidence::new(MANUAL_MAPPING.clone(), MappingSet::new(source)).with_confidence(confidence),
    )
}

fn curated() -> ConcordResult<Vec<Mapping>> {
    Ok(vec![
        mapping("mesh:D1", &EXACT_MATCH, "doid:1", "curated", 0.95),
        mapping("doid:1", &EXACT_MATCH, "ncit:C1", "curated", 0.9),
        mapping("mesh:D1", &EXACT_MATCH, "mesh:D2", "curated", 0.9),
        mapping("doid:1", &EXACT_MATCH, "efo:9", "curated", 0.9),
    ])
}

fn xrefs() -> ConcordResult<Vec<Mapping>> {
    Ok(vec![mapping("umls:U1", &DB_XREF, "mesh:D1", "xrefs", 0.8)])
}

fn registry() -> SourceRegistry {
    let mut reg = SourceRegistry::new();
    reg.register("curated", curated).unwrap();
    reg.register("xrefs", xrefs).unwrap();
    reg
}

const PRIORITY: [&str; 4] = ["doid", "mesh", "ncit", "umls"];

/// Every stage in order: assemble, invert, upgrade cross-references, drop
/// the imprecise predicate, invert again, chain, drop negatives, drop self
/// matches, restrict vocabularies, prioritize.
fn run_pipeline(negatives: &[Mapping]) -> Vec<Mapping> {
    let rules = PredicateRules::default();
    let loaded = registry().load_all(&["curated", "xrefs"]).unwrap();
    validate_mappings(&loaded).unwrap();

    let assembled = assemble_evidences(&loaded);
    let reversed = infer_reversible(&assembled, &rules);
    let mutated = infer_mutual_dbxref_mutations(&reversed, &["umls", "mesh"], 0.7).unwrap();
    let precise = exclude_predicates(&mutated, &[DB_XREF.clone()]);
    let reversed = infer_reversible(&precise, &rules);
    let chained = infer_chains(&reversed, &rules, &ChainConfig::default()).unwrap();
    let kept = filter_negatives(&chained, negatives);
    let cleaned = filter_self_matches(&kept);
    let restricted = keep_prefixes(&cleaned, &PRIORITY, Side::Both);
    validate_mappings(&restricted).unwrap();
    prioritize(&restricted, &PRIORITY).unwrap()
}

fn pairs(out: &[Mapping]) -> Vec<(String, String)> {
    out.iter()
        .map(|m| (m.subject.curie(), m.object.curie()))
        .collect()
}

#[test]
fn end_to_end_load_infer_prioritize() {
    let out = run_pipeline(&[]);

    assert_eq!(
        pairs(&out),
        vec![
            ("mesh:D1".to_string(), "doid:1".to_string()),
            ("ncit:C1".to_string(), "doid:1".to_string()),
            ("umls:U1".to_string(), "doid:1".to_string()),
        ]
    );
    assert!(out.iter().all(|m| m.predicate == *EXACT_MATCH));
    assert!(!out.iter().any(|m| m.subject.prefix == "efo" || m.object.prefix == "efo"));

    // mesh:D1 -> doid:1 was asserted directly and keeps its source evidence.
    assert!(out[0].evidence.iter().any(|e| {
        e.mapping_set().is_some_and(|set| set.name == "curated")
    }));
    assert!(out[0].confidence().unwrap() >= 0.95);

    // umls:U1 -> doid:1 only exists through chain inference.
    assert!(
        out[2]
            .evidence
            .iter()
            .any(|e| e.justification() == &*CHAIN_MAPPING)
    );
    assert!(!out[2].evidence.iter().any(|e| e.mapping_set().is_some()));
}

#[test]
fn imprecise_predicate_is_removed_before_chaining() {
    let out = run_pipeline(&[]);
    let umls = &out[2];
    let consumed_predicates: Vec<&Reference> = umls
        .evidence
        .iter()
        .filter_map(|e| match e {
            Evidence::Reasoned(r) => Some(r.mappings.iter().map(|m| &m.predicate)),
            Evidence::Simple(_) => None,
        })
        .flatten()
        .collect();
    assert!(!consumed_predicates.is_empty());
    assert!(consumed_predicates.iter().all(|p| **p == *EXACT_MATCH));
}

#[test]
fn negatives_remove_inferred_mappings() {
    let negatives = vec![
        mapping("umls:U1", &EXACT_MATCH, "doid:1", "blocklist", 1.0),
        mapping("doid:1", &EXACT_MATCH, "umls:U1", "blocklist", 1.0),
    ];
    let out = run_pipeline(&negatives);
    assert_eq!(
        pairs(&out),
        vec![
            ("mesh:D1".to_string(), "doid:1".to_string()),
            ("ncit:C1".to_string(), "doid:1".to_string()),
        ]
    );
}

#[test]
fn pipeline_is_deterministic() {
    assert_eq!(run_pipeline(&[]), run_pipeline(&[]));
}

#[test]
fn chain_inference_over_equivalence_line() {
    let rules = PredicateRules::default();
    let mappings = vec![
        mapping("a:1", &EXACT_MATCH, "b:1", "s", 0.9),
        mapping("b:1", &EXACT_MATCH, "c:1", "s", 0.9),
        mapping("c:1", &EXACT_MATCH, "d:1", "s", 0.9),
    ];
    let out = infer_chains(&mappings, &rules, &ChainConfig::default()).unwrap();
    for (s, o) in [("a:1", "c:1"), ("a:1", "d:1"), ("b:1", "d:1")] {
        assert!(
            out.iter()
                .any(|m| m.subject == r(s) && m.object == r(o) && m.predicate == *EXACT_MATCH),
            "missing {s} -> {o}"
        );
    }
}

#[test]
fn no_inference_across_conflicting_hierarchy() {
    let rules = PredicateRules::default();
    let mappings = vec![
        mapping("a:1", &BROAD_MATCH, "b:1", "s", 0.9),
        mapping("b:1", &NARROW_MATCH, "c:1", "s", 0.9),
    ];
    let out = infer_chains(&mappings, &rules, &ChainConfig::default()).unwrap();
    assert_eq!(out, assemble_evidences(&mappings));
}

#[test]
fn two_step_table() {
    let rules = PredicateRules::default();
    assert_eq!(rules.combine(&BROAD_MATCH, &EXACT_MATCH), Some(BROAD_MATCH.clone()));
    assert_eq!(rules.combine(&EXACT_MATCH, &BROAD_MATCH), Some(BROAD_MATCH.clone()));
    assert_eq!(rules.combine(&NARROW_MATCH, &EXACT_MATCH), Some(NARROW_MATCH.clone()));
    assert_eq!(rules.combine(&EXACT_MATCH, &NARROW_MATCH), Some(NARROW_MATCH.clone()));
    assert_eq!(rules.combine(&BROAD_MATCH, &NARROW_MATCH), None);
    assert_eq!(rules.combine(&DB_XREF, &DB_XREF), None);
}

#[test]
fn inversion_is_an_involution() {
    let rules = PredicateRules::default();
    let m = mapping("a:1", &BROAD_MATCH, "b:1", "s", 0.6);
    let back = flip(&flip(&m, &rules).unwrap(), &rules).unwrap();
    assert_eq!(back.triple(), m.triple());
    assert_eq!(back.confidence(), m.confidence());
}

#[test]
fn assembling_is_idempotent() {
    let mappings = vec![
        mapping("a:1", &EXACT_MATCH, "b:1", "one", 0.9),
        mapping("a:1", &EXACT_MATCH, "b:1", "one", 0.9),
        mapping("a:1", &EXACT_MATCH, "b:1", "two", 0.8),
        mapping("c:1", &EXACT_MATCH, "b:1", "one", 0.5),
    ];
    let once = assemble_evidences(&mappings);
    assert_eq!(once.len(), 2);
    assert_eq!(once[0].evidence.len(), 2);
    assert_eq!(assemble_evidences(&once), once);
    assert_eq!(unindex(get_index(&once)), once);
}

#[test]
fn confidence_combines_independent_evidence() {
    let mut m = mapping("a:1", &EXACT_MATCH, "b:1", "one", 0.8);
    m.evidence.push(Evidence::Simple(
        SimpleEvidence::new(LEXICAL_MAPPING.clone(), MappingSet::new("two")).with_confidence(0.9),
    ));
    assert!((m.confidence().unwrap() - 0.98).abs() < 1e-9);
}

#[test]
fn projection_excludes_many_to_many() {
    let mappings = vec![
        mapping("a:1", &EXACT_MATCH, "b:x", "s", 0.9),
        mapping("a:1", &EXACT_MATCH, "b:y", "s", 0.9),
        mapping("a:2", &EXACT_MATCH, "b:z", "s", 0.9),
    ];
    let ambiguous = get_many_to_many(&mappings);
    let projected = project(&mappings, "a", "b");
    for m in &ambiguous {
        assert!(!projected.iter().any(|p| p.triple() == m.triple()));
    }
    let dict = project_dict(&mappings, "a", "b").unwrap();
    assert_eq!(dict.len(), 1);
    assert_eq!(dict["2"], "z");
}

#[test]
fn prioritization_picks_highest_ranked_prefix() {
    let mappings = vec![
        mapping("A:1", &EXACT_MATCH, "B:x", "s", 0.9),
        mapping("A:1", &EXACT_MATCH, "C:q", "s", 0.9),
        mapping("B:x", &EXACT_MATCH, "C:q", "s", 0.9),
    ];
    let out = prioritize(&mappings, &["B", "A", "C"]).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|m| m.object == r("B:x")));
    assert_eq!(out[0].subject, r("A:1"));
    assert_eq!(out[1].subject, r("C:q"));
}

#[test]
fn pipeline_output_serializes() {
    let out = run_pipeline(&[]);
    let json = serde_json::to_string(&out).unwrap();
    let back: Vec<Mapping> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, out);

    let evidence_refs: Vec<Reference> = out
        .iter()
        .flat_map(|m| m.evidence.iter().map(Evidence::reference))
        .collect();
    assert!(evidence_refs.iter().all(|e| e.prefix == EVIDENCE_PREFIX));
}
