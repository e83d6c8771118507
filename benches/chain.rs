//! Benchmarks for the reasoning stages.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use concord::index::assemble_evidences;
use concord::infer::{ChainConfig, infer_chains, infer_reversible};
use concord::model::{Mapping, MappingSet, SimpleEvidence};
use concord::priority::prioritize;
use concord::reference::Reference;
use concord::rules::PredicateRules;
use concord::vocab::{BROAD_MATCH, EXACT_MATCH, MANUAL_MAPPING};

const PREFIXES: [&str; 6] = ["mesh", "doid", "ncit", "umls", "efo", "mondo"];

/// `clusters` random clusters, each a spanning chain over the prefixes plus
/// a few extra edges.
fn random_mappings(rng: &mut StdRng, clusters: usize) -> Vec<Mapping> {
    let set = MappingSet::new("bench");
    let mut out = Vec::new();
    for c in 0..clusters {
        let members: Vec<Reference> = PREFIXES
            .iter()
            .map(|p| Reference::new(*p, format!("{c}")))
            .collect();
        for pair in members.windows(2) {
            out.push(Mapping::asserted(
                pair[0].clone(),
                EXACT_MATCH.clone(),
                pair[1].clone(),
                SimpleEvidence::new(MANUAL_MAPPING.clone(), set.clone())
                    .with_confidence(rng.gen_range(0.5..1.0)),
            ));
        }
        for _ in 0..2 {
            let a = rng.gen_range(0..members.len());
            let b = rng.gen_range(0..members.len());
            if a != b {
                out.push(Mapping::asserted(
                    members[a].clone(),
                    BROAD_MATCH.clone(),
                    members[b].clone(),
                    SimpleEvidence::new(MANUAL_MAPPING.clone(), set.clone()),
                ));
            }
        }
    }
    out
}

fn bench_assemble(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut mappings = random_mappings(&mut rng, 200);
    mappings.extend(mappings.clone());

    c.bench_function("assemble_2x200_clusters", |bench| {
        bench.iter(|| black_box(assemble_evidences(&mappings)))
    });
}

fn bench_chain(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let rules = PredicateRules::default();
    let mappings = infer_reversible(&random_mappings(&mut rng, 50), &rules);
    let config = ChainConfig::default();

    c.bench_function("chain_50_clusters", |bench| {
        bench.iter(|| black_box(infer_chains(&mappings, &rules, &config).unwrap()))
    });
}

fn bench_prioritize(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let rules = PredicateRules::default();
    let mappings = infer_chains(
        &infer_reversible(&random_mappings(&mut rng, 50), &rules),
        &rules,
        &ChainConfig::default(),
    )
    .unwrap();

    c.bench_function("prioritize_50_clusters", |bench| {
        bench.iter(|| black_box(prioritize(&mappings, &PREFIXES).unwrap()))
    });
}

criterion_group!(benches, bench_assemble, bench_chain, bench_prioritize);
criterion_main!(benches);
