//! Evidence: why a mapping is believed.
//!
//! Evidence is either asserted by a source ([`SimpleEvidence`]) or derived by
//! the engine from other mappings ([`ReasonedEvidence`]). Reasoned evidence
//! owns copies of the mappings it consumed, so provenance is an acyclic value
//! tree rather than a set of back-references.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::reference::Reference;
use crate::vocab::EVIDENCE_PREFIX;

use super::mapping::{Mapping, Triple};

// ---------------------------------------------------------------------------
// Mapping sets
// ---------------------------------------------------------------------------

/// Provenance of a batch of asserted mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSet {
    /// Name of the source, usually its prefix.
    pub name: String,
    /// Release of the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// License of the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Confidence applied to every assertion from this set, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl MappingSet {
    /// A mapping set with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            license: None,
            confidence: None,
        }
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the license.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Set the set-level confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Hashable key over all four fields.
    pub fn key(&self) -> MappingSetKey {
        MappingSetKey {
            name: self.name.clone(),
            version: self.version.clone(),
            license: self.license.clone(),
            confidence: self.confidence.map(f64::to_bits),
        }
    }
}

/// Value key of a [`MappingSet`]; confidences compare by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MappingSetKey {
    pub name: String,
    pub version: Option<String>,
    pub license: Option<String>,
    pub confidence: Option<u64>,
}

// ---------------------------------------------------------------------------
// Evidence variants
// ---------------------------------------------------------------------------

/// Evidence asserted directly by a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleEvidence {
    /// How the assertion was made (manual curation, lexical matching, ...).
    pub justification: Reference,
    /// The batch this assertion came from.
    pub mapping_set: MappingSet,
    /// Who made the assertion, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,
    /// Per-assertion confidence, overriding the set's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl SimpleEvidence {
    /// Evidence from `mapping_set` with the given justification.
    pub fn new(justification: Reference, mapping_set: MappingSet) -> Self {
        Self {
            justification,
            mapping_set,
            author: None,
            confidence: None,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: Reference) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the per-assertion confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// The assertion's own confidence, falling back to the set's.
    pub fn confidence(&self) -> Option<f64> {
        self.confidence.or(self.mapping_set.confidence)
    }
}

/// Evidence derived by the engine from other mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonedEvidence {
    /// Which reasoning step produced it (inversion, chaining, mutation).
    pub justification: Reference,
    /// The mappings consumed, in order. Never empty.
    pub mappings: Vec<Mapping>,
    /// Multiplier applied to the consumed mappings' confidence.
    pub confidence_factor: f64,
}

impl ReasonedEvidence {
    /// Reasoned evidence with a confidence factor of 1.0.
    pub fn new(justification: Reference, mappings: Vec<Mapping>) -> Self {
        Self {
            justification,
            mappings,
            confidence_factor: 1.0,
        }
    }

    /// Set the confidence factor.
    pub fn with_confidence_factor(mut self, factor: f64) -> Self {
        self.confidence_factor = factor;
        self
    }

    /// Product of the consumed mappings' known confidences, scaled by the
    /// factor. `None` when no consumed mapping has a confidence.
    pub fn confidence(&self) -> Option<f64> {
        let known: Vec<f64> = self.mappings.iter().filter_map(Mapping::confidence).collect();
        if known.is_empty() {
            return None;
        }
        Some(self.confidence_factor * known.iter().product::<f64>())
    }
}

/// Evidence for a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evidence {
    Simple(SimpleEvidence),
    Reasoned(ReasonedEvidence),
}

impl Evidence {
    /// The justification reference of either variant.
    pub fn justification(&self) -> &Reference {
        match self {
            Evidence::Simple(e) => &e.justification,
            Evidence::Reasoned(e) => &e.justification,
        }
    }

    /// Confidence in [0, 1], if known.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Evidence::Simple(e) => e.confidence(),
            Evidence::Reasoned(e) => e.confidence(),
        }
    }

    /// The mapping set, which only asserted evidence has.
    pub fn mapping_set(&self) -> Option<&MappingSet> {
        match self {
            Evidence::Simple(e) => Some(&e.mapping_set),
            Evidence::Reasoned(_) => None,
        }
    }

    /// Deduplication key.
    ///
    /// Two simple evidences with the same justification, author, mapping set
    /// and confidence override are the same statement and share a key.
    /// Reasoned evidence is keyed by justification, factor and the triples it
    /// consumed.
    pub fn key(&self) -> EvidenceKey {
        match self {
            Evidence::Simple(e) => EvidenceKey::Simple {
                justification: e.justification.clone(),
                author: e.author.clone(),
                mapping_set: e.mapping_set.key(),
                confidence: e.confidence.map(f64::to_bits),
            },
            Evidence::Reasoned(e) => EvidenceKey::Reasoned {
                justification: e.justification.clone(),
                mappings: e.mappings.iter().map(Mapping::triple).collect(),
                confidence_factor: e.confidence_factor.to_bits(),
            },
        }
    }

    /// Deterministic reference derived from the key, for use as a node id in
    /// export formats.
    pub fn reference(&self) -> Reference {
        let digest = Sha256::digest(self.key().canonical().to_string().as_bytes());
        Reference::new(EVIDENCE_PREFIX, format!("{digest:x}"))
    }

    /// One-line human-readable description.
    pub fn explain(&self) -> String {
        match self {
            Evidence::Simple(e) => match &e.author {
                Some(author) => format!("{} by {author} in {}", e.justification, e.mapping_set.name),
                None => format!("{} in {}", e.justification, e.mapping_set.name),
            },
            Evidence::Reasoned(e) => {
                format!("{} over {} mapping(s)", e.justification, e.mappings.len())
            }
        }
    }
}

impl From<SimpleEvidence> for Evidence {
    fn from(e: SimpleEvidence) -> Self {
        Evidence::Simple(e)
    }
}

impl From<ReasonedEvidence> for Evidence {
    fn from(e: ReasonedEvidence) -> Self {
        Evidence::Reasoned(e)
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Identity of a piece of evidence for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvidenceKey {
    Simple {
        justification: Reference,
        author: Option<Reference>,
        mapping_set: MappingSetKey,
        confidence: Option<u64>,
    },
    Reasoned {
        justification: Reference,
        mappings: Vec<Triple>,
        confidence_factor: u64,
    },
}

fn reference_value(reference: &Reference) -> Value {
    Value::Array(vec![
        Value::from(reference.prefix.as_str()),
        Value::from(reference.identifier.as_str()),
    ])
}

impl EvidenceKey {
    /// Canonical JSON form: object keys sorted, strings escaped, no
    /// whitespace. Stable across runs and platforms.
    fn canonical(&self) -> Value {
        let mut map = Map::new();
        match self {
            EvidenceKey::Simple {
                justification,
                author,
                mapping_set,
                confidence,
            } => {
                map.insert("type".into(), Value::from("simple"));
                map.insert("justification".into(), reference_value(justification));
                map.insert(
                    "author".into(),
                    author.as_ref().map_or(Value::Null, reference_value),
                );
                map.insert("mapping_set".into(), mapping_set.canonical());
                map.insert("confidence".into(), Value::from(*confidence));
            }
            EvidenceKey::Reasoned {
                justification,
                mappings,
                confidence_factor,
            } => {
                map.insert("type".into(), Value::from("reasoned"));
                map.insert("justification".into(), reference_value(justification));
                map.insert("confidence_factor".into(), Value::from(*confidence_factor));
                let triples = mappings
                    .iter()
                    .map(|t| {
                        Value::Array(vec![
                            reference_value(&t.subject),
                            reference_value(&t.predicate),
                            reference_value(&t.object),
                        ])
                    })
                    .collect();
                map.insert("mappings".into(), Value::Array(triples));
            }
        }
        Value::Object(map)
    }
}

impl MappingSetKey {
    fn canonical(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".into(), Value::from(self.name.as_str()));
        map.insert("version".into(), Value::from(self.version.clone()));
        map.insert("license".into(), Value::from(self.license.clone()));
        map.insert("confidence".into(), Value::from(self.confidence));
        Value::Object(map)
    }
}
