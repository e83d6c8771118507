//! Mappings: a (subject, predicate, object) triple plus its evidence.

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::reference::Reference;

use super::evidence::{Evidence, SimpleEvidence};

/// The identity of a mapping. Evidence accumulates under a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Reference,
    pub predicate: Reference,
    pub object: Reference,
}

impl Triple {
    /// Create a new triple.
    pub fn new(subject: Reference, predicate: Reference, object: Reference) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}

/// A directed assertion between two concepts, with the evidence for it.
///
/// Mappings are never mutated after creation; every stage returns new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    pub subject: Reference,
    pub predicate: Reference,
    pub object: Reference,
    pub evidence: Vec<Evidence>,
}

impl Mapping {
    /// Create a mapping from its parts.
    pub fn new(
        subject: Reference,
        predicate: Reference,
        object: Reference,
        evidence: Vec<Evidence>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
            evidence,
        }
    }

    /// Create a mapping carrying a triple's identity.
    pub fn from_triple(triple: Triple, evidence: Vec<Evidence>) -> Self {
        Self::new(triple.subject, triple.predicate, triple.object, evidence)
    }

    /// A raw, pre-assembly mapping with one piece of asserted evidence.
    pub fn asserted(
        subject: Reference,
        predicate: Reference,
        object: Reference,
        evidence: SimpleEvidence,
    ) -> Self {
        Self::new(subject, predicate, object, vec![Evidence::Simple(evidence)])
    }

    /// The triple identifying this mapping.
    pub fn triple(&self) -> Triple {
        Triple::new(
            self.subject.clone(),
            self.predicate.clone(),
            self.object.clone(),
        )
    }

    /// Joint confidence `1 − Π(1 − cᵢ)` over evidence with a known confidence.
    ///
    /// `None` when no evidence carries a confidence; that is "no signal",
    /// not zero.
    pub fn confidence(&self) -> Option<f64> {
        let known: Vec<f64> = self.evidence.iter().filter_map(Evidence::confidence).collect();
        if known.is_empty() {
            return None;
        }
        Some(1.0 - known.iter().map(|c| 1.0 - c).product::<f64>())
    }

    /// Whether the subject and object come from the same vocabulary.
    pub fn is_self_match(&self) -> bool {
        self.subject.prefix == self.object.prefix
    }

    /// Check the mapping's invariants, recursing into consumed mappings.
    pub fn validate(&self) -> Result<(), MappingError> {
        let triple = || self.triple().to_string();
        if !(self.subject.is_resolved() && self.predicate.is_resolved() && self.object.is_resolved())
        {
            return Err(MappingError::UnresolvedReference { triple: triple() });
        }
        if self.evidence.is_empty() {
            return Err(MappingError::NoEvidence { triple: triple() });
        }
        for evidence in &self.evidence {
            match evidence {
                Evidence::Simple(e) => {
                    for confidence in [e.confidence, e.mapping_set.confidence].into_iter().flatten() {
                        check_range(confidence, &triple)?;
                    }
                }
                Evidence::Reasoned(e) => {
                    if e.mappings.is_empty() {
                        return Err(MappingError::EmptyReasoning { triple: triple() });
                    }
                    check_range(e.confidence_factor, &triple)?;
                    for consumed in &e.mappings {
                        consumed.validate()?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_range(confidence: f64, triple: &dyn Fn() -> String) -> Result<(), MappingError> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(MappingError::ConfidenceOutOfRange {
            triple: triple(),
            confidence,
        })
    }
}

/// Validate a whole collection, failing on the first bad mapping.
pub fn validate_mappings(mappings: &[Mapping]) -> Result<(), MappingError> {
    mappings.iter().try_for_each(Mapping::validate)
}
