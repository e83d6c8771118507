//! Mapping data model: references tied together by predicates, with evidence.
//!
//! - [`Mapping`]: an ordered (subject, predicate, object) triple plus evidence
//! - [`Evidence`]: asserted ([`SimpleEvidence`]) or derived ([`ReasonedEvidence`])
//! - [`MappingSet`]: provenance of a batch of asserted mappings
//!
//! All values are immutable once built and owned outright; reasoned evidence
//! holds copies of the mappings it consumed.

pub mod evidence;
pub mod mapping;

pub use evidence::{Evidence, EvidenceKey, MappingSet, MappingSetKey, ReasonedEvidence, SimpleEvidence};
pub use mapping::{Mapping, Triple, validate_mappings};
