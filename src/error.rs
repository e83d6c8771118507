//! Rich diagnostic error types for the concord reasoning engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Only malformed data and invalid
//! configuration are errors: ambiguity and "nothing to infer" degrade to
//! smaller output and are logged instead.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the concord engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum ConcordError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),
}

// ---------------------------------------------------------------------------
// Reference errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ReferenceError {
    #[error("malformed CURIE \"{curie}\": missing ':' separator")]
    #[diagnostic(
        code(concord::reference::missing_separator),
        help(
            "A compact URI has the form `prefix:identifier`, e.g. `mesh:D009369`. \
             Resolve raw identifiers to a prefix before building mappings."
        )
    )]
    MissingSeparator { curie: String },

    #[error("malformed CURIE \"{curie}\": empty prefix")]
    #[diagnostic(
        code(concord::reference::empty_prefix),
        help("The namespace before ':' must not be empty.")
    )]
    EmptyPrefix { curie: String },

    #[error("malformed CURIE \"{curie}\": empty identifier")]
    #[diagnostic(
        code(concord::reference::empty_identifier),
        help("The local identifier after ':' must not be empty.")
    )]
    EmptyIdentifier { curie: String },
}

// ---------------------------------------------------------------------------
// Mapping errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum MappingError {
    #[error("mapping {triple} has no evidence")]
    #[diagnostic(
        code(concord::mapping::no_evidence),
        help(
            "Every mapping must carry at least one piece of evidence. \
             Acquisition adapters should wrap provenance into simple evidence."
        )
    )]
    NoEvidence { triple: String },

    #[error("mapping {triple} has an unresolved reference")]
    #[diagnostic(
        code(concord::mapping::unresolved_reference),
        help("Subject, predicate and object need a non-empty prefix and identifier.")
    )]
    UnresolvedReference { triple: String },

    #[error("confidence {confidence} on {triple} is outside [0, 1]")]
    #[diagnostic(
        code(concord::mapping::confidence_range),
        help("Confidences are probabilities. Rescale the source's scores into [0, 1].")
    )]
    ConfidenceOutOfRange { triple: String, confidence: f64 },

    #[error("reasoned evidence on {triple} consumes no mappings")]
    #[diagnostic(
        code(concord::mapping::empty_reasoning),
        help("Reasoned evidence must name the mappings it was derived from.")
    )]
    EmptyReasoning { triple: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("priority list is empty")]
    #[diagnostic(
        code(concord::config::empty_priority),
        help("Prioritization needs at least one prefix, highest priority first.")
    )]
    EmptyPriority,

    #[error("confidence {confidence} for {context} is outside [0, 1]")]
    #[diagnostic(
        code(concord::config::confidence_range),
        help("Inference rule confidences are multipliers in [0, 1].")
    )]
    ConfidenceOutOfRange { context: String, confidence: f64 },

    #[error("invalid chain configuration: {message}")]
    #[diagnostic(
        code(concord::config::chain),
        help(
            "The hop cutoff must be at least 1 and the minimum component size \
             must not exceed the maximum."
        )
    )]
    InvalidChain { message: String },

    #[error("could not read rules file {path}")]
    #[diagnostic(
        code(concord::config::io),
        help("Check that the rules file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse rules: {message}")]
    #[diagnostic(
        code(concord::config::parse),
        help("Rules are TOML with CURIE strings, see `PredicateRules::from_toml_str`.")
    )]
    Parse { message: String },

    #[error("invalid CURIE in rules: {source}")]
    #[diagnostic(code(concord::config::reference))]
    Reference {
        #[source]
        source: ReferenceError,
    },
}

// ---------------------------------------------------------------------------
// Projection errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ProjectionError {
    #[error("projection is not a function: {subject} appears in {count} mappings")]
    #[diagnostic(
        code(concord::projection::not_functional),
        help(
            "A projection maps each subject to at most one object. Filter \
             many-to-many mappings and restrict to a single predicate first."
        )
    )]
    NotFunctional { subject: String, count: usize },
}

// ---------------------------------------------------------------------------
// Source errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("unknown mapping source: {name}")]
    #[diagnostic(
        code(concord::source::unknown),
        help("Register the source on the SourceRegistry before loading it.")
    )]
    Unknown { name: String },

    #[error("mapping source already registered: {name}")]
    #[diagnostic(
        code(concord::source::duplicate),
        help("Each source name can be registered once per registry.")
    )]
    Duplicate { name: String },
}

/// Convenience alias for functions returning concord results.
pub type ConcordResult<T> = std::result::Result<T, ConcordError>;
