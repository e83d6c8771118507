//! Predicate rule table: flips, transitivity, directionlessness and two-step
//! combination.
//!
//! The table is static configuration for the reasoning stages. The default
//! covers SKOS plus the oboInOwl cross-reference; a different table can be
//! loaded from TOML:
//!
//! ```toml
//! transitive = ["skos:exactMatch", "skos:broadMatch", "skos:narrowMatch"]
//! directionless = ["skos:exactMatch", "skos:closeMatch"]
//!
//! [flips]
//! "skos:broadMatch" = "skos:narrowMatch"
//!
//! [[two_step]]
//! first = "skos:broadMatch"
//! second = "skos:exactMatch"
//! result = "skos:broadMatch"
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::reference::Reference;
use crate::vocab::{BROAD_MATCH, CLOSE_MATCH, DB_XREF, EQUIVALENT_TO, EXACT_MATCH, NARROW_MATCH};

/// Lookup table consulted by inversion and chain inference.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateRules {
    /// Predicate → predicate of the swapped mapping. Symmetric.
    flips: HashMap<Reference, Reference>,
    /// Predicates that compose with themselves.
    transitive: HashSet<Reference>,
    /// Predicates whose flip is themselves.
    directionless: HashSet<Reference>,
    /// `(first, second)` → entailed predicate, for mixed pairs.
    two_step: HashMap<(Reference, Reference), Reference>,
}

impl PredicateRules {
    /// An empty table: nothing flips, nothing composes.
    pub fn empty() -> Self {
        Self {
            flips: HashMap::new(),
            transitive: HashSet::new(),
            directionless: HashSet::new(),
            two_step: HashMap::new(),
        }
    }

    /// Declare `a` and `b` as each other's flip.
    pub fn with_flip(mut self, a: Reference, b: Reference) -> Self {
        self.flips.insert(a.clone(), b.clone());
        self.flips.insert(b, a);
        self
    }

    /// Declare a predicate transitive.
    pub fn with_transitive(mut self, predicate: Reference) -> Self {
        self.transitive.insert(predicate);
        self
    }

    /// Declare a predicate directionless; it flips to itself.
    pub fn with_directionless(mut self, predicate: Reference) -> Self {
        self.flips.insert(predicate.clone(), predicate.clone());
        self.directionless.insert(predicate);
        self
    }

    /// Declare that `first` followed by `second` entails `result`.
    pub fn with_two_step(mut self, first: Reference, second: Reference, result: Reference) -> Self {
        self.two_step.insert((first, second), result);
        self
    }

    /// The predicate of the swapped mapping, if the predicate is invertible.
    pub fn flip(&self, predicate: &Reference) -> Option<&Reference> {
        self.flips.get(predicate)
    }

    /// Whether `predicate` composes with itself.
    pub fn is_transitive(&self, predicate: &Reference) -> bool {
        self.transitive.contains(predicate)
    }

    /// Whether `predicate` holds in both directions.
    pub fn is_directionless(&self, predicate: &Reference) -> bool {
        self.directionless.contains(predicate)
    }

    /// Combine two consecutive predicates into the one they entail.
    ///
    /// A transitive predicate followed by itself entails itself; every other
    /// pair must be listed in the two-step table.
    pub fn combine(&self, first: &Reference, second: &Reference) -> Option<Reference> {
        if first == second && self.is_transitive(first) {
            return Some(first.clone());
        }
        self.two_step
            .get(&(first.clone(), second.clone()))
            .cloned()
    }

    /// Parse a rules table from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: RulesFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        file.into_rules()
    }

    /// Load a rules table from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

impl Default for PredicateRules {
    fn default() -> Self {
        Self::empty()
            .with_flip(BROAD_MATCH.clone(), NARROW_MATCH.clone())
            .with_directionless(EXACT_MATCH.clone())
            .with_directionless(CLOSE_MATCH.clone())
            .with_directionless(DB_XREF.clone())
            .with_directionless(EQUIVALENT_TO.clone())
            .with_transitive(EXACT_MATCH.clone())
            .with_transitive(BROAD_MATCH.clone())
            .with_transitive(NARROW_MATCH.clone())
            .with_two_step(BROAD_MATCH.clone(), EXACT_MATCH.clone(), BROAD_MATCH.clone())
            .with_two_step(EXACT_MATCH.clone(), BROAD_MATCH.clone(), BROAD_MATCH.clone())
            .with_two_step(NARROW_MATCH.clone(), EXACT_MATCH.clone(), NARROW_MATCH.clone())
            .with_two_step(EXACT_MATCH.clone(), NARROW_MATCH.clone(), NARROW_MATCH.clone())
    }
}

// ---------------------------------------------------------------------------
// TOML representation
// ---------------------------------------------------------------------------

/// On-disk form of [`PredicateRules`], with predicates as CURIE strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RulesFile {
    #[serde(default)]
    flips: BTreeMap<String, String>,
    #[serde(default)]
    transitive: Vec<String>,
    #[serde(default)]
    directionless: Vec<String>,
    #[serde(default)]
    two_step: Vec<TwoStepEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TwoStepEntry {
    first: String,
    second: String,
    result: String,
}

fn parse_curie(curie: &str) -> Result<Reference, ConfigError> {
    Reference::from_curie(curie).map_err(|source| ConfigError::Reference { source })
}

impl RulesFile {
    fn into_rules(self) -> Result<PredicateRules, ConfigError> {
        let mut rules = PredicateRules::empty();
        for (a, b) in &self.flips {
            rules = rules.with_flip(parse_curie(a)?, parse_curie(b)?);
        }
        for p in &self.transitive {
            rules = rules.with_transitive(parse_curie(p)?);
        }
        for p in &self.directionless {
            rules = rules.with_directionless(parse_curie(p)?);
        }
        for entry in &self.two_step {
            rules = rules.with_two_step(
                parse_curie(&entry.first)?,
                parse_curie(&entry.second)?,
                parse_curie(&entry.result)?,
            );
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flips() {
        let rules = PredicateRules::default();
        assert_eq!(rules.flip(&BROAD_MATCH), Some(&*NARROW_MATCH));
        assert_eq!(rules.flip(&NARROW_MATCH), Some(&*BROAD_MATCH));
        assert_eq!(rules.flip(&EXACT_MATCH), Some(&*EXACT_MATCH));
        assert_eq!(rules.flip(&Reference::new("ex", "unknown")), None);
    }

    #[test]
    fn two_step_table() {
        let rules = PredicateRules::default();
        assert_eq!(rules.combine(&BROAD_MATCH, &EXACT_MATCH), Some(BROAD_MATCH.clone()));
        assert_eq!(rules.combine(&EXACT_MATCH, &BROAD_MATCH), Some(BROAD_MATCH.clone()));
        assert_eq!(rules.combine(&NARROW_MATCH, &EXACT_MATCH), Some(NARROW_MATCH.clone()));
        assert_eq!(rules.combine(&EXACT_MATCH, &NARROW_MATCH), Some(NARROW_MATCH.clone()));
        assert_eq!(rules.combine(&EXACT_MATCH, &EXACT_MATCH), Some(EXACT_MATCH.clone()));

        assert_eq!(rules.combine(&BROAD_MATCH, &NARROW_MATCH), None);
        assert_eq!(rules.combine(&NARROW_MATCH, &BROAD_MATCH), None);
        assert_eq!(rules.combine(&CLOSE_MATCH, &EXACT_MATCH), None);
        assert_eq!(rules.combine(&EXACT_MATCH, &DB_XREF), None);
        assert_eq!(rules.combine(&DB_XREF, &DB_XREF), None);
    }

    #[test]
    fn parse_toml_rules() {
        let rules = PredicateRules::from_toml_str(
            r#"
            transitive = ["ex:same"]
            directionless = ["ex:same"]

            [flips]
            "ex:up" = "ex:down"

            [[two_step]]
            first = "ex:up"
            second = "ex:same"
            result = "ex:up"
            "#,
        )
        .unwrap();

        let same = Reference::new("ex", "same");
        let up = Reference::new("ex", "up");
        let down = Reference::new("ex", "down");
        assert_eq!(rules.flip(&down), Some(&up));
        assert_eq!(rules.flip(&same), Some(&same));
        assert!(rules.is_directionless(&same));
        assert_eq!(rules.combine(&up, &same), Some(up.clone()));
        assert_eq!(rules.combine(&same, &up), None);
    }

    #[test]
    fn malformed_curie_in_rules_is_rejected() {
        let err = PredicateRules::from_toml_str(r#"transitive = ["nocolon"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Reference { .. }));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let err = PredicateRules::from_toml_str("transitive = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_rules_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "transitive = [\"skos:exactMatch\"]\n").unwrap();

        let rules = PredicateRules::from_path(&path).unwrap();
        assert!(rules.is_transitive(&EXACT_MATCH));
        assert!(!rules.is_transitive(&BROAD_MATCH));

        let missing = PredicateRules::from_path(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
