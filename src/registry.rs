//! Source registry: named loaders producing mappings.
//!
//! A [`SourceRegistry`] is built explicitly by the caller and passed to
//! whatever needs to load mappings by name. Loaders are plain closures, so a
//! source can read a file, call a parser, or return a fixed list.

use std::collections::BTreeMap;

use crate::error::{ConcordResult, SourceError};
use crate::model::Mapping;

/// A loader producing the mappings of one source.
pub type SourceLoader = Box<dyn Fn() -> ConcordResult<Vec<Mapping>> + Send + Sync>;

/// Registry mapping source names to loaders.
#[derive(Default)]
pub struct SourceRegistry {
    loaders: BTreeMap<String, SourceLoader>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader. Errors if the name is already taken.
    pub fn register<F>(&mut self, name: impl Into<String>, loader: F) -> Result<(), SourceError>
    where
        F: Fn() -> ConcordResult<Vec<Mapping>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.loaders.contains_key(&name) {
            return Err(SourceError::Duplicate { name });
        }
        tracing::debug!(source = %name, "registered mapping source");
        self.loaders.insert(name, Box::new(loader));
        Ok(())
    }

    /// Whether a source with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.loaders.keys().map(String::as_str)
    }

    /// Run the loader registered under `name`.
    pub fn load(&self, name: &str) -> ConcordResult<Vec<Mapping>> {
        let loader = self.loaders.get(name).ok_or_else(|| SourceError::Unknown {
            name: name.to_string(),
        })?;
        let mappings = loader()?;
        tracing::info!(source = name, mappings = mappings.len(), "loaded mapping source");
        Ok(mappings)
    }

    /// Load the given sources in order and concatenate their mappings.
    pub fn load_all<S: AsRef<str>>(&self, names: &[S]) -> ConcordResult<Vec<Mapping>> {
        let mut out = Vec::new();
        for name in names {
            out.extend(self.load(name.as_ref())?);
        }
        Ok(out)
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("sources", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}
