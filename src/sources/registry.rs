//! Registry for managing search source plugins.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Source, SourceError};

bitflags::bitflags! {
    /// Capabilities that a source can support
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceCapabilities: u32 {
        const SEARCH = 1 << 0;
        /// Source applies year/subject filtering server-side
        const UPSTREAM_FILTER = 1 << 1;
    }
}

/// Registry for all available search sources.
///
/// Keyed by source id in a `BTreeMap` so iteration order is stable.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: BTreeMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create a new registry with all compiled-in sources
    pub fn new() -> Self {
        let mut registry = Self {
            sources: BTreeMap::new(),
        };

        #[cfg(feature = "source-doab")]
        registry.register(Arc::new(super::DoabSource::new()));
        #[cfg(feature = "source-doaj")]
        registry.register(Arc::new(super::DoajSource::new()));
        registry.register(Arc::new(super::MockSource::new()));

        registry
    }

    /// Register a new source
    pub fn register(&mut self, source: Arc<dyn Source>) {
        self.sources.insert(source.id().to_string(), source);
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.get(id)
    }

    /// Get a source by ID, returning an error if not found
    pub fn get_required(&self, id: &str) -> Result<&Arc<dyn Source>, SourceError> {
        self.get(id)
            .ok_or_else(|| SourceError::NotFound(format!("Source '{}' not found", id)))
    }

    /// Get all registered sources, ordered by id
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.values()
    }

    /// Get all source IDs, in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|s| s.as_str())
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Get the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_source_count() -> usize {
        let mut count = 1; // mock is always compiled
        if cfg!(feature = "source-doab") {
            count += 1;
        }
        if cfg!(feature = "source-doaj") {
            count += 1;
        }
        count
    }

    #[test]
    fn test_registry_basic() {
        let registry = SourceRegistry::new();

        assert_eq!(registry.len(), expected_source_count());
        assert!(!registry.is_empty());
        assert!(registry.has("mock"));
    }

    #[test]
    fn test_get_source() {
        let registry = SourceRegistry::new();

        let mock = registry.get("mock");
        assert!(mock.is_some());
        assert_eq!(mock.unwrap().id(), "mock");

        assert!(registry.get("nonexistent").is_none());
        assert!(registry.get_required("nonexistent").is_err());
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let registry = SourceRegistry::new();

        let ids: Vec<&str> = registry.ids().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);

        let listed: Vec<String> = registry.all().map(|s| s.id().to_string()).collect();
        assert_eq!(listed, ids);
    }
}
