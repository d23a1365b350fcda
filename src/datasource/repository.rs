//! Named collection of datasources attached to one query.

use std::sync::Arc;

use super::source::Source;
use super::Datasource;

struct RepositoryEntry {
    alias: Option<String>,
    source: Arc<dyn Datasource>,
}

/// Ordered collection of (alias, datasource) pairs.
///
/// Aliases are optional and unique by convention only: `get` returns the
/// first match. Insertion order is preserved and is the enumeration order
/// for the merged pull sequence.
#[derive(Default)]
pub struct DatasourceRepository {
    sources: Vec<RepositoryEntry>,
}

impl DatasourceRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and stores a source without an alias.
    pub fn add(&mut self, source: impl Into<Source>) {
        self.sources.push(RepositoryEntry {
            alias: None,
            source: source.into().into_datasource(),
        });
    }

    /// Normalizes and stores a source under an alias.
    pub fn add_aliased(&mut self, source: impl Into<Source>, alias: impl Into<String>) {
        self.sources.push(RepositoryEntry {
            alias: Some(alias.into()),
            source: source.into().into_datasource(),
        });
    }

    /// The first stored datasource whose alias equals `alias`.
    pub fn get(&self, alias: &str) -> Option<Arc<dyn Datasource>> {
        self.sources
            .iter()
            .find(|entry| entry.alias.as_deref() == Some(alias))
            .map(|entry| Arc::clone(&entry.source))
    }

    /// True when no sources are stored.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of stored sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// The stored datasources, in insertion order.
    pub fn entries(&self) -> Vec<Arc<dyn Datasource>> {
        self.sources
            .iter()
            .map(|entry| Arc::clone(&entry.source))
            .collect()
    }

    /// Flattens the stored datasources into the single ordered sequence the
    /// executor pulls from.
    pub fn merge(&self) -> Vec<Arc<dyn Datasource>> {
        let mut datasources = Vec::with_capacity(self.sources.len());
        for entry in &self.sources {
            datasources.push(Arc::clone(&entry.source));
        }
        datasources
    }
}
