//! Record sources.
//!
//! Pages receive their record collection through [`RecordSource`] instead of
//! importing a fixture array, so a fixture-backed source can later be swapped
//! for one that calls a real backend.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::query::ListingConfig;
use crate::record::Record;

/// Supplies the full record collection of one listing.
pub trait RecordSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Record>, CoreError>;
}

/// A fixed, in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Arc<Vec<Record>>,
}

impl InMemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Build from a JSON array of objects.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let records: Vec<Record> = serde_json::from_str(json)
            .map_err(|e| CoreError::Source(format!("invalid record fixture: {e}")))?;
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for InMemorySource {
    fn fetch(&self) -> Result<Vec<Record>, CoreError> {
        Ok(self.records.as_ref().clone())
    }
}

/// A listing's configuration together with its record source.
#[derive(Clone)]
pub struct ListingEntry {
    pub config: ListingConfig,
    pub source: Arc<dyn RecordSource>,
}

impl std::fmt::Debug for ListingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingEntry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Listings by name.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    entries: IndexMap<String, ListingEntry>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listing under its configured name, replacing any previous
    /// entry with that name.
    pub fn register(&mut self, config: ListingConfig, source: Arc<dyn RecordSource>) {
        self.entries
            .insert(config.name.clone(), ListingEntry { config, source });
    }

    pub fn get(&self, name: &str) -> Result<&ListingEntry, CoreError> {
        self.entries.get(name).ok_or_else(|| CoreError::NotFound {
            entity: "listing",
            key: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ListingEntry> {
        self.entries.values()
    }
}
