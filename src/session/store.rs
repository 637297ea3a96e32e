//! Document store abstraction.
//!
//! # Responsibilities
//! - Look up one document by field value in a named collection
//! - Provide an in-memory store for tests and offline inspection
//!
//! # Design Decisions
//! - Documents are exchanged as `serde_json::Value`
//! - Lookups match string-valued fields only

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::session::types::StoreError;

/// Read access to keyed documents in named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document in `collection` whose `field` equals `value`.
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        (**self).find_one(collection, field, value).await
    }
}

/// Collections of JSON documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to a collection, creating the collection if needed.
    pub fn insert(&mut self, collection: &str, document: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Build from a JSON object of the form `{ "<collection>": [ doc, ... ] }`.
    pub fn from_json(value: Value) -> Result<Self, StoreError> {
        let Value::Object(map) = value else {
            return Err(StoreError::Layout("expected an object of collections".to_string()));
        };

        let mut store = Self::new();
        for (collection, documents) in map {
            let Value::Array(documents) = documents else {
                return Err(StoreError::Layout(format!(
                    "collection '{}' is not an array",
                    collection
                )));
            };
            store.collections.insert(collection, documents);
        }
        Ok(store)
    }

    /// Load a store file written in the `from_json` layout.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        let store = Self::from_json(value)?;
        tracing::info!(
            path = %path.display(),
            collections = store.collections.len(),
            "Loaded document store file"
        );
        Ok(store)
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        let found = self.collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|doc| doc.get(field).and_then(Value::as_str) == Some(value))
        });
        Ok(found.cloned())
    }
}
