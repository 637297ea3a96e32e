//! MongoDB-backed document store.

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use mongodb::{Client, Database};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::session::store::DocumentStore;
use crate::session::types::StoreError;

/// Handle on the database holding session and user documents.
///
/// The driver connects lazily; the first lookup surfaces connection errors.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| StoreError::Backend(format!("invalid connection string: {}", e)))?;

        tracing::debug!(database = %config.database, "MongoDB client created");

        Ok(Self {
            database: client.database(&config.database),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        let mut filter = Document::new();
        filter.insert(field, value);

        let found = self
            .database
            .collection::<Document>(collection)
            .find_one(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(found.map(|doc| Bson::Document(doc).into_relaxed_extjson()))
    }
}
