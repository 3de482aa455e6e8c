use async_trait::async_trait;
use futures::TryStreamExt;
use bson::Document;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};
use tracing::info;
use readings_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::ConnectionConfig,
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Query, QuerySpec},
};

use crate::{error::map_driver_error, query::MongoQueryTranslator};


#[derive(Debug, Clone)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn find_one(&self, collection: &str, filter: &QuerySpec) -> DocumentStoreResult<Option<Document>> {
        self.get_collection(collection)
            .find_one(MongoQueryTranslator::filter(filter))
            .await
            .map_err(map_driver_error)
    }

    async fn find(&self, collection: &str, query: &Query) -> DocumentStoreResult<Vec<Document>> {
        let mut options = FindOptions::default();

        if let Some(sort) = &query.sort {
            options.sort = Some(MongoQueryTranslator::sort(sort));
        }

        self.get_collection(collection)
            .find(MongoQueryTranslator::filter(&query.filter))
            .with_options(options)
            .await
            .map_err(map_driver_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(map_driver_error)
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.shutdown().await
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }

    /// Uses the connection string and database named by `config`.
    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(&config.dsn(), &config.database)
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    /// Parses the connection string and creates the driver client.
    ///
    /// The driver connects lazily, so this does not touch the network beyond any DNS
    /// lookups the connection string requires.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        info!(hosts = ?options.hosts, database = %self.database, "connecting to mongodb");

        Ok(MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}

#[cfg(test)]
mod tests {
    use readings_core::{client::DocumentStoreClient, retry::RetryPolicy};

    use super::*;

    #[tokio::test]
    async fn builder_uses_configured_database() {
        let config = ConnectionConfig {
            password: "s3cret".into(),
            database: "bookmarks".into(),
            ..ConnectionConfig::default()
        };

        let store = MongoDbStoreBuilder::from_config(&config).build().await.unwrap();

        assert_eq!(store.database(), "bookmarks");
    }

    #[tokio::test]
    async fn malformed_dsn_fails_initialization() {
        let err = MongoDbStore::builder("postgres://nope", "readings").build().await.unwrap_err();

        assert!(matches!(err, DocumentStoreError::Initialization(_)));
    }

    #[tokio::test]
    async fn unreachable_store_is_retried_then_reported_lost() {
        let store = MongoDbStore::builder("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200", "readings")
            .build()
            .await
            .unwrap();
        let client = DocumentStoreClient::with_retry_policy(store, RetryPolicy::new(1));

        let err = client
            .find_one("users", QuerySpec::new().eq("email", "a@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_transient());
        client.shutdown().await.unwrap();
    }
}
