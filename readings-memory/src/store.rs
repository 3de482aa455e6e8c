//! In-memory storage implementation.
//!
//! Documents are kept per collection in insertion order behind an async-aware
//! read-write lock.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, Document, oid::ObjectId};

use readings_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::NATIVE_ID_FIELD,
    error::DocumentStoreResult,
    query::{Query, QuerySpec},
};

use crate::evaluator::DocumentEvaluator;

type StoreMap = HashMap<String, Vec<Document>>;


/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so clones
/// share the same underlying data.
///
/// Queries scan every document of the collection; there is no indexing.
///
/// # Example
///
/// ```ignore
/// use readings_memory::InMemoryStore;
/// use readings_core::{backend::StoreBackend, query::QuerySpec};
/// use bson::doc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///     let id = store.insert("users", doc! { "email": "a@example.com" }).await?;
///
///     let user = store.find_one("users", &QuerySpec::by_native_id(id)).await?;
///     assert!(user.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Appends a document to `collection`, creating the collection if needed.
    ///
    /// A fresh ObjectId is assigned to `_id` when the document has none. Returns the
    /// document's `_id`.
    pub async fn insert(&self, collection: &str, mut document: Document) -> DocumentStoreResult<Bson> {
        let id = match document.get(NATIVE_ID_FIELD) {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert(NATIVE_ID_FIELD, id.clone());
                id
            }
        };

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    /// Appends several documents to `collection`, returning their `_id`s in order.
    pub async fn insert_many(
        &self,
        collection: &str,
        documents: impl IntoIterator<Item = Document>,
    ) -> DocumentStoreResult<Vec<Bson>> {
        let mut ids = Vec::new();

        for document in documents {
            ids.push(self.insert(collection, document).await?);
        }

        Ok(ids)
    }

    /// Lists the names of all collections holding at least one insert.
    pub async fn list_collections(&self) -> Vec<String> {
        self.store
            .read()
            .await
            .keys()
            .cloned()
            .collect()
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn find_one(&self, collection: &str, filter: &QuerySpec) -> DocumentStoreResult<Option<Document>> {
        let store = self.store.read().await;

        Ok(
            store
                .get(collection)
                .and_then(|documents| {
                    documents
                        .iter()
                        .find(|doc| DocumentEvaluator::matches(doc, filter))
                })
                .cloned()
        )
    }

    async fn find(&self, collection: &str, query: &Query) -> DocumentStoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let mut matched = documents
            .iter()
            .filter(|doc| DocumentEvaluator::matches(doc, &query.filter))
            .cloned()
            .collect::<Vec<_>>();

        // `sort_by` is stable, so ties keep insertion order
        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| DocumentEvaluator::compare(a, b, sort));
        }

        Ok(matched)
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
