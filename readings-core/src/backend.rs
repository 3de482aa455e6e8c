//! Storage backend abstraction for the document store client.
//!
//! A [`StoreBackend`] performs a single raw attempt of each query shape. It knows nothing
//! about retries or normalization; those live in [`crate::client::DocumentStoreClient`].
//! Backends report a dropped connection as
//! [`DocumentStoreError::ConnectionLost`](crate::error::DocumentStoreError::ConnectionLost)
//! and everything else with any other variant.
//!
//! # Examples
//!
//! ```ignore
//! use readings_core::{backend::StoreBackend, query::QuerySpec};
//!
//! let backend = MyBackendImpl::new();
//! let user = backend
//!     .find_one("users", &QuerySpec::new().eq("email", "a@example.com"))
//!     .await?;
//! ```

use async_trait::async_trait;
use bson::Document;
use std::{fmt::Debug, sync::Arc};

use crate::{
    error::DocumentStoreResult,
    query::{Query, QuerySpec},
};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single backend is shared by every concurrent
/// request for the life of the process.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Looks up the first document in `collection` matching `filter`.
    ///
    /// Returns `Ok(None)` when nothing matches.
    async fn find_one(
        &self,
        collection: &str,
        filter: &QuerySpec,
    ) -> DocumentStoreResult<Option<Document>>;

    /// Looks up every document in `collection` matching the query filter, ordered by the
    /// query sort when one is given.
    ///
    /// The whole result set is materialized before returning. An error raised while
    /// reading a partially consumed result set fails the attempt as a whole.
    async fn find(&self, collection: &str, query: &Query) -> DocumentStoreResult<Vec<Document>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn find_one(
        &self,
        collection: &str,
        filter: &QuerySpec,
    ) -> DocumentStoreResult<Option<Document>> {
        (*self).find_one(collection, filter).await
    }

    async fn find(&self, collection: &str, query: &Query) -> DocumentStoreResult<Vec<Document>> {
        (*self).find(collection, query).await
    }
}

#[async_trait]
impl<B> StoreBackend for Arc<B>
where
    B: StoreBackend,
{
    async fn find_one(
        &self,
        collection: &str,
        filter: &QuerySpec,
    ) -> DocumentStoreResult<Option<Document>> {
        (**self).find_one(collection, filter).await
    }

    async fn find(&self, collection: &str, query: &Query) -> DocumentStoreResult<Vec<Document>> {
        (**self).find(collection, query).await
    }

    /// Shuts down the shared backend if this is the last handle to it; otherwise does
    /// nothing and leaves it to the remaining handles.
    async fn shutdown(self) -> DocumentStoreResult<()> {
        match Arc::try_unwrap(self) {
            Ok(backend) => backend.shutdown().await,
            Err(_) => Ok(()),
        }
    }
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
