//! The retrying document store client.
//!
//! [`DocumentStoreClient`] is the only access path to the backing store. It is built once
//! at process start and shared by every request.
//!
//! # Example
//!
//! ```ignore
//! use readings_core::{client::DocumentStoreClient, query::{QuerySpec, SortSpec}};
//!
//! let client = DocumentStoreClient::new(backend);
//! let user = client
//!     .find_one("users", QuerySpec::new().eq("email", "a@example.com"))
//!     .await?;
//! let readings = client
//!     .find("readings", QuerySpec::new().eq("user_id", "u1"), Some(SortSpec::new().desc("when")))
//!     .await?;
//! ```

use bson::Document;
use tracing::debug;

use crate::{
    backend::StoreBackend,
    document::normalize,
    error::DocumentStoreResult,
    query::{Query, QuerySpec, SortSpec},
    retry::{RetryPolicy, retry},
};

/// A document store client that retries on dropped connections.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStoreClient<B: StoreBackend> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: StoreBackend> DocumentStoreClient<B> {
    /// Creates a client with the default retry policy.
    pub fn new(backend: B) -> Self {
        Self::with_retry_policy(backend, RetryPolicy::default())
    }

    pub fn with_retry_policy(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Looks up a single document and normalizes it.
    ///
    /// Returns `Ok(None)` when nothing matches. A found document gains a string `id`
    /// derived from its `_id` unless it already has one.
    ///
    /// # Errors
    ///
    /// Dropped connections are retried according to the retry policy; the last such error
    /// is returned once the budget is spent. Any other error is returned immediately.
    pub async fn find_one(
        &self,
        collection: &str,
        filter: impl Into<QuerySpec>,
    ) -> DocumentStoreResult<Option<Document>> {
        let filter = filter.into();
        debug!(collection, filter = ?filter.as_document(), "find_one");

        let found = retry(&self.policy, "find_one", collection, || {
            self.backend.find_one(collection, &filter)
        })
        .await?;

        Ok(found.map(normalize))
    }

    /// Looks up every matching document, sorted by `sort` when given.
    ///
    /// The documents are returned as stored; no `id` field is derived.
    ///
    /// # Errors
    ///
    /// Same retry behavior as [`find_one`](Self::find_one). A retried attempt starts over
    /// from scratch.
    pub async fn find(
        &self,
        collection: &str,
        filter: impl Into<QuerySpec>,
        sort: Option<SortSpec>,
    ) -> DocumentStoreResult<Vec<Document>> {
        let query = Query::new(filter.into(), sort.filter(|spec| !spec.is_empty()));
        debug!(collection, filter = ?query.filter.as_document(), sort = ?query.sort, "find");

        retry(&self.policy, "find", collection, || {
            self.backend.find(collection, &query)
        })
        .await
    }

    /// Shuts down the underlying backend.
    ///
    /// A borrowed backend (`&B`) is never shut down, and a shared one (`Arc<B>`) only
    /// when this client holds the last handle.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}
