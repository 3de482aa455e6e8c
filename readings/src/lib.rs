//! Main readings crate: a small read-it-later service over a retrying document store.
//!
//! This crate is the entry point for the readings workspace. It re-exports the core
//! data-access layer, the storage backends, and adds the typed [`library::Library`]
//! accessors the request layer uses.
//!
//! # Features
//!
//! - **Retrying data access** - Dropped store connections are retried up to five times per operation
//! - **Multiple backends** - In-memory storage for tests, MongoDB for deployments
//! - **Typed records** - Users and readings decoded from the `users` and `readings` collections
//!
//! # Quick Start
//!
//! ```ignore
//! use readings::{prelude::*, memory::InMemoryStore};
//! use bson::{doc, DateTime};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = InMemoryStore::new();
//!     let user_id = backend
//!         .insert("users", doc! { "email": "a@example.com", "password": "secret" })
//!         .await
//!         .unwrap();
//!     backend
//!         .insert("readings", doc! {
//!             "user_id": user_id.as_object_id().unwrap().to_hex(),
//!             "title": "Rust",
//!             "link": "https://www.rust-lang.org/",
//!             "when": DateTime::now(),
//!         })
//!         .await
//!         .unwrap();
//!
//!     let library = Library::new(DocumentStoreClient::new(backend));
//!     let user = library.user_by_email("a@example.com").await.unwrap().unwrap();
//!
//!     for view in library.views_for(&user, "http://localhost:8000").await.unwrap() {
//!         println!("{} -> {}", view.title, view.href);
//!     }
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - MongoDB backend (requires `mongodb` feature)

pub mod cli;
pub mod library;
pub mod logging;
pub mod model;
pub mod prelude;

pub use readings_core::{backend, client, config, document, error, query, retry};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use readings_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use readings_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
