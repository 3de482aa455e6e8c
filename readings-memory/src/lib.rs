//! In-memory document storage backend for readings.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for development
//! and testing.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Equality filtering** - Numeric values compare across integer and float widths
//! - **Multi-key sorting** - Stable ordering by any number of sort keys
//!
//! # Quick Start
//!
//! ```ignore
//! use readings_core::client::DocumentStoreClient;
//! use readings_memory::InMemoryStore;
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::new();
//!     backend.insert("users", doc! { "email": "a@example.com" }).await?;
//!
//!     let client = DocumentStoreClient::new(backend);
//!     let user = client.find_one("users", doc! { "email": "a@example.com" }).await?;
//!     assert!(user.is_some());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as readings_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
