//! MongoDB backend implementation for readings.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait on top of
//! the official async driver. Driver errors are sorted into two classes: dropped
//! connections, which the client retries, and everything else, which it does not.
//!
//! # Connection
//!
//! The connection string is usually rendered from a
//! [`ConnectionConfig`](readings_core::config::ConnectionConfig).
//!
//! # Example
//!
//! ```ignore
//! use readings_core::{backend::StoreBackendBuilder, client::DocumentStoreClient, config::ConnectionConfig};
//! use readings_mongodb::MongoDbStoreBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConnectionConfig::from_env()?;
//!     let store = MongoDbStoreBuilder::from_config(&config)
//!         .build()
//!         .await?;
//!     let client = DocumentStoreClient::new(store);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as readings_mongodb;

pub mod store;
mod query;
mod error;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
