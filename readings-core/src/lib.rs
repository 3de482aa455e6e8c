//! The retrying data-access layer behind the readings service.
//!
//! This crate is the core of the readings project and provides:
//!
//! - **Document store client** ([`client`]) - `find_one`/`find` with bounded retry on dropped connections
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Query and sort specifications** ([`query`]) - Equality filters and ordered sort keys
//! - **Document normalization** ([`document`]) - Derived string identifiers and typed decoding
//! - **Retry policy** ([`retry`]) - The bounded retry loop shared by both query shapes
//! - **Connection configuration** ([`config`]) - Environment-driven settings and the connection string
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use readings_core::{client::DocumentStoreClient, query::QuerySpec};
//!
//! let client = DocumentStoreClient::new(backend);
//! if let Some(user) = client.find_one("users", QuerySpec::new().eq("email", "a@example.com")).await? {
//!     println!("found user {}", user.get_str("id")?);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as readings_core;

pub mod backend;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod retry;
