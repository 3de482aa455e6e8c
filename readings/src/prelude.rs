//! Convenient re-exports of commonly used types from readings.
//!
//! ```ignore
//! use readings::prelude::*;
//! ```

pub use readings_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    client::DocumentStoreClient,
    config::ConnectionConfig,
    query::{Query, QueryBuilder, QuerySpec, Sort, SortDirection, SortSpec},
    retry::RetryPolicy,
    error::{DocumentStoreError, DocumentStoreResult},
};

pub use crate::{
    library::{Library, READINGS, USERS},
    model::{Reading, ReadingView, User},
};
