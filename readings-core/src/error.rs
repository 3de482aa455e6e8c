//! Error types and result types for document store operations.
//!
//! Every fallible operation in the workspace returns [`DocumentStoreResult<T>`].
//! The retry layer only ever looks at [`DocumentStoreError::is_transient`] to decide
//! whether an attempt may be reissued; the error value itself is passed through untouched.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when talking to a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentStoreError {
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// The connection configuration could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The document or identifier has an invalid structure.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// The connection to the store dropped and the driver is re-establishing it.
    ///
    /// This is the only retryable error class.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// An unknown error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DocumentStoreError {
    /// Returns `true` if the operation that produced this error may be reissued.
    pub fn is_transient(&self) -> bool {
        matches!(self, DocumentStoreError::ConnectionLost(_))
    }
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
