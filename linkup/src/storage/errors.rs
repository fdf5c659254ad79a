//! Error types for storage operations

use std::error::Error;
use std::fmt;

/// Error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// Configuration error
    Configuration(String),

    /// Connection error
    Connection(String),

    /// Query error
    Query(String),

    /// Transaction error
    Transaction(String),

    /// Data not found
    NotFound(String),

    /// Item already exists
    AlreadyExists(String),

    /// Serialization/deserialization error
    Serialization(String),

    /// A lock guarding in-process state was poisoned
    Poisoned(String),

    /// Unsupported storage type
    UnsupportedStorageType,

    /// Other error
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            StorageError::Connection(msg) => write!(f, "Connection error: {}", msg),
            StorageError::Query(msg) => write!(f, "Query error: {}", msg),
            StorageError::Transaction(msg) => write!(f, "Transaction error: {}", msg),
            StorageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            StorageError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Poisoned(msg) => write!(f, "Lock poisoned: {}", msg),
            StorageError::UnsupportedStorageType => write!(f, "Unsupported storage type"),
            StorageError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}

impl Error for StorageError {}

/// Convert a JSON error to a storage error
impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Convert a standard IO error to a storage error
impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Connection(err.to_string())
    }
}

#[cfg(any(feature = "surrealdb-embedded", feature = "surrealdb-remote"))]
impl From<surrealdb::Error> for StorageError {
    fn from(err: surrealdb::Error) -> Self {
        StorageError::Query(err.to_string())
    }
}

// Storage failures surface to callers as infrastructure errors, except the
// two kinds that map onto domain outcomes.
impl From<StorageError> for crate::LinkupError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => crate::LinkupError::NotFound(msg),
            StorageError::AlreadyExists(msg) => crate::LinkupError::Conflict(msg),
            other => crate::LinkupError::Storage(other.to_string()),
        }
    }
}
