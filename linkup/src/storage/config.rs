//! Configuration structures for storage backends

use serde::{Deserialize, Serialize};

use crate::storage::errors::StorageError;

/// Which repository implementation backs the network
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SurrealDB (embedded or remote document database)
    SurrealDB,
    /// Process-local maps, for tests and demos
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        #[cfg(any(feature = "surrealdb-embedded", feature = "surrealdb-remote"))]
        {
            StorageBackend::SurrealDB
        }
        #[cfg(not(any(feature = "surrealdb-embedded", feature = "surrealdb-remote")))]
        {
            StorageBackend::Memory
        }
    }
}

/// SurrealDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrealDBConfig {
    /// SurrealDB engine type
    pub engine: SurrealDBEngine,

    /// Connection string for remote or path for embedded
    pub connection: String,

    /// Namespace
    pub namespace: String,

    /// Database name
    pub database: String,

    /// Authentication information
    pub auth: Option<SurrealDBAuth>,
}

/// SurrealDB engine types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurrealDBEngine {
    /// In-memory storage (for testing)
    Memory,
    /// RocksDB on-disk storage (embedded)
    RocksDB,
    /// Remote WebSocket connection
    WebSocket,
    /// Remote HTTP connection
    Http,
}

/// Root credentials for remote engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrealDBAuth {
    pub username: String,
    pub password: String,
}

impl SurrealDBConfig {
    /// Validate the storage configuration
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.connection.is_empty() {
            return Err(StorageError::Configuration(
                "SurrealDB connection string cannot be empty".to_string(),
            ));
        }
        if self.namespace.is_empty() {
            return Err(StorageError::Configuration(
                "SurrealDB namespace cannot be empty".to_string(),
            ));
        }
        if self.database.is_empty() {
            return Err(StorageError::Configuration(
                "SurrealDB database cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SurrealDBConfig {
    fn default() -> Self {
        Self {
            engine: SurrealDBEngine::Memory,
            connection: "memory".to_string(),
            namespace: "linkup".to_string(),
            database: "network".to_string(),
            auth: None,
        }
    }
}
