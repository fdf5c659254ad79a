//! Storage abstractions and implementations
//!
//! This module provides the repository traits the services are written
//! against and the backends that implement them.
//!
//! ## Storage Implementations
//!
//! - **SharedStorage**: SurrealDB, embedded (memory or RocksDB) or remote
//!   (WebSocket / HTTP behind the `surrealdb-remote` feature).
//! - **InMemoryStore**: process-local maps for testing and development.

pub mod config;
pub mod errors;
pub mod filters;
pub mod memory;
#[cfg(any(feature = "surrealdb-embedded", feature = "surrealdb-remote"))]
pub mod shared_storage;
pub mod traits;

use std::sync::Arc;

// Re-export common types for convenience
pub use config::{StorageBackend, SurrealDBAuth, SurrealDBConfig, SurrealDBEngine};
pub use errors::{StorageError, StorageResult};
pub use filters::JobFilter;
pub use memory::InMemoryStore;
pub use traits::{BaseStore, JobStore, MessageStore, NetworkStore, PostStore, UserStore};

#[cfg(any(feature = "surrealdb-embedded", feature = "surrealdb-remote"))]
pub use shared_storage::{SharedStorage, SharedStorageConfig, create_shared_store};

/// Create the storage service selected by configuration
pub async fn create_storage_service(
    config: &crate::config::LinkupConfig,
) -> Result<Arc<dyn NetworkStore>, StorageError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory storage");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(any(feature = "surrealdb-embedded", feature = "surrealdb-remote"))]
        StorageBackend::SurrealDB => create_shared_store(&config.storage.surrealdb).await,
        #[cfg(not(any(feature = "surrealdb-embedded", feature = "surrealdb-remote")))]
        StorageBackend::SurrealDB => Err(StorageError::UnsupportedStorageType),
    }
}
