//! SurrealDB-backed storage.
//!
//! `SharedStorage` implements every store trait over one SurrealDB client.
//! Each document family lives in its own table (`user`, `post`, `job`,
//! `message`) and references other documents by plain id strings.

use std::sync::Arc;

use surrealdb::Surreal;

use crate::storage::config::{SurrealDBConfig, SurrealDBEngine};
use crate::storage::errors::StorageError;
use crate::storage::traits::NetworkStore;

pub mod base;
pub mod config;
pub mod job;
pub mod message;
pub mod post;
pub mod schema;
pub mod user;

pub use base::SharedStorage;
pub use config::SharedStorageConfig;

/// Type alias for embedded shared storage
#[cfg(feature = "surrealdb-embedded")]
pub type EmbeddedSharedStorage = SharedStorage<surrealdb::engine::local::Db>;

/// Create an in-process, non-persistent shared storage instance
#[cfg(feature = "surrealdb-embedded")]
pub async fn create_memory_shared_storage(
    config: SharedStorageConfig,
) -> Result<EmbeddedSharedStorage, StorageError> {
    let client = Surreal::new::<surrealdb::engine::local::Mem>(())
        .await
        .map_err(|e| StorageError::Connection(format!("Failed to create memory client: {}", e)))?;

    SharedStorage::new(client, config).await
}

/// Create an embedded shared storage instance
#[cfg(feature = "surrealdb-embedded")]
pub async fn create_embedded_shared_storage(
    path: &str,
    config: SharedStorageConfig,
) -> Result<EmbeddedSharedStorage, StorageError> {
    use surrealdb::engine::local::RocksDb;

    let client = Surreal::new::<RocksDb>(path).await.map_err(|e| {
        StorageError::Connection(format!("Failed to create embedded database: {}", e))
    })?;

    SharedStorage::new(client, config).await
}

/// Create a shared storage instance from configuration
pub async fn create_shared_store(
    config: &SurrealDBConfig,
) -> Result<Arc<dyn NetworkStore>, StorageError> {
    config.validate()?;
    let shared_config = SharedStorageConfig::from(config);

    match config.engine {
        #[cfg(feature = "surrealdb-embedded")]
        SurrealDBEngine::Memory => {
            tracing::info!("Creating SharedStorage in-memory store");
            let store = create_memory_shared_storage(shared_config).await?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "surrealdb-embedded")]
        SurrealDBEngine::RocksDB => {
            tracing::info!(
                "Creating SharedStorage RocksDB store at {}",
                config.connection
            );
            let store = create_embedded_shared_storage(&config.connection, shared_config).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "surrealdb-embedded"))]
        SurrealDBEngine::Memory | SurrealDBEngine::RocksDB => Err(StorageError::Configuration(
            "Embedded engines require 'surrealdb-embedded' feature to be enabled".to_string(),
        )),
        #[cfg(feature = "surrealdb-remote")]
        SurrealDBEngine::WebSocket => {
            tracing::info!(
                "Creating SharedStorage WebSocket connection to {}",
                config.connection
            );
            let client = Surreal::new::<surrealdb::engine::remote::ws::Ws>(&config.connection)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create WebSocket client: {}", e))
                })?;
            authenticate_client(&client, config).await?;

            let store = SharedStorage::new(client, shared_config).await?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "surrealdb-remote")]
        SurrealDBEngine::Http => {
            tracing::info!(
                "Creating SharedStorage HTTP connection to {}",
                config.connection
            );
            let client = Surreal::new::<surrealdb::engine::remote::http::Http>(&config.connection)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create HTTP client: {}", e))
                })?;
            authenticate_client(&client, config).await?;

            let store = SharedStorage::new(client, shared_config).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "surrealdb-remote"))]
        SurrealDBEngine::WebSocket | SurrealDBEngine::Http => Err(StorageError::Configuration(
            "Remote engines require 'surrealdb-remote' feature to be enabled".to_string(),
        )),
    }
}

/// Sign in as root when credentials are configured
#[cfg(feature = "surrealdb-remote")]
async fn authenticate_client<C>(
    client: &Surreal<C>,
    config: &SurrealDBConfig,
) -> Result<(), StorageError>
where
    C: surrealdb::Connection,
{
    if let Some(auth) = &config.auth {
        tracing::debug!("Authenticating as root user");
        let root = surrealdb::opt::auth::Root {
            username: &auth.username,
            password: &auth.password,
        };
        client
            .signin(root)
            .await
            .map_err(|e| StorageError::Connection(format!("Root auth failed: {}", e)))?;
    }
    Ok(())
}
