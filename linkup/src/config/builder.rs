//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::storage::config::{StorageBackend, SurrealDBAuth, SurrealDBConfig, SurrealDBEngine};
use std::path::Path;

/// Builder for creating LinkupConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: LinkupConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: LinkupConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: LinkupConfig) -> Self {
        Self { config }
    }

    /// Set the base data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Select the storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage.backend = backend;
        self
    }

    /// Persist to an embedded RocksDB database under the data directory
    pub fn with_default_storage(mut self) -> Self {
        self.config.storage.backend = StorageBackend::SurrealDB;
        self.config.storage.surrealdb = SurrealDBConfig {
            engine: SurrealDBEngine::RocksDB,
            connection: self
                .config
                .storage
                .data_dir
                .join("network")
                .to_string_lossy()
                .to_string(),
            ..SurrealDBConfig::default()
        };
        self
    }

    /// Use SurrealDB's in-memory engine (no persistence)
    pub fn with_surrealdb_memory(mut self) -> Self {
        self.config.storage.backend = StorageBackend::SurrealDB;
        self.config.storage.surrealdb.engine = SurrealDBEngine::Memory;
        self.config.storage.surrealdb.connection = "memory".to_string();
        self
    }

    /// Use the process-local store (good for testing)
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.backend = StorageBackend::Memory;
        self
    }

    /// Set the SurrealDB namespace and database
    pub fn with_namespace(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.config.storage.surrealdb.namespace = namespace.into();
        self.config.storage.surrealdb.database = database.into();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (console output at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;
        self
    }

    /// Choose how accepted connection requests are persisted
    pub fn with_accept_mode(mut self, mode: AcceptMode) -> Self {
        self.config.relationships.accept_mode = mode;
        self
    }

    /// Repair asymmetric connection lists whenever they are read
    pub fn with_repair_on_read(mut self, enabled: bool) -> Self {
        self.config.relationships.repair_on_read = enabled;
        self
    }

    /// Cap the number of connection suggestions
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.config.relationships.suggestion_limit = limit;
        self
    }

    /// Create a configuration for development with in-memory databases.
    pub fn development() -> Self {
        Self::new()
            .with_surrealdb_memory()
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for automated testing.
    ///
    /// Uses the process-local store so tests need no database engine.
    pub fn testing() -> Self {
        Self::new()
            .with_memory_storage()
            .with_data_dir("./test_data")
            .with_log_level(LogLevel::Debug)
    }

    /// Create a production-ready configuration with persistent storage.
    pub fn production() -> Self {
        Self::new().with_default_storage().with_default_logging()
    }

    /// Create a fully default configuration suitable for most uses
    ///
    /// This is `production()` switched to a remote SurrealDB when
    /// `SURREALDB_URL` is set.
    pub fn defaults() -> Self {
        Self::production().with_remote_surrealdb_if_configured()
    }

    /// Configure SurrealDB to use remote connection if environment variables are set
    pub fn with_remote_surrealdb_if_configured(mut self) -> Self {
        if let Ok(connection_url) = std::env::var("SURREALDB_URL") {
            tracing::info!(
                "Configuring SurrealDB remote connection to: {}",
                connection_url
            );

            let engine =
                if connection_url.starts_with("ws://") || connection_url.starts_with("wss://") {
                    SurrealDBEngine::WebSocket
                } else {
                    SurrealDBEngine::Http
                };

            let namespace =
                std::env::var("SURREALDB_NAMESPACE").unwrap_or_else(|_| "linkup".to_string());
            let database =
                std::env::var("SURREALDB_DATABASE").unwrap_or_else(|_| "network".to_string());

            let auth = match (
                std::env::var("SURREALDB_USERNAME"),
                std::env::var("SURREALDB_PASSWORD"),
            ) {
                (Ok(username), Ok(password)) => Some(SurrealDBAuth { username, password }),
                _ => None,
            };

            self.config.storage.backend = StorageBackend::SurrealDB;
            self.config.storage.surrealdb = SurrealDBConfig {
                engine,
                connection: connection_url,
                namespace,
                database,
                auth,
            };
        }

        self
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<LinkupConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
