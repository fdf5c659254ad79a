//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;
use crate::storage::config::{StorageBackend, SurrealDBEngine};

/// Validate the entire configuration.
pub fn validate_config(config: &LinkupConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_relationship_config(&config.relationships)?;

    Ok(())
}

/// Validate storage configuration.
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty".to_string(),
        ));
    }

    match config.backend {
        StorageBackend::SurrealDB => {
            if config.surrealdb.namespace.is_empty() {
                return Err(ConfigError::ValidationError(
                    "SurrealDB namespace cannot be empty".to_string(),
                ));
            }
            if config.surrealdb.database.is_empty() {
                return Err(ConfigError::ValidationError(
                    "SurrealDB database cannot be empty".to_string(),
                ));
            }
            if config.surrealdb.engine != SurrealDBEngine::Memory
                && config.surrealdb.connection.trim().is_empty()
            {
                return Err(ConfigError::ValidationError(
                    "SurrealDB connection cannot be empty".to_string(),
                ));
            }
        }
        StorageBackend::Memory => {
            // No additional validation needed for memory storage
        }
    }

    Ok(())
}

fn validate_relationship_config(config: &RelationshipConfig) -> Result<(), ConfigError> {
    if config.suggestion_limit == 0 {
        return Err(ConfigError::ValidationError(
            "suggestion_limit must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
