//! Base shared storage implementation

use async_trait::async_trait;
use surrealdb::{Connection, RecordId, Surreal};

use super::config::SharedStorageConfig;
use crate::storage::errors::StorageError;
use crate::storage::traits::{BaseStore, NetworkStore};

/// SurrealDB-backed implementation of every store trait
#[derive(Debug)]
pub struct SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
    pub(crate) config: SharedStorageConfig,
}

impl<C> SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Create a new shared storage instance
    pub async fn new(
        client: Surreal<C>,
        config: SharedStorageConfig,
    ) -> Result<Self, StorageError> {
        // Set namespace and database
        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StorageError::Connection(format!("Failed to set namespace/database: {}", e))
            })?;

        let storage = Self { client, config };
        super::schema::initialize_schema(&storage.client).await?;

        Ok(storage)
    }

    /// Get the underlying client for advanced operations
    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }
}

/// Extract the plain key from a record id.
///
/// `RecordId::key().to_string()` escapes keys that are not simple identifiers
/// (such as UUIDs). Depending on the SurrealDB release the key is wrapped in
/// `⟨⟩` or in backticks, with the closing delimiter escaped inside.
pub(crate) fn record_key(id: &RecordId) -> String {
    let key_string = id.key().to_string();
    unescape_key(&key_string, '⟨', '⟩')
        .or_else(|| unescape_key(&key_string, '`', '`'))
        .unwrap_or(key_string)
}

fn unescape_key(key: &str, open: char, close: char) -> Option<String> {
    let inner = key.strip_prefix(open)?.strip_suffix(close)?;
    Some(inner.replace(&format!("\\{close}"), &close.to_string()))
}

#[async_trait]
impl<C> BaseStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        let _result = self
            .client
            .query("INFO FOR DB")
            .await
            .map_err(|e| StorageError::Connection(format!("Health check failed: {}", e)))?;

        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        super::schema::clear_tables(&self.client).await
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        Ok(serde_json::json!({
            "type": "shared_storage",
            "namespace": self.config.namespace,
            "database": self.config.database,
            "tables": ["user", "post", "job", "message"],
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        // SurrealDB connections are closed when dropped
        Ok(())
    }
}

impl<C> NetworkStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn backend_name(&self) -> &'static str {
        "surrealdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_returns_the_raw_uuid_key() {
        let raw = "cadc8c65-1154-47b1-90b0-5616c25c1a47";
        let id = RecordId::from(("user", raw));
        assert_eq!(record_key(&id), raw);

        let generated = uuid::Uuid::new_v4().to_string();
        assert_eq!(record_key(&RecordId::from(("post", generated.as_str()))), generated);
    }

    #[test]
    fn record_key_leaves_simple_keys_alone() {
        assert_eq!(record_key(&RecordId::from(("user", "alice"))), "alice");
    }

    #[test]
    fn both_delimiter_styles_are_stripped() {
        assert_eq!(unescape_key("⟨a-b⟩", '⟨', '⟩').as_deref(), Some("a-b"));
        assert_eq!(unescape_key("`a-b`", '`', '`').as_deref(), Some("a-b"));
        assert_eq!(unescape_key("`a\\`b`", '`', '`').as_deref(), Some("a`b"));
        assert_eq!(unescape_key("plain", '`', '`'), None);
    }
}
