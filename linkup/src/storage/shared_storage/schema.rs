//! Schema initialization and management for SharedStorage

use crate::storage::errors::StorageError;
use surrealdb::{Connection, Surreal};

/// Initialize the SharedStorage schema with the network's document tables
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    // Relationship and engagement fields are arrays maintained by the
    // application, so the tables stay schemaless.
    let user_table_query = r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS
        COMMENT "Profiles with their connection lists";

        DEFINE INDEX IF NOT EXISTS user_email_idx ON user FIELDS email UNIQUE;
    "#;

    let post_table_query = r#"
        DEFINE TABLE IF NOT EXISTS post SCHEMALESS
        COMMENT "Feed posts with likes, comments and shares";

        DEFINE INDEX IF NOT EXISTS post_author_idx ON post FIELDS author;
    "#;

    let job_table_query = r#"
        DEFINE TABLE IF NOT EXISTS job SCHEMALESS
        COMMENT "Job listings and their applicants";

        DEFINE INDEX IF NOT EXISTS job_posted_by_idx ON job FIELDS posted_by;
        DEFINE INDEX IF NOT EXISTS job_type_idx ON job FIELDS job_type;
    "#;

    let message_table_query = r#"
        DEFINE TABLE IF NOT EXISTS message SCHEMALESS
        COMMENT "Direct messages between two users";

        DEFINE INDEX IF NOT EXISTS message_sender_idx ON message FIELDS sender;
        DEFINE INDEX IF NOT EXISTS message_receiver_idx ON message FIELDS receiver;
    "#;

    execute_schema_query(client, user_table_query, "user table").await?;
    execute_schema_query(client, post_table_query, "post table").await?;
    execute_schema_query(client, job_table_query, "job table").await?;
    execute_schema_query(client, message_table_query, "message table").await?;

    tracing::info!("SharedStorage schema initialized successfully");
    Ok(())
}

async fn execute_schema_query<C>(
    client: &Surreal<C>,
    query: &str,
    description: &str,
) -> Result<(), StorageError>
where
    C: Connection,
{
    client
        .query(query)
        .await
        .and_then(|response| response.check())
        .map_err(|e| StorageError::Query(format!("Failed to create {}: {}", description, e)))?;

    tracing::debug!("Created {}", description);
    Ok(())
}

/// Remove every document from the network tables
pub async fn clear_tables<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    for table in ["user", "post", "job", "message"] {
        client
            .query(format!("DELETE FROM {}", table))
            .await
            .and_then(|response| response.check())
            .map_err(|e| StorageError::Query(format!("Failed to clear {}: {}", table, e)))?;
    }
    Ok(())
}
