//! Direct message storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key};
use crate::models::{Message, MessageId, UserId};
use crate::storage::errors::StorageError;
use crate::storage::traits::MessageStore;

/// Internal representation of a Message record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealMessage {
    id: RecordId,
    sender: UserId,
    receiver: UserId,
    content: String,
    #[serde(default)]
    read: bool,
    #[serde(default)]
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct MessageContent {
    sender: UserId,
    receiver: UserId,
    content: String,
    read: bool,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<Message> for MessageContent {
    fn from(message: Message) -> Self {
        Self {
            sender: message.sender,
            receiver: message.receiver,
            content: message.content,
            read: message.read,
            read_at: message.read_at,
            created_at: message.created_at,
        }
    }
}

impl From<SurrealMessage> for Message {
    fn from(record: SurrealMessage) -> Self {
        Self {
            id: MessageId::from(record_key(&record.id)),
            sender: record.sender,
            receiver: record.receiver,
            content: record.content,
            read: record.read,
            read_at: record.read_at,
            created_at: record.created_at,
        }
    }
}

fn take_messages(
    response: &mut surrealdb::Response,
    what: &str,
) -> Result<Vec<Message>, StorageError> {
    let records: Vec<SurrealMessage> = response
        .take(0)
        .map_err(|e| StorageError::Query(format!("Failed to extract {}: {}", what, e)))?;
    Ok(records.into_iter().map(Message::from).collect())
}

#[async_trait]
impl<C> MessageStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_message(&self, message: Message) -> Result<Message, StorageError> {
        let id = message.id.clone();
        let created: Option<SurrealMessage> = self
            .client
            .create(("message", id.as_str()))
            .content(MessageContent::from(message))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to create message: {}", e)))?;

        created
            .map(Message::from)
            .ok_or_else(|| StorageError::Other(format!("No message created for {}", id)))
    }

    async fn get_message(&self, id: &MessageId) -> Result<Option<Message>, StorageError> {
        let message: Option<SurrealMessage> = self
            .client
            .select(("message", id.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get message: {}", e)))?;

        Ok(message.map(Message::from))
    }

    async fn update_message(&self, message: Message) -> Result<Message, StorageError> {
        let id = message.id.clone();
        let updated: Option<SurrealMessage> = self
            .client
            .update(("message", id.as_str()))
            .content(MessageContent::from(message))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update message: {}", e)))?;

        updated
            .map(Message::from)
            .ok_or_else(|| StorageError::NotFound(format!("Message with ID {} not found", id)))
    }

    async fn list_messages_for_user(&self, user: &UserId) -> Result<Vec<Message>, StorageError> {
        let mut response = self
            .client
            .query("SELECT * FROM message WHERE sender = $user OR receiver = $user")
            .bind(("user", user.clone()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list messages: {}", e)))?;

        let mut messages = take_messages(&mut response, "messages")?;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn list_thread(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, StorageError> {
        let query = r#"
            SELECT * FROM message
            WHERE (sender = $a AND receiver = $b) OR (sender = $b AND receiver = $a)
        "#;
        let mut response = self
            .client
            .query(query)
            .bind(("a", a.clone()))
            .bind(("b", b.clone()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list thread: {}", e)))?;

        let mut messages = take_messages(&mut response, "thread")?;
        messages.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        Ok(messages)
    }

    async fn mark_thread_read(
        &self,
        sender: &UserId,
        receiver: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, StorageError> {
        let query = r#"
            UPDATE message SET read = true, read_at = $at
            WHERE sender = $sender AND receiver = $receiver AND read = false
        "#;
        let mut response = self
            .client
            .query(query)
            .bind(("sender", sender.clone()))
            .bind(("receiver", receiver.clone()))
            .bind(("at", at))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to mark thread read: {}", e)))?;

        Ok(take_messages(&mut response, "marked messages")?.len())
    }
}
