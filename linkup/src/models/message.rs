//! Direct messages between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MessageId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: UserId,
    pub receiver: UserId,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: UserId, receiver: UserId, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            sender,
            receiver,
            content: content.into(),
            read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// The other participant, seen from `user`
    pub fn partner_of(&self, user: &UserId) -> &UserId {
        if &self.sender == user {
            &self.receiver
        } else {
            &self.sender
        }
    }

    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        self.read = true;
        self.read_at = Some(at);
    }
}
