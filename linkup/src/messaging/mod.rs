//! Direct messages between users.
//!
//! Messages are grouped into conversations by partner. Opening a thread marks
//! everything the partner sent the viewer as read.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::core::resolve::{load_directory, message_views};
use crate::engagement::ensure_owner;
use crate::models::{Conversation, Message, MessageId, MessageView, UserId};
use crate::storage::{MessageStore, UserStore};
use crate::{LinkupError, Result};

#[derive(Debug, Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserStore>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageStore>, users: Arc<dyn UserStore>) -> Self {
        Self { messages, users }
    }

    pub async fn send(&self, actor: &UserId, receiver: &UserId, content: &str) -> Result<MessageView> {
        let content = content.trim();
        if content.is_empty() {
            return Err(LinkupError::Validation(
                "Please provide receiver and content".to_string(),
            ));
        }
        if self.users.get_user(receiver).await?.is_none() {
            return Err(LinkupError::NotFound("Receiver not found".to_string()));
        }

        let message = self
            .messages
            .create_message(Message::new(actor.clone(), receiver.clone(), content))
            .await?;
        info!(message = %message.id, sender = %actor, receiver = %receiver, "Sent message");

        let mut views = message_views(self.users.as_ref(), std::slice::from_ref(&message)).await?;
        views
            .pop()
            .ok_or_else(|| LinkupError::Other("Message view could not be built".to_string()))
    }

    /// One entry per partner, most recent conversation first
    pub async fn conversations(&self, actor: &UserId) -> Result<Vec<Conversation>> {
        let messages = self.messages.list_messages_for_user(actor).await?;

        // Messages arrive newest first, so the first one seen per partner is the latest
        let mut order: Vec<UserId> = Vec::new();
        let mut latest: HashMap<UserId, &Message> = HashMap::new();
        let mut unread: HashMap<UserId, usize> = HashMap::new();
        for message in &messages {
            let partner = message.partner_of(actor).clone();
            if !latest.contains_key(&partner) {
                order.push(partner.clone());
                latest.insert(partner.clone(), message);
            }
            if &message.receiver == actor && !message.read {
                *unread.entry(partner).or_default() += 1;
            }
        }

        let directory = load_directory(
            self.users.as_ref(),
            order.iter().cloned().chain(std::iter::once(actor.clone())),
        )
        .await?;

        Ok(order
            .into_iter()
            .filter_map(|partner| {
                let last = latest.get(&partner)?;
                Some(Conversation {
                    partner: directory.get(&partner),
                    last_message: MessageView::resolve(last, &directory),
                    unread_count: unread.get(&partner).copied().unwrap_or(0),
                })
            })
            .collect())
    }

    /// Every message between `actor` and `partner`, oldest first.
    ///
    /// Afterwards all unread messages from `partner` to `actor` are marked as
    /// read. The returned list shows them as they were before marking.
    pub async fn thread(&self, actor: &UserId, partner: &UserId) -> Result<Vec<MessageView>> {
        let messages = self.messages.list_thread(actor, partner).await?;
        let views = message_views(self.users.as_ref(), &messages).await?;

        let marked = self
            .messages
            .mark_thread_read(partner, actor, Utc::now())
            .await?;
        if marked > 0 {
            debug!(reader = %actor, partner = %partner, marked, "Marked thread as read");
        }
        Ok(views)
    }

    /// Mark one message as read. Only its receiver may do this.
    pub async fn mark_as_read(&self, actor: &UserId, id: &MessageId) -> Result<MessageView> {
        let mut message = self
            .messages
            .get_message(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("Message not found".to_string()))?;

        ensure_owner(&message, actor, "read this message").map_err(|e| match e {
            LinkupError::Forbidden(_) => LinkupError::Forbidden("Not authorized".to_string()),
            other => other,
        })?;

        if !message.read {
            message.mark_read(Utc::now());
            message = self.messages.update_message(message).await?;
        }

        let mut views = message_views(self.users.as_ref(), std::slice::from_ref(&message)).await?;
        views
            .pop()
            .ok_or_else(|| LinkupError::Other("Message view could not be built".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::storage::InMemoryStore;
    use std::time::Duration;

    async fn setup() -> (MessageService, User, User, User) {
        let store = Arc::new(InMemoryStore::new());
        let mut users = Vec::new();
        for name in ["Ada", "Bob", "Cy"] {
            users.push(
                store
                    .create_user(User::new(name, format!("{}@example.com", name.to_lowercase()), "h"))
                    .await
                    .unwrap(),
            );
        }
        let cy = users.pop().unwrap();
        let bob = users.pop().unwrap();
        let ada = users.pop().unwrap();
        (MessageService::new(store.clone(), store), ada, bob, cy)
    }

    #[tokio::test]
    async fn send_validates_content_and_receiver() {
        let (messages, ada, bob, _) = setup().await;

        let err = messages.send(&ada.id, &bob.id, "  ").await.unwrap_err();
        assert!(matches!(err, LinkupError::Validation(_)));

        let err = messages.send(&ada.id, &UserId::from("ghost"), "hi").await.unwrap_err();
        assert!(matches!(err, LinkupError::NotFound(_)));

        let view = messages.send(&ada.id, &bob.id, "hi").await.unwrap();
        assert_eq!(view.sender.map(|s| s.name), Some("Ada".to_string()));
        assert!(!view.read);
    }

    #[tokio::test]
    async fn conversations_group_by_partner_with_unread_counts() {
        let (messages, ada, bob, cy) = setup().await;
        messages.send(&bob.id, &ada.id, "one").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        messages.send(&bob.id, &ada.id, "two").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        messages.send(&ada.id, &cy.id, "hey cy").await.unwrap();

        let conversations = messages.conversations(&ada.id).await.unwrap();
        assert_eq!(conversations.len(), 2);

        assert_eq!(conversations[0].partner.as_ref().map(|p| p.id.clone()), Some(cy.id.clone()));
        assert_eq!(conversations[0].unread_count, 0);
        assert_eq!(conversations[0].last_message.content, "hey cy");

        assert_eq!(conversations[1].partner.as_ref().map(|p| p.id.clone()), Some(bob.id.clone()));
        assert_eq!(conversations[1].unread_count, 2);
        assert_eq!(conversations[1].last_message.content, "two");
    }

    #[tokio::test]
    async fn opening_a_thread_marks_incoming_as_read() {
        let (messages, ada, bob, _) = setup().await;
        messages.send(&bob.id, &ada.id, "hello").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        messages.send(&ada.id, &bob.id, "hi back").await.unwrap();

        let thread = messages.thread(&ada.id, &bob.id).await.unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].content, "hello");
        // Returned as it was before marking
        assert!(!thread[0].read);

        let thread = messages.thread(&ada.id, &bob.id).await.unwrap();
        assert!(thread[0].read);
        assert!(thread[0].read_at.is_some());
        // Ada's own message stays unread until Bob opens the thread
        assert!(!thread[1].read);
    }

    #[tokio::test]
    async fn only_the_receiver_marks_as_read() {
        let (messages, ada, bob, _) = setup().await;
        let sent = messages.send(&ada.id, &bob.id, "hi").await.unwrap();

        let err = messages.mark_as_read(&ada.id, &sent.id).await.unwrap_err();
        assert!(matches!(err, LinkupError::Forbidden(msg) if msg == "Not authorized"));

        let read = messages.mark_as_read(&bob.id, &sent.id).await.unwrap();
        assert!(read.read);

        let err = messages
            .mark_as_read(&bob.id, &MessageId::from("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, LinkupError::NotFound(_)));
    }
}
