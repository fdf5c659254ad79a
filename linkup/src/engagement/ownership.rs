//! Owner checks for documents only their owner may change.

use crate::models::{Job, Message, Post, UserId};
use crate::{LinkupError, Result};

/// A document with a single owning user
pub trait Owned {
    fn owner(&self) -> &UserId;
}

impl Owned for Post {
    fn owner(&self) -> &UserId {
        &self.author
    }
}

impl Owned for Job {
    fn owner(&self) -> &UserId {
        &self.posted_by
    }
}

/// Read receipts belong to whoever received the message
impl Owned for Message {
    fn owner(&self) -> &UserId {
        &self.receiver
    }
}

/// Fail with `Forbidden("Not authorized to <action>")` unless `actor` owns `document`
pub fn ensure_owner<D: Owned + ?Sized>(document: &D, actor: &UserId, action: &str) -> Result<()> {
    if document.owner() == actor {
        Ok(())
    } else {
        tracing::warn!(actor = %actor, owner = %document.owner(), action, "Rejected change by non-owner");
        Err(LinkupError::Forbidden(format!("Not authorized to {action}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_owner_passes() {
        let author = UserId::from("author");
        let post = Post::new(author.clone(), "hello", None);

        assert!(ensure_owner(&post, &author, "update this post").is_ok());

        let err = ensure_owner(&post, &UserId::from("someone"), "update this post").unwrap_err();
        assert!(matches!(err, LinkupError::Forbidden(msg) if msg == "Not authorized to update this post"));
    }

    #[test]
    fn message_receipts_belong_to_the_receiver() {
        let message = Message::new(UserId::from("a"), UserId::from("b"), "hi");
        assert!(ensure_owner(&message, &UserId::from("b"), "read this").is_ok());
        assert!(ensure_owner(&message, &UserId::from("a"), "read this").is_err());
    }
}
