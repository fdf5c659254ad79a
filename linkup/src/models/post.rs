//! Post documents and their engagement fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, IdSet, PostId, UserId};

/// A post in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub content: String,
    #[serde(default)]
    pub image: String,
    /// Toggled membership; a second like by the same user removes it
    #[serde(default)]
    pub likes: IdSet<UserId>,
    /// Append-only, in insertion order
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Monotonic; there is no un-share
    #[serde(default)]
    pub shares: IdSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment embedded in a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author: UserId, content: impl Into<String>, image: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::generate(),
            author,
            content: content.into(),
            image: image.unwrap_or_default(),
            likes: IdSet::new(),
            comments: Vec::new(),
            shares: IdSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }

    pub fn comments_count(&self) -> usize {
        self.comments.len()
    }

    pub fn shares_count(&self) -> usize {
        self.shares.len()
    }

    /// Every user referenced by the post, for display resolution
    pub fn referenced_users(&self) -> Vec<UserId> {
        let mut ids = vec![self.author.clone()];
        ids.extend(self.likes.iter().cloned());
        ids.extend(self.shares.iter().cloned());
        ids.extend(self.comments.iter().map(|c| c.author.clone()));
        ids
    }
}

impl Comment {
    pub fn new(author: UserId, content: impl Into<String>) -> Self {
        Self {
            id: CommentId::generate(),
            author,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Owner-editable post fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    pub content: Option<String>,
    pub image: Option<String>,
}

impl PostPatch {
    pub fn apply(self, post: &mut Post) {
        if let Some(content) = self.content {
            post.content = content.trim().to_string();
        }
        if let Some(image) = self.image {
            post.image = image;
        }
        post.touch();
    }
}
