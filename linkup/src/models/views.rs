//! Documents with their user references resolved to display fields.
//!
//! Stored documents only carry user ids. Every service returns one of these
//! views instead, built from a [`UserDirectory`] filled by a single batch
//! lookup. Ids whose user no longer exists are dropped from resolved lists
//! and leave single references as `None`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Comment, CommentId, Job, JobId, JobType, Message, MessageId, Post, PostId, Salary, User,
    UserId, UserSummary,
};

/// Lookup table from user id to display fields
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    entries: HashMap<UserId, UserSummary>,
}

impl UserDirectory {
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a User>) -> Self {
        Self {
            entries: users
                .into_iter()
                .map(|u| (u.id.clone(), u.summary()))
                .collect(),
        }
    }

    pub fn get(&self, id: &UserId) -> Option<UserSummary> {
        self.entries.get(id).cloned()
    }

    /// Resolve ids in order, skipping unknown ones
    pub fn resolve_all<'a>(&self, ids: impl IntoIterator<Item = &'a UserId>) -> Vec<UserSummary> {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author: Option<UserSummary>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub author: Option<UserSummary>,
    pub content: String,
    pub image: String,
    pub likes: Vec<UserSummary>,
    pub comments: Vec<CommentView>,
    pub shares: Vec<UserSummary>,
    pub likes_count: usize,
    pub comments_count: usize,
    pub shares_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostView {
    /// Counts come from the stored sets so they stay stable when a
    /// referenced user has been deleted.
    pub fn resolve(post: &Post, users: &UserDirectory) -> Self {
        Self {
            id: post.id.clone(),
            author: users.get(&post.author),
            content: post.content.clone(),
            image: post.image.clone(),
            likes: users.resolve_all(post.likes.iter()),
            comments: post
                .comments
                .iter()
                .map(|c| CommentView::resolve(c, users))
                .collect(),
            shares: users.resolve_all(post.shares.iter()),
            likes_count: post.likes_count(),
            comments_count: post.comments_count(),
            shares_count: post.shares_count(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl CommentView {
    fn resolve(comment: &Comment, users: &UserDirectory) -> Self {
        Self {
            id: comment.id.clone(),
            author: users.get(&comment.author),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobView {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub description: String,
    pub posted_by: Option<UserSummary>,
    pub applicants: Vec<UserSummary>,
    pub applicants_count: usize,
    pub requirements: Vec<String>,
    pub salary: Option<Salary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobView {
    pub fn resolve(job: &Job, users: &UserDirectory) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type,
            description: job.description.clone(),
            posted_by: users.get(&job.posted_by),
            applicants: users.resolve_all(job.applicants.iter()),
            applicants_count: job.applicants_count(),
            requirements: job.requirements.clone(),
            salary: job.salary.clone(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageView {
    pub id: MessageId,
    pub sender: Option<UserSummary>,
    pub receiver: Option<UserSummary>,
    pub content: String,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MessageView {
    pub fn resolve(message: &Message, users: &UserDirectory) -> Self {
        Self {
            id: message.id.clone(),
            sender: users.get(&message.sender),
            receiver: users.get(&message.receiver),
            content: message.content.clone(),
            read: message.read,
            read_at: message.read_at,
            created_at: message.created_at,
        }
    }
}

/// Latest exchange with one partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub partner: Option<UserSummary>,
    pub last_message: MessageView,
    /// Messages from the partner the viewer has not read yet
    pub unread_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_users_are_dropped_but_counts_are_kept() {
        let author = User::new("Ada", "ada@example.com", "hash");
        let liker = User::new("Bob", "bob@example.com", "hash");
        let mut post = Post::new(author.id.clone(), "hello", None);
        post.likes.insert(liker.id.clone());
        post.likes.insert(UserId::from("deleted-user"));

        let directory = UserDirectory::from_users([&author, &liker]);
        let view = PostView::resolve(&post, &directory);

        assert_eq!(view.author.map(|a| a.name), Some("Ada".to_string()));
        assert_eq!(view.likes.len(), 1);
        assert_eq!(view.likes[0].id, liker.id);
        assert_eq!(view.likes_count, 2);
    }
}
