//! Trait definitions for storage components in Linkup

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Job, JobId, Message, MessageId, Post, PostId, User, UserId};
use crate::storage::errors::StorageError;
use crate::storage::filters::JobFilter;

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> std::result::Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> std::result::Result<(), StorageError>;

    /// Get metadata about the store
    async fn get_metadata(&self) -> std::result::Result<serde_json::Value, StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> std::result::Result<(), StorageError>;
}

/// Trait for user profile documents
#[async_trait]
pub trait UserStore: BaseStore {
    /// Create a new user. Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, user: User) -> std::result::Result<User, StorageError>;

    /// Get a user by its ID
    async fn get_user(&self, id: &UserId) -> std::result::Result<Option<User>, StorageError>;

    /// Batch lookup; unknown ids are skipped and order is not guaranteed
    async fn get_users(&self, ids: &[UserId]) -> std::result::Result<Vec<User>, StorageError>;

    /// Find a user by (already normalized) email
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> std::result::Result<Option<User>, StorageError>;

    /// Replace a stored user document
    async fn update_user(&self, user: User) -> std::result::Result<User, StorageError>;

    /// Replace two user documents atomically: both writes land or neither does
    async fn update_user_pair(
        &self,
        first: User,
        second: User,
    ) -> std::result::Result<(User, User), StorageError>;

    /// List users in store order
    async fn list_users(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> std::result::Result<Vec<User>, StorageError>;

    /// List up to `limit` users whose id is not in `exclude`, in store order
    async fn list_users_excluding(
        &self,
        exclude: &[UserId],
        limit: usize,
    ) -> std::result::Result<Vec<User>, StorageError>;
}

/// Trait for post documents
#[async_trait]
pub trait PostStore: BaseStore {
    /// Create a new post
    async fn create_post(&self, post: Post) -> std::result::Result<Post, StorageError>;

    /// Get a post by its ID
    async fn get_post(&self, id: &PostId) -> std::result::Result<Option<Post>, StorageError>;

    /// Replace a stored post document
    async fn update_post(&self, post: Post) -> std::result::Result<Post, StorageError>;

    /// Delete a post by its ID
    async fn delete_post(&self, id: &PostId) -> std::result::Result<bool, StorageError>;

    /// List posts, newest first
    async fn list_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> std::result::Result<Vec<Post>, StorageError>;
}

/// Trait for job listings
#[async_trait]
pub trait JobStore: BaseStore {
    /// Create a new listing
    async fn create_job(&self, job: Job) -> std::result::Result<Job, StorageError>;

    /// Get a listing by its ID
    async fn get_job(&self, id: &JobId) -> std::result::Result<Option<Job>, StorageError>;

    /// Replace a stored listing
    async fn update_job(&self, job: Job) -> std::result::Result<Job, StorageError>;

    /// Delete a listing by its ID
    async fn delete_job(&self, id: &JobId) -> std::result::Result<bool, StorageError>;

    /// List listings matching `filter`, newest first
    async fn list_jobs(&self, filter: &JobFilter) -> std::result::Result<Vec<Job>, StorageError>;
}

/// Trait for direct messages
#[async_trait]
pub trait MessageStore: BaseStore {
    /// Store a new message
    async fn create_message(&self, message: Message) -> std::result::Result<Message, StorageError>;

    /// Get a message by its ID
    async fn get_message(
        &self,
        id: &MessageId,
    ) -> std::result::Result<Option<Message>, StorageError>;

    /// Replace a stored message
    async fn update_message(&self, message: Message) -> std::result::Result<Message, StorageError>;

    /// Every message `user` sent or received, newest first
    async fn list_messages_for_user(
        &self,
        user: &UserId,
    ) -> std::result::Result<Vec<Message>, StorageError>;

    /// Messages between two users in both directions, oldest first
    async fn list_thread(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> std::result::Result<Vec<Message>, StorageError>;

    /// Mark every unread message from `sender` to `receiver` as read,
    /// returning how many changed
    async fn mark_thread_read(
        &self,
        sender: &UserId,
        receiver: &UserId,
        at: DateTime<Utc>,
    ) -> std::result::Result<usize, StorageError>;
}

/// Combined trait for every document family the network stores
pub trait NetworkStore: UserStore + PostStore + JobStore + MessageStore {
    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
