//! Post storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key};
use crate::models::{Comment, IdSet, Post, PostId, UserId};
use crate::storage::errors::StorageError;
use crate::storage::traits::PostStore;

/// Internal representation of a Post record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealPost {
    id: RecordId,
    author: UserId,
    content: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    likes: IdSet<UserId>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    shares: IdSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct PostContent {
    author: UserId,
    content: String,
    image: String,
    likes: IdSet<UserId>,
    comments: Vec<Comment>,
    shares: IdSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Post> for PostContent {
    fn from(post: Post) -> Self {
        Self {
            author: post.author,
            content: post.content,
            image: post.image,
            likes: post.likes,
            comments: post.comments,
            shares: post.shares,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<SurrealPost> for Post {
    fn from(record: SurrealPost) -> Self {
        Self {
            id: PostId::from(record_key(&record.id)),
            author: record.author,
            content: record.content,
            image: record.image,
            likes: record.likes,
            comments: record.comments,
            shares: record.shares,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl<C> PostStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_post(&self, post: Post) -> Result<Post, StorageError> {
        let id = post.id.clone();
        let created: Option<SurrealPost> = self
            .client
            .create(("post", id.as_str()))
            .content(PostContent::from(post))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to create post: {}", e)))?;

        created
            .map(Post::from)
            .ok_or_else(|| StorageError::Other(format!("No post created for {}", id)))
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, StorageError> {
        let post: Option<SurrealPost> = self
            .client
            .select(("post", id.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get post: {}", e)))?;

        Ok(post.map(Post::from))
    }

    async fn update_post(&self, post: Post) -> Result<Post, StorageError> {
        let id = post.id.clone();
        let updated: Option<SurrealPost> = self
            .client
            .update(("post", id.as_str()))
            .content(PostContent::from(post))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update post: {}", e)))?;

        updated
            .map(Post::from)
            .ok_or_else(|| StorageError::NotFound(format!("Post with ID {} not found", id)))
    }

    async fn delete_post(&self, id: &PostId) -> Result<bool, StorageError> {
        let deleted: Option<SurrealPost> = self
            .client
            .delete(("post", id.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete post: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, StorageError> {
        let records: Vec<SurrealPost> = self
            .client
            .select("post")
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list posts: {}", e)))?;

        let mut posts: Vec<Post> = records.into_iter().map(Post::from).collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let iter = posts.into_iter().skip(offset.unwrap_or(0));
        Ok(match limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        })
    }
}
