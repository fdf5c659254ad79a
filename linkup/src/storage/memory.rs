//! Process-local storage backend.
//!
//! Keeps every document family in maps behind a single `RwLock`. Writes that
//! touch two documents happen under one write guard, so `update_user_pair`
//! is atomic here as well.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Job, JobId, Message, MessageId, Post, PostId, User, UserId};
use crate::storage::errors::StorageError;
use crate::storage::filters::JobFilter;
use crate::storage::traits::{
    BaseStore, JobStore, MessageStore, NetworkStore, PostStore, UserStore,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    posts: HashMap<PostId, Post>,
    jobs: HashMap<JobId, Job>,
    messages: HashMap<MessageId, Message>,
}

/// In-memory implementation of every store trait
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables
            .read()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}

/// Users come back in creation order
fn users_in_store_order<'a>(users: impl Iterator<Item = &'a User>) -> Vec<User> {
    let mut users: Vec<User> = users.cloned().collect();
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    users
}

fn paginate<T>(items: Vec<T>, limit: Option<usize>, offset: Option<usize>) -> Vec<T> {
    let iter = items.into_iter().skip(offset.unwrap_or(0));
    match limit {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}

#[async_trait]
impl BaseStore for InMemoryStore {
    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(self.read().is_ok())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.write()? = Tables::default();
        Ok(())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        let tables = self.read()?;
        Ok(serde_json::json!({
            "type": "memory",
            "users": tables.users.len(),
            "posts": tables.posts.len(),
            "jobs": tables.jobs.len(),
            "messages": tables.messages.len(),
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        let mut tables = self.write()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        if tables.users.contains_key(&user.id) {
            return Err(StorageError::AlreadyExists(format!(
                "User with ID {} already exists",
                user.id
            )));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn get_users(&self, ids: &[UserId]) -> Result<Vec<User>, StorageError> {
        let tables = self.read()?;
        let mut seen = std::collections::HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_user(&self, user: User) -> Result<User, StorageError> {
        let mut tables = self.write()?;
        match tables.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(StorageError::NotFound(format!(
                "User with ID {} not found",
                user.id
            ))),
        }
    }

    async fn update_user_pair(&self, first: User, second: User) -> Result<(User, User), StorageError> {
        let mut tables = self.write()?;
        for user in [&first, &second] {
            if !tables.users.contains_key(&user.id) {
                return Err(StorageError::NotFound(format!(
                    "User with ID {} not found",
                    user.id
                )));
            }
        }
        tables.users.insert(first.id.clone(), first.clone());
        tables.users.insert(second.id.clone(), second.clone());
        Ok((first, second))
    }

    async fn list_users(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<User>, StorageError> {
        let tables = self.read()?;
        Ok(paginate(
            users_in_store_order(tables.users.values()),
            limit,
            offset,
        ))
    }

    async fn list_users_excluding(
        &self,
        exclude: &[UserId],
        limit: usize,
    ) -> Result<Vec<User>, StorageError> {
        let tables = self.read()?;
        let mut users = users_in_store_order(
            tables.users.values().filter(|u| !exclude.contains(&u.id)),
        );
        users.truncate(limit);
        Ok(users)
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn create_post(&self, post: Post) -> Result<Post, StorageError> {
        let mut tables = self.write()?;
        if tables.posts.contains_key(&post.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Post with ID {} already exists",
                post.id
            )));
        }
        tables.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, StorageError> {
        Ok(self.read()?.posts.get(id).cloned())
    }

    async fn update_post(&self, post: Post) -> Result<Post, StorageError> {
        let mut tables = self.write()?;
        match tables.posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(StorageError::NotFound(format!(
                "Post with ID {} not found",
                post.id
            ))),
        }
    }

    async fn delete_post(&self, id: &PostId) -> Result<bool, StorageError> {
        Ok(self.write()?.posts.remove(id).is_some())
    }

    async fn list_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, StorageError> {
        let tables = self.read()?;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(posts, limit, offset))
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn create_job(&self, job: Job) -> Result<Job, StorageError> {
        let mut tables = self.write()?;
        if tables.jobs.contains_key(&job.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Job with ID {} already exists",
                job.id
            )));
        }
        tables.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        Ok(self.read()?.jobs.get(id).cloned())
    }

    async fn update_job(&self, job: Job) -> Result<Job, StorageError> {
        let mut tables = self.write()?;
        match tables.jobs.get_mut(&job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(job)
            }
            None => Err(StorageError::NotFound(format!(
                "Job with ID {} not found",
                job.id
            ))),
        }
    }

    async fn delete_job(&self, id: &JobId) -> Result<bool, StorageError> {
        Ok(self.write()?.jobs.remove(id).is_some())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, StorageError> {
        let tables = self.read()?;
        let mut jobs: Vec<Job> = tables
            .jobs
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn create_message(&self, message: Message) -> Result<Message, StorageError> {
        let mut tables = self.write()?;
        tables.messages.insert(message.id.clone(), message.clone());
        Ok(message)
    }

    async fn get_message(&self, id: &MessageId) -> Result<Option<Message>, StorageError> {
        Ok(self.read()?.messages.get(id).cloned())
    }

    async fn update_message(&self, message: Message) -> Result<Message, StorageError> {
        let mut tables = self.write()?;
        match tables.messages.get_mut(&message.id) {
            Some(existing) => {
                *existing = message.clone();
                Ok(message)
            }
            None => Err(StorageError::NotFound(format!(
                "Message with ID {} not found",
                message.id
            ))),
        }
    }

    async fn list_messages_for_user(&self, user: &UserId) -> Result<Vec<Message>, StorageError> {
        let tables = self.read()?;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|m| &m.sender == user || &m.receiver == user)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn list_thread(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, StorageError> {
        let tables = self.read()?;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|m| {
                (&m.sender == a && &m.receiver == b) || (&m.sender == b && &m.receiver == a)
            })
            .cloned()
            .collect();
        messages.sort_by(|x, y| x.created_at.cmp(&y.created_at));
        Ok(messages)
    }

    async fn mark_thread_read(
        &self,
        sender: &UserId,
        receiver: &UserId,
        at: DateTime<Utc>,
    ) -> Result<usize, StorageError> {
        let mut tables = self.write()?;
        let mut changed = 0;
        for message in tables.messages.values_mut() {
            if &message.sender == sender && &message.receiver == receiver && !message.read {
                message.mark_read(at);
                changed += 1;
            }
        }
        Ok(changed)
    }
}

impl NetworkStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
