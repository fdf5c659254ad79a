//! User storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key};
use crate::models::{Education, Experience, IdSet, User, UserId};
use crate::storage::errors::StorageError;
use crate::storage::traits::UserStore;

/// Internal representation of a User record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealUser {
    id: RecordId,
    name: String,
    email: String,
    password_hash: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    avatar: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    experience: Vec<Experience>,
    #[serde(default)]
    education: Vec<Education>,
    #[serde(default)]
    connections: u32,
    #[serde(default)]
    connections_list: IdSet<UserId>,
    #[serde(default)]
    pending_connections: IdSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Record body without the id, used for create and replace
#[derive(Debug, Clone, serde::Serialize)]
struct UserContent {
    name: String,
    email: String,
    password_hash: String,
    title: String,
    location: String,
    avatar: String,
    bio: String,
    experience: Vec<Experience>,
    education: Vec<Education>,
    connections: u32,
    connections_list: IdSet<UserId>,
    pending_connections: IdSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<User> for UserContent {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            title: user.title,
            location: user.location,
            avatar: user.avatar,
            bio: user.bio,
            experience: user.experience,
            education: user.education,
            connections: user.connections,
            connections_list: user.connections_list,
            pending_connections: user.pending_connections,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<SurrealUser> for User {
    fn from(record: SurrealUser) -> Self {
        Self {
            id: UserId::from(record_key(&record.id)),
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            title: record.title,
            location: record.location,
            avatar: record.avatar,
            bio: record.bio,
            experience: record.experience,
            education: record.education,
            connections: record.connections,
            connections_list: record.connections_list,
            pending_connections: record.pending_connections,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

fn user_record(id: &UserId) -> RecordId {
    RecordId::from(("user", id.as_str()))
}

/// Users come back in creation order
fn sort_store_order(users: &mut [User]) {
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

#[async_trait]
impl<C> UserStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_user(&self, user: User) -> Result<User, StorageError> {
        if self.find_user_by_email(&user.email).await?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        let id = user.id.clone();
        let created: Option<SurrealUser> = self
            .client
            .create(("user", id.as_str()))
            .content(UserContent::from(user))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to create user: {}", e)))?;

        created
            .map(User::from)
            .ok_or_else(|| StorageError::Other(format!("No user created for {}", id)))
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        let user: Option<SurrealUser> = self
            .client
            .select(("user", id.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get user: {}", e)))?;

        Ok(user.map(User::from))
    }

    async fn get_users(&self, ids: &[UserId]) -> Result<Vec<User>, StorageError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<RecordId> = ids.iter().map(user_record).collect();
        let mut response = self
            .client
            .query("SELECT * FROM $ids")
            .bind(("ids", records))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get users: {}", e)))?;

        let users: Vec<SurrealUser> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract users: {}", e)))?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let mut response = self
            .client
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to find user: {}", e)))?;

        let users: Vec<SurrealUser> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract user: {}", e)))?;

        Ok(users.into_iter().next().map(User::from))
    }

    async fn update_user(&self, user: User) -> Result<User, StorageError> {
        let id = user.id.clone();
        let updated: Option<SurrealUser> = self
            .client
            .update(("user", id.as_str()))
            .content(UserContent::from(user))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update user: {}", e)))?;

        updated
            .map(User::from)
            .ok_or_else(|| StorageError::NotFound(format!("User with ID {} not found", id)))
    }

    async fn update_user_pair(&self, first: User, second: User) -> Result<(User, User), StorageError> {
        for id in [&first.id, &second.id] {
            if self.get_user(id).await?.is_none() {
                return Err(StorageError::NotFound(format!("User with ID {} not found", id)));
            }
        }

        let first_id = first.id.clone();
        let second_id = second.id.clone();
        let query = r#"
            BEGIN TRANSACTION;
            UPDATE $first_id CONTENT $first;
            UPDATE $second_id CONTENT $second;
            COMMIT TRANSACTION;
        "#;

        self.client
            .query(query)
            .bind(("first_id", user_record(&first_id)))
            .bind(("first", UserContent::from(first)))
            .bind(("second_id", user_record(&second_id)))
            .bind(("second", UserContent::from(second)))
            .await
            .and_then(|response| response.check())
            .map_err(|e| StorageError::Transaction(format!("Failed to update user pair: {}", e)))?;

        let first = self.get_user(&first_id).await?;
        let second = self.get_user(&second_id).await?;
        match (first, second) {
            (Some(first), Some(second)) => Ok((first, second)),
            _ => Err(StorageError::NotFound(format!(
                "User pair {} / {} vanished after update",
                first_id, second_id
            ))),
        }
    }

    async fn list_users(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<User>, StorageError> {
        let records: Vec<SurrealUser> = self
            .client
            .select("user")
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list users: {}", e)))?;

        let mut users: Vec<User> = records.into_iter().map(User::from).collect();
        sort_store_order(&mut users);

        let iter = users.into_iter().skip(offset.unwrap_or(0));
        Ok(match limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        })
    }

    async fn list_users_excluding(
        &self,
        exclude: &[UserId],
        limit: usize,
    ) -> Result<Vec<User>, StorageError> {
        let excluded: Vec<RecordId> = exclude.iter().map(user_record).collect();
        let mut response = self
            .client
            .query("SELECT * FROM user WHERE id NOT IN $exclude")
            .bind(("exclude", excluded))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list users: {}", e)))?;

        let records: Vec<SurrealUser> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract users: {}", e)))?;

        let mut users: Vec<User> = records.into_iter().map(User::from).collect();
        sort_store_order(&mut users);
        users.truncate(limit);
        Ok(users)
    }
}
