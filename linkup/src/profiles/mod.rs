//! Profile registration, lookup and self-service edits.

use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{NewUser, ProfilePatch, User, UserId, normalize_email};
use crate::storage::{StorageError, UserStore};
use crate::{LinkupError, Result};

/// Account and profile operations
#[derive(Debug, Clone)]
pub struct ProfileService {
    users: Arc<dyn UserStore>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Create an account. Emails are unique after lower-casing.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        if new_user.name.trim().is_empty() || new_user.email.trim().is_empty() {
            return Err(LinkupError::Validation(
                "Name and email are required".to_string(),
            ));
        }

        let user = User::from(new_user);
        if self.users.find_user_by_email(&user.email).await?.is_some() {
            return Err(LinkupError::Conflict("Email already registered".to_string()));
        }

        let created = self.users.create_user(user).await.map_err(|e| match e {
            StorageError::AlreadyExists(_) => {
                LinkupError::Conflict("Email already registered".to_string())
            }
            other => other.into(),
        })?;

        info!(user = %created.id, "Registered user");
        Ok(created)
    }

    pub async fn get(&self, id: &UserId) -> Result<User> {
        self.users
            .get_user(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("User not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.find_user_by_email(&normalize_email(email)).await?)
    }

    pub async fn list(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<User>> {
        Ok(self.users.list_users(limit, offset).await?)
    }

    /// Apply `patch` to `id`'s profile. Only the user themselves may do this.
    pub async fn update_profile(&self, actor: &UserId, id: &UserId, patch: ProfilePatch) -> Result<User> {
        let mut user = self.get(id).await?;
        if actor != id {
            return Err(LinkupError::Forbidden(
                "Not authorized to update this profile".to_string(),
            ));
        }

        patch.apply(&mut user);
        let updated = self.users.update_user(user).await?;
        debug!(user = %updated.id, "Updated profile");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve::resolve_summaries;
    use crate::storage::InMemoryStore;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            title: Some("Engineer".to_string()),
            location: None,
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_case_insensitively() {
        let service = ProfileService::new(Arc::new(InMemoryStore::new()));
        let ada = service.register(new_user("Ada", "ada@example.com")).await.unwrap();
        assert_eq!(ada.title, "Engineer");

        let err = service
            .register(new_user("Imposter", "ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LinkupError::Conflict(msg) if msg == "Email already registered"));

        let found = service.find_by_email(" Ada@Example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(ada.id));
    }

    #[tokio::test]
    async fn only_the_user_may_update_their_profile() {
        let service = ProfileService::new(Arc::new(InMemoryStore::new()));
        let ada = service.register(new_user("Ada", "ada@example.com")).await.unwrap();
        let bob = service.register(new_user("Bob", "bob@example.com")).await.unwrap();

        let patch = ProfilePatch {
            bio: Some("hello".to_string()),
            ..Default::default()
        };
        let err = service
            .update_profile(&bob.id, &ada.id, patch.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, LinkupError::Forbidden(_)));

        let updated = service.update_profile(&ada.id, &ada.id, patch).await.unwrap();
        assert_eq!(updated.bio, "hello");
    }

    #[tokio::test]
    async fn resolution_drops_missing_users() {
        let store = Arc::new(InMemoryStore::new());
        let service = ProfileService::new(store.clone());
        let ada = service.register(new_user("Ada", "ada@example.com")).await.unwrap();

        let summaries = resolve_summaries(
            store.as_ref(),
            &[ada.id.clone(), UserId::from("gone")],
        )
        .await
        .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, ada.id);
    }
}
