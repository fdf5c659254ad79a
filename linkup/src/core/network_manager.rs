//! Entry point bundling every service of the network.

use std::sync::Arc;

use tracing::debug;

use crate::config::LinkupConfig;
use crate::content::{JobService, PostService};
use crate::engagement::EngagementAggregator;
use crate::messaging::MessageService;
use crate::profiles::ProfileService;
use crate::relationships::RelationshipManager;
use crate::storage::{JobStore, MessageStore, NetworkStore, PostStore, UserStore};
use crate::Result;

/// The primary interface to the network.
///
/// Every service shares the same store. Cloning is cheap and clones share
/// that store.
#[derive(Debug, Clone)]
pub struct NetworkManager {
    storage: Arc<dyn NetworkStore>,
    config: LinkupConfig,
    relationships: RelationshipManager,
    engagement: EngagementAggregator,
    posts: PostService,
    jobs: JobService,
    profiles: ProfileService,
    messages: MessageService,
}

impl NetworkManager {
    /// Build every service over `storage`
    pub fn new(storage: Arc<dyn NetworkStore>, config: LinkupConfig) -> Self {
        let users: Arc<dyn UserStore> = storage.clone();
        let post_store: Arc<dyn PostStore> = storage.clone();
        let job_store: Arc<dyn JobStore> = storage.clone();
        let message_store: Arc<dyn MessageStore> = storage.clone();

        debug!(
            backend = storage.backend_name(),
            accept_mode = %config.relationships.accept_mode,
            "Creating network manager"
        );

        Self {
            relationships: RelationshipManager::new(users.clone(), config.relationships.clone()),
            engagement: EngagementAggregator::new(post_store.clone(), job_store.clone(), users.clone()),
            posts: PostService::new(post_store, users.clone()),
            jobs: JobService::new(job_store, users.clone()),
            profiles: ProfileService::new(users.clone()),
            messages: MessageService::new(message_store, users),
            storage,
            config,
        }
    }

    pub fn relationships(&self) -> &RelationshipManager {
        &self.relationships
    }

    pub fn engagement(&self) -> &EngagementAggregator {
        &self.engagement
    }

    pub fn posts(&self) -> &PostService {
        &self.posts
    }

    pub fn jobs(&self) -> &JobService {
        &self.jobs
    }

    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    pub fn storage(&self) -> &Arc<dyn NetworkStore> {
        &self.storage
    }

    pub fn config(&self) -> &LinkupConfig {
        &self.config
    }

    /// Whether the backing store answers
    pub async fn health_check(&self) -> Result<bool> {
        Ok(self.storage.health_check().await?)
    }

    /// Release the store's connections
    pub async fn shutdown(&self) -> Result<()> {
        self.storage.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::storage::InMemoryStore;

    #[tokio::test]
    async fn services_share_one_store() {
        let network = NetworkManager::new(Arc::new(InMemoryStore::new()), LinkupConfig::default());
        let ada = network
            .profiles()
            .register(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password_hash: "h".to_string(),
                title: None,
                location: None,
            })
            .await
            .unwrap();

        let post = network.posts().create(&ada.id, "hello", None).await.unwrap();
        let liked = network.engagement().toggle_like(&post.id, &ada.id).await.unwrap();
        assert_eq!(liked.likes_count, 1);
        assert!(network.health_check().await.unwrap());
        assert_eq!(network.storage().backend_name(), "memory");
    }
}
