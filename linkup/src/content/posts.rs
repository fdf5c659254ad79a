//! Post publishing and owner edits

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::resolve::{post_view, post_views};
use crate::engagement::ensure_owner;
use crate::models::{Post, PostId, PostPatch, PostView, UserId};
use crate::storage::{PostStore, UserStore};
use crate::{LinkupError, Result};

#[derive(Debug, Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, users }
    }

    async fn load(&self, id: &PostId) -> Result<Post> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("Post not found".to_string()))
    }

    /// Publish a post authored by `actor`. Content is trimmed and must not be empty.
    pub async fn create(&self, actor: &UserId, content: &str, image: Option<String>) -> Result<PostView> {
        let content = content.trim();
        if content.is_empty() {
            return Err(LinkupError::Validation(
                "Post content is required".to_string(),
            ));
        }

        let post = self
            .posts
            .create_post(Post::new(actor.clone(), content, image))
            .await?;
        info!(post = %post.id, author = %actor, "Created post");
        post_view(self.users.as_ref(), &post).await
    }

    pub async fn get(&self, id: &PostId) -> Result<PostView> {
        let post = self.load(id).await?;
        post_view(self.users.as_ref(), &post).await
    }

    /// Feed, newest first
    pub async fn list(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<PostView>> {
        let posts = self.posts.list_posts(limit, offset).await?;
        post_views(self.users.as_ref(), &posts).await
    }

    pub async fn update(&self, actor: &UserId, id: &PostId, patch: PostPatch) -> Result<PostView> {
        let mut post = self.load(id).await?;
        ensure_owner(&post, actor, "update this post")?;

        if let Some(content) = &patch.content
            && content.trim().is_empty()
        {
            return Err(LinkupError::Validation(
                "Post content is required".to_string(),
            ));
        }

        patch.apply(&mut post);
        let post = self.posts.update_post(post).await?;
        debug!(post = %post.id, "Updated post");
        post_view(self.users.as_ref(), &post).await
    }

    pub async fn delete(&self, actor: &UserId, id: &PostId) -> Result<()> {
        let post = self.load(id).await?;
        ensure_owner(&post, actor, "delete this post")?;

        if !self.posts.delete_post(id).await? {
            return Err(LinkupError::NotFound("Post not found".to_string()));
        }
        info!(post = %id, "Deleted post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::storage::InMemoryStore;

    async fn setup() -> (PostService, User, User) {
        let store = Arc::new(InMemoryStore::new());
        let ada = store
            .create_user(User::new("Ada", "ada@example.com", "h"))
            .await
            .unwrap();
        let bob = store
            .create_user(User::new("Bob", "bob@example.com", "h"))
            .await
            .unwrap();
        (PostService::new(store.clone(), store), ada, bob)
    }

    #[tokio::test]
    async fn create_trims_and_rejects_blank_content() {
        let (posts, ada, _) = setup().await;

        let view = posts.create(&ada.id, "  hello  ", None).await.unwrap();
        assert_eq!(view.content, "hello");
        assert_eq!(view.author.map(|a| a.name), Some("Ada".to_string()));

        let err = posts.create(&ada.id, "   ", None).await.unwrap_err();
        assert!(matches!(err, LinkupError::Validation(msg) if msg == "Post content is required"));
    }

    #[tokio::test]
    async fn only_the_author_may_edit_or_delete() {
        let (posts, ada, bob) = setup().await;
        let view = posts.create(&ada.id, "hello", None).await.unwrap();

        let patch = PostPatch {
            content: Some("edited".to_string()),
            image: None,
        };
        let err = posts.update(&bob.id, &view.id, patch.clone()).await.unwrap_err();
        assert!(matches!(err, LinkupError::Forbidden(msg) if msg == "Not authorized to update this post"));
        assert!(matches!(
            posts.delete(&bob.id, &view.id).await,
            Err(LinkupError::Forbidden(_))
        ));

        let updated = posts.update(&ada.id, &view.id, patch).await.unwrap();
        assert_eq!(updated.content, "edited");

        posts.delete(&ada.id, &view.id).await.unwrap();
        assert!(matches!(posts.get(&view.id).await, Err(LinkupError::NotFound(_))));
    }

    #[tokio::test]
    async fn feed_is_newest_first() {
        let (posts, ada, bob) = setup().await;
        posts.create(&ada.id, "first", None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        posts.create(&bob.id, "second", None).await.unwrap();

        let feed = posts.list(None, None).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].content, "second");
        assert_eq!(feed[1].content, "first");
    }
}
