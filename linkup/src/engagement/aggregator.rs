//! Likes, comments, shares and job applications

use std::sync::Arc;

use tracing::debug;

use crate::core::resolve::{job_view, post_view};
use crate::models::{Comment, Job, JobId, JobView, Post, PostId, PostView, UserId};
use crate::storage::{JobStore, PostStore, UserStore};
use crate::{LinkupError, Result};

/// Applies engagement actions to posts and job listings.
///
/// Every action reads the document, changes it in memory and writes it back.
/// There is no version check between the read and the write, so two
/// concurrent actions on the same document can overwrite each other.
#[derive(Debug, Clone)]
pub struct EngagementAggregator {
    posts: Arc<dyn PostStore>,
    jobs: Arc<dyn JobStore>,
    users: Arc<dyn UserStore>,
}

impl EngagementAggregator {
    pub fn new(posts: Arc<dyn PostStore>, jobs: Arc<dyn JobStore>, users: Arc<dyn UserStore>) -> Self {
        Self { posts, jobs, users }
    }

    async fn load_post(&self, id: &PostId) -> Result<Post> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("Post not found".to_string()))
    }

    async fn load_job(&self, id: &JobId) -> Result<Job> {
        self.jobs
            .get_job(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("Job not found".to_string()))
    }

    /// Like the post, or remove the like if `actor` already liked it.
    ///
    /// Two concurrent toggles by the same actor may both read the same state
    /// and cancel out to a single change.
    pub async fn toggle_like(&self, post: &PostId, actor: &UserId) -> Result<PostView> {
        let mut doc = self.load_post(post).await?;

        let liked = if doc.likes.contains(actor) {
            doc.likes.remove(actor);
            false
        } else {
            doc.likes.insert(actor.clone());
            true
        };
        doc.touch();
        let doc = self.posts.update_post(doc).await?;

        debug!(post = %post, actor = %actor, liked, "Toggled like");
        post_view(self.users.as_ref(), &doc).await
    }

    /// Append a comment. `content` is expected to be validated by the caller.
    pub async fn add_comment(&self, post: &PostId, actor: &UserId, content: &str) -> Result<PostView> {
        let mut doc = self.load_post(post).await?;

        doc.comments.push(Comment::new(actor.clone(), content));
        doc.touch();
        let doc = self.posts.update_post(doc).await?;

        debug!(post = %post, actor = %actor, "Added comment");
        post_view(self.users.as_ref(), &doc).await
    }

    /// Record a share. Sharing again changes nothing and writes nothing.
    pub async fn share_post(&self, post: &PostId, actor: &UserId) -> Result<PostView> {
        let mut doc = self.load_post(post).await?;

        if doc.shares.insert(actor.clone()) {
            doc.touch();
            doc = self.posts.update_post(doc).await?;
            debug!(post = %post, actor = %actor, "Shared post");
        }

        post_view(self.users.as_ref(), &doc).await
    }

    /// Add `actor` to the applicants. Applying twice is a conflict.
    pub async fn apply_to_job(&self, job: &JobId, actor: &UserId) -> Result<JobView> {
        let mut doc = self.load_job(job).await?;

        if !doc.applicants.insert(actor.clone()) {
            return Err(LinkupError::Conflict(
                "Already applied to this job".to_string(),
            ));
        }
        doc.touch();
        let doc = self.jobs.update_job(doc).await?;

        debug!(job = %job, actor = %actor, "Applied to job");
        job_view(self.users.as_ref(), &doc).await
    }
}
