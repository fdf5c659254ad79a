//! Turn stored documents into views with user references resolved.
//!
//! Every helper does one batch `get_users` call for all the ids it needs.

use crate::Result;
use crate::models::{
    Job, JobView, Message, MessageView, Post, PostView, UserDirectory, UserId, UserSummary,
};
use crate::storage::UserStore;

/// Load display fields for every id in one lookup.
///
/// Ids whose user no longer exists are simply absent from the directory.
pub async fn load_directory<I>(users: &dyn UserStore, ids: I) -> Result<UserDirectory>
where
    I: IntoIterator<Item = UserId>,
{
    let mut ids: Vec<UserId> = ids.into_iter().collect();
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return Ok(UserDirectory::default());
    }
    let found = users.get_users(&ids).await?;
    Ok(UserDirectory::from_users(found.iter()))
}

/// Resolve an id list to summaries, keeping the given order
pub async fn resolve_summaries(users: &dyn UserStore, ids: &[UserId]) -> Result<Vec<UserSummary>> {
    let directory = load_directory(users, ids.iter().cloned()).await?;
    Ok(directory.resolve_all(ids))
}

pub async fn post_view(users: &dyn UserStore, post: &Post) -> Result<PostView> {
    let directory = load_directory(users, post.referenced_users()).await?;
    Ok(PostView::resolve(post, &directory))
}

pub async fn post_views(users: &dyn UserStore, posts: &[Post]) -> Result<Vec<PostView>> {
    let directory = load_directory(users, posts.iter().flat_map(Post::referenced_users)).await?;
    Ok(posts
        .iter()
        .map(|post| PostView::resolve(post, &directory))
        .collect())
}

pub async fn job_view(users: &dyn UserStore, job: &Job) -> Result<JobView> {
    let directory = load_directory(users, job.referenced_users()).await?;
    Ok(JobView::resolve(job, &directory))
}

pub async fn job_views(users: &dyn UserStore, jobs: &[Job]) -> Result<Vec<JobView>> {
    let directory = load_directory(users, jobs.iter().flat_map(Job::referenced_users)).await?;
    Ok(jobs.iter().map(|job| JobView::resolve(job, &directory)).collect())
}

pub async fn message_views(users: &dyn UserStore, messages: &[Message]) -> Result<Vec<MessageView>> {
    let directory = load_directory(
        users,
        messages
            .iter()
            .flat_map(|m| [m.sender.clone(), m.receiver.clone()]),
    )
    .await?;
    Ok(messages
        .iter()
        .map(|message| MessageView::resolve(message, &directory))
        .collect())
}
