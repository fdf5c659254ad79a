//! Job listings and owner edits

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::resolve::{job_view, job_views};
use crate::engagement::ensure_owner;
use crate::models::{Job, JobId, JobPatch, JobView, NewJob, UserId};
use crate::storage::{JobFilter, JobStore, UserStore};
use crate::{LinkupError, Result};

#[derive(Debug, Clone)]
pub struct JobService {
    jobs: Arc<dyn JobStore>,
    users: Arc<dyn UserStore>,
}

impl JobService {
    pub fn new(jobs: Arc<dyn JobStore>, users: Arc<dyn UserStore>) -> Self {
        Self { jobs, users }
    }

    async fn load(&self, id: &JobId) -> Result<Job> {
        self.jobs
            .get_job(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("Job not found".to_string()))
    }

    pub async fn create(&self, actor: &UserId, new_job: NewJob) -> Result<JobView> {
        if new_job.title.trim().is_empty() || new_job.company.trim().is_empty() {
            return Err(LinkupError::Validation(
                "Job title and company are required".to_string(),
            ));
        }

        let job = self.jobs.create_job(new_job.into_job(actor.clone())).await?;
        info!(job = %job.id, posted_by = %actor, "Created job listing");
        job_view(self.users.as_ref(), &job).await
    }

    pub async fn get(&self, id: &JobId) -> Result<JobView> {
        let job = self.load(id).await?;
        job_view(self.users.as_ref(), &job).await
    }

    /// Listings matching `filter`, newest first
    pub async fn list(&self, filter: &JobFilter) -> Result<Vec<JobView>> {
        let jobs = self.jobs.list_jobs(filter).await?;
        job_views(self.users.as_ref(), &jobs).await
    }

    pub async fn update(&self, actor: &UserId, id: &JobId, patch: JobPatch) -> Result<JobView> {
        let mut job = self.load(id).await?;
        ensure_owner(&job, actor, "update this job")?;

        patch.apply(&mut job);
        let job = self.jobs.update_job(job).await?;
        debug!(job = %job.id, "Updated job listing");
        job_view(self.users.as_ref(), &job).await
    }

    pub async fn delete(&self, actor: &UserId, id: &JobId) -> Result<()> {
        let job = self.load(id).await?;
        ensure_owner(&job, actor, "delete this job")?;

        if !self.jobs.delete_job(id).await? {
            return Err(LinkupError::NotFound("Job not found".to_string()));
        }
        info!(job = %id, "Deleted job listing");
        Ok(())
    }
}
