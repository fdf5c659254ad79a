//! Job listing storage implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, RecordId};

use super::base::{SharedStorage, record_key};
use crate::models::{IdSet, Job, JobId, JobType, Salary, UserId};
use crate::storage::errors::StorageError;
use crate::storage::filters::JobFilter;
use crate::storage::traits::JobStore;

/// Internal representation of a Job record for SurrealDB
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct SurrealJob {
    id: RecordId,
    title: String,
    company: String,
    location: String,
    job_type: JobType,
    description: String,
    posted_by: UserId,
    #[serde(default)]
    applicants: IdSet<UserId>,
    #[serde(default)]
    requirements: Vec<String>,
    #[serde(default)]
    salary: Option<Salary>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct JobContent {
    title: String,
    company: String,
    location: String,
    job_type: JobType,
    description: String,
    posted_by: UserId,
    applicants: IdSet<UserId>,
    requirements: Vec<String>,
    salary: Option<Salary>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Job> for JobContent {
    fn from(job: Job) -> Self {
        Self {
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            description: job.description,
            posted_by: job.posted_by,
            applicants: job.applicants,
            requirements: job.requirements,
            salary: job.salary,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl From<SurrealJob> for Job {
    fn from(record: SurrealJob) -> Self {
        Self {
            id: JobId::from(record_key(&record.id)),
            title: record.title,
            company: record.company,
            location: record.location,
            job_type: record.job_type,
            description: record.description,
            posted_by: record.posted_by,
            applicants: record.applicants,
            requirements: record.requirements,
            salary: record.salary,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl<C> JobStore for SharedStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_job(&self, job: Job) -> Result<Job, StorageError> {
        let id = job.id.clone();
        let created: Option<SurrealJob> = self
            .client
            .create(("job", id.as_str()))
            .content(JobContent::from(job))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to create job: {}", e)))?;

        created
            .map(Job::from)
            .ok_or_else(|| StorageError::Other(format!("No job created for {}", id)))
    }

    async fn get_job(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        let job: Option<SurrealJob> = self
            .client
            .select(("job", id.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to get job: {}", e)))?;

        Ok(job.map(Job::from))
    }

    async fn update_job(&self, job: Job) -> Result<Job, StorageError> {
        let id = job.id.clone();
        let updated: Option<SurrealJob> = self
            .client
            .update(("job", id.as_str()))
            .content(JobContent::from(job))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to update job: {}", e)))?;

        updated
            .map(Job::from)
            .ok_or_else(|| StorageError::NotFound(format!("Job with ID {} not found", id)))
    }

    async fn delete_job(&self, id: &JobId) -> Result<bool, StorageError> {
        let deleted: Option<SurrealJob> = self
            .client
            .delete(("job", id.as_str()))
            .await
            .map_err(|e| StorageError::Query(format!("Failed to delete job: {}", e)))?;

        Ok(deleted.is_some())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, StorageError> {
        let mut conditions = Vec::new();
        if filter.job_type.is_some() {
            conditions.push("job_type = $job_type");
        }
        if filter.location.is_some() {
            conditions.push("string::contains(string::lowercase(location), $location)");
        }
        if filter.company.is_some() {
            conditions.push("string::contains(string::lowercase(company), $company)");
        }

        let mut query = "SELECT * FROM job".to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        let mut request = self.client.query(query);
        if let Some(job_type) = filter.job_type {
            request = request.bind(("job_type", job_type));
        }
        if let Some(location) = &filter.location {
            request = request.bind(("location", location.to_lowercase()));
        }
        if let Some(company) = &filter.company {
            request = request.bind(("company", company.to_lowercase()));
        }

        let mut response = request
            .await
            .map_err(|e| StorageError::Query(format!("Failed to list jobs: {}", e)))?;
        let records: Vec<SurrealJob> = response
            .take(0)
            .map_err(|e| StorageError::Query(format!("Failed to extract jobs: {}", e)))?;

        let mut jobs: Vec<Job> = records.into_iter().map(Job::from).collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }
}
