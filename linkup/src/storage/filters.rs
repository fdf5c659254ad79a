//! Filter types for storage queries

use serde::{Deserialize, Serialize};

use crate::models::{Job, JobType};

/// Filter for job listings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Exact employment type
    pub job_type: Option<JobType>,

    /// Case-insensitive substring of the location
    pub location: Option<String>,

    /// Case-insensitive substring of the company name
    pub company: Option<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.job_type.is_none() && self.location.is_none() && self.company.is_none()
    }

    /// Whether `job` satisfies every present criterion
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(job_type) = self.job_type {
            if job.job_type != job_type {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ignore_case(&job.location, location) {
                return false;
            }
        }
        if let Some(company) = &self.company {
            if !contains_ignore_case(&job.company, company) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewJob, UserId};

    fn job(company: &str, location: &str, job_type: JobType) -> Job {
        NewJob {
            title: "Engineer".to_string(),
            company: company.to_string(),
            location: location.to_string(),
            job_type,
            description: "Build things".to_string(),
            requirements: vec![],
            salary: None,
        }
        .into_job(UserId::from("poster"))
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = JobFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&job("Acme", "Berlin", JobType::Contract)));
    }

    #[test]
    fn substring_filters_ignore_case() {
        let filter = JobFilter {
            location: Some("berl".to_string()),
            company: Some("ACME".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&job("Acme Corp", "Berlin", JobType::FullTime)));
        assert!(!filter.matches(&job("Acme Corp", "Paris", JobType::FullTime)));
    }

    #[test]
    fn job_type_must_match_exactly() {
        let filter = JobFilter {
            job_type: Some(JobType::Internship),
            ..Default::default()
        };
        assert!(filter.matches(&job("Acme", "Berlin", JobType::Internship)));
        assert!(!filter.matches(&job("Acme", "Berlin", JobType::PartTime)));
    }
}
