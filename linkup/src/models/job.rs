//! Job listings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdSet, JobId, UserId};

/// Employment type of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Internship")]
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-time" => Ok(JobType::FullTime),
            "Part-time" => Ok(JobType::PartTime),
            "Contract" => Ok(JobType::Contract),
            "Internship" => Ok(JobType::Internship),
            other => Err(format!("Unknown job type: {}", other)),
        }
    }
}

/// Salary range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: Option<u64>,
    pub max: Option<u64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A job listing and its applicants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: JobType,
    pub description: String,
    pub posted_by: UserId,
    /// Monotonic; applications are never withdrawn
    #[serde(default)]
    pub applicants: IdSet<UserId>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary: Option<Salary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn applicants_count(&self) -> usize {
        self.applicants.len()
    }

    /// Every user referenced by the listing
    pub fn referenced_users(&self) -> Vec<UserId> {
        let mut ids = vec![self.posted_by.clone()];
        ids.extend(self.applicants.iter().cloned());
        ids
    }
}

/// Input for publishing a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: JobType,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary: Option<Salary>,
}

impl NewJob {
    /// Build the stored document for `posted_by`
    pub fn into_job(self, posted_by: UserId) -> Job {
        let now = Utc::now();
        Job {
            id: JobId::generate(),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            job_type: self.job_type,
            description: self.description,
            posted_by,
            applicants: IdSet::new(),
            requirements: self.requirements,
            salary: self.salary,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Owner-editable listing fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<Salary>,
}

impl JobPatch {
    pub fn apply(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title.trim().to_string();
        }
        if let Some(company) = self.company {
            job.company = company.trim().to_string();
        }
        if let Some(location) = self.location {
            job.location = location.trim().to_string();
        }
        if let Some(job_type) = self.job_type {
            job.job_type = job_type;
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if let Some(requirements) = self.requirements {
            job.requirements = requirements;
        }
        if let Some(salary) = self.salary {
            job.salary = Some(salary);
        }
        job.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_uses_display_names_on_the_wire() {
        assert_eq!(
            serde_json::to_value(JobType::PartTime).unwrap(),
            serde_json::json!("Part-time")
        );
        assert_eq!("Internship".parse::<JobType>().unwrap(), JobType::Internship);
        assert!("Freelance".parse::<JobType>().is_err());
    }

    #[test]
    fn salary_currency_defaults_to_usd() {
        let salary: Salary = serde_json::from_str(r#"{"min": 100, "max": 200}"#).unwrap();
        assert_eq!(salary.currency, "USD");
    }
}
