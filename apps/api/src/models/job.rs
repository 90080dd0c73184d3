use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::{Lifecycle, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
    Archived,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Published => "published",
            JobStatus::Closed => "closed",
            JobStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Lifecycle for JobStatus {
    fn can_transition_to(&self, next: &Self) -> bool {
        use JobStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Draft, Published) | (Published, Closed) | (Draft | Published | Closed, Archived)
        )
    }

    fn is_terminal(&self) -> bool {
        *self == JobStatus::Archived
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Salary {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    pub status: JobStatus,
    pub job_type: String,
    pub location: String,
    pub salary: Salary,
    pub description: String,
    pub application_count: u32,
    pub created_date: NaiveDate,
    pub published_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

impl Record for Job {
    type Status = JobStatus;

    const BOARD: &'static str = "jobs";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "department",
        "status",
        "job_type",
        "location",
        "created_date",
    ];
    const SEARCHABLE: &'static [&'static str] = &["title", "department"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "title" => Some(Cow::Borrowed(&self.title)),
            "department" => Some(Cow::Borrowed(&self.department)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "job_type" => Some(Cow::Borrowed(&self.job_type)),
            "location" => Some(Cow::Borrowed(&self.location)),
            "created_date" => Some(Cow::Owned(self.created_date.to_string())),
            _ => None,
        }
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }

    /// Publishing stamps `published_date` the first time a job goes live.
    fn with_status(&self, status: JobStatus) -> Self {
        let published_date = match (status, self.published_date) {
            (JobStatus::Published, None) => Some(chrono::Utc::now().date_naive()),
            (_, existing) => existing,
        };
        Self {
            status,
            published_date,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use JobStatus::*;

    #[test]
    fn test_job_lifecycle() {
        assert!(Draft.can_transition_to(&Published));
        assert!(Published.can_transition_to(&Closed));
        assert!(Closed.can_transition_to(&Archived));
        assert!(!Closed.can_transition_to(&Published));
        assert!(!Archived.can_transition_to(&Draft));
        assert!(Archived.is_terminal());
    }

    #[test]
    fn test_publish_stamps_date_once() {
        let job = Job {
            id: "JOB-9".to_string(),
            title: "Data Engineer".to_string(),
            department: "Engineering".to_string(),
            status: Draft,
            job_type: "Full-time".to_string(),
            location: "Remote".to_string(),
            salary: Salary {
                min: 1,
                max: 2,
                currency: "USD".to_string(),
            },
            description: String::new(),
            application_count: 0,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            published_date: None,
            deadline: None,
        };
        let published = job.with_status(Published);
        assert!(published.published_date.is_some());
        assert_eq!(published.title, job.title);

        let closed = published.with_status(Closed);
        assert_eq!(closed.published_date, published.published_date);
    }
}
