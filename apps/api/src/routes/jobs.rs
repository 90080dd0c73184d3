use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Salary;
use crate::models::{Job, JobStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub department: String,
    pub job_type: String,
    pub location: String,
    pub salary: Salary,
    pub description: String,
    pub deadline: Option<NaiveDate>,
}

/// POST /api/v1/jobs
/// New jobs always start as drafts; publishing goes through the status endpoint.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    state
        .settings
        .read()
        .await
        .validate_job_text(&req.title, &req.description)?;

    if req.salary.min > req.salary.max {
        return Err(AppError::Validation(
            "Minimum salary cannot exceed maximum salary".to_string(),
        ));
    }

    let today = Utc::now().date_naive();
    if req.deadline.is_some_and(|d| d < today) {
        return Err(AppError::Validation(
            "Deadline cannot be in the past".to_string(),
        ));
    }

    let job = Job {
        id: new_job_id(),
        title: req.title.trim().to_string(),
        department: req.department,
        status: JobStatus::Draft,
        job_type: req.job_type,
        location: req.location,
        salary: req.salary,
        description: req.description.trim().to_string(),
        application_count: 0,
        created_date: today,
        published_date: None,
        deadline: req.deadline,
    };

    state.jobs.lock().await.insert(job.clone());
    Ok((StatusCode::CREATED, Json(job)))
}

fn new_job_id() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("JOB-{}", &raw[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_id_shape() {
        let id = new_job_id();
        assert!(id.starts_with("JOB-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_ne!(new_job_id(), id);
    }
}
