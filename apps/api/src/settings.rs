//! Platform settings — the admin knobs that feed screening and job validation.
//! Exported and imported as pretty-printed JSON files.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::{ScreeningPolicy, DEFAULT_THRESHOLD};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformSettings {
    pub site_name: String,
    pub site_description: String,
    pub admin_email: String,
    pub support_email: String,
    pub timezone: String,

    pub min_job_title_length: usize,
    pub max_job_title_length: usize,
    pub min_job_description_length: usize,
    pub max_job_description_length: usize,
    pub application_deadline_days: u32,

    pub ai_screening_enabled: bool,
    pub ai_screening_threshold: u32,

    pub email_notifications: bool,
    pub candidate_application_alerts: bool,
    pub auto_logout_minutes: u32,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            site_name: "AI-Erecruitment".to_string(),
            site_description: "AI-Powered Recruitment Platform".to_string(),
            admin_email: "admin@ai-erecruitment.com".to_string(),
            support_email: "support@ai-erecruitment.com".to_string(),
            timezone: "UTC+0".to_string(),
            min_job_title_length: 5,
            max_job_title_length: 100,
            min_job_description_length: 100,
            max_job_description_length: 2000,
            application_deadline_days: 30,
            ai_screening_enabled: true,
            ai_screening_threshold: DEFAULT_THRESHOLD,
            email_notifications: true,
            candidate_application_alerts: true,
            auto_logout_minutes: 30,
        }
    }
}

impl PlatformSettings {
    pub fn screening_policy(&self) -> ScreeningPolicy {
        ScreeningPolicy {
            enabled: self.ai_screening_enabled,
            threshold: self.ai_screening_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.ai_screening_threshold > 100 {
            return Err(AppError::Validation(
                "ai_screening_threshold must be between 0 and 100".to_string(),
            ));
        }
        if self.min_job_title_length > self.max_job_title_length {
            return Err(AppError::Validation(
                "min_job_title_length cannot exceed max_job_title_length".to_string(),
            ));
        }
        if self.min_job_description_length > self.max_job_description_length {
            return Err(AppError::Validation(
                "min_job_description_length cannot exceed max_job_description_length".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses an uploaded settings file. Missing keys keep their defaults.
    pub fn import(raw: &str) -> Result<Self, AppError> {
        let settings: PlatformSettings = serde_json::from_str(raw).map_err(|e| {
            tracing::warn!("Rejected settings import: {e}");
            AppError::Validation("Error importing settings: Invalid file format".to_string())
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn export(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Internal(e.into()))
    }

    /// Checks a job title and description against the configured bounds.
    pub fn validate_job_text(&self, title: &str, description: &str) -> Result<(), AppError> {
        let title_len = title.trim().chars().count();
        if title_len < self.min_job_title_length || title_len > self.max_job_title_length {
            return Err(AppError::Validation(format!(
                "Job title must be between {} and {} characters",
                self.min_job_title_length, self.max_job_title_length
            )));
        }
        let description_len = description.trim().chars().count();
        if description_len < self.min_job_description_length
            || description_len > self.max_job_description_length
        {
            return Err(AppError::Validation(format!(
                "Job description must be between {} and {} characters",
                self.min_job_description_length, self.max_job_description_length
            )));
        }
        Ok(())
    }
}
