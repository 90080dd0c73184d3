use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::{Lifecycle, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    New,
    Screened,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "New",
            ApplicationStatus::Screened => "Screened",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Lifecycle for ApplicationStatus {
    fn can_transition_to(&self, next: &Self) -> bool {
        use ApplicationStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (New, Screened)
                | (New, Shortlisted)
                | (New, Rejected)
                | (Screened, Shortlisted)
                | (Screened, Rejected)
        )
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Shortlisted | ApplicationStatus::Rejected
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub email: String,
    pub applied_job_id: String,
    /// Title of the applied job, resolved at seed time.
    pub job_title: String,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    pub resume_summary: String,
    pub answers: Vec<Answer>,
    pub fit_score: Option<u32>,
    pub ai_reasons: Vec<String>,
    pub screened: bool,
}

impl Record for Application {
    type Status = ApplicationStatus;

    const BOARD: &'static str = "applications";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "applied_job_id",
        "job_title",
        "status",
        "applied_date",
        "fit_score",
        "screened",
    ];
    const SEARCHABLE: &'static [&'static str] = &["name", "email", "job_title"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "applied_job_id" => Some(Cow::Borrowed(&self.applied_job_id)),
            "job_title" => Some(Cow::Borrowed(&self.job_title)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "applied_date" => Some(Cow::Owned(self.applied_date.to_string())),
            "fit_score" => self.fit_score.map(|s| Cow::Owned(s.to_string())),
            "screened" => Some(Cow::Borrowed(if self.screened { "true" } else { "false" })),
            _ => None,
        }
    }

    fn status(&self) -> &ApplicationStatus {
        &self.status
    }

    fn with_status(&self, status: ApplicationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    #[test]
    fn test_new_can_skip_screened() {
        assert!(New.can_transition_to(&Shortlisted));
        assert!(New.can_transition_to(&Rejected));
        assert!(New.can_transition_to(&Screened));
    }

    #[test]
    fn test_terminal_states_do_not_go_back() {
        assert!(Shortlisted.is_terminal());
        assert!(!Shortlisted.can_transition_to(&New));
        assert!(!Rejected.can_transition_to(&Shortlisted));
        assert!(Rejected.can_transition_to(&Rejected));
    }

    #[test]
    fn test_status_serializes_as_display_label() {
        assert_eq!(serde_json::to_string(&Screened).unwrap(), "\"Screened\"");
        assert_eq!(Screened.to_string(), "Screened");
    }
}
