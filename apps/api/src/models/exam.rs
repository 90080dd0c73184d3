use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::record::{Lifecycle, Record};

/// Recruiter decision on an exam result. This is the mutable status of the row;
/// the graded outcome (`ExamResult::status`) is read-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Undecided,
    Shortlisted,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Undecided => "undecided",
            Decision::Shortlisted => "shortlisted",
            Decision::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Lifecycle for Decision {
    fn can_transition_to(&self, next: &Self) -> bool {
        self == next || *self == Decision::Undecided
    }

    fn is_terminal(&self) -> bool {
        *self != Decision::Undecided
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    Passed,
    Failed,
    Pending,
}

impl ExamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::Passed => "passed",
            ExamStatus::Failed => "failed",
            ExamStatus::Pending => "pending",
        }
    }
}

/// Score band used by the score-range facet.
pub fn score_band(percentage: u32) -> &'static str {
    match percentage {
        0..=50 => "0-50",
        51..=75 => "50-75",
        _ => "75-100",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamResult {
    pub id: String,
    pub name: String,
    pub email: String,
    pub exam: String,
    pub job_role: String,
    /// Lower-case role family for the job-role facet ("frontend", "backend", ...).
    pub track: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub status: ExamStatus,
    pub decision: Decision,
    pub submitted_at: DateTime<Utc>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
}

impl Record for ExamResult {
    type Status = Decision;

    const BOARD: &'static str = "exam-results";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "exam",
        "job_role",
        "track",
        "status",
        "decision",
        "score_range",
    ];
    const SEARCHABLE: &'static [&'static str] = &["name", "email", "exam"];
    const GROUP_FIELD: &'static str = "status";

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "exam" => Some(Cow::Borrowed(&self.exam)),
            "job_role" => Some(Cow::Borrowed(&self.job_role)),
            "track" => Some(Cow::Borrowed(&self.track)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "decision" => Some(Cow::Borrowed(self.decision.as_str())),
            "score_range" => Some(Cow::Borrowed(score_band(self.percentage))),
            _ => None,
        }
    }

    fn status(&self) -> &Decision {
        &self.decision
    }

    fn with_status(&self, decision: Decision) -> Self {
        Self {
            decision,
            ..self.clone()
        }
    }
}
